//! Pulling bytes out of somewhere.
//!
//! Reading a message consumes bytes one at a time from a [`ByteSource`].
//! A source is a single-pass cursor: every call to
//! [`next_byte`][ByteSource::next_byte] hands out the next byte and moves
//! on, and once it has returned `None` it stays exhausted.
//!
//! The module provides sources for the usual suspects: closures via
//! [`from_fn`], byte slices via [`from_slice`] (which is simply an
//! [`octseq::Parser`]), iterators via [`from_iter`], and anything
//! implementing [`std::io::Read`] via [`ReaderSource`]. With the `bytes`
//! feature, any [`bytes::Buf`] can be read through [`BufSource`].
//!
//! [`bytes::Buf`]: https://docs.rs/bytes/latest/bytes/trait.Buf.html

use octseq::parse::Parser;
use std::io;
use tracing::debug;

//------------ ByteSource ----------------------------------------------------

/// A pull-based, single-pass provider of bytes.
///
/// Sources must not be shared between independent reads. Each read session
/// should get its own, freshly created source.
pub trait ByteSource {
    /// Returns the next byte or `None` if the source is exhausted.
    ///
    /// Once `None` has been returned, all further calls must return `None`
    /// as well.
    fn next_byte(&mut self) -> Option<u8>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn next_byte(&mut self) -> Option<u8> {
        (**self).next_byte()
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn next_byte(&mut self) -> Option<u8> {
        (**self).next_byte()
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> ByteSource for Parser<'a, Octs> {
    fn next_byte(&mut self) -> Option<u8> {
        self.parse_u8().ok()
    }
}

//------------ from_slice ----------------------------------------------------

/// Returns a source reading the bytes of a slice from the start.
///
/// The source is an ordinary [`Parser`], so its position can be inspected
/// after reading.
pub fn from_slice(slice: &[u8]) -> Parser<'_, [u8]> {
    Parser::from_ref(slice)
}

//------------ FnSource ------------------------------------------------------

/// Returns a source calling the given closure for every byte.
pub fn from_fn<F: FnMut() -> Option<u8>>(op: F) -> FnSource<F> {
    FnSource { op, done: false }
}

/// A source produced by a closure.
///
/// This is the most general shape of a source: a function taking no
/// arguments and returning an optional byte. The wrapper makes sure the
/// source stays exhausted once the closure has returned `None`, even if the
/// closure itself would produce more bytes later.
#[derive(Clone, Debug)]
pub struct FnSource<F> {
    op: F,
    done: bool,
}

impl<F: FnMut() -> Option<u8>> ByteSource for FnSource<F> {
    fn next_byte(&mut self) -> Option<u8> {
        if self.done {
            return None;
        }
        let res = (self.op)();
        if res.is_none() {
            self.done = true;
        }
        res
    }
}

//------------ IterSource ----------------------------------------------------

/// Returns a source reading the bytes produced by an iterator.
pub fn from_iter<I>(iter: I) -> IterSource<I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    IterSource { iter: iter.into_iter().fuse() }
}

/// A source atop an iterator of bytes.
#[derive(Clone, Debug)]
pub struct IterSource<I> {
    iter: core::iter::Fuse<I>,
}

impl<I: Iterator<Item = u8>> ByteSource for IterSource<I> {
    fn next_byte(&mut self) -> Option<u8> {
        self.iter.next()
    }
}

//------------ ReaderSource --------------------------------------------------

/// A source reading from an [`io::Read`] implementation.
///
/// The reader is asked for one byte at a time, so wrapping unbuffered
/// readers such as files or sockets in an [`io::BufReader`] first is
/// strongly advisable.
///
/// The first I/O error other than [`io::ErrorKind::Interrupted`] ends the
/// source. The error is kept and can be retrieved through
/// [`take_error`][Self::take_error] after reading has failed, which allows
/// telling a truncated message from a broken transport.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    done: bool,
    error: Option<io::Error>,
}

impl<R: io::Read> ReaderSource<R> {
    /// Creates a new source atop a reader.
    pub fn new(reader: R) -> Self {
        ReaderSource { reader, done: false, error: None }
    }

    /// Returns whether the source has been exhausted.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Takes the I/O error that ended the source, if there was one.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: io::Read> ByteSource for ReaderSource<R> {
    fn next_byte(&mut self) -> Option<u8> {
        if self.done {
            return None;
        }
        let mut buf = [0u8];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => return Some(buf[0]),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => {
                    debug!("byte source ended by I/O error: {}", err);
                    self.done = true;
                    self.error = Some(err);
                    return None;
                }
            }
        }
    }
}

//------------ BufSource -----------------------------------------------------

/// A source atop a [`bytes::Buf`].
///
/// [`bytes::Buf`]: https://docs.rs/bytes/latest/bytes/trait.Buf.html
#[cfg(feature = "bytes")]
#[cfg_attr(docsrs, doc(cfg(feature = "bytes")))]
#[derive(Clone, Debug)]
pub struct BufSource<B>(B);

#[cfg(feature = "bytes")]
impl<B: bytes::Buf> BufSource<B> {
    /// Creates a new source reading the remaining bytes of `buf`.
    pub fn new(buf: B) -> Self {
        BufSource(buf)
    }

    /// Returns the buffer with whatever has not been read yet.
    pub fn into_inner(self) -> B {
        self.0
    }
}

#[cfg(feature = "bytes")]
impl<B: bytes::Buf> ByteSource for BufSource<B> {
    fn next_byte(&mut self) -> Option<u8> {
        if self.0.has_remaining() {
            Some(self.0.get_u8())
        } else {
            None
        }
    }
}

//============ Testing =======================================================
