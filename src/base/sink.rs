//! Pushing bytes into somewhere.
//!
//! Writing a message emits its bytes one at a time, in order, into a
//! [`Sink`]. A sink cannot refuse a byte: the write direction of a schema
//! has no failure case. Sinks backed by something that can fail, such as a
//! fixed-size buffer or an I/O stream, remember the first failure and drop
//! everything after it. The failure is reported when the sink is finished.

use octseq::builder::{OctetsBuilder, ShortBuf};
use std::io;
use std::vec::Vec;
use tracing::warn;

//------------ Sink ----------------------------------------------------------

/// A push-based consumer of bytes.
pub trait Sink {
    /// Accepts the next byte.
    fn put(&mut self, byte: u8);

    /// Accepts a slice of bytes in order.
    ///
    /// The default implementation calls [`put`][Self::put] for each byte.
    fn put_slice(&mut self, slice: &[u8]) {
        for &byte in slice {
            self.put(byte)
        }
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn put(&mut self, byte: u8) {
        (**self).put(byte)
    }

    fn put_slice(&mut self, slice: &[u8]) {
        (**self).put_slice(slice)
    }
}

impl Sink for Vec<u8> {
    fn put(&mut self, byte: u8) {
        self.push(byte)
    }

    fn put_slice(&mut self, slice: &[u8]) {
        self.extend_from_slice(slice)
    }
}

#[cfg(feature = "bytes")]
#[cfg_attr(docsrs, doc(cfg(feature = "bytes")))]
impl Sink for bytes::BytesMut {
    fn put(&mut self, byte: u8) {
        bytes::BufMut::put_u8(self, byte)
    }

    fn put_slice(&mut self, slice: &[u8]) {
        self.extend_from_slice(slice)
    }
}

//------------ FnSink --------------------------------------------------------

/// Returns a sink calling the given closure for every byte.
pub fn from_fn<F: FnMut(u8)>(op: F) -> FnSink<F> {
    FnSink(op)
}

/// A sink handing every byte to a closure.
#[derive(Clone, Debug)]
pub struct FnSink<F>(F);

impl<F: FnMut(u8)> Sink for FnSink<F> {
    fn put(&mut self, byte: u8) {
        (self.0)(byte)
    }
}

//------------ BuilderSink ---------------------------------------------------

/// A sink appending to an octets builder.
///
/// Any [`OctetsBuilder`] can be used as the target. For builders with a
/// limited capacity, such as [`octseq::array::Array`] or, with the
/// respective features enabled, heapless or small vectors, appending may
/// fail. The sink keeps the first such failure and ignores all further
/// bytes, so that [`finish`][Self::finish] never hands out a partially
/// written message as if it were complete.
#[derive(Clone, Debug)]
pub struct BuilderSink<Target> {
    target: Target,
    error: Option<ShortBuf>,
}

impl<Target: OctetsBuilder> BuilderSink<Target> {
    /// Creates a new sink appending to `target`.
    pub fn new(target: Target) -> Self {
        BuilderSink { target, error: None }
    }

    /// Returns whether appending has failed.
    pub fn is_short(&self) -> bool {
        self.error.is_some()
    }

    /// Returns a reference to the target.
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Finishes writing and returns the target.
    ///
    /// Returns an error if the target ran out of space at some point.
    pub fn finish(self) -> Result<Target, ShortBuf> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.target),
        }
    }
}

impl<Target: OctetsBuilder> Sink for BuilderSink<Target> {
    fn put(&mut self, byte: u8) {
        self.put_slice(&[byte])
    }

    fn put_slice(&mut self, slice: &[u8]) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.target.append_slice(slice) {
            warn!("octets builder ran out of space");
            self.error = Some(err.into());
        }
    }
}

//------------ WriterSink ----------------------------------------------------

/// A sink writing into an [`io::Write`] implementation.
///
/// Like [`BuilderSink`], the sink keeps the first I/O error and drops all
/// bytes after it. The error is returned by [`finish`][Self::finish],
/// which also flushes the writer.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: io::Write> WriterSink<W> {
    /// Creates a new sink atop a writer.
    pub fn new(writer: W) -> Self {
        WriterSink { writer, error: None }
    }

    /// Flushes the writer and returns it.
    pub fn finish(mut self) -> Result<W, io::Error> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: io::Write> Sink for WriterSink<W> {
    fn put(&mut self, byte: u8) {
        self.put_slice(&[byte])
    }

    fn put_slice(&mut self, slice: &[u8]) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.writer.write_all(slice) {
            warn!("writing to sink failed: {}", err);
            self.error = Some(err);
        }
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use octseq::array::Array;

    #[test]
    fn vec() {
        let mut sink = Vec::<u8>::new();
        sink.put(1);
        sink.put_slice(&[2, 3]);
        assert_eq!(sink, [1, 2, 3]);
    }

    #[test]
    fn closure() {
        let mut store = Vec::<u8>::new();
        let mut sink = from_fn(|byte| store.push(byte));
        sink.put(42);
        sink.put_slice(&[0, 1]);
        drop(sink);
        assert_eq!(store, [42, 0, 1]);
    }

    #[test]
    fn builder() {
        let mut sink = BuilderSink::new(Array::<4>::new());
        sink.put_slice(&[1, 2, 3]);
        assert!(!sink.is_short());
        let target = sink.finish().unwrap();
        assert_eq!(AsRef::<[u8]>::as_ref(&target), &[1, 2, 3]);
    }

    #[test]
    fn builder_short() {
        let mut sink = BuilderSink::new(Array::<2>::new());
        sink.put(1);
        sink.put(2);
        sink.put(3);
        sink.put(4);
        assert!(sink.is_short());
        assert_eq!(AsRef::<[u8]>::as_ref(sink.target()), &[1, 2]);
        assert!(sink.finish().is_err());
    }

    #[test]
    fn writer() {
        let mut sink = WriterSink::new(Vec::<u8>::new());
        sink.put_slice(b"abc");
        assert_eq!(sink.finish().unwrap(), b"abc");
    }

    #[cfg(feature = "heapless")]
    #[test]
    fn heapless_builder() {
        let mut sink = BuilderSink::new(heapless::Vec::<u8, 2>::new());
        sink.put_slice(&[1, 2, 3]);
        assert!(sink.finish().is_err());
    }

    #[cfg(feature = "smallvec")]
    #[test]
    fn smallvec_builder() {
        let mut sink = BuilderSink::new(smallvec::SmallVec::<[u8; 2]>::new());
        sink.put_slice(&[1, 2, 3]);
        let target = sink.finish().unwrap();
        assert_eq!(target.as_slice(), &[1, 2, 3]);
        assert!(target.spilled());
    }

    #[cfg(feature = "bytes")]
    #[test]
    fn bytes_mut() {
        let mut sink = bytes::BytesMut::new();
        sink.put(7);
        sink.put_slice(&[8]);
        assert_eq!(AsRef::<[u8]>::as_ref(&sink), &[7, 8]);
    }
}
