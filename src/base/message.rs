//! Bidirectional schemas.
//!
//! A [`Message<T>`] describes how a value of type `T` looks on the wire. It
//! bundles two operations: reading a `T` from a [`ByteSource`] and writing
//! a `T` into a [`Sink`]. Because both directions are part of one value,
//! and because larger messages are put together from smaller ones with the
//! combinators provided here, the two directions cannot drift apart.
//!
//! The combinators are:
//!
//! * [`map`][Message::map] converts between two representations of the
//!   same data,
//! * [`then`][Message::then] picks the schema for the rest of the data
//!   based on a value read earlier, which is how length-prefixed data
//!   works,
//! * [`ensure`][Message::ensure] and [`ensure_with`][Message::ensure_with]
//!   attach an invariant that decoded values have to uphold.
//!
//! The leaf schemas live in the [schema][crate::schema] module.
//!
//! # Round trips
//!
//! For every value `v` produced by reading, writing `v` produces exactly
//! the bytes that were consumed. The primitives and combinators of this
//! crate keep this promise as long as the inverse functions handed to
//! [`map`][Message::map] and [`then`][Message::then] really are inverses
//! and invariant predicates are free of side effects.
//!
//! # Failure
//!
//! Reading fails with a [`ReadError`] when the source runs dry or an
//! invariant rejects a value. The first failure ends the whole read; bytes
//! consumed until then are not given back.
//!
//! Writing cannot fail. Handing a value to `write` that the schema could
//! never have produced when reading, for instance one that breaks an
//! invariant, is a bug in the calling code and causes a panic.

use super::error::ReadError;
use super::sink::Sink;
use super::source::{self, ByteSource};
use crate::utils::config::PREALLOC;
use std::string::String;
use std::sync::Arc;
use std::vec::Vec;
use std::{any, fmt};
use tracing::debug;

//------------ Message -------------------------------------------------------

type ReadOp<T> =
    dyn Fn(&mut dyn ByteSource) -> Result<T, ReadError> + Send + Sync;
type WriteOp<T> = dyn Fn(&T, &mut dyn Sink) + Send + Sync;

/// A schema for values of type `T`.
///
/// A message is built once, typically by composing the primitives from
/// [schema][crate::schema], and can then be used for any number of reads
/// and writes. It holds no state of its own, so cloning is cheap and the
/// same message can be used from several threads at once.
///
/// ```
/// use wireschema::schema::{pascal_string, uint16};
/// use wireschema::source;
///
/// let schema = pascal_string(2);
/// let bytes = schema.to_vec(&"hello".to_string());
/// assert_eq!(bytes, [5, 0, b'h', b'e', b'l', b'l', b'o']);
///
/// let mut source = source::from_slice(&bytes);
/// assert_eq!(schema.read(&mut source).unwrap(), "hello");
///
/// assert_eq!(uint16().parse_slice(&[1, 1]).unwrap(), 257);
/// ```
pub struct Message<T> {
    read: Arc<ReadOp<T>>,
    write: Arc<WriteOp<T>>,
}

impl<T: 'static> Message<T> {
    /// Creates a message from a read and a write operation.
    ///
    /// The operations must agree with each other: `write` has to emit
    /// exactly the bytes `read` consumed when it produced a value.
    pub fn new<R, W>(read: R, write: W) -> Self
    where
        R: Fn(&mut dyn ByteSource) -> Result<T, ReadError>
            + Send
            + Sync
            + 'static,
        W: Fn(&T, &mut dyn Sink) + Send + Sync + 'static,
    {
        Message {
            read: Arc::new(read),
            write: Arc::new(write),
        }
    }

    /// Creates a message for a constant that does not appear on the wire.
    ///
    /// Reading returns a clone of `value` without touching the source,
    /// writing emits nothing.
    pub fn pure(value: T) -> Self
    where
        T: Clone + Send + Sync,
    {
        Message::new(move |_| Ok(value.clone()), |_, _| {})
    }

    /// Creates a message for a computed value that does not appear on the
    /// wire.
    ///
    /// Reading returns the result of `op` without touching the source,
    /// writing emits nothing.
    pub fn value<F>(op: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Message::new(move |_| Ok(op()), |_, _| {})
    }

    /// Creates a message that always fails to read.
    ///
    /// Since no value can ever be read, there is no valid value to write
    /// either.
    ///
    /// # Panics
    ///
    /// Writing through the returned message panics.
    pub fn fail(message: impl Into<String>) -> Self {
        let message = message.into();
        let write_message = message.clone();
        Message::new(
            move |_| Err(ReadError::new(message.as_str())),
            move |_, _| {
                panic!("cannot write through a failing schema: {}",
                       write_message)
            },
        )
    }

    /// Reads a value from the source.
    ///
    /// The source is advanced past every byte consumed, whether reading
    /// succeeds or not.
    pub fn read<S: ByteSource + ?Sized>(
        &self,
        mut source: &mut S,
    ) -> Result<T, ReadError> {
        (self.read)(&mut source)
    }

    /// Reads a value from the beginning of a slice.
    ///
    /// Bytes left over after the value are ignored.
    pub fn parse_slice(&self, slice: &[u8]) -> Result<T, ReadError> {
        self.read(&mut source::from_slice(slice))
    }

    /// Writes a value into the sink.
    ///
    /// # Panics
    ///
    /// The method panics if `value` breaks an invariant of the message.
    pub fn write_to<K: Sink + ?Sized>(&self, value: &T, mut sink: &mut K) {
        (self.write)(value, &mut sink)
    }

    /// Prepares writing a value.
    ///
    /// Nothing is emitted until the returned [`Emit`] is given a sink. This
    /// makes it possible to decide what to write before deciding where to.
    pub fn write(&self, value: T) -> Emit<T> {
        Emit {
            message: self.clone(),
            value,
        }
    }

    /// Writes a value into a new vector.
    ///
    /// # Panics
    ///
    /// The method panics if `value` breaks an invariant of the message.
    pub fn to_vec(&self, value: &T) -> Vec<u8> {
        let mut res = Vec::with_capacity(PREALLOC.default());
        self.write_to(value, &mut res);
        res
    }
}

//--- Combinators

impl<T: 'static> Message<T> {
    /// Converts the message into one for a different type.
    ///
    /// When reading, `op` is applied to the value read by `self`. Failures
    /// pass through unchanged. When writing, `inverse` turns the given
    /// value back into a `T` which is then written by `self`.
    ///
    /// The `inverse` has to undo `op` for every value `self` can read.
    /// This is not checked.
    pub fn map<U, F, G>(self, op: F, inverse: G) -> Message<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
        G: Fn(&U) -> T + Send + Sync + 'static,
    {
        let Message { read, write } = self;
        Message::new(
            move |source| read(source).map(&op),
            move |value, sink| write(&inverse(value), sink),
        )
    }

    /// Continues with a message chosen by the value read so far.
    ///
    /// When reading, a `T` is read first. If that fails, so does the whole
    /// read. Otherwise, `op` is called with the `T` to produce the message
    /// for the `U`, which is then read from the same source, picking up
    /// right where the `T` ended.
    ///
    /// When writing, `inverse` recovers the `T` from the `U`. The `T` is
    /// written first and then the `U` through the message `op` produces
    /// for that `T`.
    ///
    /// This is how data is read whose shape depends on earlier data. A
    /// length-prefixed byte sequence, for example, reads the length and
    /// then continues with a byte array of that length:
    ///
    /// ```
    /// use wireschema::schema::{byte_array, uint8};
    ///
    /// let blob = uint8().then(
    ///     |len| byte_array(usize::from(*len)),
    ///     |bytes: &Vec<u8>| bytes.len() as u8,
    /// );
    /// assert_eq!(blob.parse_slice(b"\x02abc").unwrap(), b"ab");
    /// assert_eq!(blob.to_vec(&b"xyz".to_vec()), b"\x03xyz");
    /// ```
    pub fn then<U, F, G>(self, op: F, inverse: G) -> Message<U>
    where
        U: 'static,
        F: Fn(&T) -> Message<U> + Send + Sync + 'static,
        G: Fn(&U) -> T + Send + Sync + 'static,
    {
        let Message { read, write } = self;
        let op = Arc::new(op);
        let read_op = op.clone();
        Message::new(
            move |source| {
                let head = read(source)?;
                read_op(&head).read(source)
            },
            move |value, sink| {
                let head = inverse(value);
                write(&head, sink);
                op(&head).write_to(value, sink)
            },
        )
    }

    /// Attaches an invariant to the message.
    ///
    /// After a value has been read successfully, `predicate` is asked
    /// whether it is acceptable. If not, reading fails with a message
    /// naming the value. The bytes the value was read from stay consumed.
    ///
    /// Since the predicate sees the complete value, an invariant on a
    /// record can relate several of its fields to each other.
    ///
    /// # Panics
    ///
    /// Writing a value the predicate rejects panics.
    pub fn ensure<P>(self, predicate: P) -> Self
    where
        T: fmt::Debug,
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.ensure_with(predicate, |value| {
            ReadError::invariant(value).into_message()
        })
    }

    /// Attaches an invariant with a custom error message to the message.
    ///
    /// This is the same as [`ensure`][Self::ensure] except that the
    /// message of the error for a rejected value is created by `message`.
    ///
    /// # Panics
    ///
    /// Writing a value the predicate rejects panics.
    pub fn ensure_with<P, M>(self, predicate: P, message: M) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
        M: Fn(&T) -> String + Send + Sync + 'static,
    {
        let Message { read, write } = self;
        let predicate = Arc::new(predicate);
        let message = Arc::new(message);
        let read_predicate = predicate.clone();
        let read_message = message.clone();
        Message::new(
            move |source| {
                let value = read(source)?;
                if read_predicate(&value) {
                    Ok(value)
                } else {
                    let err = ReadError::new(read_message(&value));
                    debug!("invariant rejected value: {}", err);
                    Err(err)
                }
            },
            move |value, sink| {
                if !predicate(value) {
                    panic!(
                        "attempt to write a value breaking an invariant: {}",
                        message(value)
                    );
                }
                write(value, sink)
            },
        )
    }
}

//--- Clone and Debug

impl<T> Clone for Message<T> {
    fn clone(&self) -> Self {
        Message {
            read: self.read.clone(),
            write: self.write.clone(),
        }
    }
}

impl<T> fmt::Debug for Message<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Message<{}>", any::type_name::<T>())
    }
}

//------------ Emit ----------------------------------------------------------

/// A value waiting to be written.
///
/// This is returned by [`Message::write`]. It pairs a value with the
/// message describing it, and writes it once handed a sink. The same
/// `Emit` can be written into any number of sinks.
#[must_use = "nothing is written until a sink is attached"]
#[derive(Clone, Debug)]
pub struct Emit<T> {
    message: Message<T>,
    value: T,
}

impl<T: 'static> Emit<T> {
    /// Writes the value into the sink.
    ///
    /// # Panics
    ///
    /// The method panics if the value breaks an invariant of the message.
    pub fn emit<K: Sink + ?Sized>(&self, sink: &mut K) {
        self.message.write_to(&self.value, sink)
    }

    /// Writes the value into a new vector.
    ///
    /// # Panics
    ///
    /// The method panics if the value breaks an invariant of the message.
    pub fn to_vec(&self) -> Vec<u8> {
        self.message.to_vec(&self.value)
    }

    /// Returns a reference to the value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Converts the emit back into the value.
    pub fn into_value(self) -> T {
        self.value
    }
}

//============ Testing =======================================================
