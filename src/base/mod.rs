//! Basics.
//!
//! This module provides the machinery all schemas are built upon.
//!
//!
//! ## Sources and Sinks
//!
//! Schemas never deal with buffers directly. Instead, reading pulls bytes
//! one at a time out of a [`ByteSource`] and writing pushes bytes into a
//! [`Sink`]. Both are small traits with implementations for the usual
//! suspects: byte slices, vectors, closures, and types implementing
//! [`std::io::Read`] or [`std::io::Write`]. Octet builders from the
//! [octseq](https://github.com/NLnetLabs/octseq) crate can be used as sinks
//! via [`BuilderSink`][sink::BuilderSink]. The [source] and [sink] modules
//! have the details.
//!
//!
//! ## Messages
//!
//! The central type is [`Message<T>`], a schema describing both how to read
//! a `T` from a source and how to write it into a sink. Messages are
//! immutable once built and are combined into larger messages using the
//! combinators defined in the [message] module.
//!
//! Reading can fail, for instance when the source runs dry or a value
//! breaks an invariant. All such failures are reported via [`ReadError`]
//! defined in the [error] module.
//!
//! [`ByteSource`]: source::ByteSource
//! [`Message<T>`]: message::Message
//! [`ReadError`]: error::ReadError
//! [`Sink`]: sink::Sink

pub mod error;
pub mod message;
pub mod sink;
pub mod source;
