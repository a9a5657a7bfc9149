//! Declarative schemas for binary wire formats.
//!
//! This crate lets you describe a binary format once and get both a parser
//! and a serializer out of that description. The description, called a
//! message, knows how to read a value from a sequence of bytes and how to
//! write the same value back into exactly those bytes. Because both
//! directions come from the same definition, they cannot disagree with each
//! other.
//!
//! Messages are assembled from a handful of primitives – little-endian
//! unsigned integers, byte arrays, length-prefixed strings – using a small
//! set of combinators. Records of named fields are declared via the
//! [`record!`] macro or, if their layout is only known at runtime, via
//! [`schema::Record`].
//!
//! ```
//! use wireschema::record;
//! use wireschema::schema::{pascal_string, uint16, uint8};
//!
//! record! {
//!     #[derive(Debug, PartialEq)]
//!     pub struct CafeState {
//!         pub total_seats: u8 = uint8(),
//!         pub reserved_seats: u8 = uint8(),
//!         pub name: String = pascal_string(1),
//!     }
//! }
//!
//! let cafe = CafeState::message().ensure(|state| {
//!     state.reserved_seats <= state.total_seats
//! });
//!
//! let state = cafe.parse_slice(b"\x04\x03\x04Moka").unwrap();
//! assert_eq!(state.name, "Moka");
//! assert_eq!(cafe.to_vec(&state), b"\x04\x03\x04Moka");
//! assert!(cafe.parse_slice(b"\x03\x04\x00").is_err());
//! ```
//!
//! # Modules
//!
//! * [base] contains the [`Message`] type and its combinators, the traits
//!   for the sources bytes are read from and the sinks they are written
//!   into, and the error type for reading,
//! * [schema] contains the primitive messages and records, and
//! * [utils] contains the limits used by the primitives.
//!
//! # Reference of Feature Flags
//!
//! The following is the complete list of the feature flags available.
//!
//! * `bytes`: Enables reading from any `Buf` and writing into `BytesMut`
//!   from the [bytes](https://github.com/tokio-rs/bytes) crate.
//! * `heapless`: enables the use of the `Vec` type from the
//!   [heapless](https://github.com/japaric/heapless) crate as a sink via
//!   [`BuilderSink`][sink::BuilderSink].
//! * `logging`: adds the
#![cfg_attr(feature = "logging", doc = "  [logging]")]
#![cfg_attr(not(feature = "logging"), doc = "  logging")]
//!   module for setting up a
//!   [tracing-subscriber](https://github.com/tokio-rs/tracing) based
//!   logger.
//! * `smallvec`: enables the use of the `Smallvec` type from the
//!   [smallvec](https://github.com/servo/rust-smallvec) crate as a sink via
//!   [`BuilderSink`][sink::BuilderSink].

#![allow(renamed_and_removed_lints)]
#![allow(clippy::unknown_clippy_lints)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use self::base::error::ReadError;
pub use self::base::message::{Emit, Message};
pub use self::base::sink::{self, Sink};
pub use self::base::source::{self, ByteSource};

pub mod base;
#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub mod logging;
pub mod schema;
pub mod utils;

mod macros;
