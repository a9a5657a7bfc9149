//! The schemas.
//!
//! This module contains the building blocks for messages:
//!
//! * [int] for little-endian unsigned integers,
//! * [octets] for byte arrays of a fixed length,
//! * [string] for length-prefixed strings,
//! * [record] for sequences of named fields, and
//! * [value] for the dynamically typed values of runtime records.
//!
//! The most commonly used items of these modules are re-exported here.

pub mod int;
pub mod octets;
pub mod record;
pub mod string;
pub mod value;

pub use self::int::{
    uint16, uint24, uint32, uint64, uint8, unsigned_big_int, unsigned_int,
};
pub use self::octets::byte_array;
pub use self::record::Record;
pub use self::string::pascal_string;
pub use self::value::{Dynamic, Fields, Value};
