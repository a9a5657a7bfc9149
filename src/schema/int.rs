//! Unsigned integers.
//!
//! All integers are little-endian: the first byte read is the least
//! significant one. An integer of width `n` thus reads bytes `b0` to
//! `b(n-1)` and produces the sum of `b(i) * 256^i`.
//!
//! There are two general constructors, [`unsigned_int`] for widths of up
//! to eight bytes producing a `u64`, and [`unsigned_big_int`] for widths of
//! up to sixteen bytes producing a `u128`. The shorthands [`uint8`],
//! [`uint16`], [`uint24`], [`uint32`], and [`uint64`] cover the common
//! widths with a fitting Rust type.

use crate::base::error::ReadError;
use crate::base::message::Message;
use crate::base::sink::Sink;
use crate::base::source::ByteSource;
use crate::utils::config::{
    DefMinMax, UNSIGNED_BIG_INT_WIDTH, UNSIGNED_INT_WIDTH,
};

//------------ unsigned_int --------------------------------------------------

/// Returns a message for a little-endian unsigned integer of `width` bytes.
///
/// Reading fails if the source provides fewer than `width` bytes.
///
/// # Panics
///
/// The function panics if `width` is larger than eight. Writing a value
/// that does not fit into `width` bytes panics as well.
pub fn unsigned_int(width: usize) -> Message<u64> {
    check_width("UnsignedInt", width, UNSIGNED_INT_WIDTH);
    Message::new(
        move |source| {
            read_le(source, width, "UnsignedInt").map(|value| value as u64)
        },
        move |value, sink| write_le(u128::from(*value), width, sink),
    )
    .ensure_with(
        move |value| fits(u128::from(*value), width),
        move |value| {
            format!("{} does not fit into UnsignedInt({})", value, width)
        },
    )
}

/// Returns a message for a little-endian unsigned integer of `width` bytes
/// represented as a `u128`.
///
/// This is the wide sibling of [`unsigned_int`] for integers that might
/// not fit into a `u64`.
///
/// # Panics
///
/// The function panics if `width` is larger than sixteen. Writing a value
/// that does not fit into `width` bytes panics as well.
pub fn unsigned_big_int(width: usize) -> Message<u128> {
    check_width("UnsignedBigInt", width, UNSIGNED_BIG_INT_WIDTH);
    Message::new(
        move |source| read_le(source, width, "UnsignedBigInt"),
        move |value, sink| write_le(*value, width, sink),
    )
    .ensure_with(
        move |value| fits(*value, width),
        move |value| {
            format!("{} does not fit into UnsignedBigInt({})", value, width)
        },
    )
}

//------------ Shorthands ----------------------------------------------------

/// Returns a message for a one byte unsigned integer.
pub fn uint8() -> Message<u8> {
    unsigned_int(1).map(|value| value as u8, |value| u64::from(*value))
}

/// Returns a message for a two byte little-endian unsigned integer.
pub fn uint16() -> Message<u16> {
    unsigned_int(2).map(|value| value as u16, |value| u64::from(*value))
}

/// Returns a message for a three byte little-endian unsigned integer.
pub fn uint24() -> Message<u32> {
    unsigned_int(3).map(|value| value as u32, |value| u64::from(*value))
}

/// Returns a message for a four byte little-endian unsigned integer.
pub fn uint32() -> Message<u32> {
    unsigned_int(4).map(|value| value as u32, |value| u64::from(*value))
}

/// Returns a message for an eight byte little-endian unsigned integer.
///
/// This uses [`unsigned_big_int`] underneath.
pub fn uint64() -> Message<u64> {
    unsigned_big_int(8).map(|value| value as u64, |value| u128::from(*value))
}

//------------ Helpers -------------------------------------------------------

fn check_width(name: &str, width: usize, bounds: DefMinMax<usize>) {
    assert!(
        bounds.contains(width),
        "{} width {} outside of supported range {}..={}",
        name, width, bounds.min(), bounds.max()
    );
}

fn read_le(
    source: &mut dyn ByteSource,
    width: usize,
    name: &str,
) -> Result<u128, ReadError> {
    let mut res = 0u128;
    for i in 0..width {
        let byte = match source.next_byte() {
            Some(byte) => byte,
            None => return Err(ReadError::short_input(name, width)),
        };
        res |= u128::from(byte) << (8 * i);
    }
    Ok(res)
}

fn write_le(mut value: u128, width: usize, sink: &mut dyn Sink) {
    for _ in 0..width {
        sink.put(value as u8);
        value >>= 8;
    }
}

fn fits(value: u128, width: usize) -> bool {
    width >= 16 || value >> (8 * width) == 0
}

//============ Testing =======================================================
