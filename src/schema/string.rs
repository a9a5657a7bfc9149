//! Length-prefixed strings.
//!
//! On the wire, a string is encoded as its length in bytes followed by the
//! UTF-8 encoded content in that many bytes. The length is an unsigned
//! little-endian integer whose width is part of the schema. Strings of this
//! shape are sometimes called Pascal strings after the language that made
//! them popular.

use super::int::unsigned_int;
use super::octets::byte_array;
use crate::base::message::Message;
use std::string::String;
use std::vec::Vec;

//------------ pascal_string -------------------------------------------------

/// Returns a message for a string prefixed by its length.
///
/// The length occupies `prefix` bytes. It counts the bytes of the UTF-8
/// encoded string, not its characters.
///
/// Reading never fails because of the content: byte sequences that are not
/// valid UTF-8 are decoded with invalid parts replaced by
/// `U+FFFD REPLACEMENT CHARACTER`. Such strings do not survive a round
/// trip unchanged, of course.
///
/// # Panics
///
/// The function panics if `prefix` is larger than eight. Writing a string
/// that is too long for the prefix panics as well.
///
/// ```
/// use wireschema::schema::pascal_string;
///
/// let msg = pascal_string(1);
/// assert_eq!(msg.to_vec(&"été".to_string()), b"\x05\xc3\xa9t\xc3\xa9");
/// assert_eq!(msg.parse_slice(b"\x02hi!").unwrap(), "hi");
/// ```
pub fn pascal_string(prefix: usize) -> Message<String> {
    unsigned_int(prefix).then(
        |len| match usize::try_from(*len) {
            Ok(len) => byte_array(len).map(decode, encode),
            Err(_) => Message::fail(format!(
                "string length {} exceeds the address space", len
            )),
        },
        |value: &String| value.len() as u64,
    )
}

fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(res) => res,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

fn encode(value: &String) -> Vec<u8> {
    value.as_bytes().to_vec()
}

//============ Testing =======================================================
