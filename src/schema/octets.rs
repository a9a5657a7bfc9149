//! Raw byte arrays.

use crate::base::error::ReadError;
use crate::base::message::Message;
use crate::utils::config::PREALLOC;
use std::vec::Vec;

//------------ byte_array ----------------------------------------------------

/// Returns a message for exactly `len` bytes of raw data.
///
/// Reading collects the next `len` bytes from the source into a vector and
/// fails if the source runs out before that. Writing emits the bytes of
/// the vector in order.
///
/// The length is often only known after reading some other part of a
/// message. Combine the array with [`Message::then`] for that.
///
/// # Panics
///
/// Writing a vector that is not exactly `len` bytes long panics.
pub fn byte_array(len: usize) -> Message<Vec<u8>> {
    Message::new(
        move |source| {
            let mut res = Vec::with_capacity(PREALLOC.limit(len));
            for _ in 0..len {
                match source.next_byte() {
                    Some(byte) => res.push(byte),
                    None => {
                        return Err(ReadError::short_input("ByteArray", len))
                    }
                }
            }
            Ok(res)
        },
        |value: &Vec<u8>, sink| sink.put_slice(value),
    )
    .ensure_with(
        move |value| value.len() == len,
        move |value| {
            format!("ByteArray({}) given {} bytes", len, value.len())
        },
    )
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::source;

    #[test]
    fn read() {
        let mut source = source::from_slice(b"foobar");
        assert_eq!(byte_array(3).read(&mut source), Ok(b"foo".to_vec()));
        assert_eq!(byte_array(0).read(&mut source), Ok(Vec::new()));
        assert_eq!(byte_array(3).read(&mut source), Ok(b"bar".to_vec()));
    }

    #[test]
    fn read_short() {
        let err = byte_array(4).parse_slice(b"foo").unwrap_err();
        assert_eq!(err.message(), "Message ended prematurely: ByteArray(4)");
    }

    #[test]
    fn read_huge_length() {
        // Must fail quickly instead of allocating the whole length.
        let err = byte_array(usize::MAX).parse_slice(b"foo").unwrap_err();
        assert!(err.message().contains("ByteArray"));
    }

    #[test]
    fn write() {
        assert_eq!(byte_array(3).to_vec(&b"foo".to_vec()), b"foo");
        assert!(byte_array(0).to_vec(&Vec::new()).is_empty());
    }

    #[test]
    #[should_panic(expected = "ByteArray(3) given 2 bytes")]
    fn write_wrong_length() {
        let _ = byte_array(3).to_vec(&b"fo".to_vec());
    }
}
