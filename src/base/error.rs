//! The error type for reading messages.

use std::fmt;
use std::string::String;

//------------ ReadError -----------------------------------------------------

/// Reading a value from a byte source failed.
///
/// There is only one kind of failure when reading: the bytes provided by
/// the source did not describe a valid value. The error carries a
/// human-readable diagnostic. As the failure travels outward through
/// records, the names of the enclosing record and field are added to it so
/// that the final message points at the exact place in the schema where
/// reading went wrong.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ReadError {
    message: String,
}

impl ReadError {
    /// Creates a new error with the given diagnostic message.
    pub fn new(message: impl Into<String>) -> Self {
        ReadError { message: message.into() }
    }

    /// Creates an error for a source that ran dry inside a primitive.
    ///
    /// The `primitive` is the name of the schema, `len` the width or length
    /// it was asked to read.
    pub fn short_input(primitive: &str, len: usize) -> Self {
        ReadError::new(format!(
            "Message ended prematurely: {}({})", primitive, len
        ))
    }

    /// Creates the default error for a value rejected by an invariant.
    pub fn invariant<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        ReadError::new(format!("Invariant broken by {:?}", value))
    }

    /// Adds the location of a failing record field to the error.
    ///
    /// The resulting message has the form `(<message>) at <record>.<field>`.
    pub fn at(self, record: &str, field: &str) -> Self {
        ReadError::new(format!("({}) at {}.{}", self.message, record, field))
    }

    /// Returns the diagnostic message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Converts the error into its diagnostic message.
    pub fn into_message(self) -> String {
        self.message
    }
}

//--- From

impl From<String> for ReadError {
    fn from(message: String) -> Self {
        ReadError::new(message)
    }
}

impl From<&str> for ReadError {
    fn from(message: &str) -> Self {
        ReadError::new(message)
    }
}

//--- Display and Error

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ReadError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn short_input() {
        assert_eq!(
            ReadError::short_input("UnsignedInt", 2).message(),
            "Message ended prematurely: UnsignedInt(2)"
        );
    }

    #[test]
    fn invariant() {
        assert_eq!(
            ReadError::invariant(&103u8).to_string(),
            "Invariant broken by 103"
        );
    }

    #[test]
    fn nesting() {
        let err = ReadError::new("boom").at("Inner", "a").at("Outer", "b");
        assert_eq!(err.message(), "((boom) at Inner.a) at Outer.b");
    }
}
