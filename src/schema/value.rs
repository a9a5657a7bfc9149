//! Dynamically typed values.
//!
//! Records assembled at runtime through [`Record`] cannot know the Rust
//! types of their fields. Their values are represented by [`Fields`], an
//! ordered list of field names and [`Value`]s.
//!
//! Any message for a type implementing [`Dynamic`] can be turned into a
//! message for [`Value`] via [`Message::dynamic`].
//!
//! [`Record`]: super::record::Record

use crate::base::message::Message;
use std::string::String;
use std::vec::Vec;
use std::{any, fmt, slice};

//------------ Value ---------------------------------------------------------

/// A value of any of the types the crate’s schemas produce.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Value {
    /// An unsigned integer of up to 64 bits.
    Int(u64),

    /// An unsigned integer of up to 128 bits.
    BigInt(u128),

    /// Raw bytes.
    Octets(Vec<u8>),

    /// A string.
    Text(String),

    /// A nested record.
    Record(Fields),
}

impl Value {
    /// Returns a short name for the kind of value for diagnostics.
    pub fn kind(&self) -> &'static str {
        match *self {
            Value::Int(_) => "integer",
            Value::BigInt(_) => "big integer",
            Value::Octets(_) => "octets",
            Value::Text(_) => "text",
            Value::Record(_) => "record",
        }
    }
}

//--- From

macro_rules! value_from {
    ( $( $type:ty => $variant:ident, )* ) => {
        $(
            impl From<$type> for Value {
                fn from(value: $type) -> Self {
                    Value::$variant(value.into())
                }
            }
        )*
    }
}

value_from! {
    u8 => Int,
    u16 => Int,
    u32 => Int,
    u64 => Int,
    u128 => BigInt,
    Vec<u8> => Octets,
    String => Text,
    &str => Text,
    Fields => Record,
}

//--- Display

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Value::Int(value) => fmt::Display::fmt(&value, f),
            Value::BigInt(value) => fmt::Display::fmt(&value, f),
            Value::Octets(ref value) => {
                for ch in value {
                    write!(f, "{:02x}", ch)?;
                }
                Ok(())
            }
            Value::Text(ref value) => write!(f, "{:?}", value),
            Value::Record(ref value) => fmt::Display::fmt(value, f),
        }
    }
}

//------------ Fields --------------------------------------------------------

/// The ordered fields of a record.
///
/// Fields keep the order in which they were added. Adding a field under a
/// name that is already present replaces the value but keeps its position.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Fields(Vec<(String, Value)>);

impl Fields {
    /// Creates a new, empty set of fields.
    pub fn new() -> Self {
        Fields(Vec::new())
    }

    /// Creates a new, empty set of fields with room for `capacity` fields.
    pub fn with_capacity(capacity: usize) -> Self {
        Fields(Vec::with_capacity(capacity))
    }

    /// Adds a field.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|item| item.0 == name) {
            Some(item) => item.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Adds a field and returns the fields.
    pub fn with(
        mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns the value of the field with the given name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0
            .iter()
            .find(|item| item.0 == name)
            .map(|item| &item.1)
    }

    /// Returns whether a field with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether there are no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the names of the fields in order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(|item| item.0.as_str())
    }

    /// Returns an iterator over the fields in order.
    pub fn iter(&self) -> slice::Iter<'_, (String, Value)> {
        self.0.iter()
    }
}

//--- FromIterator and IntoIterator

impl<N: Into<String>, V: Into<Value>> FromIterator<(N, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut res = Fields::new();
        for (name, value) in iter {
            res.insert(name, value)
        }
        res
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = &'a (String, Value);
    type IntoIter = slice::Iter<'a, (String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

//--- Display

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        f.write_str("}")
    }
}

//------------ Dynamic -------------------------------------------------------

/// A type that can be converted to and from a [`Value`].
pub trait Dynamic: Sized {
    /// Converts the value into a dynamic value.
    fn into_value(self) -> Value;

    /// Tries to extract a value of this type from a dynamic value.
    ///
    /// Returns `None` if the value is of a different kind or out of range
    /// for the type.
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! dynamic_int {
    ( $( $type:ty, )* ) => {
        $(
            impl Dynamic for $type {
                fn into_value(self) -> Value {
                    self.into()
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match *value {
                        Value::Int(value) => <$type>::try_from(value).ok(),
                        Value::BigInt(value) => <$type>::try_from(value).ok(),
                        _ => None,
                    }
                }
            }
        )*
    }
}

dynamic_int!(u8, u16, u32, u64, u128,);

impl Dynamic for Vec<u8> {
    fn into_value(self) -> Value {
        Value::Octets(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::Octets(ref value) => Some(value.clone()),
            _ => None,
        }
    }
}

impl Dynamic for String {
    fn into_value(self) -> Value {
        Value::Text(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::Text(ref value) => Some(value.clone()),
            _ => None,
        }
    }
}

impl Dynamic for Fields {
    fn into_value(self) -> Value {
        Value::Record(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::Record(ref value) => Some(value.clone()),
            _ => None,
        }
    }
}

impl Dynamic for Value {
    fn into_value(self) -> Value {
        self
    }

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

//------------ Message::dynamic ----------------------------------------------

impl<T: Dynamic + 'static> Message<T> {
    /// Converts the message into one for dynamic values.
    ///
    /// # Panics
    ///
    /// Writing a value through the returned message panics if it cannot be
    /// converted into a `T`.
    pub fn dynamic(self) -> Message<Value> {
        self.map(T::into_value, |value| {
            T::from_value(value).unwrap_or_else(|| {
                panic!(
                    "cannot write {} value {} as {}",
                    value.kind(),
                    value,
                    any::type_name::<T>()
                )
            })
        })
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::schema::int::{uint16, uint8};
    use crate::schema::string::pascal_string;
    use std::string::ToString;

    #[test]
    fn fields_order() {
        let mut fields = Fields::new();
        fields.insert("b", 1u8);
        fields.insert("a", 2u8);
        fields.insert("b", 3u8);
        assert_eq!(fields.names().collect::<Vec<_>>(), ["b", "a"]);
        assert_eq!(fields.get("b"), Some(&Value::Int(3)));
        assert_eq!(fields.len(), 2);
        assert!(!fields.contains("c"));
    }

    #[test]
    fn from_iter() {
        let fields: Fields =
            vec![("x", Value::Int(1)), ("y", Value::Text("a".into()))]
                .into_iter()
                .collect();
        assert_eq!(fields.to_string(), "{x: 1, y: \"a\"}");
    }

    #[test]
    fn dynamic_conversions() {
        assert_eq!(u8::from_value(&Value::Int(255)), Some(255));
        assert_eq!(u8::from_value(&Value::Int(256)), None);
        assert_eq!(u64::from_value(&Value::BigInt(7)), Some(7));
        assert_eq!(String::from_value(&Value::Int(7)), None);
    }

    #[test]
    fn dynamic_message() {
        let msg = uint16().dynamic();
        assert_eq!(msg.parse_slice(&[1, 1]), Ok(Value::Int(257)));
        assert_eq!(msg.to_vec(&Value::Int(257)), [1, 1]);

        let msg = pascal_string(1).dynamic();
        assert_eq!(msg.parse_slice(b"\x01a"), Ok(Value::Text("a".into())));
    }

    #[test]
    #[should_panic(expected = "cannot write text value")]
    fn dynamic_wrong_kind() {
        let _ = uint8().dynamic().to_vec(&Value::Text("a".to_string()));
    }
}
