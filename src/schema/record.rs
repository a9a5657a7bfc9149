//! Records of named fields.
//!
//! A record is a fixed sequence of fields, each with a name and a schema of
//! its own. On the wire, the fields simply follow each other in the order
//! they were declared in. There is no framing or tagging of any kind.
//!
//! Records come in two flavours. The [`record!`][crate::record] macro
//! declares a struct together with its message and is the way to go when
//! the layout is known at compile time. When it isn’t, [`Record`] assembles
//! a message for [`Fields`] at runtime.
//!
//! Either way, a failure while reading a field is wrapped into an error
//! naming the record and the field, so errors in nested records read like
//! a path from the outermost record to the offending primitive.

use super::value::{Fields, Value};
use crate::base::error::ReadError;
use crate::base::message::Message;
use crate::base::source::ByteSource;
use std::string::String;
use std::sync::Arc;
use std::vec::Vec;
use tracing::trace;

//------------ Record --------------------------------------------------------

/// A builder for a message of a record with runtime defined fields.
///
/// ```
/// use wireschema::schema::{pascal_string, uint16, Fields, Record};
///
/// let player = Record::new("Player")
///     .field("x", uint16().dynamic())
///     .field("y", uint16().dynamic())
///     .field("name", pascal_string(1).dynamic())
///     .build();
///
/// let value = Fields::new()
///     .with("x", 42u16)
///     .with("y", 150u16)
///     .with("name", "admin");
/// let bytes = player.to_vec(&value);
/// assert_eq!(bytes, [42, 0, 150, 0, 5, b'a', b'd', b'm', b'i', b'n']);
/// assert_eq!(player.parse_slice(&bytes).unwrap(), value);
/// ```
#[derive(Clone, Debug)]
pub struct Record {
    name: String,
    fields: Vec<(String, Message<Value>)>,
}

impl Record {
    /// Starts a new record with the given name.
    ///
    /// The name is only used in error messages.
    pub fn new(name: impl Into<String>) -> Self {
        Record {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field to the record.
    ///
    /// # Panics
    ///
    /// The method panics if the record already has a field named `key`.
    pub fn field(
        mut self,
        key: impl Into<String>,
        message: Message<Value>,
    ) -> Self {
        let key = key.into();
        assert!(
            !self.fields.iter().any(|item| item.0 == key),
            "duplicate field {}.{}",
            self.name,
            key
        );
        self.fields.push((key, message));
        self
    }

    /// Returns the name of the record.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of fields declared so far.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether no fields have been declared yet.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Finishes the record and returns its message.
    ///
    /// Reading produces [`Fields`] in declaration order. Writing expects
    /// exactly the declared fields, in any order, and emits them in
    /// declaration order.
    ///
    /// # Panics
    ///
    /// Writing panics if the value lacks a declared field, has a field that
    /// wasn’t declared, or has a field value the field’s message cannot
    /// write.
    pub fn build(self) -> Message<Fields> {
        let name: Arc<str> = self.name.into();
        let fields: Arc<[(String, Message<Value>)]> = self.fields.into();
        let read_name = name.clone();
        let read_fields = fields.clone();
        Message::new(
            move |source| {
                let mut res = Fields::with_capacity(read_fields.len());
                for (key, message) in read_fields.iter() {
                    let value = read_field(&read_name, key, message, source)?;
                    res.insert(key.as_str(), value);
                }
                Ok(res)
            },
            move |value: &Fields, sink| {
                check_fields(&name, &fields, value);
                for (key, message) in fields.iter() {
                    if let Some(item) = value.get(key) {
                        message.write_to(item, sink)
                    }
                }
            },
        )
    }
}

fn check_fields(
    name: &str,
    fields: &[(String, Message<Value>)],
    value: &Fields,
) {
    for (key, _) in fields {
        if !value.contains(key) {
            panic!("cannot write {}: missing field {}.{}", value, name, key);
        }
    }
    for key in value.names() {
        if !fields.iter().any(|item| item.0 == key) {
            panic!("cannot write {}: unknown field {}.{}", value, name, key);
        }
    }
}

//------------ read_field ----------------------------------------------------

/// Reads the field of a record.
///
/// This reads a value through `message` and, if that fails, wraps the
/// error so that it names the record and field. It is used by both the
/// runtime records and the [`record!`][crate::record] macro.
pub fn read_field<T, S>(
    record: &str,
    field: &str,
    message: &Message<T>,
    source: &mut S,
) -> Result<T, ReadError>
where
    T: 'static,
    S: ByteSource + ?Sized,
{
    message.read(source).map_err(|err| {
        trace!("reading {}.{} failed: {}", record, field, err);
        err.at(record, field)
    })
}

//============ Testing =======================================================
