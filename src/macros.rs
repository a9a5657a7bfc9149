//! Macros for declaring records.

/// Declares a struct together with the message for it.
///
/// The macro takes a struct definition in which each field is followed by
/// `=` and an expression producing the message for the field. The type of
/// that expression must be `Message<T>` where `T` is the type of the field.
/// It defines the struct without the messages and adds an associated
/// function `message()` to it that returns the message for the whole
/// struct.
///
/// The fields are read and written in the order they are declared in. If
/// reading a field fails, the error names the struct and the field:
///
/// ```
/// use wireschema::record;
/// use wireschema::schema::{pascal_string, uint16};
///
/// record! {
///     /// A player on the map.
///     #[derive(Clone, Debug, PartialEq)]
///     pub struct Player {
///         pub x: u16 = uint16(),
///         pub y: u16 = uint16(),
///         pub name: String = pascal_string(1),
///     }
/// }
///
/// let admin = Player { x: 42, y: 150, name: "admin".into() };
/// let bytes = Player::message().to_vec(&admin);
/// assert_eq!(bytes, [42, 0, 150, 0, 5, b'a', b'd', b'm', b'i', b'n']);
/// assert_eq!(Player::message().parse_slice(&bytes).unwrap(), admin);
///
/// let err = Player::message().parse_slice(&[42, 0, 150]).unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "(Message ended prematurely: UnsignedInt(2)) at Player.y"
/// );
/// ```
///
/// The field messages are created anew each time `message()` is called.
/// Keep the returned message around if it is used often.
#[macro_export]
macro_rules! record {
    (
        $( #[$attr:meta] )*
        $vis:vis struct $name:ident {
            $(
                $( #[$fattr:meta] )*
                $fvis:vis $field:ident: $ty:ty = $schema:expr
            ),* $(,)?
        }
    ) => {
        $( #[$attr] )*
        $vis struct $name {
            $(
                $( #[$fattr] )*
                $fvis $field: $ty,
            )*
        }

        impl $name {
            /// Returns the message for values of this type.
            #[allow(unused_variables)]
            $vis fn message() -> $crate::base::message::Message<Self> {
                $(
                    let $field: $crate::base::message::Message<$ty>
                        = $schema;
                )*
                let read_fields = ( $( $field.clone(), )* );
                let write_fields = ( $( $field, )* );
                $crate::base::message::Message::new(
                    move |source| {
                        let ( $( ref $field, )* ) = read_fields;
                        $(
                            let $field = $crate::schema::record::read_field(
                                stringify!($name),
                                stringify!($field),
                                $field,
                                source,
                            )?;
                        )*
                        ::core::result::Result::Ok($name { $( $field, )* })
                    },
                    move |value: &$name, sink| {
                        let ( $( ref $field, )* ) = write_fields;
                        $(
                            $field.write_to(&value.$field, sink);
                        )*
                    },
                )
            }
        }
    }
}

//============ Testing =======================================================
