//! Declarative macros: `dent!` for value literals, `reflect!` for composite
//! registration.

/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// ```rust
/// use dent::{dent, Value};
///
/// let data = dent!({
///     "name": "Alice",
///     "age": 30,
///     "tags": ["rust", "codec"]
/// });
///
/// assert_eq!(data.as_record().unwrap().get("name"), Some(&Value::from("Alice")));
/// ```
#[macro_export]
macro_rules! dent {
    (null) => {
        $crate::Value::Null
    };

    (~) => {
        $crate::Value::Null
    };

    ([]) => {
        $crate::Value::Seq(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Seq(vec![$($crate::dent!($elem)),*])
    };

    ({}) => {
        $crate::Value::Record($crate::FieldMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut fields = $crate::FieldMap::new();
        $(
            fields.insert($key.to_string(), $crate::dent!($value));
        )*
        $crate::Value::Record(fields)
    }};

    // any other expression goes through the From ladder
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

/// Registers a struct with the codec: implements [`Reflect`](crate::Reflect)
/// with an ordered field list, a cached schema, and materialization through
/// the struct literal.
///
/// Fields listed in the optional `transient { ... }` section are declared in
/// the schema but never serialized; they materialize from
/// `Default::default()` and their types only need `Default` and `Reflect`.
///
/// ```rust
/// use dent::reflect;
///
/// #[derive(Debug, PartialEq)]
/// struct Session {
///     user: String,
///     logins: u32,
///     nonce: u64,
/// }
///
/// reflect! {
///     Session {
///         user: String,
///         logins: u32,
///     } transient {
///         nonce: u64,
///     }
/// }
///
/// let session = Session { user: "a".into(), logins: 3, nonce: 99 };
/// let text = dent::to_string(&session).unwrap();
/// assert_eq!(text, "user: a\nlogins: 3\n");
/// ```
#[macro_export]
macro_rules! reflect {
    ($name:ident { $($field:ident : $fty:ty),* $(,)? }) => {
        $crate::reflect!($name { $($field : $fty),* } transient {});
    };

    ($name:ident { $($field:ident : $fty:ty),* $(,)? }
     transient { $($tfield:ident : $tty:ty),* $(,)? }) => {
        impl $crate::Reflect for $name {
            fn schema() -> $crate::Schema {
                static CACHE: ::std::sync::OnceLock<$crate::Schema> =
                    ::std::sync::OnceLock::new();
                CACHE
                    .get_or_init(|| {
                        $crate::Schema::Record(
                            $crate::RecordSchema::new(stringify!($name))
                                $(.field(
                                    stringify!($field),
                                    <$fty as $crate::Reflect>::schema(),
                                ))*
                                $(.transient_field(
                                    stringify!($tfield),
                                    <$tty as $crate::Reflect>::schema(),
                                ))*
                        )
                    })
                    .clone()
            }

            fn to_value(&self) -> $crate::Result<$crate::Value> {
                let mut fields = $crate::FieldMap::new();
                $(
                    fields.insert(
                        stringify!($field).to_string(),
                        $crate::Reflect::to_value(&self.$field)?,
                    );
                )*
                Ok($crate::Value::Record(fields))
            }

            fn from_value(value: $crate::Value) -> $crate::Result<Self> {
                match value {
                    $crate::Value::Record(fields) => Ok(Self {
                        $(
                            $field: $crate::Reflect::from_value(
                                fields
                                    .get(stringify!($field))
                                    .cloned()
                                    .unwrap_or($crate::Value::Null),
                            )?,
                        )*
                        $(
                            $tfield: ::std::default::Default::default(),
                        )*
                    }),
                    $crate::Value::Null => Ok(Self {
                        $(
                            $field: $crate::Reflect::from_value($crate::Value::Null)?,
                        )*
                        $(
                            $tfield: ::std::default::Default::default(),
                        )*
                    }),
                    other => Err($crate::Error::message(::std::format!(
                        "expected a {} record, found {:?}",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }
    };
}
