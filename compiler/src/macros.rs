/// Generates a [`Reflect`](crate::Reflect) impl for a struct with named
/// fields. The struct itself must already be defined; list the fields in
/// declared order, which is also the wire order:
///
/// ```
/// #[derive(Debug, PartialEq)]
/// struct Point {
///     x: f32,
///     y: f32,
/// }
/// shapewire_compiler::reflect_record!(Point { x: f32, y: f32 });
///
/// use shapewire_compiler::Reflect;
/// let value = Point { x: 0.5, y: -0.5 }.to_value();
/// assert_eq!(Point::from_value(value), Ok(Point { x: 0.5, y: -0.5 }));
/// ```
#[macro_export]
macro_rules! reflect_record {
    ($name:ident { $($field:ident : $ty:ty),+ $(,)? }) => {
        impl $crate::Reflect for $name {
            fn shape() -> $crate::schema::Shape {
                $crate::schema::Shape::Record($crate::schema::RecordShape {
                    name: stringify!($name),
                    fields: vec![
                        $(
                            $crate::schema::FieldShape {
                                name: stringify!($field),
                                shape: <$ty as $crate::Reflect>::shape(),
                            },
                        )+
                    ],
                })
            }

            fn to_value(&self) -> $crate::schema::Value {
                $crate::schema::Value::Record(vec![
                    $(
                        (stringify!($field), $crate::Reflect::to_value(&self.$field)),
                    )+
                ])
            }

            fn from_value(
                value: $crate::schema::Value,
            ) -> Result<Self, $crate::schema::CodecError> {
                match value {
                    $crate::schema::Value::Record(fields) => {
                        let mut fields = fields.into_iter();
                        Ok($name {
                            $(
                                $field: match fields.next() {
                                    Some((name, value)) if name == stringify!($field) => {
                                        <$ty as $crate::Reflect>::from_value(value)?
                                    }
                                    Some((name, _)) => {
                                        return Err($crate::schema::CodecError::ProtocolMismatch(
                                            format!(
                                                "expected field `{}` of record `{}`, found `{}`",
                                                stringify!($field),
                                                stringify!($name),
                                                name
                                            ),
                                        ))
                                    }
                                    None => {
                                        return Err($crate::schema::CodecError::ProtocolMismatch(
                                            format!(
                                                "record `{}` is missing field `{}`",
                                                stringify!($name),
                                                stringify!($field)
                                            ),
                                        ))
                                    }
                                },
                            )+
                        })
                    }
                    other => Err($crate::schema::CodecError::ProtocolMismatch(format!(
                        "expected a `{}` record value, found {:?}",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }
    };
}

/// Generates a [`Reflect`](crate::Reflect) impl for a C-like enum with an
/// explicit underlying integer type and literal discriminants:
///
/// ```
/// #[derive(Debug, PartialEq)]
/// enum Tip {
///     Flat,
///     Round,
///     Pointed,
/// }
/// shapewire_compiler::reflect_enum!(Tip: u32 { Flat = 0, Round = 1, Pointed = 2 });
///
/// use shapewire_compiler::Reflect;
/// assert_eq!(Tip::from_value(Tip::Round.to_value()), Ok(Tip::Round));
/// ```
#[macro_export]
macro_rules! reflect_enum {
    ($name:ident : $repr:ty { $($variant:ident = $discriminant:literal),+ $(,)? }) => {
        impl $crate::Reflect for $name {
            fn shape() -> $crate::schema::Shape {
                $crate::schema::Shape::Enum(<$repr as $crate::ReprKind>::KIND)
            }

            fn to_value(&self) -> $crate::schema::Value {
                $crate::schema::Value::Enum(match self {
                    $(
                        $name::$variant => $discriminant as i64,
                    )+
                })
            }

            fn from_value(
                value: $crate::schema::Value,
            ) -> Result<Self, $crate::schema::CodecError> {
                match value {
                    $crate::schema::Value::Enum(discriminant) => match discriminant {
                        $(
                            $discriminant => Ok($name::$variant),
                        )+
                        other => Err($crate::schema::CodecError::ProtocolMismatch(format!(
                            "unknown discriminant {} for enum `{}`",
                            other,
                            stringify!($name)
                        ))),
                    },
                    other => Err($crate::schema::CodecError::ProtocolMismatch(format!(
                        "expected a `{}` enum value, found {:?}",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }
    };
}
