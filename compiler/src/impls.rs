use shapewire_schema::{CodecError, ScalarKind, Shape, Value};

use crate::traits::Reflect;

macro_rules! reflect_scalar {
    ($($ty:ty => $kind:ident / $variant:ident),+ $(,)?) => {
        $(
            impl Reflect for $ty {
                fn shape() -> Shape {
                    Shape::Primitive(ScalarKind::$kind)
                }

                fn to_value(&self) -> Value {
                    Value::$variant(*self)
                }

                fn from_value(value: Value) -> Result<Self, CodecError> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(CodecError::ProtocolMismatch(format!(
                            "expected a {} value, found {:?}",
                            stringify!($ty),
                            other
                        ))),
                    }
                }
            }
        )+
    };
}

reflect_scalar! {
    bool => Bool / Bool,
    u8 => U8 / U8,
    i8 => I8 / I8,
    u16 => U16 / U16,
    i16 => I16 / I16,
    u32 => U32 / U32,
    i32 => I32 / I32,
    u64 => U64 / U64,
    i64 => I64 / I64,
    f32 => F32 / F32,
    f64 => F64 / F64,
    char => Char / Char,
}

impl Reflect for String {
    fn shape() -> Shape {
        Shape::Text
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, CodecError> {
        match value {
            Value::Text(text) => Ok(text),
            other => Err(CodecError::ProtocolMismatch(format!(
                "expected a text value, found {:?}",
                other
            ))),
        }
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn shape() -> Shape {
        Shape::Sequence(Box::new(T::shape()))
    }

    fn to_value(&self) -> Value {
        Value::Sequence(self.iter().map(Reflect::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, CodecError> {
        match value {
            Value::Sequence(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(CodecError::ProtocolMismatch(format!(
                "expected a sequence value, found {:?}",
                other
            ))),
        }
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn shape() -> Shape {
        Shape::Sequence(Box::new(T::shape()))
    }

    fn to_value(&self) -> Value {
        Value::Sequence(self.iter().map(Reflect::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, CodecError> {
        match value {
            Value::Sequence(items) => {
                if items.len() != N {
                    return Err(CodecError::ProtocolMismatch(format!(
                        "expected {} elements for a fixed array, found {}",
                        N,
                        items.len()
                    )));
                }
                let decoded = items
                    .into_iter()
                    .map(T::from_value)
                    .collect::<Result<Vec<T>, CodecError>>()?;
                decoded.try_into().map_err(|_| {
                    CodecError::ProtocolMismatch(
                        "fixed array length changed during conversion".to_owned(),
                    )
                })
            }
            other => Err(CodecError::ProtocolMismatch(format!(
                "expected a sequence value, found {:?}",
                other
            ))),
        }
    }
}
