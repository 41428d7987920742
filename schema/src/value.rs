use std::fmt;
use std::ops::Index;

use crate::error::CodecError;
use crate::shape::ScalarKind;
use crate::stream::{ByteReader, ByteWriter};

/// The dynamic representation of any encodable value. Both strategies
/// traverse values in this form: record fields are kept as an ordered
/// vector of `(name, value)` pairs in declared order, so traversal order is
/// deterministic and identical between the encode and decode passes.
#[derive(Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    F32(f32),
    F64(f64),
    Char(char),
    Text(String),
    /// An enum discriminant, widened to `i64`; the wire width comes from the
    /// shape's underlying kind.
    Enum(i64),
    Sequence(Vec<Value>),
    Record(Vec<(&'static str, Value)>),
}

impl Value {
    /// A convenience method to extract the value out of a [Bool](#variant.Bool).
    /// Returns `false` for other value kinds.
    pub fn as_bool(&self) -> bool {
        match *self {
            Value::Bool(value) => value,
            _ => false,
        }
    }

    /// A convenience method to extract the value out of an [I32](#variant.I32).
    /// Returns `0` for other value kinds.
    pub fn as_i32(&self) -> i32 {
        match *self {
            Value::I32(value) => value,
            _ => 0,
        }
    }

    /// A convenience method to extract the value out of a [U32](#variant.U32).
    /// Returns `0` for other value kinds.
    pub fn as_u32(&self) -> u32 {
        match *self {
            Value::U32(value) => value,
            _ => 0,
        }
    }

    /// A convenience method to extract the value out of an [I64](#variant.I64).
    /// Returns `0` for other value kinds.
    pub fn as_i64(&self) -> i64 {
        match *self {
            Value::I64(value) => value,
            _ => 0,
        }
    }

    /// A convenience method to extract the value out of a [U64](#variant.U64).
    /// Returns `0` for other value kinds.
    pub fn as_u64(&self) -> u64 {
        match *self {
            Value::U64(value) => value,
            _ => 0,
        }
    }

    /// A convenience method to extract the value out of an [F64](#variant.F64).
    /// Returns `0.0` for other value kinds.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Value::F64(value) => value,
            _ => 0.0,
        }
    }

    /// A convenience method to extract the value out of a [Text](#variant.Text).
    /// Returns `""` for other value kinds.
    pub fn as_text(&self) -> &str {
        match *self {
            Value::Text(ref value) => value.as_str(),
            _ => "",
        }
    }

    /// A convenience method to extract the discriminant out of an
    /// [Enum](#variant.Enum). Returns `0` for other value kinds.
    pub fn as_discriminant(&self) -> i64 {
        match *self {
            Value::Enum(value) => value,
            _ => 0,
        }
    }

    /// A convenience method to get the elements out of a
    /// [Sequence](#variant.Sequence). Returns an empty slice for other value
    /// kinds.
    pub fn as_sequence(&self) -> &[Value] {
        match *self {
            Value::Sequence(ref values) => values.as_slice(),
            _ => &[],
        }
    }

    /// A convenience method to extract the element count out of a
    /// [Sequence](#variant.Sequence) or the field count out of a
    /// [Record](#variant.Record). Returns `0` for other value kinds.
    pub fn len(&self) -> usize {
        match *self {
            Value::Sequence(ref values) => values.len(),
            Value::Record(ref fields) => fields.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A convenience method to look up a field of a [Record](#variant.Record)
    /// by name. Returns `None` for other value kinds or a missing field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match *self {
            Value::Record(ref fields) => fields
                .iter()
                .find(|(field, _)| *field == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Write this value as a scalar of the given kind. The value variant
    /// must agree with the kind; a disagreement means the shape and the
    /// value were produced from different types.
    pub fn write_scalar(&self, kind: ScalarKind, stream: &mut ByteWriter) -> Result<(), CodecError> {
        match (kind, self) {
            (ScalarKind::Bool, Value::Bool(v)) => stream.write_bool(*v),
            (ScalarKind::U8, Value::U8(v)) => stream.write_u8(*v),
            (ScalarKind::I8, Value::I8(v)) => stream.write_i8(*v),
            (ScalarKind::U16, Value::U16(v)) => stream.write_u16(*v),
            (ScalarKind::I16, Value::I16(v)) => stream.write_i16(*v),
            (ScalarKind::U32, Value::U32(v)) => stream.write_u32(*v),
            (ScalarKind::I32, Value::I32(v)) => stream.write_i32(*v),
            (ScalarKind::U64, Value::U64(v)) => stream.write_u64(*v),
            (ScalarKind::I64, Value::I64(v)) => stream.write_i64(*v),
            (ScalarKind::F32, Value::F32(v)) => stream.write_f32(*v),
            (ScalarKind::F64, Value::F64(v)) => stream.write_f64(*v),
            (ScalarKind::Char, Value::Char(v)) => stream.write_char(*v),
            (kind, other) => {
                return Err(CodecError::ProtocolMismatch(format!(
                    "expected a {} scalar, found {:?}",
                    kind.name(),
                    other
                )))
            }
        }
        Ok(())
    }

    /// Read one scalar of the given kind from the stream.
    pub fn read_scalar(kind: ScalarKind, stream: &mut ByteReader) -> Result<Value, CodecError> {
        Ok(match kind {
            ScalarKind::Bool => Value::Bool(stream.read_bool()?),
            ScalarKind::U8 => Value::U8(stream.read_u8()?),
            ScalarKind::I8 => Value::I8(stream.read_i8()?),
            ScalarKind::U16 => Value::U16(stream.read_u16()?),
            ScalarKind::I16 => Value::I16(stream.read_i16()?),
            ScalarKind::U32 => Value::U32(stream.read_u32()?),
            ScalarKind::I32 => Value::I32(stream.read_i32()?),
            ScalarKind::U64 => Value::U64(stream.read_u64()?),
            ScalarKind::I64 => Value::I64(stream.read_i64()?),
            ScalarKind::F32 => Value::F32(stream.read_f32()?),
            ScalarKind::F64 => Value::F64(stream.read_f64()?),
            ScalarKind::Char => Value::Char(stream.read_char()?),
        })
    }
}

/// Write an enum discriminant as its underlying integer kind. The
/// discriminant must fit the kind's range.
pub fn write_discriminant(
    kind: ScalarKind,
    discriminant: i64,
    stream: &mut ByteWriter,
) -> Result<(), CodecError> {
    let out_of_range = || {
        CodecError::ProtocolMismatch(format!(
            "enum discriminant {} does not fit underlying kind {}",
            discriminant,
            kind.name()
        ))
    };
    match kind {
        ScalarKind::U8 => stream.write_u8(u8::try_from(discriminant).map_err(|_| out_of_range())?),
        ScalarKind::I8 => stream.write_i8(i8::try_from(discriminant).map_err(|_| out_of_range())?),
        ScalarKind::U16 => {
            stream.write_u16(u16::try_from(discriminant).map_err(|_| out_of_range())?)
        }
        ScalarKind::I16 => {
            stream.write_i16(i16::try_from(discriminant).map_err(|_| out_of_range())?)
        }
        ScalarKind::U32 => {
            stream.write_u32(u32::try_from(discriminant).map_err(|_| out_of_range())?)
        }
        ScalarKind::I32 => {
            stream.write_i32(i32::try_from(discriminant).map_err(|_| out_of_range())?)
        }
        ScalarKind::U64 => {
            stream.write_u64(u64::try_from(discriminant).map_err(|_| out_of_range())?)
        }
        ScalarKind::I64 => stream.write_i64(discriminant),
        other => {
            return Err(CodecError::Configuration {
                type_name: "enum".to_owned(),
                message: format!("underlying kind {} is not an integer", other.name()),
            })
        }
    }
    Ok(())
}

/// Read an enum discriminant back from its underlying integer kind.
pub fn read_discriminant(kind: ScalarKind, stream: &mut ByteReader) -> Result<i64, CodecError> {
    Ok(match kind {
        ScalarKind::U8 => i64::from(stream.read_u8()?),
        ScalarKind::I8 => i64::from(stream.read_i8()?),
        ScalarKind::U16 => i64::from(stream.read_u16()?),
        ScalarKind::I16 => i64::from(stream.read_i16()?),
        ScalarKind::U32 => i64::from(stream.read_u32()?),
        ScalarKind::I32 => i64::from(stream.read_i32()?),
        ScalarKind::U64 => {
            let raw = stream.read_u64()?;
            i64::try_from(raw).map_err(|_| {
                CodecError::ProtocolMismatch(format!("enum discriminant {raw} overflows i64"))
            })?
        }
        ScalarKind::I64 => stream.read_i64()?,
        other => {
            return Err(CodecError::Configuration {
                type_name: "enum".to_owned(),
                message: format!("underlying kind {} is not an integer", other.name()),
            })
        }
    })
}

impl Index<usize> for Value {
    type Output = Value;

    /// A convenience method that adds support for `self[index]` expressions.
    /// It will panic if this value isn't a [Sequence](#variant.Sequence) or
    /// if the provided index is out of bounds.
    fn index(&self, index: usize) -> &Value {
        match *self {
            Value::Sequence(ref values) => &values[index],
            _ => panic!("indexed a non-sequence value"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match *self {
            Value::Bool(value) => value.fmt(f),
            Value::U8(value) => value.fmt(f),
            Value::I8(value) => value.fmt(f),
            Value::U16(value) => value.fmt(f),
            Value::I16(value) => value.fmt(f),
            Value::U32(value) => value.fmt(f),
            Value::I32(value) => value.fmt(f),
            Value::U64(value) => value.fmt(f),
            Value::I64(value) => value.fmt(f),
            Value::F32(value) => value.fmt(f),
            Value::F64(value) => value.fmt(f),
            Value::Char(value) => value.fmt(f),
            Value::Text(ref value) => value.fmt(f),
            Value::Enum(value) => write!(f, "#{}", value),
            Value::Sequence(ref values) => values.fmt(f),

            Value::Record(ref fields) => {
                write!(f, "{{")?;
                let mut first = true;
                for (name, value) in fields {
                    if first {
                        first = false;
                    } else {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {:?}", name, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}
