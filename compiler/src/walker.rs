use shapewire_schema::{CodecError, Shape};

/// Validates a shape tree before it drives encoding or decoding. The plan
/// compiler runs this once per type at build time; the direct interpreter
/// runs it on every call.
///
/// A record with zero usable fields is rejected outright: on the wire it
/// would be indistinguishable from "not a record at all".
pub fn validate(shape: &Shape) -> Result<(), CodecError> {
    match shape {
        Shape::Primitive(_) | Shape::Text => Ok(()),

        Shape::Enum(kind) => {
            if kind.is_integer() {
                Ok(())
            } else {
                Err(CodecError::Configuration {
                    type_name: "enum".to_owned(),
                    message: format!("underlying kind {} is not an integer", kind.name()),
                })
            }
        }

        Shape::Sequence(element) => validate(element),

        Shape::Record(record) => {
            if record.fields.is_empty() {
                return Err(CodecError::Configuration {
                    type_name: record.name.to_owned(),
                    message: "record has no usable fields".to_owned(),
                });
            }
            for field in &record.fields {
                validate(&field.shape)?;
            }
            Ok(())
        }
    }
}
