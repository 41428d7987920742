use shapewire_schema::{
    read_discriminant, write_discriminant, ByteReader, ByteWriter, CodecError, LengthQueue, Shape,
    Value,
};

/// The uncached baseline strategy: the shape is walked afresh against the
/// live value on every call, and record fields are resolved by name lookup
/// each time. Produces byte-identical output to the compiled strategy for
/// identical input.
pub fn write_value(
    shape: &Shape,
    value: &Value,
    stream: &mut ByteWriter,
    lengths: &mut LengthQueue,
) -> Result<(), CodecError> {
    match shape {
        Shape::Primitive(kind) => value.write_scalar(*kind, stream),

        Shape::Text => match value {
            Value::Text(text) => stream.write_text(text),
            other => Err(mismatch("text", other)),
        },

        Shape::Enum(kind) => match value {
            Value::Enum(discriminant) => write_discriminant(*kind, *discriminant, stream),
            other => Err(mismatch("enum", other)),
        },

        Shape::Sequence(element) => match value {
            Value::Sequence(items) => {
                lengths.push(items.len());
                for item in items {
                    write_value(element, item, stream, lengths)?;
                }
                Ok(())
            }
            other => Err(mismatch("sequence", other)),
        },

        Shape::Record(record) => match value {
            Value::Record(_) => {
                for field in &record.fields {
                    let field_value = value.get(field.name).ok_or_else(|| {
                        CodecError::ProtocolMismatch(format!(
                            "record `{}` is missing field `{}`",
                            record.name, field.name
                        ))
                    })?;
                    write_value(&field.shape, field_value, stream, lengths)?;
                }
                Ok(())
            }
            other => Err(mismatch(record.name, other)),
        },
    }
}

/// Mirror of [`write_value`]: reads the shape back from the stream,
/// consuming relayed counts in the order the write pass produced them.
pub fn read_value(
    shape: &Shape,
    stream: &mut ByteReader,
    lengths: &mut LengthQueue,
) -> Result<Value, CodecError> {
    Ok(match shape {
        Shape::Primitive(kind) => Value::read_scalar(*kind, stream)?,
        Shape::Text => Value::Text(stream.read_text()?),
        Shape::Enum(kind) => Value::Enum(read_discriminant(*kind, stream)?),

        Shape::Sequence(element) => {
            let count = lengths.pull()?;
            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                items.push(read_value(element, stream, lengths)?);
            }
            Value::Sequence(items)
        }

        Shape::Record(record) => {
            let mut entries = Vec::with_capacity(record.fields.len());
            for field in &record.fields {
                entries.push((field.name, read_value(&field.shape, stream, lengths)?));
            }
            Value::Record(entries)
        }
    })
}

fn mismatch(expected: &str, found: &Value) -> CodecError {
    CodecError::ProtocolMismatch(format!("expected a {} value, found {:?}", expected, found))
}
