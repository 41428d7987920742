use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use lazy_static::lazy_static;
use shapewire_schema::{
    read_discriminant, write_discriminant, ByteReader, ByteWriter, CodecError, LengthQueue,
    ScalarKind, Shape, Value,
};

use crate::traits::Reflect;
use crate::walker;

lazy_static! {
    static ref PLAN_CACHE: RwLock<HashMap<TypeId, Arc<Plan>>> = RwLock::new(HashMap::new());
}

/// A compiled encode/decode procedure pair for one concrete type. Built
/// once per type from its validated shape, cached for the process lifetime,
/// and immutable thereafter; record fields are resolved to positional
/// indexes at build time so execution never looks a field up by name.
pub struct Plan {
    root: Step,
}

enum Step {
    Primitive(ScalarKind),
    Text,
    Enum(ScalarKind),
    Sequence(Box<Step>),
    Record(RecordSteps),
}

struct RecordSteps {
    name: &'static str,
    fields: Vec<FieldStep>,
}

struct FieldStep {
    index: usize,
    name: &'static str,
    step: Step,
}

impl Plan {
    /// Returns the cached plan for `T`, compiling and validating it on first
    /// use. Racing first builds are redundant but side-effect free; the
    /// first insert wins, so every caller observes one logical plan.
    pub fn get_or_build<T: Reflect + 'static>() -> Result<Arc<Plan>, CodecError> {
        let key = TypeId::of::<T>();
        if let Some(plan) = PLAN_CACHE
            .read()
            .expect("plan cache lock poisoned")
            .get(&key)
        {
            return Ok(plan.clone());
        }

        let shape = T::shape();
        walker::validate(&shape)?;
        let plan = Arc::new(Plan {
            root: Step::build(&shape),
        });

        let mut cache = PLAN_CACHE.write().expect("plan cache lock poisoned");
        Ok(cache.entry(key).or_insert(plan).clone())
    }

    /// Executes the write procedure: emits bytes into `stream` while
    /// relaying every sequence element count through `lengths`.
    pub fn write(
        &self,
        value: &Value,
        stream: &mut ByteWriter,
        lengths: &mut LengthQueue,
    ) -> Result<(), CodecError> {
        self.root.write(value, stream, lengths)
    }

    /// Executes the read procedure, consuming relayed counts in the order
    /// the write pass produced them.
    pub fn read(
        &self,
        stream: &mut ByteReader,
        lengths: &mut LengthQueue,
    ) -> Result<Value, CodecError> {
        self.root.read(stream, lengths)
    }
}

fn mismatch(expected: &str, found: &Value) -> CodecError {
    CodecError::ProtocolMismatch(format!("expected a {} value, found {:?}", expected, found))
}

impl Step {
    fn build(shape: &Shape) -> Step {
        match shape {
            Shape::Primitive(kind) => Step::Primitive(*kind),
            Shape::Text => Step::Text,
            Shape::Enum(kind) => Step::Enum(*kind),
            Shape::Sequence(element) => Step::Sequence(Box::new(Step::build(element))),
            Shape::Record(record) => Step::Record(RecordSteps {
                name: record.name,
                fields: record
                    .fields
                    .iter()
                    .enumerate()
                    .map(|(index, field)| FieldStep {
                        index,
                        name: field.name,
                        step: Step::build(&field.shape),
                    })
                    .collect(),
            }),
        }
    }

    fn write(
        &self,
        value: &Value,
        stream: &mut ByteWriter,
        lengths: &mut LengthQueue,
    ) -> Result<(), CodecError> {
        match self {
            Step::Primitive(kind) => value.write_scalar(*kind, stream),

            Step::Text => match value {
                Value::Text(text) => stream.write_text(text),
                other => Err(mismatch("text", other)),
            },

            Step::Enum(kind) => match value {
                Value::Enum(discriminant) => write_discriminant(*kind, *discriminant, stream),
                other => Err(mismatch("enum", other)),
            },

            Step::Sequence(element) => match value {
                Value::Sequence(items) => {
                    lengths.push(items.len());
                    for item in items {
                        element.write(item, stream, lengths)?;
                    }
                    Ok(())
                }
                other => Err(mismatch("sequence", other)),
            },

            Step::Record(record) => match value {
                Value::Record(entries) => {
                    for field in &record.fields {
                        let (_, field_value) = entries.get(field.index).ok_or_else(|| {
                            CodecError::ProtocolMismatch(format!(
                                "record `{}` is missing field `{}`",
                                record.name, field.name
                            ))
                        })?;
                        field.step.write(field_value, stream, lengths)?;
                    }
                    Ok(())
                }
                other => Err(mismatch(record.name, other)),
            },
        }
    }

    fn read(
        &self,
        stream: &mut ByteReader,
        lengths: &mut LengthQueue,
    ) -> Result<Value, CodecError> {
        Ok(match self {
            Step::Primitive(kind) => Value::read_scalar(*kind, stream)?,
            Step::Text => Value::Text(stream.read_text()?),
            Step::Enum(kind) => Value::Enum(read_discriminant(*kind, stream)?),

            Step::Sequence(element) => {
                let count = lengths.pull()?;
                let mut items = Vec::with_capacity(count);
                for _ in 0..count {
                    items.push(element.read(stream, lengths)?);
                }
                Value::Sequence(items)
            }

            Step::Record(record) => {
                let mut entries = Vec::with_capacity(record.fields.len());
                for field in &record.fields {
                    entries.push((field.name, field.step.read(stream, lengths)?));
                }
                Value::Record(entries)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Reflect;

    #[derive(Debug, PartialEq)]
    struct Pair {
        left: i32,
        right: i32,
    }
    crate::reflect_record!(Pair { left: i32, right: i32 });

    struct NoFields;

    impl Reflect for NoFields {
        fn shape() -> Shape {
            Shape::Record(shapewire_schema::RecordShape {
                name: "NoFields",
                fields: vec![],
            })
        }

        fn to_value(&self) -> Value {
            Value::Record(vec![])
        }

        fn from_value(_: Value) -> Result<Self, CodecError> {
            Ok(NoFields)
        }
    }

    #[test]
    fn cache_returns_same_plan() {
        let first = Plan::get_or_build::<Pair>().unwrap();
        let second = Plan::get_or_build::<Pair>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn cache_is_per_type() {
        let pairs = Plan::get_or_build::<Pair>().unwrap();
        let ints = Plan::get_or_build::<Vec<i32>>().unwrap();
        let also_ints = Plan::get_or_build::<Vec<i32>>().unwrap();
        assert!(!Arc::ptr_eq(&pairs, &ints));
        assert!(Arc::ptr_eq(&ints, &also_ints));
    }

    #[test]
    fn concurrent_first_use_converges() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| Plan::get_or_build::<Vec<Pair>>().unwrap()))
            .collect();
        let plans: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for plan in &plans[1..] {
            assert!(Arc::ptr_eq(&plans[0], plan));
        }
    }

    #[test]
    fn build_rejects_empty_record() {
        assert!(matches!(
            Plan::get_or_build::<NoFields>(),
            Err(CodecError::Configuration { .. })
        ));
    }

    #[test]
    fn plan_write_and_read_mirror() {
        let plan = Plan::get_or_build::<Pair>().unwrap();
        let value = Pair { left: 1, right: -2 }.to_value();

        let mut stream = ByteWriter::new();
        let mut lengths = LengthQueue::new();
        plan.write(&value, &mut stream, &mut lengths).unwrap();
        let bytes = stream.data();
        assert_eq!(bytes, [1, 0, 0, 0, 254, 255, 255, 255]);
        assert!(lengths.is_empty());

        let mut reader = ByteReader::new(&bytes);
        let decoded = plan.read(&mut reader, &mut lengths).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(reader.remaining(), 0);
    }
}
