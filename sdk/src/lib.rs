//! shapewire
//!
//! A type-shape-driven binary codec: describe a type once, get a byte-exact
//! serializer/deserializer pair with no hand-written per-type code. Two
//! wire-compatible strategies are available: the compiled strategy builds a
//! plan per type and caches it for the process lifetime, while the direct
//! strategy re-walks the type's shape on every call.
//!
//! Sequence element counts never appear inline in the byte stream; they are
//! relayed out-of-band through the [`LengthQueue`] carried by [`Encoded`],
//! so a decoder replays the exact recursive traversal of the encoder.
//!
//! ```
//! #[derive(Debug, PartialEq)]
//! struct Point {
//!     x: f32,
//!     y: f32,
//! }
//! shapewire::reflect_record!(Point { x: f32, y: f32 });
//!
//! let encoded = shapewire::serialize(&Point { x: 0.5, y: -0.5 }).unwrap();
//! assert_eq!(encoded.bytes().len(), 8);
//!
//! let back: Point = shapewire::deserialize(&encoded).unwrap();
//! assert_eq!(back, Point { x: 0.5, y: -0.5 });
//! ```

pub use shapewire_compiler::{direct, plan, walker, Plan, Reflect, ReprKind};
pub use shapewire_compiler::{reflect_enum, reflect_record};
pub use shapewire_schema::{
    ByteReader, ByteWriter, CodecError, FieldShape, LengthQueue, RecordShape, ScalarKind, Shape,
    Value,
};

pub mod schema {
    pub use shapewire_schema::{FieldShape, LengthQueue, RecordShape, ScalarKind, Shape, Value};
}

pub mod error {
    pub use shapewire_schema::CodecError;
}

/// The output of a serialize call: the value bytes plus the out-of-band
/// sequence counts discovered while writing them. Both channels are needed
/// to decode; neither embeds any schema, type tag, or version marker, so
/// decode must use the identical type definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    bytes: Vec<u8>,
    lengths: LengthQueue,
}

impl Encoded {
    /// The value bytes. Sequence counts are not in here.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The relayed sequence element counts, in encounter order.
    pub fn lengths(&self) -> &LengthQueue {
        &self.lengths
    }

    /// Splits the payload into its two channels, for transport.
    pub fn into_parts(self) -> (Vec<u8>, LengthQueue) {
        (self.bytes, self.lengths)
    }

    /// Reassembles a payload from its two channels.
    pub fn from_parts(bytes: Vec<u8>, lengths: LengthQueue) -> Encoded {
        Encoded { bytes, lengths }
    }
}

/// Serializes `value` with the compiled strategy, building and caching the
/// plan for `T` on first use.
pub fn serialize<T: Reflect + 'static>(value: &T) -> Result<Encoded, CodecError> {
    let plan = Plan::get_or_build::<T>()?;
    let mut stream = ByteWriter::new();
    let mut lengths = LengthQueue::new();
    plan.write(&value.to_value(), &mut stream, &mut lengths)?;
    Ok(Encoded {
        bytes: stream.data(),
        lengths,
    })
}

/// Deserializes a `T` with the compiled strategy. The payload must have
/// been produced by serializing the identical type definition; the format
/// is not self-describing.
pub fn deserialize<T: Reflect + 'static>(encoded: &Encoded) -> Result<T, CodecError> {
    check_payload(encoded)?;
    let plan = Plan::get_or_build::<T>()?;
    let mut stream = ByteReader::new(&encoded.bytes);
    let mut lengths = encoded.lengths.clone();
    let value = plan.read(&mut stream, &mut lengths)?;
    ensure_drained(&lengths)?;
    T::from_value(value)
}

/// Serializes `value` with the direct strategy: no plan, no cache, the
/// shape is classified and validated on this very call. Wire-compatible
/// with [`serialize`].
pub fn serialize_direct<T: Reflect>(value: &T) -> Result<Encoded, CodecError> {
    let shape = T::shape();
    walker::validate(&shape)?;
    let mut stream = ByteWriter::new();
    let mut lengths = LengthQueue::new();
    direct::write_value(&shape, &value.to_value(), &mut stream, &mut lengths)?;
    Ok(Encoded {
        bytes: stream.data(),
        lengths,
    })
}

/// Deserializes a `T` with the direct strategy. Wire-compatible with
/// [`deserialize`].
pub fn deserialize_direct<T: Reflect>(encoded: &Encoded) -> Result<T, CodecError> {
    check_payload(encoded)?;
    let shape = T::shape();
    walker::validate(&shape)?;
    let mut stream = ByteReader::new(&encoded.bytes);
    let mut lengths = encoded.lengths.clone();
    let value = direct::read_value(&shape, &mut stream, &mut lengths)?;
    ensure_drained(&lengths)?;
    T::from_value(value)
}

/// Renders the shape of `T` as pretty-printed JSON, for inspection and
/// debugging.
pub fn shape_json<T: Reflect>() -> String {
    serde_json::to_string_pretty(&T::shape()).unwrap()
}

// An empty sequence at top level legitimately encodes to zero bytes plus
// one relayed count, so a payload is absent only when both channels are.
fn check_payload(encoded: &Encoded) -> Result<(), CodecError> {
    if encoded.bytes.is_empty() && encoded.lengths.is_empty() {
        return Err(CodecError::Argument(
            "cannot deserialize an empty payload".to_owned(),
        ));
    }
    Ok(())
}

fn ensure_drained(lengths: &LengthQueue) -> Result<(), CodecError> {
    if !lengths.is_empty() {
        return Err(CodecError::ProtocolMismatch(format!(
            "length relay queue still holds {} counts after decode; encode and decode types disagree",
            lengths.len()
        )));
    }
    Ok(())
}
