#![cfg(test)]

use shapewire::{
    deserialize, deserialize_direct, reflect_enum, reflect_record, serialize, serialize_direct,
    shape_json, CodecError, Encoded, LengthQueue,
};

#[derive(Debug, Clone, PartialEq)]
struct Telemetry {
    sub_id: i32,
    secret: f64,
}
reflect_record!(Telemetry { sub_id: i32, secret: f64 });

#[derive(Debug, Clone, PartialEq)]
struct Inner {
    a: i32,
    b: i32,
}
reflect_record!(Inner { a: i32, b: i32 });

#[derive(Debug, Clone, PartialEq)]
struct Outer {
    id: u8,
    items: Vec<Inner>,
}
reflect_record!(Outer { id: u8, items: Vec<Inner> });

#[derive(Debug, Clone, PartialEq)]
struct Profile {
    name: String,
    tip: Tip,
    glyph: char,
    scores: Vec<Vec<i32>>,
    corners: [u16; 4],
}
reflect_record!(Profile {
    name: String,
    tip: Tip,
    glyph: char,
    scores: Vec<Vec<i32>>,
    corners: [u16; 4],
});

#[derive(Debug, Clone, PartialEq)]
enum Tip {
    Flat,
    Round,
    Pointed,
}
reflect_enum!(Tip: u32 { Flat = 0, Round = 1, Pointed = 2 });

#[derive(Debug, Clone, PartialEq)]
enum Sparse {
    Zero,
    Four,
}
reflect_enum!(Sparse: u32 { Zero = 0, Four = 4 });

fn round_trip<T>(value: &T) -> T
where
    T: shapewire::Reflect + Clone + PartialEq + std::fmt::Debug + 'static,
{
    let encoded = serialize(value).unwrap();
    let back: T = deserialize(&encoded).unwrap();
    assert_eq!(&back, value);

    // The direct strategy must be wire-compatible in both directions.
    let direct = serialize_direct(value).unwrap();
    assert_eq!(direct, encoded);
    let cross: T = deserialize_direct(&encoded).unwrap();
    assert_eq!(&cross, value);
    let cross: T = deserialize(&direct).unwrap();
    assert_eq!(&cross, value);

    back
}

#[test]
fn scenario_scalar_record_is_twelve_bytes() {
    let value = Telemetry {
        sub_id: 7,
        secret: 3.5,
    };
    let encoded = serialize(&value).unwrap();
    assert_eq!(encoded.bytes().len(), 12);
    assert!(encoded.lengths().is_empty());

    let back: Telemetry = deserialize(&encoded).unwrap();
    assert_eq!(back, value);
}

#[test]
fn scenario_sequence_counts_are_out_of_band() {
    let encoded = serialize(&vec![1i32, 2, 3]).unwrap();
    assert_eq!(
        encoded.bytes(),
        [1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0]
    );
    assert_eq!(encoded.lengths().counts(), vec![3]);

    let back: Vec<i32> = deserialize(&encoded).unwrap();
    assert_eq!(back, vec![1, 2, 3]);
}

#[test]
fn scenario_empty_sequence_of_records() {
    let empty: Vec<Telemetry> = vec![];
    let encoded = serialize(&empty).unwrap();
    assert_eq!(encoded.bytes().len(), 0);
    assert_eq!(encoded.lengths().counts(), vec![0]);

    let back: Vec<Telemetry> = deserialize(&encoded).unwrap();
    assert_eq!(back, empty);
}

#[test]
fn scenario_nested_sequence_of_records() {
    let value = Outer {
        id: 7,
        items: vec![Inner { a: 1, b: 2 }, Inner { a: 3, b: 4 }],
    };
    let encoded = serialize(&value).unwrap();
    // One u8 plus four i32 fields: nothing but scalar encodings in the bytes.
    assert_eq!(encoded.bytes().len(), 1 + 4 * 4);
    // One sequence encountered, so exactly one relayed count.
    assert_eq!(encoded.lengths().counts(), vec![2]);

    let back: Outer = deserialize(&encoded).unwrap();
    assert_eq!(back, value);
}

#[test]
fn round_trips_boundary_integers() {
    round_trip(&i32::MIN);
    round_trip(&i32::MAX);
    round_trip(&i64::MIN);
    round_trip(&i64::MAX);
    round_trip(&u64::MAX);
    round_trip(&u8::MAX);
    round_trip(&i8::MIN);
    round_trip(&u16::MAX);
    round_trip(&i16::MIN);
    round_trip(&true);
    round_trip(&false);
}

#[test]
fn round_trips_float_specials() {
    round_trip(&0.0f64);
    round_trip(&-1.5f64);
    round_trip(&f64::INFINITY);
    round_trip(&f64::NEG_INFINITY);
    round_trip(&f32::MAX);
    round_trip(&f32::MIN_POSITIVE);

    // NaN is unequal to itself, so compare bit patterns instead.
    let encoded = serialize(&f64::NAN).unwrap();
    let back: f64 = deserialize(&encoded).unwrap();
    assert!(back.is_nan());
    assert_eq!(back.to_bits(), f64::NAN.to_bits());
}

#[test]
fn round_trips_text() {
    round_trip(&String::new());
    round_trip(&"plain".to_owned());
    round_trip(&"🍕 with unicode".to_owned());
    round_trip(&'x');
    round_trip(&'🍕');
}

#[test]
fn round_trips_sequences_and_arrays() {
    round_trip(&Vec::<i32>::new());
    round_trip(&vec![i32::MIN, 0, i32::MAX]);
    round_trip(&[1i32, 2, 3]);
    round_trip(&vec!["a".to_owned(), String::new(), "bc".to_owned()]);
}

#[test]
fn round_trips_sequence_of_sequences() {
    let value = vec![vec![1i32, 2], vec![], vec![3]];
    let encoded = serialize(&value).unwrap();
    // Three inner element encodings only.
    assert_eq!(encoded.bytes().len(), 12);
    // One count per sequence encountered, depth-first: the outer 3, then
    // each inner in iteration order.
    assert_eq!(encoded.lengths().counts(), vec![3, 2, 0, 1]);
    round_trip(&value);

    round_trip(&vec![vec![vec![9u8]], vec![]]);
}

#[test]
fn round_trips_nested_record() {
    let value = Profile {
        name: "edge".to_owned(),
        tip: Tip::Pointed,
        glyph: 'Δ',
        scores: vec![vec![-1, 1], vec![]],
        corners: [1, 2, 3, 4],
    };
    round_trip(&value);

    let encoded = serialize(&value).unwrap();
    // text prefix+bytes, enum u32, char u32, 2 inner i32s, 4 u16 corners.
    assert_eq!(encoded.bytes().len(), (2 + 4) + 4 + 4 + 8 + 8);
    // scores outer, scores inners, corners.
    assert_eq!(encoded.lengths().counts(), vec![2, 2, 0, 4]);
}

#[test]
fn round_trips_sequence_of_records() {
    round_trip(&vec![
        Telemetry {
            sub_id: i32::MIN,
            secret: f64::MAX,
        },
        Telemetry {
            sub_id: -1,
            secret: f64::MIN_POSITIVE,
        },
    ]);
}

#[test]
fn serialization_is_deterministic() {
    let value = Profile {
        name: "same".to_owned(),
        tip: Tip::Round,
        glyph: 'a',
        scores: vec![vec![5]],
        corners: [0, 0, 0, 1],
    };
    assert_eq!(serialize(&value).unwrap(), serialize(&value).unwrap());
    assert_eq!(
        serialize_direct(&value).unwrap(),
        serialize_direct(&value).unwrap()
    );
}

#[test]
fn enum_unknown_discriminant_is_rejected() {
    // Tip::Round travels as discriminant 1, which Sparse does not define.
    let encoded = serialize(&Tip::Round).unwrap();
    assert!(matches!(
        deserialize::<Sparse>(&encoded),
        Err(CodecError::ProtocolMismatch(_))
    ));

    // Discriminant 0 is defined by both, so it decodes across definitions.
    let encoded = serialize(&Tip::Flat).unwrap();
    assert_eq!(deserialize::<Sparse>(&encoded), Ok(Sparse::Zero));
}

#[derive(Debug, PartialEq)]
struct Ordered {
    x: u32,
    y: u32,
}
reflect_record!(Ordered { x: u32, y: u32 });

#[derive(Debug, PartialEq)]
struct Reordered {
    y: u32,
    x: u32,
}
reflect_record!(Reordered { y: u32, x: u32 });

#[derive(Debug, PartialEq)]
struct Widened {
    x: u64,
    y: u64,
}
reflect_record!(Widened { x: u64, y: u64 });

#[test]
fn field_order_mismatch_is_documented_unsafe() {
    // The wire format carries no field names, so decoding with a
    // reordered-but-field-equal type of identical widths silently yields
    // swapped values. This is the documented contract: the decode-side type
    // definition must match the encode side exactly.
    let encoded = serialize(&Ordered { x: 1, y: 2 }).unwrap();
    let swapped: Reordered = deserialize(&encoded).unwrap();
    assert_eq!(swapped, Reordered { y: 1, x: 2 });

    // Width disagreements do not pass silently.
    assert!(matches!(
        deserialize::<Widened>(&encoded),
        Err(CodecError::StreamUnderflow { .. })
    ));
}

#[test]
fn truncated_scalar_is_underflow_not_zero_fill() {
    let encoded = serialize(&Telemetry {
        sub_id: 7,
        secret: 3.5,
    })
    .unwrap();
    let (bytes, lengths) = encoded.into_parts();

    // Cut mid-way through the second scalar.
    let truncated = Encoded::from_parts(bytes[..7].to_vec(), lengths);
    assert_eq!(
        deserialize::<Telemetry>(&truncated),
        Err(CodecError::StreamUnderflow {
            needed: 8,
            remaining: 3
        })
    );
}

#[test]
fn empty_payload_is_an_argument_error() {
    let empty = Encoded::from_parts(vec![], LengthQueue::new());
    assert!(matches!(
        deserialize::<i32>(&empty),
        Err(CodecError::Argument(_))
    ));
    assert!(matches!(
        deserialize_direct::<i32>(&empty),
        Err(CodecError::Argument(_))
    ));
}

#[test]
fn relay_queue_underflow_is_protocol_mismatch() {
    // Encoded a bare scalar, decoded as a sequence: the decoder asks the
    // relay queue for a count that was never produced.
    let encoded = serialize(&7i32).unwrap();
    assert!(matches!(
        deserialize::<Vec<i32>>(&encoded),
        Err(CodecError::ProtocolMismatch(_))
    ));
}

#[test]
fn undrained_relay_queue_is_protocol_mismatch() {
    // Encoded a sequence, decoded as a bare scalar: the bytes parse but the
    // relayed count is never consumed.
    let encoded = serialize(&vec![7i32]).unwrap();
    assert!(matches!(
        deserialize::<i32>(&encoded),
        Err(CodecError::ProtocolMismatch(_))
    ));
}

#[test]
fn shape_json_names_the_structure() {
    let json = shape_json::<Outer>();
    assert!(json.contains("\"Outer\""));
    assert!(json.contains("\"items\""));
    assert!(json.contains("\"Sequence\""));
    assert!(json.contains("\"Inner\""));
}
