use serde::Serialize;

/// The primitive scalar kinds the codec knows how to move across the wire.
/// Every kind has a fixed width; multi-byte kinds are little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScalarKind {
    Bool,
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
    Char,
}

impl ScalarKind {
    /// The number of bytes this kind occupies on the wire.
    pub fn width(self) -> usize {
        match self {
            ScalarKind::Bool | ScalarKind::U8 | ScalarKind::I8 => 1,
            ScalarKind::U16 | ScalarKind::I16 => 2,
            ScalarKind::U32 | ScalarKind::I32 | ScalarKind::F32 | ScalarKind::Char => 4,
            ScalarKind::U64 | ScalarKind::I64 | ScalarKind::F64 => 8,
        }
    }

    /// Whether this kind can carry an enum discriminant.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            ScalarKind::U8
                | ScalarKind::I8
                | ScalarKind::U16
                | ScalarKind::I16
                | ScalarKind::U32
                | ScalarKind::I32
                | ScalarKind::U64
                | ScalarKind::I64
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::U8 => "u8",
            ScalarKind::I8 => "i8",
            ScalarKind::U16 => "u16",
            ScalarKind::I16 => "i16",
            ScalarKind::U32 => "u32",
            ScalarKind::I32 => "i32",
            ScalarKind::U64 => "u64",
            ScalarKind::I64 => "i64",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::Char => "char",
        }
    }
}

/// The classification of a type. Both strategies consume shapes: the plan
/// compiler turns one into a cached procedure tree, the direct interpreter
/// walks it afresh on every call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Shape {
    Primitive(ScalarKind),
    Text,
    /// An enum, written to the wire as its underlying integer kind.
    Enum(ScalarKind),
    /// A homogeneous sequence. Element counts travel out-of-band through the
    /// length relay queue, never as inline prefixes.
    Sequence(Box<Shape>),
    Record(RecordShape),
}

impl Shape {
    /// A short human-readable label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Shape::Primitive(_) => "primitive",
            Shape::Text => "text",
            Shape::Enum(_) => "enum",
            Shape::Sequence(_) => "sequence",
            Shape::Record(_) => "record",
        }
    }
}

/// A composite type: named fields in declared order. Declared order is the
/// wire order, and must match exactly between the encode side and the decode
/// side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordShape {
    pub name: &'static str,
    pub fields: Vec<FieldShape>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldShape {
    pub name: &'static str,
    pub shape: Shape,
}
