use shapewire_schema::{CodecError, ScalarKind, Shape, Value};

/// Every encodable type classifies itself once and converts to and from the
/// dynamic [`Value`] representation. We require `Sized` so that `Self` can
/// be constructed on decode.
///
/// Scalars, `String`, `Vec<T>` and `[T; N]` are covered by this crate;
/// structs and enums get their impls from [`reflect_record!`] and
/// [`reflect_enum!`].
///
/// [`reflect_record!`]: crate::reflect_record
/// [`reflect_enum!`]: crate::reflect_enum
pub trait Reflect: Sized {
    /// The shape of this type. Must be stable for the process lifetime: the
    /// compiled strategy caches the plan built from the first call.
    fn shape() -> Shape;

    /// Converts this value into its dynamic representation.
    fn to_value(&self) -> Value;

    /// Rebuilds a typed value from its dynamic representation.
    fn from_value(value: Value) -> Result<Self, CodecError>;
}

/// Maps an enum's underlying integer type to its wire kind. Used by
/// [`reflect_enum!`](crate::reflect_enum) to resolve the `: repr` token.
pub trait ReprKind {
    const KIND: ScalarKind;
}

macro_rules! repr_kind {
    ($($ty:ty => $kind:ident),+ $(,)?) => {
        $(
            impl ReprKind for $ty {
                const KIND: ScalarKind = ScalarKind::$kind;
            }
        )+
    };
}

repr_kind! {
    u8 => U8,
    i8 => I8,
    u16 => U16,
    i16 => I16,
    u32 => U32,
    i32 => I32,
    u64 => U64,
    i64 => I64,
}
