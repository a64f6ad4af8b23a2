use crate::descriptor::FieldDescriptor;
use crate::kind::{FieldKind, FieldValue};

/// A record whose fields can be populated by the resolution stages.
///
/// Implement it by hand or generate it with [`layered!`](crate::layered).
/// `descriptors` lists every field in declaration order, embedded ones
/// included. `field_slot` hands out a mutable view of a primitive field and
/// must return `None` for embedded or unknown names.
pub trait Layered {
    /// Name used in diagnostics.
    fn record_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    fn descriptors() -> Vec<FieldDescriptor>;

    fn field_slot(&mut self, name: &str) -> Option<FieldSlot<'_>>;
}

/// Mutable view of one primitive field.
#[derive(Debug)]
pub enum FieldSlot<'a> {
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Bool(&'a mut bool),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Str(&'a mut String),
}

impl FieldSlot<'_> {
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::I8(_) => FieldKind::I8,
            Self::I16(_) => FieldKind::I16,
            Self::I32(_) => FieldKind::I32,
            Self::I64(_) => FieldKind::I64,
            Self::U8(_) => FieldKind::U8,
            Self::U16(_) => FieldKind::U16,
            Self::U32(_) => FieldKind::U32,
            Self::U64(_) => FieldKind::U64,
            Self::Bool(_) => FieldKind::Bool,
            Self::F32(_) => FieldKind::F32,
            Self::F64(_) => FieldKind::F64,
            Self::Str(_) => FieldKind::Str,
        }
    }

    /// Writes `value` into the field. Returns `false` and leaves the field
    /// untouched when the value was coerced for a different kind.
    pub fn assign(self, value: FieldValue) -> bool {
        match (self, value) {
            (Self::I8(slot), FieldValue::I8(v)) => *slot = v,
            (Self::I16(slot), FieldValue::I16(v)) => *slot = v,
            (Self::I32(slot), FieldValue::I32(v)) => *slot = v,
            (Self::I64(slot), FieldValue::I64(v)) => *slot = v,
            (Self::U8(slot), FieldValue::U8(v)) => *slot = v,
            (Self::U16(slot), FieldValue::U16(v)) => *slot = v,
            (Self::U32(slot), FieldValue::U32(v)) => *slot = v,
            (Self::U64(slot), FieldValue::U64(v)) => *slot = v,
            (Self::Bool(slot), FieldValue::Bool(v)) => *slot = v,
            (Self::F32(slot), FieldValue::F32(v)) => *slot = v,
            (Self::F64(slot), FieldValue::F64(v)) => *slot = v,
            (Self::Str(slot), FieldValue::Str(v)) => *slot = v,
            _ => return false,
        }
        true
    }

    /// Current value of the field.
    #[must_use]
    pub fn current(&self) -> FieldValue {
        match self {
            Self::I8(v) => FieldValue::I8(**v),
            Self::I16(v) => FieldValue::I16(**v),
            Self::I32(v) => FieldValue::I32(**v),
            Self::I64(v) => FieldValue::I64(**v),
            Self::U8(v) => FieldValue::U8(**v),
            Self::U16(v) => FieldValue::U16(**v),
            Self::U32(v) => FieldValue::U32(**v),
            Self::U64(v) => FieldValue::U64(**v),
            Self::Bool(v) => FieldValue::Bool(**v),
            Self::F32(v) => FieldValue::F32(**v),
            Self::F64(v) => FieldValue::F64(**v),
            Self::Str(v) => FieldValue::Str((**v).clone()),
        }
    }
}

/// Rust types that can back a resolvable field.
pub trait Primitive {
    const KIND: FieldKind;

    fn slot(&mut self) -> FieldSlot<'_>;
}

macro_rules! impl_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Primitive for $ty {
                const KIND: FieldKind = FieldKind::$variant;

                fn slot(&mut self) -> FieldSlot<'_> {
                    FieldSlot::$variant(self)
                }
            }
        )*
    };
}

impl_primitive! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    bool => Bool,
    f32 => F32,
    f64 => F64,
    String => Str,
}
