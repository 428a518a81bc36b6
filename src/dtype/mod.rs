//! Data type system for axfold tensors
//!
//! A [`DType`] is an element kind ([`TypeKind`]) paired with a bit width.
//! Tensors carry their dtype at runtime; the [`Element`] trait maps Rust
//! primitive types onto it so folds can decode and re-encode buffer bytes.

mod element;

pub use element::Element;

use crate::error::{Error, Result};
use std::fmt;

/// Element kind, independent of width
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// IEEE 754 binary floating point
    Float,
    /// Brain floating point (8-bit exponent, 7-bit mantissa)
    BFloat,
    /// Two's complement signed integer
    Signed,
    /// Unsigned integer
    Unsigned,
}

/// Data types supported by axfold tensors
///
/// # Discriminant Values
///
/// - Floats: 0-9 (F64=0, F32=1, F16=2, BF16=3)
/// - Signed ints: 10-19 (I64=10, I32=11, I16=12, I8=13)
/// - Unsigned ints: 20-29 (U64=20, U32=21, U16=22, U8=23)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum DType {
    /// 64-bit floating point
    F64 = 0,
    /// 32-bit floating point
    F32 = 1,
    /// 16-bit floating point (IEEE 754)
    F16 = 2,
    /// 16-bit brain floating point
    BF16 = 3,

    /// 64-bit signed integer
    I64 = 10,
    /// 32-bit signed integer
    I32 = 11,
    /// 16-bit signed integer
    I16 = 12,
    /// 8-bit signed integer
    I8 = 13,

    /// 64-bit unsigned integer
    U64 = 20,
    /// 32-bit unsigned integer
    U32 = 21,
    /// 16-bit unsigned integer
    U16 = 22,
    /// 8-bit unsigned integer
    U8 = 23,
}

impl DType {
    /// Look up the dtype for a kind and bit width.
    ///
    /// Fails with [`Error::InvalidBitWidth`] when the pair names no dtype,
    /// e.g. `(Float, 8)` or `(BFloat, 32)`.
    pub fn from_kind(kind: TypeKind, bits: usize) -> Result<Self> {
        let dtype = match (kind, bits) {
            (TypeKind::Float, 64) => Self::F64,
            (TypeKind::Float, 32) => Self::F32,
            (TypeKind::Float, 16) => Self::F16,
            (TypeKind::BFloat, 16) => Self::BF16,
            (TypeKind::Signed, 64) => Self::I64,
            (TypeKind::Signed, 32) => Self::I32,
            (TypeKind::Signed, 16) => Self::I16,
            (TypeKind::Signed, 8) => Self::I8,
            (TypeKind::Unsigned, 64) => Self::U64,
            (TypeKind::Unsigned, 32) => Self::U32,
            (TypeKind::Unsigned, 16) => Self::U16,
            (TypeKind::Unsigned, 8) => Self::U8,
            _ => return Err(Error::InvalidBitWidth { kind, bits }),
        };
        Ok(dtype)
    }

    /// Element kind
    #[inline]
    pub const fn kind(self) -> TypeKind {
        match self {
            Self::F64 | Self::F32 | Self::F16 => TypeKind::Float,
            Self::BF16 => TypeKind::BFloat,
            Self::I64 | Self::I32 | Self::I16 | Self::I8 => TypeKind::Signed,
            Self::U64 | Self::U32 | Self::U16 | Self::U8 => TypeKind::Unsigned,
        }
    }

    /// Size of one element in bytes
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::F64 | Self::I64 | Self::U64 => 8,
            Self::F32 | Self::I32 | Self::U32 => 4,
            Self::F16 | Self::BF16 | Self::I16 | Self::U16 => 2,
            Self::I8 | Self::U8 => 1,
        }
    }

    /// Size of one element in bits
    #[inline]
    pub const fn bit_width(self) -> usize {
        self.size_in_bytes() * 8
    }

    /// Returns true if this is a floating point type
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self.kind(), TypeKind::Float | TypeKind::BFloat)
    }

    /// Returns true if this is a signed integer type
    #[inline]
    pub const fn is_signed_int(self) -> bool {
        matches!(self.kind(), TypeKind::Signed)
    }

    /// Returns true if this is an unsigned integer type
    #[inline]
    pub const fn is_unsigned_int(self) -> bool {
        matches!(self.kind(), TypeKind::Unsigned)
    }

    /// Short name for display (e.g., "f32", "i64")
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::F64 => "f64",
            Self::F32 => "f32",
            Self::F16 => "f16",
            Self::BF16 => "bf16",
            Self::I64 => "i64",
            Self::I32 => "i32",
            Self::I16 => "i16",
            Self::I8 => "i8",
            Self::U64 => "u64",
            Self::U32 => "u32",
            Self::U16 => "u16",
            Self::U8 => "u8",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_size() {
        assert_eq!(DType::F64.size_in_bytes(), 8);
        assert_eq!(DType::F32.size_in_bytes(), 4);
        assert_eq!(DType::BF16.size_in_bytes(), 2);
        assert_eq!(DType::I8.size_in_bytes(), 1);
        assert_eq!(DType::U16.bit_width(), 16);
        assert_eq!(DType::I64.bit_width(), 64);
    }

    #[test]
    fn test_dtype_categories() {
        assert!(DType::F32.is_float());
        assert!(DType::BF16.is_float());
        assert!(!DType::I32.is_float());
        assert!(DType::I32.is_signed_int());
        assert!(DType::U32.is_unsigned_int());
        assert!(!DType::U32.is_signed_int());
    }

    #[test]
    fn test_from_kind_roundtrips_every_dtype() {
        for dtype in [
            DType::F64,
            DType::F32,
            DType::F16,
            DType::BF16,
            DType::I64,
            DType::I32,
            DType::I16,
            DType::I8,
            DType::U64,
            DType::U32,
            DType::U16,
            DType::U8,
        ] {
            let back = DType::from_kind(dtype.kind(), dtype.bit_width()).unwrap();
            assert_eq!(back, dtype);
        }
    }

    #[test]
    fn test_from_kind_rejects_unknown_width() {
        assert!(matches!(
            DType::from_kind(TypeKind::Float, 8),
            Err(Error::InvalidBitWidth { bits: 8, .. })
        ));
        assert!(DType::from_kind(TypeKind::BFloat, 32).is_err());
        assert!(DType::from_kind(TypeKind::Signed, 0).is_err());
        assert!(DType::from_kind(TypeKind::Unsigned, 12).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(DType::BF16.to_string(), "bf16");
        assert_eq!(format!("{}", DType::U8), "u8");
    }
}
