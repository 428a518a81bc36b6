//! Element trait for mapping Rust types to DType

use super::DType;
use bytemuck::{Pod, Zeroable};
use std::ops::{Add, Div, Mul, Sub};

/// Trait for types that can be elements of a tensor
///
/// This trait connects Rust's type system to axfold's runtime dtype system.
/// Folds are generic over `Element`: buffer bytes are decoded into `Self`
/// before the fold function sees them and re-encoded afterwards, always at
/// `DTYPE`'s width and in native byte order.
///
/// # Bounds
/// - `Pod + Zeroable` - byte-level decode/encode (bytemuck)
/// - `Send + Sync` - values cross rayon worker boundaries
/// - `Add + Sub + Mul + Div + PartialOrd` - built-in reductions
pub trait Element:
    Copy
    + Send
    + Sync
    + Pod
    + Zeroable
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + PartialOrd
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Convert to f64 for generic numeric operations
    fn to_f64(self) -> f64;

    /// Convert from f64 to this type
    fn from_f64(v: f64) -> Self;

    /// Zero value
    fn zero() -> Self;

    /// One value
    fn one() -> Self;

    /// Smallest value (negative infinity for floats)
    fn lowest() -> Self;

    /// Largest value (positive infinity for floats)
    fn highest() -> Self;

    /// Whether this value is NaN (always false for integers)
    #[inline]
    fn is_nan(self) -> bool {
        false
    }

    /// Decode one element from exactly `DTYPE.size_in_bytes()` bytes.
    #[inline]
    fn decode(bytes: &[u8]) -> Self {
        bytemuck::pod_read_unaligned(bytes)
    }

    /// Encode into exactly `DTYPE.size_in_bytes()` bytes.
    #[inline]
    fn encode(self, out: &mut [u8]) {
        out.copy_from_slice(bytemuck::bytes_of(&self));
    }
}

macro_rules! impl_element_float {
    ($($ty:ty => $dtype:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const DTYPE: DType = DType::$dtype;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(v: f64) -> Self {
                    v as $ty
                }

                #[inline]
                fn zero() -> Self {
                    0.0
                }

                #[inline]
                fn one() -> Self {
                    1.0
                }

                #[inline]
                fn lowest() -> Self {
                    <$ty>::NEG_INFINITY
                }

                #[inline]
                fn highest() -> Self {
                    <$ty>::INFINITY
                }

                #[inline]
                fn is_nan(self) -> bool {
                    <$ty>::is_nan(self)
                }
            }
        )*
    };
}

macro_rules! impl_element_int {
    ($($ty:ty => $dtype:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const DTYPE: DType = DType::$dtype;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                // Saturating: `as` clamps out-of-range floats and maps NaN to 0.
                #[inline]
                fn from_f64(v: f64) -> Self {
                    v as $ty
                }

                #[inline]
                fn zero() -> Self {
                    0
                }

                #[inline]
                fn one() -> Self {
                    1
                }

                #[inline]
                fn lowest() -> Self {
                    <$ty>::MIN
                }

                #[inline]
                fn highest() -> Self {
                    <$ty>::MAX
                }
            }
        )*
    };
}

impl_element_float!(f64 => F64, f32 => F32);

impl_element_int!(
    i64 => I64,
    i32 => I32,
    i16 => I16,
    i8 => I8,
    u64 => U64,
    u32 => U32,
    u16 => U16,
    u8 => U8,
);

// ============================================================================
// 16-bit floating point types (requires "f16" feature)
// ============================================================================

#[cfg(feature = "f16")]
impl Element for half::f16 {
    const DTYPE: DType = DType::F16;

    #[inline]
    fn to_f64(self) -> f64 {
        half::f16::to_f64(self)
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        half::f16::from_f64(v)
    }

    #[inline]
    fn zero() -> Self {
        half::f16::ZERO
    }

    #[inline]
    fn one() -> Self {
        half::f16::ONE
    }

    #[inline]
    fn lowest() -> Self {
        half::f16::NEG_INFINITY
    }

    #[inline]
    fn highest() -> Self {
        half::f16::INFINITY
    }

    #[inline]
    fn is_nan(self) -> bool {
        half::f16::is_nan(self)
    }
}

#[cfg(feature = "f16")]
impl Element for half::bf16 {
    const DTYPE: DType = DType::BF16;

    #[inline]
    fn to_f64(self) -> f64 {
        half::bf16::to_f64(self)
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        half::bf16::from_f64(v)
    }

    #[inline]
    fn zero() -> Self {
        half::bf16::ZERO
    }

    #[inline]
    fn one() -> Self {
        half::bf16::ONE
    }

    #[inline]
    fn lowest() -> Self {
        half::bf16::NEG_INFINITY
    }

    #[inline]
    fn highest() -> Self {
        half::bf16::INFINITY
    }

    #[inline]
    fn is_nan(self) -> bool {
        half::bf16::is_nan(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_encode_native_order() {
        let mut buf = [0u8; 4];
        (-7i32).encode(&mut buf);
        assert_eq!(buf, (-7i32).to_ne_bytes());
        assert_eq!(i32::decode(&buf), -7);
    }

    #[test]
    fn test_decode_unaligned_slice() {
        let mut bytes = vec![0u8; 9];
        bytes[1..9].copy_from_slice(&2.5f64.to_ne_bytes());
        assert_eq!(f64::decode(&bytes[1..9]), 2.5);
    }

    #[test]
    fn test_seeds() {
        assert_eq!(u8::lowest(), 0);
        assert_eq!(i16::highest(), i16::MAX);
        assert_eq!(f32::lowest(), f32::NEG_INFINITY);
        assert_eq!(<i64 as Element>::one(), 1);
    }

    #[test]
    fn test_is_nan() {
        assert!(Element::is_nan(f64::NAN));
        assert!(!Element::is_nan(1.0f32));
        assert!(!Element::is_nan(i32::MIN));
    }

    #[cfg(feature = "f16")]
    #[test]
    fn test_half_roundtrip_through_bytes() {
        let mut buf = [0u8; 2];
        half::bf16::from_f64(1.5).encode(&mut buf);
        assert_eq!(half::bf16::decode(&buf).to_f64(), 1.5);
    }
}
