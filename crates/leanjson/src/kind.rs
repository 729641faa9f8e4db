//! The closed set of shapes a reflected value can take.

use std::fmt;

/// Bit width of an integer kind.
///
/// Integers of every width travel through the codec as 64-bit carriers; the
/// width is kept so that writes back into a narrower slot can be range checked
/// and so that error messages name the real destination type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    /// 8 bits.
    W8,
    /// 16 bits.
    W16,
    /// 32 bits.
    W32,
    /// 64 bits.
    W64,
}

impl Width {
    /// Number of bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::W8 => 8,
            Self::W16 => 16,
            Self::W32 => 32,
            Self::W64 => 64,
        }
    }

    /// Width of `isize`/`usize` on the target.
    #[must_use]
    pub const fn pointer() -> Self {
        match usize::BITS {
            16 => Self::W16,
            32 => Self::W32,
            _ => Self::W64,
        }
    }
}

/// Tag identifying the shape of a reflected value.
///
/// `Invalid` covers both absent values and types the codec cannot walk; it is
/// never silently turned into JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// UTF-8 text.
    String,
    /// Signed integer.
    Int(Width),
    /// Unsigned integer.
    Uint(Width),
    /// `f32`.
    Float32,
    /// `f64`.
    Float64,
    /// `true` / `false`.
    Bool,
    /// Named fields, visited in declaration order.
    Struct,
    /// Growable sequence of one element type.
    Slice,
    /// Optional owned pointee.
    Pointer,
    /// Absent or unsupported.
    Invalid,
}

impl Kind {
    /// `true` for kinds read and written through a [`Scalar`](crate::Scalar).
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::String | Self::Int(_) | Self::Uint(_) | Self::Float32 | Self::Float64 | Self::Bool
        )
    }

    /// `true` for kinds navigated through children.
    #[must_use]
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::Struct | Self::Slice | Self::Pointer)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Int(w) => write!(f, "int{}", w.bits()),
            Self::Uint(w) => write!(f, "uint{}", w.bits()),
            Self::Float32 => f.write_str("float32"),
            Self::Float64 => f.write_str("float64"),
            Self::Bool => f.write_str("bool"),
            Self::Struct => f.write_str("struct"),
            Self::Slice => f.write_str("slice"),
            Self::Pointer => f.write_str("pointer"),
            Self::Invalid => f.write_str("invalid"),
        }
    }
}
