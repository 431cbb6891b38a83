//! Scalar kinds, fields and the dtype lookup tables.
//!
//! `DType` is the closed set of element types a space can be backed by.
//! Everything that depends on the element type (field membership,
//! default comparison precision, noise distribution) is a lookup on this
//! enum rather than a runtime registry.

use std::fmt;

use crate::error::{FnError, Result};

/// Scalar field of a space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Real,
    Complex,
}

impl Field {
    /// Default floating dtype used for spaces over this field.
    pub fn default_dtype(self) -> DType {
        match self {
            Field::Real => DType::F64,
            Field::Complex => DType::C128,
        }
    }

    /// Whether a space over `self` can hold values of field `other`.
    pub fn contains(self, other: Field) -> bool {
        self == Field::Complex || other == Field::Real
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Real => write!(f, "RealNumbers"),
            Field::Complex => write!(f, "ComplexNumbers"),
        }
    }
}

/// Element type of a numeric buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    C64,
    C128,
}

/// Precision tier used to derive default comparison tolerances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// Half precision floats.
    Tiny,
    /// Single precision floats and complex64.
    Single,
    /// Everything else.
    Full,
}

impl Precision {
    /// Number of expected correct digits for results of stable computations.
    pub const fn ndigits(self) -> u32 {
        match self {
            Precision::Tiny => 1,
            Precision::Single => 3,
            Precision::Full => 5,
        }
    }
}

// (dtype, name, field, precision tier)
static DTYPE_TABLE: [(DType, &str, Field, Precision); 13] = [
    (DType::Bool, "bool", Field::Real, Precision::Full),
    (DType::I8, "int8", Field::Real, Precision::Full),
    (DType::I16, "int16", Field::Real, Precision::Full),
    (DType::I32, "int32", Field::Real, Precision::Full),
    (DType::I64, "int64", Field::Real, Precision::Full),
    (DType::U8, "uint8", Field::Real, Precision::Full),
    (DType::U16, "uint16", Field::Real, Precision::Full),
    (DType::U32, "uint32", Field::Real, Precision::Full),
    (DType::U64, "uint64", Field::Real, Precision::Full),
    (DType::F32, "float32", Field::Real, Precision::Single),
    (DType::F64, "float64", Field::Real, Precision::Full),
    (DType::C64, "complex64", Field::Complex, Precision::Single),
    (DType::C128, "complex128", Field::Complex, Precision::Full),
];

impl DType {
    pub const ALL: [DType; 13] = [
        DType::Bool,
        DType::I8,
        DType::I16,
        DType::I32,
        DType::I64,
        DType::U8,
        DType::U16,
        DType::U32,
        DType::U64,
        DType::F32,
        DType::F64,
        DType::C64,
        DType::C128,
    ];

    fn entry(self) -> &'static (DType, &'static str, Field, Precision) {
        // Table rows are in declaration order.
        &DTYPE_TABLE[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.entry().1
    }

    /// Field the dtype belongs to. Booleans and integers count as real.
    pub fn field(self) -> Field {
        self.entry().2
    }

    pub fn precision(self) -> Precision {
        self.entry().3
    }

    pub fn from_name(name: &str) -> Result<DType> {
        DTYPE_TABLE
            .iter()
            .find(|row| row.1 == name)
            .map(|row| row.0)
            .ok_or_else(|| FnError::Type(format!("unknown dtype {name:?}")))
    }

    pub fn is_numeric(self) -> bool {
        self != DType::Bool
    }

    pub fn is_bool(self) -> bool {
        self == DType::Bool
    }

    pub fn is_int(self) -> bool {
        self.is_signed_int() || self.is_unsigned_int()
    }

    pub fn is_signed_int(self) -> bool {
        matches!(self, DType::I8 | DType::I16 | DType::I32 | DType::I64)
    }

    pub fn is_unsigned_int(self) -> bool {
        matches!(self, DType::U8 | DType::U16 | DType::U32 | DType::U64)
    }

    pub fn is_real(self) -> bool {
        self.is_numeric() && self.field() == Field::Real
    }

    pub fn is_real_floating(self) -> bool {
        matches!(self, DType::F32 | DType::F64)
    }

    pub fn is_complex_floating(self) -> bool {
        matches!(self, DType::C64 | DType::C128)
    }

    pub fn is_floating(self) -> bool {
        self.is_real_floating() || self.is_complex_floating()
    }

    /// Real counterpart of a complex dtype; real dtypes map to themselves.
    pub fn real_dtype(self) -> DType {
        match self {
            DType::C64 => DType::F32,
            DType::C128 => DType::F64,
            other => other,
        }
    }

    /// Complex counterpart of a floating dtype.
    pub fn complex_dtype(self) -> Result<DType> {
        match self {
            DType::F32 | DType::C64 => Ok(DType::C64),
            DType::F64 | DType::C128 => Ok(DType::C128),
            other => Err(FnError::Type(format!("no complex counterpart of {other}"))),
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of correct digits expected for `dtype`.
///
/// Single precision types get 3, everything else `default` (or 5 when
/// `default` is `None`). `None` as dtype stands for untyped values.
pub fn dtype_ndigits(dtype: Option<DType>, default: Option<u32>) -> u32 {
    match dtype.map(DType::precision) {
        Some(Precision::Tiny) => Precision::Tiny.ndigits(),
        Some(Precision::Single) => Precision::Single.ndigits(),
        _ => default.unwrap_or(Precision::Full.ndigits()),
    }
}

/// Same as [`dtype_ndigits`], expressed as a tolerance `10^-ndigits`.
pub fn dtype_tol(dtype: Option<DType>, default: Option<u32>) -> f64 {
    10f64.powi(-(dtype_ndigits(dtype, default) as i32))
}
