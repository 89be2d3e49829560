use std::fmt;
use std::str::FromStr;

use crate::region_pipeline::common::error::{ExtractionError, Result};

/// Power floor applied before taking a logarithm.
pub const LO_THRESH: f64 = 1.0e-20;

/// How a complex (I,Q) pair becomes a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComplexMode {
    /// `sqrt(I² + Q²)`
    #[default]
    Magnitude,
    /// `atan2(Q, I)`
    Phase,
    Real,
    Imaginary,
    /// `10·log10(max(I² + Q², LO_THRESH))`
    Log10,
    /// `20·log10(max(I² + Q², LO_THRESH))`
    Log20,
}

impl ComplexMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexMode::Magnitude => "mag",
            ComplexMode::Phase => "phase",
            ComplexMode::Real => "real",
            ComplexMode::Imaginary => "imag",
            ComplexMode::Log10 => "10log",
            ComplexMode::Log20 => "20log",
        }
    }

    #[inline]
    pub fn apply(self, i: f64, q: f64) -> f64 {
        match self {
            ComplexMode::Magnitude => i.hypot(q),
            ComplexMode::Phase => q.atan2(i),
            ComplexMode::Real => i,
            ComplexMode::Imaginary => q,
            ComplexMode::Log10 => 10.0 * (i * i + q * q).max(LO_THRESH).log10(),
            ComplexMode::Log20 => 20.0 * (i * i + q * q).max(LO_THRESH).log10(),
        }
    }
}

impl FromStr for ComplexMode {
    type Err = ExtractionError;

    fn from_str(token: &str) -> Result<Self> {
        match token.to_ascii_lowercase().as_str() {
            "mag" => Ok(ComplexMode::Magnitude),
            "phase" => Ok(ComplexMode::Phase),
            "real" => Ok(ComplexMode::Real),
            "imag" => Ok(ComplexMode::Imaginary),
            "10log" => Ok(ComplexMode::Log10),
            "20log" => Ok(ComplexMode::Log20),
            _ => Err(ExtractionError::InvalidComplexMode(token.to_string())),
        }
    }
}

impl fmt::Display for ComplexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
