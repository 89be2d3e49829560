//! Element format types

use std::fmt;
use std::str::FromStr;

use crate::region_pipeline::common::error::{ExtractionError, Result};

/// Fixed-width numeric unit stored in a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomKind {
    /// 4-byte IEEE float (`F`)
    Float32,
    /// 2-byte signed integer (`I`)
    Int16,
    /// 8-byte IEEE float (`D`)
    Float64,
    /// 4-byte signed integer (`L`)
    Int32,
    /// 1-byte signed integer, widened on decode (`B`)
    Byte,
}

impl AtomKind {
    pub const fn byte_width(self) -> usize {
        match self {
            AtomKind::Float32 => 4,
            AtomKind::Int16 => 2,
            AtomKind::Float64 => 8,
            AtomKind::Int32 => 4,
            AtomKind::Byte => 1,
        }
    }

    pub const fn is_integral(self) -> bool {
        matches!(self, AtomKind::Int16 | AtomKind::Int32 | AtomKind::Byte)
    }

    pub const fn code(self) -> char {
        match self {
            AtomKind::Float32 => 'F',
            AtomKind::Int16 => 'I',
            AtomKind::Float64 => 'D',
            AtomKind::Int32 => 'L',
            AtomKind::Byte => 'B',
        }
    }

    pub fn from_code(code: char) -> Result<Self> {
        match code.to_ascii_uppercase() {
            'F' => Ok(AtomKind::Float32),
            'I' => Ok(AtomKind::Int16),
            'D' => Ok(AtomKind::Float64),
            'L' => Ok(AtomKind::Int32),
            'B' => Ok(AtomKind::Byte),
            other => Err(ExtractionError::InvalidFormat(format!(
                "unknown atom kind '{}'",
                other
            ))),
        }
    }
}

/// Byte order of atoms in the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

/// Layout of one element: a scalar atom or an interleaved (I,Q) atom pair.
///
/// The element byte width is always derived from the atom kind and never
/// stored, so the two cannot disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementFormat {
    is_complex: bool,
    atom_kind: AtomKind,
}

impl ElementFormat {
    pub const fn new(is_complex: bool, atom_kind: AtomKind) -> Self {
        Self {
            is_complex,
            atom_kind,
        }
    }

    pub const fn scalar(atom_kind: AtomKind) -> Self {
        Self::new(false, atom_kind)
    }

    pub const fn complex(atom_kind: AtomKind) -> Self {
        Self::new(true, atom_kind)
    }

    pub const fn is_complex(&self) -> bool {
        self.is_complex
    }

    pub const fn atom_kind(&self) -> AtomKind {
        self.atom_kind
    }

    pub const fn atom_byte_width(&self) -> usize {
        self.atom_kind.byte_width()
    }

    /// Atoms per element: 2 for complex, 1 for scalar.
    pub const fn atoms_per_element(&self) -> usize {
        if self.is_complex { 2 } else { 1 }
    }

    pub const fn element_byte_width(&self) -> usize {
        self.atom_byte_width() * self.atoms_per_element()
    }
}

impl FromStr for ElementFormat {
    type Err = ExtractionError;

    /// Parses a two-character token such as `SF` or `CI`.
    fn from_str(token: &str) -> Result<Self> {
        let mut chars = token.chars();
        let (Some(flag), Some(atom), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ExtractionError::InvalidFormat(format!(
                "expected a two-character token, got '{}'",
                token
            )));
        };

        let is_complex = match flag.to_ascii_uppercase() {
            'C' => true,
            'S' => false,
            other => {
                return Err(ExtractionError::InvalidFormat(format!(
                    "unknown complex flag '{}'",
                    other
                )));
            }
        };

        Ok(Self::new(is_complex, AtomKind::from_code(atom)?))
    }
}

impl fmt::Display for ElementFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = if self.is_complex { 'C' } else { 'S' };
        write!(f, "{}{}", flag, self.atom_kind.code())
    }
}
