use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::region_pipeline::common::error::{ExtractionError, Result};

/// How one window of samples collapses to a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReductionTransform {
    #[default]
    Mean,
    Max,
    Min,
    /// Sample of largest magnitude, sign kept; the earliest wins a tie.
    /// Legacy services emitted the unsigned magnitude instead.
    AbsMax,
    /// First sample of the window; plain decimation.
    First,
}

impl ReductionTransform {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReductionTransform::Mean => "mean",
            ReductionTransform::Max => "max",
            ReductionTransform::Min => "min",
            ReductionTransform::AbsMax => "absmax",
            ReductionTransform::First => "first",
        }
    }

    /// Reduces a non-empty window. A NaN result is reported as 0.
    #[inline]
    pub fn reduce<I>(self, mut window: I) -> f64
    where
        I: Iterator<Item = f64>,
    {
        let value = match self {
            ReductionTransform::Mean => {
                let (sum, count) = window.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
                sum / count as f64
            }
            ReductionTransform::Max => window.fold(f64::NEG_INFINITY, f64::max),
            ReductionTransform::Min => window.fold(f64::INFINITY, f64::min),
            ReductionTransform::AbsMax => window
                .reduce(|best, v| if v.abs() > best.abs() { v } else { best })
                .unwrap_or(f64::NAN),
            ReductionTransform::First => window.next().unwrap_or(f64::NAN),
        };

        if value.is_nan() {
            debug!(transform = self.as_str(), "Window reduced to NaN, using 0");
            0.0
        } else {
            value
        }
    }
}

impl FromStr for ReductionTransform {
    type Err = ExtractionError;

    fn from_str(token: &str) -> Result<Self> {
        match token.to_ascii_lowercase().as_str() {
            "mean" => Ok(ReductionTransform::Mean),
            "max" => Ok(ReductionTransform::Max),
            "min" => Ok(ReductionTransform::Min),
            "absmax" | "maxabs" => Ok(ReductionTransform::AbsMax),
            "first" => Ok(ReductionTransform::First),
            _ => Err(ExtractionError::InvalidTransform(token.to_string())),
        }
    }
}

impl fmt::Display for ReductionTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: [f64; 4] = [2.0, -7.0, 5.0, 1.0];

    #[test]
    fn test_reductions() {
        let run = |t: ReductionTransform| t.reduce(WINDOW.iter().copied());
        assert_eq!(run(ReductionTransform::Mean), 0.25);
        assert_eq!(run(ReductionTransform::Max), 5.0);
        assert_eq!(run(ReductionTransform::Min), -7.0);
        assert_eq!(run(ReductionTransform::AbsMax), -7.0);
        assert_eq!(run(ReductionTransform::First), 2.0);
    }

    #[test]
    fn test_nan_reduces_to_zero() {
        let window = [f64::NAN, 1.0];
        assert_eq!(ReductionTransform::Mean.reduce(window.iter().copied()), 0.0);
        assert_eq!(ReductionTransform::First.reduce(window.iter().copied()), 0.0);
    }

    #[test]
    fn test_transform_tokens() {
        assert_eq!("MaxAbs".parse::<ReductionTransform>().unwrap(), ReductionTransform::AbsMax);
        assert_eq!("first".parse::<ReductionTransform>().unwrap(), ReductionTransform::First);
        assert!(matches!(
            "median".parse::<ReductionTransform>(),
            Err(ExtractionError::InvalidTransform(_))
        ));
    }
}
