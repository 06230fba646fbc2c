//! Severity scores as tree keys.
//!
//! Vulnerability records are indexed by a severity score between 0.0 and
//! 10.0. Raw scores arrive as floats or text and may be undefined (`NaN`,
//! `"N/A"`); [`Severity`] only admits defined scores, which gives floats the
//! total order an [`OrderedTree`] key needs. [`SeverityRange`] is the
//! validated closed interval a report asks for.
//!
//! # Examples
//!
//! ```rust
//! use severity_tree::severity::{Severity, SeverityRange};
//! use severity_tree::tree::OrderedTree;
//!
//! let records = [("CVE-1", "9.8"), ("CVE-2", "N/A"), ("CVE-3", "5.3"), ("CVE-4", "7.5")];
//!
//! let mut tree = OrderedTree::avl();
//! for (cve, score) in records {
//!     // Undefined scores are skipped.
//!     if let Ok(severity) = score.parse::<Severity>() {
//!         tree.insert(severity, cve);
//!     }
//! }
//!
//! let high = SeverityRange::new(7.0, 10.0).unwrap();
//! assert_eq!(high.query(&tree), vec![&"CVE-4", &"CVE-1"]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::tree::OrderedTree;

/// Lowest score on the severity scale.
pub const MIN_SEVERITY: f64 = 0.0;

/// Highest score on the severity scale.
pub const MAX_SEVERITY: f64 = 10.0;

// =============================================================================
// Errors
// =============================================================================

/// Errors produced while building a [`Severity`] or a [`SeverityRange`].
///
/// # Examples
///
/// ```rust
/// use severity_tree::severity::SeverityError;
///
/// let error = SeverityError::InvertedRange { min: 9.0, max: 6.0 };
/// assert_eq!(format!("{error}"), "invalid severity range: 9 is greater than 6");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SeverityError {
    /// The score is `NaN`.
    NotANumber,
    /// The text is empty, `"N/A"`, or not a number.
    Unparsable(String),
    /// The score lies outside `[0.0, 10.0]`.
    OutOfScale(f64),
    /// The lower bound of a range exceeds its upper bound.
    InvertedRange {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },
}

impl fmt::Display for SeverityError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber => write!(formatter, "severity is not a number"),
            Self::Unparsable(text) => write!(formatter, "unparsable severity {text:?}"),
            Self::OutOfScale(score) => write!(
                formatter,
                "severity {score} is outside the scale [{MIN_SEVERITY}, {MAX_SEVERITY}]"
            ),
            Self::InvertedRange { min, max } => write!(
                formatter,
                "invalid severity range: {min} is greater than {max}"
            ),
        }
    }
}

impl std::error::Error for SeverityError {}

// =============================================================================
// Severity
// =============================================================================

/// A defined severity score.
///
/// Ordering uses [`f64::total_cmp`], so `-0.0 < 0.0`; `NaN` can never be
/// stored.
#[derive(Debug, Clone, Copy)]
pub struct Severity(f64);

impl Severity {
    /// Wraps a score.
    ///
    /// # Errors
    ///
    /// Returns [`SeverityError::NotANumber`] when `score` is `NaN`.
    pub fn new(score: f64) -> Result<Self, SeverityError> {
        if score.is_nan() {
            Err(SeverityError::NotANumber)
        } else {
            Ok(Self(score))
        }
    }

    /// Returns the raw score.
    #[inline]
    #[must_use]
    pub const fn score(self) -> f64 {
        self.0
    }
}

impl PartialEq for Severity {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Severity {}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Severity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl TryFrom<f64> for Severity {
    type Error = SeverityError;

    fn try_from(score: f64) -> Result<Self, Self::Error> {
        Self::new(score)
    }
}

impl FromStr for Severity {
    type Err = SeverityError;

    /// Parses a score, treating blank text and `"N/A"` as undefined.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n/a") {
            return Err(SeverityError::Unparsable(trimmed.to_string()));
        }
        let score: f64 = trimmed
            .parse()
            .map_err(|_| SeverityError::Unparsable(trimmed.to_string()))?;
        Self::new(score)
    }
}

// =============================================================================
// SeverityRange
// =============================================================================

/// A closed severity interval `[min, max]` on the 0.0 to 10.0 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityRange {
    min: Severity,
    max: Severity,
}

impl SeverityRange {
    /// Validates an interval.
    ///
    /// # Errors
    ///
    /// - [`SeverityError::NotANumber`] if either bound is `NaN`.
    /// - [`SeverityError::OutOfScale`] if either bound is outside
    ///   `[0.0, 10.0]`.
    /// - [`SeverityError::InvertedRange`] if `min > max`.
    pub fn new(min: f64, max: f64) -> Result<Self, SeverityError> {
        let min = Self::on_scale(min)?;
        let max = Self::on_scale(max)?;
        if min > max {
            return Err(SeverityError::InvertedRange {
                min: min.score(),
                max: max.score(),
            });
        }
        Ok(Self { min, max })
    }

    fn on_scale(score: f64) -> Result<Severity, SeverityError> {
        let severity = Severity::new(score)?;
        if (MIN_SEVERITY..=MAX_SEVERITY).contains(&score) {
            Ok(severity)
        } else {
            Err(SeverityError::OutOfScale(score))
        }
    }

    /// Lower bound, inclusive.
    #[inline]
    #[must_use]
    pub const fn min(self) -> Severity {
        self.min
    }

    /// Upper bound, inclusive.
    #[inline]
    #[must_use]
    pub const fn max(self) -> Severity {
        self.max
    }

    /// Returns `true` if `severity` lies within the interval.
    #[must_use]
    pub fn contains(self, severity: Severity) -> bool {
        self.min <= severity && severity <= self.max
    }

    /// Returns the values of `tree` whose severity lies within the interval,
    /// in ascending severity order.
    #[must_use]
    pub fn query<V>(self, tree: &OrderedTree<Severity, V>) -> Vec<&V> {
        tree.range_query(&self.min, &self.max)
    }
}
