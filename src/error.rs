//! Error types
//!
//! Statistical queries on empty data do not fail: they report `NaN` or `None`
//! so batch pipelines can skip the result. Errors are reserved for contract
//! violations such as asking for raw values that were never retained.

use thiserror::Error;

/// Error returned by [`Stats`](crate::Stats) queries
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum StatsError {
    /// Raw observations were requested from a histogram-mode accumulator
    #[error("raw values are unavailable in histogram mode")]
    Unavailable,
    /// Bucket count below one, or so large that bucket boundaries fall
    /// closer together than the float spacing of the range
    #[error("invalid bucket count {0}")]
    InvalidBucketCount(f64),
    /// The comparator orders the extrema against numeric order, so the
    /// observed range cannot be split into buckets
    #[error("cannot bucket an inverted range: min {min} > max {max}")]
    InvertedRange { min: f64, max: f64 },
    /// An extreme is NaN or infinite, so the range has no finite width
    #[error("cannot bucket a non-finite range: min {min}, max {max}")]
    NonFiniteRange { min: f64, max: f64 },
}

/// Error returned by the fixed-width record parser
#[cfg(feature = "records")]
#[cfg_attr(docsrs, doc(cfg(feature = "records")))]
#[derive(Error, Debug)]
pub enum RecordError {
    /// Field columns are not a valid 1-based inclusive range
    #[error("invalid field `{name}`: columns {start}..={end}")]
    InvalidField {
        name: String,
        start: usize,
        end: usize,
    },
    /// A numeric field holds text that is not a number
    #[error("field `{field}`: cannot parse {text:?} as a number")]
    InvalidNumber { field: String, text: String },
    /// Parsing failed on a specific (1-based) line
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<RecordError>,
    },
    /// Reading the data file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "std")]
    #[test]
    fn test_display() {
        assert_eq!(
            StatsError::Unavailable.to_string(),
            "raw values are unavailable in histogram mode"
        );
        assert_eq!(
            StatsError::InvalidBucketCount(0.0).to_string(),
            "invalid bucket count 0"
        );
        assert_eq!(
            StatsError::NonFiniteRange { min: 1.0, max: f64::NAN }.to_string(),
            "cannot bucket a non-finite range: min 1, max NaN"
        );
        assert_eq!(
            StatsError::InvertedRange { min: 9.0, max: 1.0 }.to_string(),
            "cannot bucket an inverted range: min 9 > max 1"
        );
    }

    #[cfg(feature = "records")]
    #[test]
    fn test_record_error_display() {
        let err = RecordError::Line {
            line: 3,
            source: Box::new(RecordError::InvalidNumber {
                field: "prglength".into(),
                text: "4x".into(),
            }),
        };
        assert_eq!(
            err.to_string(),
            "line 3: field `prglength`: cannot parse \"4x\" as a number"
        );
    }
}
