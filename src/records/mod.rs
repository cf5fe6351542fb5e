//! Fixed-width data files
//!
//! Survey data such as the NSFG pregnancy files store one record per line,
//! with every field at a fixed column range. This module parses such files
//! into [`Record`]s whose numeric fields can be pushed into a
//! [`Stats`](crate::Stats) accumulator.
//!
//! # Example
//!
//! ```
//! use thinkstats::records::{FieldKind, Schema};
//! use thinkstats::Stats;
//!
//! let schema = Schema::new()
//!     .field("caseid", 1, 2, FieldKind::Number)?
//!     .field("prglength", 3, 4, FieldKind::Number)?;
//!
//! let records = schema.parse_str(" 139\n 240\n 3  \n")?;
//!
//! let lengths: Stats = records.iter().filter_map(|r| r.number("prglength")).collect();
//! assert_eq!(lengths.count(), 2);
//! assert_eq!(lengths.amean(), 39.5);
//! # Ok::<(), thinkstats::error::RecordError>(())
//! ```

mod fixed_width;

pub use crate::error::RecordError;
pub use fixed_width::{Field, FieldKind, FieldValue, Record, Schema};
