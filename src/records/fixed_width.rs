//! Fixed-width record parsing
//!
//! Each line of a fixed-width data file holds one record; each field occupies
//! a fixed range of byte columns, numbered from 1 and inclusive at both ends.

use crate::error::RecordError;
use std::collections::BTreeMap;
use std::path::Path;

/// How a field's text is converted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FieldKind {
    /// Parsed as `f64`; blank columns become [`FieldValue::Missing`]
    Number,
    /// Kept as trimmed text
    Text,
}

/// A named column range
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    /// Field name, used as the record key
    pub name: String,
    /// First column (1-based, inclusive)
    pub start: usize,
    /// Last column (1-based, inclusive)
    pub end: usize,
    /// Conversion applied to the column text
    pub kind: FieldKind,
}

impl Field {
    fn validate(&self) -> Result<(), RecordError> {
        if self.start == 0 || self.end < self.start {
            return Err(RecordError::InvalidField {
                name: self.name.clone(),
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Raw column text, shortened (possibly to nothing) on truncated lines
    fn slice<'a>(&self, line: &'a [u8]) -> &'a [u8] {
        let from = (self.start - 1).min(line.len());
        let to = self.end.min(line.len());
        &line[from..to]
    }
}

/// Ordered set of fields describing one record layout
///
/// # Example
///
/// ```
/// use thinkstats::records::{FieldKind, Schema};
///
/// let schema = Schema::new()
///     .field("caseid", 1, 4, FieldKind::Number)?
///     .field("prglength", 5, 6, FieldKind::Number)?;
///
/// let record = schema.parse_line("  1239")?;
/// assert_eq!(record.number("caseid"), Some(12.0));
/// assert_eq!(record.number("prglength"), Some(39.0));
/// # Ok::<(), thinkstats::error::RecordError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a schema from fields, validating each
    pub fn from_fields(fields: Vec<Field>) -> Result<Self, RecordError> {
        let schema = Self { fields };
        schema.validate()?;
        Ok(schema)
    }

    /// Append a field covering columns `start..=end` (1-based)
    ///
    /// # Errors
    ///
    /// [`RecordError::InvalidField`] if `start` is 0 or `end < start`.
    pub fn field(
        mut self,
        name: impl Into<String>,
        start: usize,
        end: usize,
        kind: FieldKind,
    ) -> Result<Self, RecordError> {
        let field = Field {
            name: name.into(),
            start,
            end,
            kind,
        };
        field.validate()?;
        self.fields.push(field);
        Ok(self)
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Check every field's column range
    ///
    /// Schemas deserialized from configuration skip the checks done by
    /// [`field`](Self::field); the parsing entry points run this first.
    pub fn validate(&self) -> Result<(), RecordError> {
        self.fields.iter().try_for_each(Field::validate)
    }

    /// Parse one line into a record
    pub fn parse_line(&self, line: &str) -> Result<Record, RecordError> {
        self.validate()?;
        self.parse_validated(line)
    }

    fn parse_validated(&self, line: &str) -> Result<Record, RecordError> {
        let bytes = line.as_bytes();
        let mut values = BTreeMap::new();

        for field in &self.fields {
            let text = String::from_utf8_lossy(field.slice(bytes));
            let text = text.trim();

            let value = match field.kind {
                FieldKind::Text => FieldValue::Text(text.to_owned()),
                FieldKind::Number if text.is_empty() => FieldValue::Missing,
                FieldKind::Number => match text.parse::<f64>() {
                    Ok(number) => FieldValue::Number(number),
                    Err(_) => {
                        return Err(RecordError::InvalidNumber {
                            field: field.name.clone(),
                            text: text.to_owned(),
                        })
                    }
                },
            };
            values.insert(field.name.clone(), value);
        }

        Ok(Record { values })
    }

    /// Parse every non-empty line of `text`
    ///
    /// # Errors
    ///
    /// [`RecordError::Line`] wraps the first failure with its 1-based line
    /// number.
    pub fn parse_str(&self, text: &str) -> Result<Vec<Record>, RecordError> {
        self.validate()?;

        text.lines()
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(index, line)| {
                self.parse_validated(line).map_err(|source| RecordError::Line {
                    line: index + 1,
                    source: Box::new(source),
                })
            })
            .collect()
    }

    /// Read and parse a fixed-width data file
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<Vec<Record>, RecordError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let records = self.parse_str(&text)?;
        log::debug!("parsed {} records from {}", records.len(), path.display());
        Ok(records)
    }
}

/// Converted value of one field
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldValue {
    Number(f64),
    Text(String),
    /// Blank numeric column
    Missing,
}

/// One parsed line, keyed by field name
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    values: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Value of field `name`
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Numeric value of field `name`, if present and not blank
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.values.get(name)? {
            FieldValue::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Text value of field `name`
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name)? {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Fields in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pregnancy_schema() -> Schema {
        Schema::new()
            .field("caseid", 1, 4, FieldKind::Number)
            .and_then(|s| s.field("prglength", 5, 6, FieldKind::Number))
            .and_then(|s| s.field("outcome", 7, 7, FieldKind::Number))
            .and_then(|s| s.field("code", 8, 10, FieldKind::Text))
            .unwrap()
    }

    #[test]
    fn test_parse_line() {
        let record = pregnancy_schema().parse_line("  1239 1 ab").unwrap();

        assert_eq!(record.number("caseid"), Some(12.0));
        assert_eq!(record.number("prglength"), Some(39.0));
        assert_eq!(record.get("outcome"), Some(&FieldValue::Missing));
        assert_eq!(record.text("code"), Some("1 a"));
        assert_eq!(record.number("missing"), None);
    }

    #[test]
    fn test_single_column_field() {
        let record = pregnancy_schema().parse_line("   1401").unwrap();
        assert_eq!(record.number("outcome"), Some(1.0));
    }

    #[test]
    fn test_truncated_line() {
        let record = pregnancy_schema().parse_line("  12").unwrap();

        assert_eq!(record.number("caseid"), Some(12.0));
        assert_eq!(record.get("prglength"), Some(&FieldValue::Missing));
        assert_eq!(record.text("code"), Some(""));
    }

    #[test]
    fn test_invalid_number() {
        let err = pregnancy_schema().parse_line("  124x").unwrap_err();
        assert!(matches!(
            err,
            RecordError::InvalidNumber { ref field, ref text } if field == "prglength" && text == "4x"
        ));
    }

    #[test]
    fn test_invalid_field() {
        assert!(matches!(
            Schema::new().field("zero", 0, 3, FieldKind::Number),
            Err(RecordError::InvalidField { start: 0, .. })
        ));
        assert!(Schema::new().field("backwards", 5, 4, FieldKind::Text).is_err());

        let fields = vec![Field {
            name: "bad".into(),
            start: 3,
            end: 1,
            kind: FieldKind::Number,
        }];
        assert!(Schema::from_fields(fields).is_err());
    }

    #[test]
    fn test_parse_str_skips_blank_lines() {
        let records = pregnancy_schema()
            .parse_str("   140\n\n   238\n")
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].number("prglength"), Some(40.0));
        assert_eq!(records[1].number("caseid"), Some(2.0));
    }

    #[test]
    fn test_parse_str_reports_line() {
        let err = pregnancy_schema()
            .parse_str("   140\n\n   2??\n")
            .unwrap_err();

        match err {
            RecordError::Line { line, source } => {
                assert_eq!(line, 3);
                assert!(matches!(*source, RecordError::InvalidNumber { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_file_missing() {
        let err = pregnancy_schema()
            .read_file("/nonexistent/thinkstats/2002FemPreg.dat")
            .unwrap_err();
        assert!(matches!(err, RecordError::Io(_)));
    }

    #[test]
    fn test_record_iter_in_name_order() {
        let record = pregnancy_schema().parse_line("   1401abc").unwrap();
        let names: Vec<&str> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["caseid", "code", "outcome", "prglength"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_schema_from_json() {
        let schema: Schema = serde_json::from_str(
            r#"{"fields":[{"name":"prglength","start":5,"end":6,"kind":"number"}]}"#,
        )
        .unwrap();
        assert_eq!(schema.fields()[0].kind, FieldKind::Number);
        assert_eq!(schema.parse_line("    39").unwrap().number("prglength"), Some(39.0));

        // Deserialized schemas are validated when used.
        let bad: Schema = serde_json::from_str(
            r#"{"fields":[{"name":"x","start":0,"end":1,"kind":"text"}]}"#,
        )
        .unwrap();
        assert!(matches!(
            bad.parse_line("abc"),
            Err(RecordError::InvalidField { .. })
        ));
    }
}
