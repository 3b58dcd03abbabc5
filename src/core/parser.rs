use crate::domain::model::{FeatureRow, FeatureVector};
use crate::domain::schema::{ColumnSchema, FEATURE_COUNT};
use crate::utils::error::{ChurnError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};

/// Headerless CSV reader bound to an explicit positional schema.
pub struct TableParser<'a> {
    schema: &'a ColumnSchema,
}

impl<'a> TableParser<'a> {
    pub fn new(schema: &'a ColumnSchema) -> Self {
        Self { schema }
    }

    /// Parses every line or none: the first malformed line fails the whole table.
    pub fn parse(&self, text: &str) -> Result<Vec<FeatureRow>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| {
                let line = e.position().map(|p| p.line());
                ChurnError::schema(line, format!("unreadable CSV record: {}", e))
            })?;
            if is_blank(&record) {
                continue;
            }
            let row = self.parse_record(&record, rows.len() + 1)?;
            rows.push(row);
        }

        tracing::debug!("Parsed {} rows against a {}-column schema", rows.len(), self.schema.width());
        Ok(rows)
    }

    fn parse_record(&self, record: &StringRecord, original_row_number: usize) -> Result<FeatureRow> {
        let line = record.position().map(|p| p.line());

        if record.len() != self.schema.width() {
            return Err(ChurnError::schema(
                line,
                format!(
                    "expected {} fields, found {}",
                    self.schema.width(),
                    record.len()
                ),
            ));
        }

        let mut features: FeatureVector = [0.0; FEATURE_COUNT];
        for (i, (slot, raw)) in features.iter_mut().zip(record.iter().skip(1)).enumerate() {
            let not_numeric = || {
                ChurnError::schema(
                    line,
                    format!(
                        "column '{}' is not numeric: {:?}",
                        self.schema.name(i + 1).unwrap_or("?"),
                        raw
                    ),
                )
            };
            let value = raw.parse::<f64>().map_err(|_| not_numeric())?;
            if value.is_nan() {
                return Err(not_numeric());
            }
            *slot = value;
        }

        Ok(FeatureRow::from_features(
            original_row_number,
            &record[0],
            &features,
        ))
    }
}

/// A line holding only whitespace trims down to a single empty field.
fn is_blank(record: &StringRecord) -> bool {
    record.len() == 1 && record[0].is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv_line(label: &str, account_length: f64, custserv_calls: f64) -> String {
        let mut fields = vec![label.to_string(), account_length.to_string()];
        for i in 2..100 {
            if i == 11 {
                fields.push(custserv_calls.to_string());
            } else {
                fields.push("0".to_string());
            }
        }
        fields.join(",")
    }

    #[test]
    fn test_parse_assigns_one_based_row_numbers() {
        let schema = ColumnSchema::churn();
        let text = format!(
            "{}\n{}\n{}\n",
            csv_line("0", 128.0, 1.0),
            csv_line("1", 107.0, 4.0),
            csv_line("0", 137.0, 0.0)
        );

        let rows = TableParser::new(&schema).parse(&text).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].original_row_number, 1);
        assert_eq!(rows[2].original_row_number, 3);
        assert_eq!(rows[1].account_length, 107.0);
        assert_eq!(rows[1].custserv_calls, 4.0);
        assert_eq!(rows[1].label, "1");
    }

    #[test]
    fn test_empty_input_yields_no_rows() {
        let schema = ColumnSchema::churn();
        assert!(TableParser::new(&schema).parse("").unwrap().is_empty());
    }

    #[test]
    fn test_short_row_is_schema_error() {
        let schema = ColumnSchema::churn();
        let mut fields: Vec<&str> = vec!["0"; 99];
        fields[1] = "128";
        let text = format!("{}\n{}\n", csv_line("0", 1.0, 0.0), fields.join(","));

        let err = TableParser::new(&schema).parse(&text).unwrap_err();

        match err {
            ChurnError::SchemaError { line, message } => {
                assert_eq!(line, Some(2));
                assert!(message.contains("expected 100 fields, found 99"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_long_row_is_schema_error() {
        let schema = ColumnSchema::churn();
        let text = format!("{},0\n", csv_line("0", 1.0, 0.0));
        assert!(matches!(
            TableParser::new(&schema).parse(&text),
            Err(ChurnError::SchemaError { .. })
        ));
    }

    #[test]
    fn test_non_numeric_feature_names_the_column() {
        let schema = ColumnSchema::churn();
        let text = csv_line("0", 1.0, 0.0).replacen(",0,", ",abc,", 1);

        let err = TableParser::new(&schema).parse(&text).unwrap_err();
        assert!(err.to_string().contains("VMail Message"));
    }

    #[test]
    fn test_nan_feature_is_schema_error() {
        let schema = ColumnSchema::churn();
        let mut fields = vec!["0"; 100];
        fields[3] = "NaN";
        let text = format!("{}\n{}\n", csv_line("0", 1.0, 0.0), fields.join(","));

        let err = TableParser::new(&schema).parse(&text).unwrap_err();

        match err {
            ChurnError::SchemaError { line, message } => {
                assert_eq!(line, Some(2));
                assert!(message.contains("Day Mins"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_infinite_feature_is_accepted() {
        let schema = ColumnSchema::churn();
        let mut fields = vec!["0"; 100];
        fields[3] = "inf";

        let rows = TableParser::new(&schema).parse(&fields.join(",")).unwrap();
        assert!(rows[0].day_mins.is_infinite());
    }

    #[test]
    fn test_whitespace_only_lines_are_skipped() {
        let schema = ColumnSchema::churn();
        let text = format!(
            "{}\n   \n\t\n{}\n",
            csv_line("0", 10.0, 0.0),
            csv_line("1", 20.0, 0.0)
        );

        let rows = TableParser::new(&schema).parse(&text).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].original_row_number, 2);
        assert_eq!(rows[1].account_length, 20.0);
    }

    #[test]
    fn test_windows_line_endings_and_padding() {
        let schema = ColumnSchema::churn();
        let text = format!(
            "{}\r\n{}\r\n",
            csv_line("0", 10.0, 0.0).replace(',', " , "),
            csv_line("1", 20.0, 2.0)
        );

        let rows = TableParser::new(&schema).parse(&text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].account_length, 10.0);
        assert_eq!(rows[1].custserv_calls, 2.0);
    }
}
