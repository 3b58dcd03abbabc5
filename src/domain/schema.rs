use crate::utils::error::{ChurnError, Result};
use std::collections::HashSet;

/// Width of one input line: the churn label followed by every model feature.
pub const COLUMN_COUNT: usize = 100;

/// Number of numeric columns sent to the model (everything but the label).
pub const FEATURE_COUNT: usize = COLUMN_COUNT - 1;

pub const STATE_COUNT: usize = 51;
pub const AREA_CODE_COUNT: usize = 33;

/// Positional column names of the preprocessed churn dataset. Input files never carry a header.
pub const CHURN_COLUMNS: [&str; COLUMN_COUNT] = [
    "Churn?_True.",
    "Account Length",
    "VMail Message",
    "Day Mins",
    "Day Calls",
    "Eve Mins",
    "Eve Calls",
    "Night Mins",
    "Night Calls",
    "Intl Mins",
    "Intl Calls",
    "CustServ Calls",
    "State_AK",
    "State_AL",
    "State_AR",
    "State_AZ",
    "State_CA",
    "State_CO",
    "State_CT",
    "State_DC",
    "State_DE",
    "State_FL",
    "State_GA",
    "State_HI",
    "State_IA",
    "State_ID",
    "State_IL",
    "State_IN",
    "State_KS",
    "State_KY",
    "State_LA",
    "State_MA",
    "State_MD",
    "State_ME",
    "State_MI",
    "State_MN",
    "State_MO",
    "State_MS",
    "State_MT",
    "State_NC",
    "State_ND",
    "State_NE",
    "State_NH",
    "State_NJ",
    "State_NM",
    "State_NV",
    "State_NY",
    "State_OH",
    "State_OK",
    "State_OR",
    "State_PA",
    "State_RI",
    "State_SC",
    "State_SD",
    "State_TN",
    "State_TX",
    "State_UT",
    "State_VA",
    "State_VT",
    "State_WA",
    "State_WI",
    "State_WV",
    "State_WY",
    "Area Code_657",
    "Area Code_658",
    "Area Code_659",
    "Area Code_676",
    "Area Code_677",
    "Area Code_678",
    "Area Code_686",
    "Area Code_707",
    "Area Code_716",
    "Area Code_727",
    "Area Code_736",
    "Area Code_737",
    "Area Code_758",
    "Area Code_766",
    "Area Code_776",
    "Area Code_777",
    "Area Code_778",
    "Area Code_786",
    "Area Code_787",
    "Area Code_788",
    "Area Code_797",
    "Area Code_798",
    "Area Code_806",
    "Area Code_827",
    "Area Code_836",
    "Area Code_847",
    "Area Code_848",
    "Area Code_858",
    "Area Code_866",
    "Area Code_868",
    "Area Code_876",
    "Area Code_877",
    "Area Code_878",
    "Int'l Plan_no",
    "Int'l Plan_yes",
    "VMail Plan_no",
    "VMail Plan_yes",
];

/// The positional schema handed to the table parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    columns: Vec<String>,
}

impl ColumnSchema {
    pub fn new(columns: Vec<String>) -> Result<Self> {
        let schema = Self { columns };
        schema.validate()?;
        Ok(schema)
    }

    /// The fixed churn layout the deployed model was trained on.
    pub fn churn() -> Self {
        Self {
            columns: CHURN_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }

    pub fn label_column(&self) -> &str {
        &self.columns[0]
    }

    pub fn feature_columns(&self) -> &[String] {
        &self.columns[1..]
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns.len() != COLUMN_COUNT {
            return Err(ChurnError::ConfigError {
                message: format!(
                    "column schema must have {} columns, got {}",
                    COLUMN_COUNT,
                    self.columns.len()
                ),
            });
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.as_str()) {
                return Err(ChurnError::ConfigError {
                    message: format!("duplicate column name in schema: {}", column),
                });
            }
        }

        Ok(())
    }
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self::churn()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_churn_schema_layout() {
        let schema = ColumnSchema::churn();
        assert!(schema.validate().is_ok());
        assert_eq!(schema.width(), 100);
        assert_eq!(schema.feature_columns().len(), FEATURE_COUNT);
        assert_eq!(schema.label_column(), "Churn?_True.");
        assert_eq!(schema.name(11), Some("CustServ Calls"));
        assert_eq!(schema.name(98), Some("VMail Plan_no"));
        assert_eq!(schema.name(100), None);

        let states = CHURN_COLUMNS.iter().filter(|c| c.starts_with("State_")).count();
        let area_codes = CHURN_COLUMNS.iter().filter(|c| c.starts_with("Area Code_")).count();
        assert_eq!(states, STATE_COUNT);
        assert_eq!(area_codes, AREA_CODE_COUNT);
    }

    #[test]
    fn test_schema_rejects_wrong_width_and_duplicates() {
        let short: Vec<String> = CHURN_COLUMNS[..99].iter().map(|c| c.to_string()).collect();
        assert!(ColumnSchema::new(short).is_err());

        let mut duplicated: Vec<String> = CHURN_COLUMNS.iter().map(|c| c.to_string()).collect();
        duplicated[2] = duplicated[1].clone();
        assert!(ColumnSchema::new(duplicated).is_err());
    }
}
