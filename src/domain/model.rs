use crate::domain::schema::{AREA_CODE_COUNT, FEATURE_COUNT, STATE_COUNT};
use serde::{Deserialize, Serialize};

/// Model input for one customer, in schema order.
pub type FeatureVector = [f64; FEATURE_COUNT];

const STATES_START: usize = 11;
const AREA_CODES_START: usize = STATES_START + STATE_COUNT;
const PLANS_START: usize = AREA_CODES_START + AREA_CODE_COUNT;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    /// 1-based position among parsed rows, fixed at parse time.
    pub original_row_number: usize,
    /// Raw `Churn?_True.` value; never used for scoring.
    pub label: String,
    pub account_length: f64,
    pub vmail_message: f64,
    pub day_mins: f64,
    pub day_calls: f64,
    pub eve_mins: f64,
    pub eve_calls: f64,
    pub night_mins: f64,
    pub night_calls: f64,
    pub intl_mins: f64,
    pub intl_calls: f64,
    pub custserv_calls: f64,
    /// One-hot `State_AK` .. `State_WY`.
    pub states: [f64; STATE_COUNT],
    /// One-hot `Area Code_657` .. `Area Code_878`.
    pub area_codes: [f64; AREA_CODE_COUNT],
    pub intl_plan_no: f64,
    pub intl_plan_yes: f64,
    pub vmail_plan_no: f64,
    pub vmail_plan_yes: f64,
}

impl FeatureRow {
    pub fn from_features(
        original_row_number: usize,
        label: impl Into<String>,
        features: &FeatureVector,
    ) -> Self {
        let mut states = [0.0; STATE_COUNT];
        states.copy_from_slice(&features[STATES_START..AREA_CODES_START]);
        let mut area_codes = [0.0; AREA_CODE_COUNT];
        area_codes.copy_from_slice(&features[AREA_CODES_START..PLANS_START]);

        Self {
            original_row_number,
            label: label.into(),
            account_length: features[0],
            vmail_message: features[1],
            day_mins: features[2],
            day_calls: features[3],
            eve_mins: features[4],
            eve_calls: features[5],
            night_mins: features[6],
            night_calls: features[7],
            intl_mins: features[8],
            intl_calls: features[9],
            custserv_calls: features[10],
            states,
            area_codes,
            intl_plan_no: features[PLANS_START],
            intl_plan_yes: features[PLANS_START + 1],
            vmail_plan_no: features[PLANS_START + 2],
            vmail_plan_yes: features[PLANS_START + 3],
        }
    }

    pub fn to_features(&self) -> FeatureVector {
        let mut features = [0.0; FEATURE_COUNT];
        features[..STATES_START].copy_from_slice(&[
            self.account_length,
            self.vmail_message,
            self.day_mins,
            self.day_calls,
            self.eve_mins,
            self.eve_calls,
            self.night_mins,
            self.night_calls,
            self.intl_mins,
            self.intl_calls,
            self.custserv_calls,
        ]);
        features[STATES_START..AREA_CODES_START].copy_from_slice(&self.states);
        features[AREA_CODES_START..PLANS_START].copy_from_slice(&self.area_codes);
        features[PLANS_START..].copy_from_slice(&[
            self.intl_plan_no,
            self.intl_plan_yes,
            self.vmail_plan_no,
            self.vmail_plan_yes,
        ]);
        features
    }

    pub fn total_minutes(&self) -> f64 {
        self.day_mins + self.eve_mins + self.night_mins + self.intl_mins
    }

    pub fn has_international_plan(&self) -> bool {
        self.intl_plan_yes == 1.0
    }
}

/// A parsed row together with its model output.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRow {
    pub row: FeatureRow,
    pub probability: f64,
    pub high_risk: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReportEntry {
    #[serde(rename = "Fila_CSV_Original")]
    pub original_row_number: usize,
    #[serde(rename = "Account Length")]
    pub account_length: f64,
    #[serde(rename = "CustServ Calls")]
    pub custserv_calls: i64,
    #[serde(rename = "Day Mins")]
    pub day_mins: f64,
    #[serde(rename = "Intl Calls")]
    pub intl_calls: i64,
    #[serde(rename = "Probabilidad_Fuga")]
    pub probability: f64,
    #[serde(rename = "Accion_Recomendada")]
    pub recommended_action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub total_filas_csv: usize,
    pub umbral_riesgo: f64,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub rows_processed: usize,
    pub total_clientes_riesgo: usize,
    pub clientes_en_riesgo: Vec<RiskReportEntry>,
    pub mensaje: String,
    pub metadata: ReportMetadata,
}
