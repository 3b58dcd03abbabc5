use crate::core::recommendation::RetentionAction;
use crate::domain::model::{Report, ReportMetadata, RiskReportEntry, ScoredRow};
use chrono::{DateTime, Utc};

pub struct ReportBuilder {
    cutoff: f64,
}

impl ReportBuilder {
    pub fn new(cutoff: f64) -> Self {
        Self { cutoff }
    }

    /// `flagged` holds the high-risk rows in original order with their chosen action.
    pub fn build(
        &self,
        scored: &[ScoredRow],
        flagged: &[(&ScoredRow, RetentionAction)],
        timestamp: DateTime<Utc>,
    ) -> Report {
        let clientes_en_riesgo: Vec<RiskReportEntry> = flagged
            .iter()
            .map(|(scored, action)| Self::entry(scored, *action))
            .collect();

        let total = clientes_en_riesgo.len();
        Report {
            rows_processed: scored.len(),
            total_clientes_riesgo: total,
            clientes_en_riesgo,
            mensaje: format!(
                "Análisis completado. {} cliente(s) identificado(s) con riesgo > {}.",
                total, self.cutoff
            ),
            metadata: ReportMetadata {
                total_filas_csv: scored.len(),
                umbral_riesgo: self.cutoff,
                timestamp: timestamp.to_rfc3339(),
            },
        }
    }

    fn entry(scored: &ScoredRow, action: RetentionAction) -> RiskReportEntry {
        let row = &scored.row;
        RiskReportEntry {
            original_row_number: row.original_row_number,
            account_length: row.account_length,
            custserv_calls: row.custserv_calls as i64,
            day_mins: row.day_mins,
            intl_calls: row.intl_calls as i64,
            probability: scored.probability,
            recommended_action: action.message().to_string(),
        }
    }
}
