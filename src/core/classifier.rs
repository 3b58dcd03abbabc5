use crate::domain::model::{FeatureRow, ScoredRow};
use crate::utils::error::{ChurnError, Result};

/// Probability above which a customer is treated as likely to churn.
pub const TARGET_CHURN_PROBABILITY_CUTOFF: f64 = 0.32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskClassifier {
    cutoff: f64,
}

impl RiskClassifier {
    pub fn new(cutoff: f64) -> Self {
        Self { cutoff }
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn is_high_risk(&self, probability: f64) -> bool {
        probability > self.cutoff
    }

    /// Pairs rows with their probabilities; both must come from the same table.
    pub fn classify(&self, rows: Vec<FeatureRow>, probabilities: Vec<f64>) -> Result<Vec<ScoredRow>> {
        if rows.len() != probabilities.len() {
            return Err(ChurnError::inference(format!(
                "{} probabilities cannot be aligned with {} rows",
                probabilities.len(),
                rows.len()
            )));
        }

        Ok(rows
            .into_iter()
            .zip(probabilities)
            .map(|(row, probability)| ScoredRow {
                row,
                probability,
                high_risk: self.is_high_risk(probability),
            })
            .collect())
    }

    pub fn high_risk<'a>(&self, scored: &'a [ScoredRow]) -> Vec<&'a ScoredRow> {
        scored.iter().filter(|s| s.high_risk).collect()
    }
}

impl Default for RiskClassifier {
    fn default() -> Self {
        Self::new(TARGET_CHURN_PROBABILITY_CUTOFF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::FEATURE_COUNT;

    fn rows(n: usize) -> Vec<FeatureRow> {
        (1..=n)
            .map(|i| FeatureRow::from_features(i, "0", &[0.0; FEATURE_COUNT]))
            .collect()
    }

    #[test]
    fn test_cutoff_is_strict() {
        let classifier = RiskClassifier::default();
        assert!(!classifier.is_high_risk(0.32));
        assert!(classifier.is_high_risk(0.3200001));
        assert!(!classifier.is_high_risk(0.0));
        assert!(classifier.is_high_risk(1.0));
    }

    #[test]
    fn test_high_risk_subset_keeps_row_order() {
        let classifier = RiskClassifier::default();
        let scored = classifier
            .classify(rows(5), vec![0.9, 0.1, 0.5, 0.32, 0.33])
            .unwrap();

        let flagged: Vec<usize> = classifier
            .high_risk(&scored)
            .iter()
            .map(|s| s.row.original_row_number)
            .collect();
        assert_eq!(flagged, vec![1, 3, 5]);
    }

    #[test]
    fn test_misaligned_probabilities_are_rejected() {
        let classifier = RiskClassifier::default();
        let err = classifier.classify(rows(3), vec![0.5, 0.5]).unwrap_err();
        assert!(matches!(err, ChurnError::InferenceError { .. }));
    }
}
