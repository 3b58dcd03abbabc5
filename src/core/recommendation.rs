use crate::domain::model::FeatureRow;
use serde::{Serialize, Serializer};
use std::fmt;

/// Retention offer chosen for a high-risk customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RetentionAction {
    VipTreatment,
    FinancialRetention,
    TravelerPack,
    TechnologyUpgrade,
    GeneralIncentive,
}

impl RetentionAction {
    pub fn message(&self) -> &'static str {
        match self {
            RetentionAction::VipTreatment => {
                "VIP treatment: assign personal account manager + priority support"
            }
            RetentionAction::FinancialRetention => {
                "Financial retention: 25% bill discount for 6 months"
            }
            RetentionAction::TravelerPack => "Traveler pack: 200 bonus international minutes",
            RetentionAction::TechnologyUpgrade => "Technology upgrade: device renewal offer",
            RetentionAction::GeneralIncentive => {
                "General incentive: 3 months of a bundled streaming benefit"
            }
        }
    }
}

impl fmt::Display for RetentionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for RetentionAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

const MAX_CUSTSERV_CALLS: f64 = 3.0;
const MAX_TOTAL_MINUTES: f64 = 500.0;
const MAX_INTL_CALLS: f64 = 4.0;
const MAX_DAY_MINUTES: f64 = 220.0;

/// Ordered decision table; the first matching rule wins.
pub fn recommend(row: &FeatureRow) -> RetentionAction {
    if row.custserv_calls > MAX_CUSTSERV_CALLS {
        return RetentionAction::VipTreatment;
    }

    if row.total_minutes() > MAX_TOTAL_MINUTES {
        return RetentionAction::FinancialRetention;
    }

    if row.intl_calls > MAX_INTL_CALLS || row.has_international_plan() {
        return RetentionAction::TravelerPack;
    }

    if row.day_mins > MAX_DAY_MINUTES {
        return RetentionAction::TechnologyUpgrade;
    }

    RetentionAction::GeneralIncentive
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::FEATURE_COUNT;

    struct Usage {
        custserv_calls: f64,
        day: f64,
        eve: f64,
        night: f64,
        intl: f64,
        intl_calls: f64,
        intl_plan: bool,
    }

    impl Default for Usage {
        fn default() -> Self {
            Self {
                custserv_calls: 1.0,
                day: 100.0,
                eve: 100.0,
                night: 100.0,
                intl: 10.0,
                intl_calls: 2.0,
                intl_plan: false,
            }
        }
    }

    fn row(usage: Usage) -> FeatureRow {
        let mut row = FeatureRow::from_features(1, "0", &[0.0; FEATURE_COUNT]);
        row.custserv_calls = usage.custserv_calls;
        row.day_mins = usage.day;
        row.eve_mins = usage.eve;
        row.night_mins = usage.night;
        row.intl_mins = usage.intl;
        row.intl_calls = usage.intl_calls;
        row.intl_plan_no = if usage.intl_plan { 0.0 } else { 1.0 };
        row.intl_plan_yes = if usage.intl_plan { 1.0 } else { 0.0 };
        row
    }

    #[test]
    fn test_support_calls_preempt_later_rules() {
        let action = recommend(&row(Usage {
            custserv_calls: 4.0,
            day: 300.0,
            eve: 250.0,
            intl_calls: 9.0,
            intl_plan: true,
            ..Usage::default()
        }));
        assert_eq!(action, RetentionAction::VipTreatment);
    }

    #[test]
    fn test_three_support_calls_do_not_trigger_vip() {
        let action = recommend(&row(Usage {
            custserv_calls: 3.0,
            ..Usage::default()
        }));
        assert_eq!(action, RetentionAction::GeneralIncentive);
    }

    #[test]
    fn test_total_minutes_boundary_is_excluded() {
        let at_limit = row(Usage {
            day: 200.0,
            eve: 150.0,
            night: 140.0,
            intl: 10.0,
            ..Usage::default()
        });
        assert_eq!(at_limit.total_minutes(), 500.0);
        assert_eq!(recommend(&at_limit), RetentionAction::GeneralIncentive);

        let over_limit = row(Usage {
            day: 200.0,
            eve: 150.0,
            night: 140.0,
            intl: 10.01,
            ..Usage::default()
        });
        assert_eq!(recommend(&over_limit), RetentionAction::FinancialRetention);
    }

    #[test]
    fn test_international_usage_rules() {
        let many_calls = row(Usage {
            intl_calls: 5.0,
            ..Usage::default()
        });
        assert_eq!(recommend(&many_calls), RetentionAction::TravelerPack);

        let plan_holder = row(Usage {
            intl_plan: true,
            day: 250.0,
            eve: 10.0,
            night: 10.0,
            ..Usage::default()
        });
        assert_eq!(recommend(&plan_holder), RetentionAction::TravelerPack);

        let four_calls = row(Usage {
            intl_calls: 4.0,
            ..Usage::default()
        });
        assert_eq!(recommend(&four_calls), RetentionAction::GeneralIncentive);
    }

    #[test]
    fn test_heavy_daytime_usage() {
        let action = recommend(&row(Usage {
            day: 220.5,
            eve: 50.0,
            night: 50.0,
            ..Usage::default()
        }));
        assert_eq!(action, RetentionAction::TechnologyUpgrade);

        let at_limit = recommend(&row(Usage {
            day: 220.0,
            ..Usage::default()
        }));
        assert_eq!(at_limit, RetentionAction::GeneralIncentive);
    }

    #[test]
    fn test_action_serializes_as_message() {
        let json = serde_json::to_string(&RetentionAction::TravelerPack).unwrap();
        assert_eq!(json, "\"Traveler pack: 200 bonus international minutes\"");
    }
}
