use crate::domain::lenient;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One candidate yield product as handed to the selection engine.
///
/// Every field is optional on the wire; missing or unparsable values fall back
/// to the defaults applied during normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderInput {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::number")]
    pub apy_min: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub apy_max: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub hv30_volatility: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub lock_duration_years: Option<f64>,
    #[serde(deserialize_with = "lenient::optional_text")]
    pub liquidity_type: Option<String>,
}

impl ProviderInput {
    /// Build an input from an arbitrary JSON value. Non-objects yield an
    /// all-default record rather than an error.
    pub fn from_value(value: &Value) -> Self {
        Self::deserialize(value).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiquidityType {
    #[default]
    High,
    Medium,
    Locked,
}

impl LiquidityType {
    /// Unrecognized or missing labels are treated as `High`.
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return Self::High;
        };
        match label.trim().to_ascii_lowercase().as_str() {
            "medium" => Self::Medium,
            "locked" => Self::Locked,
            _ => Self::High,
        }
    }

    pub fn penalty_factor(self) -> f64 {
        match self {
            Self::High => 1.0,
            Self::Medium => 1.1,
            Self::Locked => 1.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_quoted_numbers_and_numeric_ids() {
        let input = ProviderInput::from_value(&json!({
            "id": 17,
            "name": "Nexo BTC",
            "apy_min": "4.5",
            "apy_max": 6,
            "hv30_volatility": null,
            "lock_duration_years": "0",
            "liquidity_type": "medium",
        }));

        assert_eq!(input.id, "17");
        assert_eq!(input.apy_min, Some(4.5));
        assert_eq!(input.apy_max, Some(6.0));
        assert_eq!(input.hv30_volatility, None);
        assert_eq!(input.lock_duration_years, Some(0.0));
        assert_eq!(input.liquidity_type.as_deref(), Some("medium"));
    }

    #[test]
    fn non_object_becomes_default_record() {
        assert_eq!(ProviderInput::from_value(&json!("oops")), ProviderInput::default());
        assert_eq!(ProviderInput::from_value(&json!(null)), ProviderInput::default());
    }

    #[test]
    fn liquidity_labels_default_to_high() {
        assert_eq!(LiquidityType::from_label(Some("LOCKED")), LiquidityType::Locked);
        assert_eq!(LiquidityType::from_label(Some(" medium ")), LiquidityType::Medium);
        assert_eq!(LiquidityType::from_label(Some("weekly")), LiquidityType::High);
        assert_eq!(LiquidityType::from_label(None), LiquidityType::High);
    }
}
