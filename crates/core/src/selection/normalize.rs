use crate::domain::provider::{LiquidityType, ProviderInput};

/// Strongly-typed provider record with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedProvider {
    pub id: String,
    pub name: String,
    pub apy_min: f64,
    pub apy_max: f64,
    pub hv30_volatility: f64,
    pub lock_duration_years: f64,
    pub liquidity: LiquidityType,
}

impl NormalizedProvider {
    pub fn from_input(input: &ProviderInput) -> Self {
        let apy_min = finite(input.apy_min).unwrap_or(0.0);
        // A missing maximum collapses the range onto the minimum.
        let apy_max = finite(input.apy_max).unwrap_or(apy_min);

        Self {
            id: input.id.clone(),
            name: input.name.clone(),
            apy_min,
            apy_max,
            hv30_volatility: finite(input.hv30_volatility).unwrap_or(0.0),
            lock_duration_years: finite(input.lock_duration_years).unwrap_or(0.0),
            liquidity: LiquidityType::from_label(input.liquidity_type.as_deref()),
        }
    }

    pub fn apy_avg(&self) -> f64 {
        (self.apy_min + self.apy_max) / 2.0
    }
}

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|n| n.is_finite())
}
