use crate::domain::provider::LiquidityType;
use serde::{Deserialize, Serialize};

/// Scores above this are `Recommended`.
pub const RECOMMENDED_THRESHOLD: f64 = 1.0;
/// Scores at or above this are eligible for a regular allocation.
pub const ELIGIBLE_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationLevel {
    Recommended,
    Moderate,
    Avoid,
}

impl RecommendationLevel {
    pub fn from_score(final_score: f64) -> Self {
        if final_score > RECOMMENDED_THRESHOLD {
            Self::Recommended
        } else if final_score >= ELIGIBLE_THRESHOLD {
            Self::Moderate
        } else {
            Self::Avoid
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredProvider {
    pub id: String,
    pub name: String,
    pub apy_avg: f64,
    /// As supplied by the caller (0 when absent), not the guarded denominator.
    pub hv30_volatility: f64,
    /// Lock duration in years.
    pub duration: f64,
    pub liquidity: LiquidityType,
    pub final_score: f64,
    pub recommendation_level: RecommendationLevel,
}

impl ScoredProvider {
    pub fn is_eligible(&self) -> bool {
        self.final_score >= ELIGIBLE_THRESHOLD
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationEntry {
    #[serde(flatten)]
    pub provider: ScoredProvider,
    /// Percent of the portfolio, one decimal place.
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub ranked: Vec<ScoredProvider>,
    pub allocation: Vec<AllocationEntry>,
    /// Fewer than two eligible providers; the allocation is a fallback.
    #[serde(rename = "insufficientProviders")]
    pub insufficient_providers: bool,
}

impl SelectionResult {
    pub fn empty() -> Self {
        Self {
            ranked: Vec::new(),
            allocation: Vec::new(),
            insufficient_providers: true,
        }
    }

    pub fn total_weight(&self) -> f64 {
        self.allocation.iter().map(|e| e.weight).sum()
    }
}
