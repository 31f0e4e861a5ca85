use crate::domain::selection::{RecommendationLevel, ScoredProvider};
use crate::selection::normalize::NormalizedProvider;

/// Smallest volatility used as a denominator.
pub const VOLATILITY_FLOOR: f64 = 0.01;

/// Longer lock-ups divide the score down.
pub fn duration_factor(years: f64) -> f64 {
    if years <= 1.0 {
        1.0
    } else if years <= 3.0 {
        1.2
    } else {
        1.5
    }
}

/// Yield per unit of volatility, penalized for lock-up and liquidity.
pub fn final_score(p: &NormalizedProvider) -> f64 {
    let hv30 = p.hv30_volatility.max(VOLATILITY_FLOOR);
    let raw = p.apy_avg() / hv30;
    let score = raw / duration_factor(p.lock_duration_years) / p.liquidity.penalty_factor();
    // Yields near f64::MAX overflow against the floor.
    score.clamp(f64::MIN, f64::MAX)
}

pub fn score(p: NormalizedProvider) -> ScoredProvider {
    let final_score = final_score(&p);
    let apy_avg = p.apy_avg();

    ScoredProvider {
        id: p.id,
        name: p.name,
        apy_avg,
        hv30_volatility: p.hv30_volatility,
        duration: p.lock_duration_years,
        liquidity: p.liquidity,
        final_score,
        recommendation_level: RecommendationLevel::from_score(final_score),
    }
}
