use crate::domain::selection::{AllocationEntry, ScoredProvider};

pub const WEIGHT_CAP: f64 = 40.0;
const TOTAL: f64 = 100.0;

pub struct Allocation {
    pub entries: Vec<AllocationEntry>,
    pub insufficient_providers: bool,
}

/// Fewer than two eligible providers: the top two by rank (or the single
/// provider) get a fallback split in whole percent. Otherwise every eligible
/// provider gets a score-proportional weight capped at [`WEIGHT_CAP`],
/// rescaled back to 100 and rounded to one decimal.
pub fn allocate(ranked: &[ScoredProvider]) -> Allocation {
    let eligible: Vec<&ScoredProvider> = ranked.iter().filter(|p| p.is_eligible()).collect();

    if eligible.len() < 2 {
        tracing::debug!(
            eligible = eligible.len(),
            providers = ranked.len(),
            "insufficient eligible providers; using fallback allocation"
        );
        return Allocation {
            entries: fallback(ranked),
            insufficient_providers: true,
        };
    }

    let scores: Vec<f64> = eligible.iter().map(|p| p.final_score).collect();
    let mut weights = renormalize(cap_weights(raw_weights(&scores)))
        .into_iter()
        .map(|w| round_to(w, 1))
        .collect::<Vec<_>>();
    fold_remainder(&mut weights, 1);

    tracing::debug!(eligible = eligible.len(), "allocated across eligible providers");

    Allocation {
        entries: entries(eligible.into_iter(), weights),
        insufficient_providers: false,
    }
}

fn fallback(ranked: &[ScoredProvider]) -> Vec<AllocationEntry> {
    match ranked {
        [] => Vec::new(),
        [only] => entries(std::iter::once(only), vec![TOTAL]),
        [first, second, ..] => {
            let mut weights: Vec<f64> = raw_weights(&[first.final_score, second.final_score])
                .into_iter()
                .map(|w| round_to(w, 0))
                .collect();
            fold_remainder(&mut weights, 0);
            entries([first, second].into_iter(), weights)
        }
    }
}

/// Share of the combined score in percent; equal split when the total is not positive.
pub(crate) fn raw_weights(scores: &[f64]) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }

    let mut scaled = scores.to_vec();
    let mut total: f64 = scaled.iter().sum();
    if !total.is_finite() {
        // Near f64::MAX scores overflow the sum; compare against the peak instead.
        let peak = scaled.iter().copied().fold(0.0, f64::max);
        scaled.iter_mut().for_each(|s| *s /= peak);
        total = scaled.iter().sum();
    }

    if total > 0.0 {
        scaled.iter().map(|s| s / total * TOTAL).collect()
    } else {
        vec![TOTAL / scores.len() as f64; scores.len()]
    }
}

pub(crate) fn cap_weights(weights: Vec<f64>) -> Vec<f64> {
    weights.into_iter().map(|w| w.min(WEIGHT_CAP)).collect()
}

/// Rescale so the weights sum to 100 again. There is no second cap pass, so a
/// capped entry can end above [`WEIGHT_CAP`]; that soft cap is intended.
pub(crate) fn renormalize(weights: Vec<f64>) -> Vec<f64> {
    let sum: f64 = weights.iter().sum();
    if sum <= 0.0 || (sum - TOTAL).abs() < f64::EPSILON * TOTAL {
        return weights;
    }
    weights.into_iter().map(|w| w / sum * TOTAL).collect()
}

/// Round half up, matching how the weights are displayed.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale + 0.5).floor() / scale
}

/// Push whatever the rounding lost (or gained) onto the top-ranked entry.
pub(crate) fn fold_remainder(weights: &mut [f64], decimals: i32) {
    let Some((first, rest)) = weights.split_first_mut() else {
        return;
    };
    let rest_sum: f64 = rest.iter().sum();
    *first = round_to(TOTAL - rest_sum, decimals);
}

fn entries<'a>(
    providers: impl Iterator<Item = &'a ScoredProvider>,
    weights: Vec<f64>,
) -> Vec<AllocationEntry> {
    providers
        .zip(weights)
        .map(|(p, weight)| AllocationEntry {
            provider: p.clone(),
            weight,
        })
        .collect()
}
