pub mod allocation;
pub mod normalize;
pub mod scoring;

use crate::domain::provider::ProviderInput;
use crate::domain::selection::SelectionResult;
use normalize::NormalizedProvider;
use serde_json::Value;

/// Score, rank and allocate. Never fails; an empty or thin candidate list is
/// reported through [`SelectionResult::insufficient_providers`].
pub fn run(providers: &[ProviderInput]) -> SelectionResult {
    if providers.is_empty() {
        return SelectionResult::empty();
    }

    let mut ranked: Vec<_> = providers
        .iter()
        .map(NormalizedProvider::from_input)
        .map(scoring::score)
        .collect();

    // Stable: equal scores keep their input order.
    ranked.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let allocation = allocation::allocate(&ranked);

    SelectionResult {
        ranked,
        allocation: allocation.entries,
        insufficient_providers: allocation.insufficient_providers,
    }
}

/// Run over loosely-typed JSON. Anything but a non-empty array is treated as
/// "no providers".
pub fn run_value(providers: &Value) -> SelectionResult {
    match providers {
        Value::Array(items) if !items.is_empty() => {
            let inputs: Vec<ProviderInput> = items.iter().map(ProviderInput::from_value).collect();
            run(&inputs)
        }
        _ => SelectionResult::empty(),
    }
}
