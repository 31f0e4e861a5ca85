use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use uuid::Uuid;
use yieldscope_core::catalog::types::ProductCategory;
use yieldscope_core::domain::provider::ProviderInput;
use yieldscope_core::domain::selection::SelectionResult;

#[derive(Debug, Clone, Serialize)]
pub struct SelectionReport {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub category: Option<ProductCategory>,
    pub provider_count: usize,
    pub result: SelectionResult,
}

pub fn build_report(
    category: Option<ProductCategory>,
    providers: &[ProviderInput],
    generated_at: DateTime<Utc>,
) -> SelectionReport {
    SelectionReport {
        report_id: Uuid::new_v4(),
        generated_at,
        category,
        provider_count: providers.len(),
        result: yieldscope_core::run(providers),
    }
}

/// Write the report as pretty JSON to `out`, or stdout when no path is given.
pub fn write_report(report: &SelectionReport, out: Option<&Path>) -> anyhow::Result<()> {
    let body = serde_json::to_string_pretty(report).context("serialize report failed")?;

    match out {
        Some(path) => {
            std::fs::write(path, body)
                .with_context(|| format!("write report {} failed", path.display()))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{body}").context("write report to stdout failed")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn provider(id: &str, apy: f64, hv30: f64, years: f64, liquidity: &str) -> ProviderInput {
        ProviderInput {
            id: id.to_string(),
            name: id.to_uppercase(),
            apy_min: Some(apy),
            apy_max: Some(apy),
            hv30_volatility: Some(hv30),
            lock_duration_years: Some(years),
            liquidity_type: Some(liquidity.to_string()),
        }
    }

    #[test]
    fn build_report_runs_selection() {
        let generated_at = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        let providers = vec![
            provider("a", 10.0, 5.0, 0.0, "high"),
            provider("b", 6.0, 20.0, 5.0, "locked"),
        ];

        let report = build_report(Some(ProductCategory::Btc), &providers, generated_at);
        assert_eq!(report.provider_count, 2);
        assert_eq!(report.generated_at, generated_at);
        assert!(report.result.insufficient_providers);
        assert_eq!(report.result.allocation.len(), 2);
    }

    #[test]
    fn write_report_emits_wire_names() {
        let generated_at = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        let providers = vec![
            provider("a", 3.0, 1.0, 0.0, "high"),
            provider("b", 2.0, 1.0, 0.0, "high"),
            provider("c", 1.0, 1.0, 0.0, "high"),
        ];
        let report = build_report(None, &providers, generated_at);

        let path = std::env::temp_dir().join(format!("yieldscope-report-{}.json", report.report_id));
        write_report(&report, Some(&path)).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["report_id"], serde_json::json!(report.report_id.to_string()));
        assert_eq!(v["result"]["insufficientProviders"], serde_json::json!(false));
        assert_eq!(v["result"]["allocation"][0]["id"], serde_json::json!("a"));
        assert_eq!(v["result"]["allocation"][0]["weight"], serde_json::json!(44.5));
        assert_eq!(v["result"]["ranked"][0]["recommendation_level"], serde_json::json!("Recommended"));
        assert_eq!(v["result"]["ranked"][0]["liquidity"], serde_json::json!("high"));
        assert!(v["category"].is_null());
    }
}
