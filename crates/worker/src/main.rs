use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yieldscope_core::catalog::types::ProductCategory;
use yieldscope_core::catalog::{self, CatalogFilter};

mod report;

#[derive(Debug, Parser)]
#[command(name = "yieldscope_worker")]
struct Args {
    /// Product catalog JSON. Defaults to PROVIDER_CATALOG_PATH.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Only consider one product category (btc, fiat, stablecoin).
    #[arg(long)]
    category: Option<ProductCategory>,

    /// Include products marked inactive in the catalog.
    #[arg(long)]
    include_inactive: bool,

    /// Report destination. Defaults to REPORT_OUTPUT_PATH, then stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Run the selection and log the summary without writing a report.
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = yieldscope_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    if let Err(err) = run(&args, &settings) {
        sentry_anyhow::capture_anyhow(&err);
        tracing::error!(error = %err, "selection run failed");
        return Err(err);
    }

    Ok(())
}

fn run(args: &Args, settings: &yieldscope_core::config::Settings) -> anyhow::Result<()> {
    let catalog_path = match &args.catalog {
        Some(path) => path.clone(),
        None => settings.require_catalog_path()?.to_path_buf(),
    };

    let products = catalog::load_catalog(&catalog_path)?;
    let filter = CatalogFilter {
        category: args.category,
        include_inactive: args.include_inactive,
    };
    let providers = catalog::select_products(&products, &filter);

    let report = report::build_report(args.category, &providers, chrono::Utc::now());

    if report.result.insufficient_providers {
        tracing::warn!(
            report_id = %report.report_id,
            providers = report.provider_count,
            "fewer than two qualifying providers; allocation is a fallback"
        );
    }

    for entry in &report.result.allocation {
        tracing::info!(
            id = %entry.provider.id,
            name = %entry.provider.name,
            final_score = entry.provider.final_score,
            level = ?entry.provider.recommendation_level,
            weight = entry.weight,
            "allocation"
        );
    }

    if args.dry_run {
        tracing::info!(
            report_id = %report.report_id,
            dry_run = true,
            ranked_len = report.result.ranked.len(),
            total_weight = report.result.total_weight(),
            "selection complete (dry-run)"
        );
        return Ok(());
    }

    let out = args.out.as_deref().or(settings.report_output_path.as_deref());
    report::write_report(&report, out)?;

    tracing::info!(
        report_id = %report.report_id,
        ranked_len = report.result.ranked.len(),
        allocation_len = report.result.allocation.len(),
        total_weight = report.result.total_weight(),
        "wrote selection report"
    );
    Ok(())
}

fn init_sentry(settings: &yieldscope_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
