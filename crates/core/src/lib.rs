pub mod catalog;
pub mod domain;
pub mod selection;

pub use selection::{run, run_value};

pub mod config {
    use anyhow::Context;
    use std::path::PathBuf;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub sentry_dsn: Option<String>,
        pub catalog_path: Option<PathBuf>,
        pub report_output_path: Option<PathBuf>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                sentry_dsn: non_empty_var("SENTRY_DSN"),
                catalog_path: non_empty_var("PROVIDER_CATALOG_PATH").map(PathBuf::from),
                report_output_path: non_empty_var("REPORT_OUTPUT_PATH").map(PathBuf::from),
            })
        }

        pub fn require_catalog_path(&self) -> anyhow::Result<&std::path::Path> {
            self.catalog_path
                .as_deref()
                .context("PROVIDER_CATALOG_PATH is required (or pass --catalog)")
        }
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.trim().is_empty())
    }

}
