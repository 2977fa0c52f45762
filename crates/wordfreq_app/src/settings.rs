use anyhow::{anyhow, Context};
use wordfreq_core::{Concurrency, DEFAULT_TOP_N};
use wordfreq_engine::AnalysisOptions;

use crate::logging::LogDestination;

pub const URL_VAR: &str = "WORDFREQ_URL";
pub const CONCURRENCY_VAR: &str = "WORDFREQ_CONCURRENCY";
pub const TOP_N_VAR: &str = "WORDFREQ_TOP_N";
pub const FORMAT_VAR: &str = "WORDFREQ_FORMAT";
pub const LOG_VAR: &str = "WORDFREQ_LOG";

/// Pride and Prejudice on Project Gutenberg.
pub const DEFAULT_URL: &str = "https://www.gutenberg.org/files/1342/1342-0.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Chart,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub url: String,
    pub concurrency: Concurrency,
    pub top_n: usize,
    pub format: OutputFormat,
    pub log_destination: LogDestination,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            concurrency: Concurrency::default(),
            top_n: DEFAULT_TOP_N,
            format: OutputFormat::default(),
            log_destination: LogDestination::default(),
        }
    }
}

impl AppSettings {
    /// Reads the `WORDFREQ_*` environment variables; unset ones keep their defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut settings = AppSettings::default();
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = value(URL_VAR) {
            settings.url = url.trim().to_string();
        }
        if let Some(raw) = value(CONCURRENCY_VAR) {
            let parsed: i64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{CONCURRENCY_VAR}={raw:?} is not an integer"))?;
            settings.concurrency = Concurrency::try_from(parsed)
                .with_context(|| format!("{CONCURRENCY_VAR}={raw:?} is out of range"))?;
        }
        if let Some(raw) = value(TOP_N_VAR) {
            settings.top_n = raw
                .trim()
                .parse()
                .with_context(|| format!("{TOP_N_VAR}={raw:?} is not a non-negative integer"))?;
        }
        if let Some(raw) = value(FORMAT_VAR) {
            settings.format = match raw.trim().to_ascii_lowercase().as_str() {
                "chart" => OutputFormat::Chart,
                "json" => OutputFormat::Json,
                _ => return Err(anyhow!("{FORMAT_VAR}={raw:?} must be chart or json")),
            };
        }
        if let Some(raw) = value(LOG_VAR) {
            settings.log_destination = raw
                .parse()
                .map_err(|reason| anyhow!("{LOG_VAR}={raw:?}: {reason}"))?;
        }
        Ok(settings)
    }

    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions::new(self.concurrency, self.top_n)
    }
}
