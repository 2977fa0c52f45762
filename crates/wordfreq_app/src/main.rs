mod logging;
mod render;
mod settings;

use chrono::Utc;
use wordfreq_engine::{AnalysisHandle, FetchSettings};
use wordfreq_logging::{wf_debug, wf_error, wf_info};

use crate::render::{chart_title, render_bar_chart, render_json};
use crate::settings::{AppSettings, OutputFormat};

fn main() -> anyhow::Result<()> {
    let settings = AppSettings::from_env()?;
    logging::initialize(settings.log_destination);
    wf_info!(
        "Analyzing {} with concurrency {} (top {})",
        settings.url,
        settings.concurrency,
        settings.top_n
    );

    let handle = AnalysisHandle::spawn(
        FetchSettings::default(),
        settings.url.clone(),
        settings.analysis_options(),
    );
    let report = handle
        .wait(|progress| {
            wf_debug!(
                "{:?} bytes={:?} words={:?}",
                progress.stage,
                progress.bytes,
                progress.words
            );
        })
        .inspect_err(|err| wf_error!("Analysis of {} failed: {}", settings.url, err))?;

    let output = match settings.format {
        OutputFormat::Chart => render_bar_chart(&report.top, &chart_title(settings.top_n)),
        OutputFormat::Json => render_json(&report, &Utc::now().to_rfc3339())?,
    };
    println!("{output}");
    Ok(())
}
