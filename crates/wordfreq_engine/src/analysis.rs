use wordfreq_core::{
    top_n, CancelFlag, Concurrency, FrequencyEngine, FrequencyError, FrequencyTable, SplitPolicy,
    WordRankEntry, DEFAULT_TOP_N,
};
use wordfreq_logging::wf_info;

use crate::{
    decode_text, DecodeError, FetchError, FetchMetadata, Progress, ProgressSink, Stage,
    TextSource,
};

#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub concurrency: Concurrency,
    pub top_n: usize,
    pub split_policy: SplitPolicy,
    pub cancel: Option<CancelFlag>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            concurrency: Concurrency::default(),
            top_n: DEFAULT_TOP_N,
            split_policy: SplitPolicy::default(),
            cancel: None,
        }
    }
}

impl AnalysisOptions {
    pub fn new(concurrency: Concurrency, top_n: usize) -> Self {
        Self {
            concurrency,
            top_n,
            ..Self::default()
        }
    }

    fn engine(&self) -> FrequencyEngine {
        let engine = FrequencyEngine::new(self.concurrency).with_split_policy(self.split_policy);
        match &self.cancel {
            Some(cancel) => engine.with_cancel_flag(cancel.clone()),
            None => engine,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    pub metadata: FetchMetadata,
    pub encoding_label: String,
    pub table: FrequencyTable,
    pub top: Vec<WordRankEntry>,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("failed to download text: {0}")]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Count(#[from] FrequencyError),
    #[error("analysis runtime failure: {0}")]
    Runtime(String),
}

/// Fetches `url`, decodes it, and counts its words off the async executor.
pub async fn analyze_url(
    source: &dyn TextSource,
    url: &str,
    options: &AnalysisOptions,
    sink: &dyn ProgressSink,
) -> Result<AnalysisReport, AnalysisError> {
    let output = source.fetch(url, sink).await?;

    sink.emit(Progress {
        stage: Stage::Decoding,
        bytes: Some(output.metadata.byte_len),
        words: None,
    });
    let decoded = decode_text(&output.bytes, output.metadata.content_type.as_deref())?;

    sink.emit(Progress::stage(Stage::Counting));
    let engine = options.engine();
    let text = decoded.text;
    let table = tokio::task::spawn_blocking(move || engine.count(&text))
        .await
        .map_err(|err| AnalysisError::Runtime(err.to_string()))??;

    let top = top_n(&table, options.top_n);
    wf_info!(
        "Analyzed {}: {} words, {} distinct ({})",
        output.metadata.final_url,
        table.total(),
        table.len(),
        decoded.encoding_label
    );
    sink.emit(Progress {
        stage: Stage::Done,
        bytes: Some(output.metadata.byte_len),
        words: Some(table.total()),
    });

    Ok(AnalysisReport {
        metadata: output.metadata,
        encoding_label: decoded.encoding_label,
        table,
        top,
    })
}
