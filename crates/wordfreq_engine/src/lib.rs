//! Wordfreq engine: text retrieval and the fetch → decode → count pipeline.
mod analysis;
mod decode;
mod fetch;
mod handle;
mod types;

pub use analysis::{analyze_url, AnalysisError, AnalysisOptions, AnalysisReport};
pub use decode::{decode_text, DecodeError, DecodedText};
pub use fetch::{ChannelProgressSink, FetchSettings, ProgressSink, ReqwestTextSource, TextSource};
pub use handle::AnalysisHandle;
pub use types::{AnalysisEvent, FailureKind, FetchError, FetchMetadata, FetchOutput, Progress, Stage};
