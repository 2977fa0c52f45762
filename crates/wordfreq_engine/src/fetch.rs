use std::sync::mpsc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use wordfreq_logging::wf_debug;

use crate::{AnalysisEvent, FailureKind, FetchError, FetchMetadata, FetchOutput, Progress, Stage};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 16 * 1024 * 1024,
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, progress: Progress);
}

pub struct ChannelProgressSink {
    tx: mpsc::Sender<AnalysisEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: mpsc::Sender<AnalysisEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, progress: Progress) {
        let _ = self.tx.send(AnalysisEvent::Progress(progress));
    }
}

/// Supplies the raw document whose words get counted.
#[async_trait::async_trait]
pub trait TextSource: Send + Sync {
    async fn fetch(&self, url: &str, sink: &dyn ProgressSink) -> Result<FetchOutput, FetchError>;
}

/// Downloads a text document over HTTP(S) with one reusable client.
#[derive(Debug, Clone)]
pub struct ReqwestTextSource {
    client: reqwest::Client,
    max_bytes: u64,
}

impl ReqwestTextSource {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()?;
        Ok(Self {
            client,
            max_bytes: settings.max_bytes,
        })
    }

    fn check_size(&self, len: u64) -> Result<(), FetchError> {
        if len <= self.max_bytes {
            return Ok(());
        }
        Err(FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.max_bytes,
                actual: Some(len),
            },
            "document too large",
        ))
    }
}

/// Only `text/*` documents have words to count. A missing header is given the
/// benefit of the doubt and left to the decoder.
fn is_text_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .and_then(|mime| mime.trim().split_once('/'))
        .is_some_and(|(kind, _)| kind.trim().eq_ignore_ascii_case("text"))
}

#[async_trait::async_trait]
impl TextSource for ReqwestTextSource {
    async fn fetch(&self, url: &str, sink: &dyn ProgressSink) -> Result<FetchOutput, FetchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

        wf_debug!("GET {}", parsed);
        sink.emit(Progress {
            stage: Stage::Downloading,
            bytes: Some(0),
            words: None,
        });
        let response = self.client.get(parsed).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        if let Some(len) = response.content_length() {
            self.check_size(len)?;
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        if let Some(content_type) = content_type.as_deref() {
            if !is_text_content_type(content_type) {
                return Err(FetchError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: content_type.to_string(),
                    },
                    "not a text document",
                ));
            }
        }

        let bytes = response.bytes().await?.to_vec();
        let byte_len = bytes.len() as u64;
        self.check_size(byte_len)?;
        sink.emit(Progress {
            stage: Stage::Downloading,
            bytes: Some(byte_len),
            words: None,
        });
        wf_debug!("Downloaded {} bytes from {}", byte_len, final_url);

        Ok(FetchOutput {
            bytes,
            metadata: FetchMetadata {
                original_url: url.to_string(),
                final_url,
                content_type,
                byte_len,
            },
        })
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            FailureKind::Timeout
        } else if err.is_redirect() {
            FailureKind::RedirectLimitExceeded
        } else {
            FailureKind::Network
        };
        FetchError::new(kind, err.to_string())
    }
}
