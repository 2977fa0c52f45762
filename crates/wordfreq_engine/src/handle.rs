use std::sync::mpsc;
use std::thread;

use wordfreq_core::CancelFlag;
use wordfreq_logging::wf_warn;

use crate::fetch::{ChannelProgressSink, FetchSettings, ReqwestTextSource};
use crate::{analyze_url, AnalysisError, AnalysisEvent, AnalysisOptions, AnalysisReport};

/// Runs one analysis on a background thread with its own tokio runtime.
///
/// Progress and the final outcome arrive as [`AnalysisEvent`]s; the completion
/// event is always the last one sent.
pub struct AnalysisHandle {
    event_rx: mpsc::Receiver<AnalysisEvent>,
    cancel: CancelFlag,
}

impl AnalysisHandle {
    pub fn spawn(settings: FetchSettings, url: impl Into<String>, options: AnalysisOptions) -> Self {
        let url = url.into();
        let (event_tx, event_rx) = mpsc::channel();
        let cancel = options.cancel.clone().unwrap_or_default();
        let options = AnalysisOptions {
            cancel: Some(cancel.clone()),
            ..options
        };

        thread::spawn(move || {
            let result = match tokio::runtime::Runtime::new() {
                Ok(runtime) => match ReqwestTextSource::new(settings) {
                    Ok(source) => {
                        let sink = ChannelProgressSink::new(event_tx.clone());
                        runtime.block_on(analyze_url(&source, &url, &options, &sink))
                    }
                    Err(err) => Err(AnalysisError::Fetch(err)),
                },
                Err(err) => Err(AnalysisError::Runtime(err.to_string())),
            };
            if event_tx.send(AnalysisEvent::Completed(result)).is_err() {
                wf_warn!("Analysis of {} finished after its handle was dropped", url);
            }
        });

        Self { event_rx, cancel }
    }

    /// Asks the running count to stop; the outcome becomes `Cancelled` unless
    /// counting already finished.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn try_recv(&self) -> Option<AnalysisEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks for the next event; `None` once the completion event was consumed.
    pub fn recv(&self) -> Option<AnalysisEvent> {
        self.event_rx.recv().ok()
    }

    /// Blocks until the analysis completes, handing every progress event to `on_progress`.
    pub fn wait(
        self,
        mut on_progress: impl FnMut(crate::Progress),
    ) -> Result<AnalysisReport, AnalysisError> {
        while let Some(event) = self.recv() {
            match event {
                AnalysisEvent::Progress(progress) => on_progress(progress),
                AnalysisEvent::Completed(result) => return result,
            }
        }
        Err(AnalysisError::Runtime(
            "analysis thread exited without a result".to_string(),
        ))
    }
}
