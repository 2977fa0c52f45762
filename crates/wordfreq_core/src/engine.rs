use std::convert::Infallible;

use wordfreq_logging::wf_debug;

use crate::{
    count_fragment, merge, split_with, CancelFlag, Concurrency, FrequencyError, FrequencyTable,
    SplitPolicy, WorkerPool,
};

/// Counts the words of `text` using `concurrency` fragments and workers.
///
/// Uses the default [`FrequencyEngine`] settings, so fragments are cut at raw
/// character offsets and a word straddling a cut is counted as two words. Build a
/// [`FrequencyEngine`] with [`SplitPolicy::WordBoundary`] for counts that do not
/// depend on `concurrency`.
pub fn count_words(text: &str, concurrency: usize) -> Result<FrequencyTable, FrequencyError> {
    let concurrency = Concurrency::try_from(concurrency)?;
    FrequencyEngine::new(concurrency).count(text)
}

/// Split → parallel per-fragment count → merge.
#[derive(Debug, Clone, Default)]
pub struct FrequencyEngine {
    concurrency: Concurrency,
    split_policy: SplitPolicy,
    cancel: Option<CancelFlag>,
}

impl FrequencyEngine {
    pub fn new(concurrency: Concurrency) -> Self {
        Self {
            concurrency,
            ..Self::default()
        }
    }

    pub fn with_split_policy(mut self, split_policy: SplitPolicy) -> Self {
        self.split_policy = split_policy;
        self
    }

    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn concurrency(&self) -> Concurrency {
        self.concurrency
    }

    pub fn split_policy(&self) -> SplitPolicy {
        self.split_policy
    }

    pub fn count(&self, text: &str) -> Result<FrequencyTable, FrequencyError> {
        let fragments = split_with(text, self.concurrency, self.split_policy);
        wf_debug!(
            "Counting {} bytes in {} fragments ({:?})",
            text.len(),
            fragments.len(),
            self.split_policy
        );

        let mut pool = WorkerPool::new(self.concurrency);
        if let Some(cancel) = &self.cancel {
            pool = pool.with_cancel_flag(cancel.clone());
        }
        let partials = pool.run_all(&fragments, |fragment: &&str| {
            Ok::<_, Infallible>(count_fragment(fragment))
        })?;

        let table = merge(partials);
        wf_debug!(
            "Counted {} words, {} distinct",
            table.total(),
            table.len()
        );
        Ok(table)
    }
}
