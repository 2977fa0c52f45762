//! Wordfreq core: parallel word-frequency counting.
//!
//! The pipeline is split → count per fragment on a bounded worker pool → merge.
//! Everything here is in-memory and free of IO.
mod aggregate;
mod counter;
mod engine;
mod error;
mod partition;
mod pool;
mod rank;
mod table;
mod tokenize;

pub use aggregate::merge;
pub use counter::count_fragment;
pub use engine::{count_words, FrequencyEngine};
pub use error::{Concurrency, FrequencyError, DEFAULT_CONCURRENCY};
pub use partition::{split, split_with, SplitPolicy};
pub use pool::{CancelFlag, WorkerPool};
pub use rank::{top_n, WordRankEntry, DEFAULT_TOP_N};
pub use table::FrequencyTable;
pub use tokenize::{is_word_char, tokenize, Tokens};
