use std::fmt;
use std::num::NonZeroUsize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrequencyError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("fragment {fragment_index} failed: {cause}")]
    PartialComputationFailure { fragment_index: usize, cause: String },
    #[error("word count cancelled")]
    Cancelled,
}

/// Concurrency used when none is configured.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Number of fragments a text is split into and of workers counting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Concurrency(NonZeroUsize);

impl Concurrency {
    pub const DEFAULT: Concurrency = match NonZeroUsize::new(DEFAULT_CONCURRENCY) {
        Some(workers) => Concurrency(workers),
        None => panic!("DEFAULT_CONCURRENCY must be positive"),
    };

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for Concurrency {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Concurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for Concurrency {
    type Error = FrequencyError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        NonZeroUsize::new(value).map(Concurrency).ok_or_else(|| {
            FrequencyError::InvalidConfiguration(format!(
                "concurrency must be a positive integer, got {value}"
            ))
        })
    }
}

impl TryFrom<i64> for Concurrency {
    type Error = FrequencyError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let value = usize::try_from(value).map_err(|_| {
            FrequencyError::InvalidConfiguration(format!(
                "concurrency must be a positive integer, got {value}"
            ))
        })?;
        Concurrency::try_from(value)
    }
}
