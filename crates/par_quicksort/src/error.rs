use thiserror::Error;

pub type SortResult<T> = Result<T, SortError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SortError {
    #[error("invalid thread count {input:?}: expected a non-negative integer")]
    InvalidThreadCount { input: String },

    #[error("prefix length {count} exceeds sequence length {len}")]
    CountOutOfBounds { count: usize, len: usize },

    #[error("thread budget lock poisoned")]
    BudgetPoisoned,

    #[error("sort worker panicked")]
    WorkerPanicked,
}
