//! Error types produced while declaring flags and gathering overrides.

mod aggregate;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::FlagError;

/// Result alias used by fallible declaration and override operations.
pub type FlagResult<T> = Result<T, FlagError>;

#[cfg(test)]
mod tests;
