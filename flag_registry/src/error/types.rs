//! Primary error enum for flag declaration and override flows.

use figment::Error as FigmentError;
use thiserror::Error;

use super::AggregatedErrors;
use crate::backend::FlagType;

/// Errors raised by the flag backend, declarations and override sources.
///
/// Query and update operations on [`crate::FlagRegistry`] never return this
/// type; they degrade to empty strings or `false` instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlagError {
    /// The backend does not know the requested name.
    #[error("unknown flag '{name}'")]
    UnknownFlag {
        /// Name that failed to resolve.
        name: String,
    },

    /// A flag or alias with this name was already defined in the backend.
    #[error("flag '{name}' is already defined")]
    DuplicateFlag {
        /// Name that was declared twice.
        name: String,
    },

    /// Text could not be parsed as a value of the flag's type.
    #[error("invalid value '{value}' for {flag_type} flag '{name}'")]
    InvalidValue {
        /// Flag being written.
        name: String,
        /// Declared type of the flag.
        flag_type: FlagType,
        /// Rejected text.
        value: String,
    },

    /// An alias was pointed at another alias rather than an owned flag.
    #[error("alias '{alias}' cannot target alias '{target}'")]
    ChainedAlias {
        /// Alias being declared.
        alias: String,
        /// Existing alias it tried to target.
        target: String,
    },

    /// Error while gathering override values from figment providers.
    #[error("failed to gather flag overrides: {0}")]
    Gathering(#[from] Box<FigmentError>),

    /// Multiple errors occurred while registering declarations.
    #[error("multiple flag errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}

impl FlagError {
    /// Builds a single error from an iterator of errors.
    ///
    /// Returns `None` for an empty iterator, the error itself for exactly one
    /// entry, and [`Self::Aggregate`] otherwise.
    #[must_use]
    pub fn try_aggregate<I>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut collected: Vec<Self> = errors.into_iter().collect();
        match collected.len() {
            0 => None,
            1 => collected.pop(),
            _ => Some(Self::Aggregate(Box::new(AggregatedErrors::new(collected)))),
        }
    }

    /// Converts a list of errors into a `Result`, succeeding when it is empty.
    ///
    /// # Errors
    ///
    /// Returns the single error, or an aggregate of all of them, when
    /// `errors` is non-empty.
    pub fn into_result<I>(errors: I) -> Result<(), Self>
    where
        I: IntoIterator<Item = Self>,
    {
        Self::try_aggregate(errors).map_or(Ok(()), Err)
    }

    /// Construct a gathering error from a [`figment::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use flag_registry::FlagError;
    /// let e = FlagError::gathering(figment::Error::from("boom"));
    /// assert!(matches!(e, FlagError::Gathering(_)));
    /// ```
    #[must_use]
    pub fn gathering(source: FigmentError) -> Self {
        Self::Gathering(Box::new(source))
    }
}
