//! The process-wide registry.
//!
//! Built on first use and never torn down. Programs declare their flags once
//! during startup with [`register_flags`]; every other part of the program
//! reads and writes through [`registry`].

use std::sync::LazyLock;

use crate::declare::Declaration;
use crate::error::FlagResult;
use crate::registry::FlagRegistry;

static REGISTRY: LazyLock<FlagRegistry> = LazyLock::new(FlagRegistry::default);

/// The process-wide registry, created on first access.
#[must_use]
pub fn registry() -> &'static FlagRegistry {
    &REGISTRY
}

/// Registers `declarations` with the process-wide registry.
///
/// # Errors
///
/// Returns the errors reported by [`FlagRegistry::register`].
pub fn register_flags<I>(declarations: I) -> FlagResult<()>
where
    I: IntoIterator<Item = Declaration>,
{
    registry().register(declarations)
}
