//! Test helpers shared across crates in the flag-registry workspace.
//!
//! - [`fixtures`] builds registries seeded with a known set of flags.
//! - [`text`] pulls flag names and `NAME=VALUE` pairs out of rendered output.
//! - [`figment`] runs environment-dependent code inside a `figment::Jail`.

pub mod figment;
pub mod fixtures;
pub mod text;
