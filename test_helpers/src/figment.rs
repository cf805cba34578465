//! Runs code against a scratch environment inside a [`figment::Jail`].

use anyhow::{Result, anyhow};

/// Sets each `(name, value)` pair as an environment variable inside a jail,
/// runs `f`, and returns its output.
///
/// The jail restores the environment once `f` returns, whether or not it
/// succeeded.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or `f` fails.
#[expect(
    clippy::result_large_err,
    reason = "`figment::Jail::try_with` fixes the closure's error type"
)]
pub fn with_env<F, T>(vars: &[(&str, &str)], f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        for (name, value) in vars {
            jail.set_env(name, value);
        }
        output = Some(f().map_err(|err| figment::Error::from(err.to_string()))?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not produce a value"))
}
