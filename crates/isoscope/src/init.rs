//! Initialization and lifecycle management.

use crate::Result;

/// Initializes isoscope with default options.
///
/// This must be called before any other isoscope functions. It also installs
/// an `env_logger` logger unless one is already set, so `RUST_LOG=debug`
/// reports every extraction.
///
/// # Errors
///
/// Returns an error if isoscope has already been initialized.
pub fn init() -> Result<()> {
    let _ = env_logger::try_init();
    isoscope_core::state::init_context()?;
    log::info!("isoscope initialized");
    Ok(())
}

/// Returns whether isoscope has been initialized.
#[must_use]
pub fn is_initialized() -> bool {
    isoscope_core::state::is_initialized()
}

/// Shuts down isoscope, dropping every registered structure.
///
/// After calling this, [`init()`] can be called again.
pub fn shutdown() {
    isoscope_core::state::shutdown_context();
    log::info!("isoscope shut down");
}
