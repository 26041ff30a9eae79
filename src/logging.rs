//! Logger set-up shared by the `duel` binary and tests.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// `verbose` selects debug output, which includes per-entity registration
/// and damage messages; otherwise only info and above are shown. `RUST_LOG`
/// takes precedence over both.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);

    // `try_init` only fails if a logger was already set; simulations and
    // tests may call `init` more than once.
    let _ = builder.try_init();
}
