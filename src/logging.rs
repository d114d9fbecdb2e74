//
//  satellite-link
//  logging.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Logging setup.
//!
//! The library only emits `tracing` events. Applications that already install a
//! subscriber see them there; others can call [`init`] to get a formatted
//! subscriber filtered by the `SATELLITE_LINK_DEBUG` environment variable,
//! e.g. `SATELLITE_LINK_DEBUG=satellite_link=debug`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter directives.
pub const LOG_FILTER_ENV: &str = "SATELLITE_LINK_DEBUG";

/// Installs a global `tracing` subscriber, defaulting to `warn`.
///
/// Does nothing if a global subscriber is already installed.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // Ignore the error: another subscriber is already in place.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
        tracing::debug!("logging initialized twice");
    }
}
