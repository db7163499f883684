//! Tracing subscriber installation.
//!
//! Every crate of the workspace logs through `tracing`; nothing is printed
//! until an application installs a subscriber with [`init`].

use std::sync::{Mutex, Once, OnceLock};

use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is unset and [`set_filter`] was not called.
pub const DEFAULT_FILTER: &str = "info";

static INSTALLED: Once = Once::new();
static FALLBACK_FILTER: OnceLock<Mutex<String>> = OnceLock::new();

fn fallback() -> &'static Mutex<String> {
    FALLBACK_FILTER.get_or_init(|| Mutex::new(DEFAULT_FILTER.to_string()))
}

/// Changes the filter used when `RUST_LOG` is unset.
///
/// Only takes effect before [`init`].
pub fn set_filter(filter: &str) {
    if let Ok(mut guard) = fallback().lock() {
        *guard = filter.to_string();
    }
}

/// The filter [`init`] falls back to.
#[must_use]
pub fn filter() -> String {
    fallback()
        .lock()
        .map_or_else(|_| DEFAULT_FILTER.to_string(), |guard| guard.clone())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives = filter();
        EnvFilter::try_new(&directives).unwrap_or_else(|error| {
            eprintln!("invalid log filter `{directives}`: {error}");
            EnvFilter::new(DEFAULT_FILTER)
        })
    })
}

/// Installs the formatting subscriber (idempotent).
///
/// `RUST_LOG` wins over the fallback filter. When another global subscriber
/// is already installed this does nothing.
pub fn init() {
    INSTALLED.call_once(|| {
        let result = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(env_filter())
            .try_init();
        if result.is_err() {
            eprintln!("a global tracing subscriber is already installed");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_filter_is_replaceable() {
        set_filter("rui_core=debug,warn");
        assert_eq!(filter(), "rui_core=debug,warn");
        init();
        init();
        tracing::info!("logging installed");
        set_filter(DEFAULT_FILTER);
        assert_eq!(filter(), DEFAULT_FILTER);
    }
}
