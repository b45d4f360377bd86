//! Logging setup and shared message helpers.

use std::fmt::Display;

use tracing_subscriber::EnvFilter;

/// Prefix used for every user-facing error message.
const PREFIX: &str = "dagnet-viz";

/// Format an error message the same way everywhere (CLI and library).
pub fn error_message(msg: impl Display) -> String {
    format!("{PREFIX}: {msg}")
}

/// Emit a non-fatal warning through the tracing pipeline.
pub fn warn(msg: impl Display) {
    tracing::warn!("{}", error_message(msg));
}

/// Install the stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks between `debug` and `warn`.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { "warn" })
    });

    // A second init (e.g. from tests) is not an error worth surfacing.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn error_message_is_prefixed() {
        assert_eq!(
            error_message("missing op name"),
            "dagnet-viz: missing op name"
        );
    }
}
