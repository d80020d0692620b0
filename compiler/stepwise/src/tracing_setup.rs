//! Diagnostic logging for the CLI.
//!
//! Off unless `STEPWISE_LOG` (or `RUST_LOG`) holds a filter:
//!
//! ```text
//! STEPWISE_LOG=stepwise_eval=debug stepwise trace sort.json
//! STEPWISE_LOG=trace STEPWISE_LOG_TREE=1 stepwise trace sort.json
//! ```
//!
//! Everything goes to stderr so the JSON on stdout stays clean.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Some(directives) = log_directives() else {
            return;
        };
        let filter = EnvFilter::try_new(&directives).unwrap_or_else(|err| {
            eprintln!("warning: ignoring log filter '{directives}': {err}");
            EnvFilter::new("warn")
        });

        let registry = tracing_subscriber::registry().with(filter);
        if tree_output() {
            registry
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_writer(std::io::stderr)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .init();
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .init();
        }
    });
}

fn log_directives() -> Option<String> {
    std::env::var("STEPWISE_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()
        .filter(|directives| !directives.trim().is_empty())
}

fn tree_output() -> bool {
    std::env::var("STEPWISE_LOG_TREE").is_ok_and(|value| value == "1")
}
