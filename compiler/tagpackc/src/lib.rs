//! Tagpack command-line driver.
//!
//! Reads union descriptors from JSON, plans them with `tagpack_layout`
//! and prints plan listings or diagnostics.

mod commands;
mod input;
mod listing;

use std::path::PathBuf;
use std::sync::Once;

use thiserror::Error;

pub use commands::{check_file, check_unions, plan_file, plan_unions, PlanArgs};
pub use input::{load_file, parse_batch};
pub use listing::PlanListing;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=tagpack_layout=debug`
/// or `RUST_LOG=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .with(filter)
                .init();
        }
    });
}

/// Errors that stop the driver before or while reporting.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("cannot read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}invalid input: {source}", location(path.as_ref()))]
    Json {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },

    #[error("unknown shape `{shape}` for `{context}`")]
    UnknownShape { shape: String, context: String },

    #[error("cannot write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("{0}")]
    Usage(String),
}

impl DriverError {
    /// Attach the input file to an error that doesn't name it yet.
    #[must_use]
    pub fn with_path(self, file: &std::path::Path) -> Self {
        match self {
            DriverError::Json { path: None, source } => DriverError::Json {
                path: Some(file.to_path_buf()),
                source,
            },
            other => other,
        }
    }
}

fn location(path: Option<&PathBuf>) -> String {
    path.map(|path| format!("{}: ", path.display()))
        .unwrap_or_default()
}
