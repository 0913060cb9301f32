//! Public SDK surface for Insight.
//!
//! Re-exports the building blocks and wires them together for the `insight`
//! binary.

mod app;
mod cli;

pub use app::{Runtime, apply_overrides, build_llm, build_runtime, load_config, run};
pub use cli::{Cli, Command};

/// Re-export for convenience.
pub use insight_rs_config as config;
pub use insight_rs_core as core;
/// Re-export for convenience.
pub use insight_rs_data as data;
pub use insight_rs_protocol as protocol;
/// Re-export for convenience.
pub use insight_rs_server as server;
pub use insight_rs_tools as tools;

/// Initialize logging with millisecond timestamps; verbosity comes from `RUST_LOG`.
///
/// Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();
}
