//! Application constants and configuration

pub const APP_NAME: &str = "BitMirror";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory name under the per-user local data dir (settings, logs)
pub const DATA_DIR_NAME: &str = "BitMirror";
