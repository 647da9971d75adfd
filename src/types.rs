//! Common types and data structures

/// Metrics from the most recent successful conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionStats {
    /// Wall time of the conversion in milliseconds (monotonic clock)
    pub elapsed_ms: f64,
    /// Text length in Unicode code points
    pub text_chars: usize,
    /// Binary length in bits (0/1 digits only, separators excluded)
    pub binary_bits: usize,
}

/// What the status bar shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Status {
    /// Nothing converted yet
    #[default]
    Ready,
    /// Last propagation succeeded
    Converted(ConversionStats),
    /// Last binary edit was rejected; the message is user-facing
    Error(String),
}
