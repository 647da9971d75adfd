//! Pane synchronization state machine
//!
//! Owns the two pane buffers and decides which direction is allowed to
//! propagate. A buffer write performed by the controller itself can surface
//! as a change notification from the host toolkit; the state enum tells
//! those echoes apart from user edits. Single-threaded, so no locks.

use crate::codec;
use crate::types::{ConversionStats, Status};
use std::time::Instant;
use tracing::{debug, warn};

/// Propagation guard between the two bound panes.
///
/// Exactly one direction may propagate per dispatch cycle; the host loop
/// calls [`SyncController::end_cycle`] once both panes have been presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    #[default]
    Idle,
    PropagatingFromText,
    PropagatingFromBinary,
}

/// Mediator between the text pane, the binary pane, and the status line
#[derive(Debug, Default)]
pub struct SyncController {
    pub text: String,
    pub binary: String,
    state: SyncState,
    status: Status,
}

impl SyncController {
    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Handle a change notification from the text pane.
    ///
    /// Ignored while a binary-to-text propagation is in flight (the
    /// notification is an echo of our own write). Otherwise re-encodes the
    /// full text and replaces the binary buffer's content.
    pub fn on_text_edited(&mut self) {
        if self.state == SyncState::PropagatingFromBinary {
            return;
        }
        self.state = SyncState::PropagatingFromText;

        let started = Instant::now();
        let binary = codec::encode(&self.text);
        let stats = ConversionStats {
            elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
            text_chars: self.text.chars().count(),
            binary_bits: codec::bit_len(&binary),
        };
        self.binary = binary;
        self.status = Status::Converted(stats);
        debug!(
            chars = stats.text_chars,
            bits = stats.binary_bits,
            "text propagated to binary"
        );
    }

    /// Handle a change notification from the binary pane.
    ///
    /// Ignored while a text-to-binary propagation is in flight. On a decode
    /// failure the text buffer is left exactly as it was and the error
    /// message goes to the status line.
    pub fn on_binary_edited(&mut self) {
        if self.state == SyncState::PropagatingFromText {
            return;
        }
        self.state = SyncState::PropagatingFromBinary;

        let started = Instant::now();
        match codec::decode(&self.binary) {
            Ok(text) => {
                let stats = ConversionStats {
                    elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
                    text_chars: text.chars().count(),
                    binary_bits: codec::bit_len(&self.binary),
                };
                self.text = text;
                self.status = Status::Converted(stats);
                debug!(
                    chars = stats.text_chars,
                    bits = stats.binary_bits,
                    "binary propagated to text"
                );
            }
            Err(e) => {
                warn!(error = %e, "rejected binary input");
                self.status = Status::Error(e.to_string());
            }
        }
    }

    /// Clear the text pane; counts as a user edit and propagates.
    pub fn clear_text(&mut self) {
        self.text.clear();
        self.on_text_edited();
    }

    /// Clear the binary pane; counts as a user edit and propagates.
    pub fn clear_binary(&mut self) {
        self.binary.clear();
        self.on_binary_edited();
    }

    /// Close the current dispatch cycle and return to idle.
    ///
    /// Called by the host loop after both panes have had the chance to
    /// report changes for this cycle.
    pub fn end_cycle(&mut self) {
        self.state = SyncState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_and_ready() {
        let c = SyncController::default();
        assert_eq!(c.state(), SyncState::Idle);
        assert_eq!(*c.status(), Status::Ready);
    }

    #[test]
    fn text_edit_propagates_to_binary() {
        let mut c = SyncController::default();
        c.text.push('A');
        c.on_text_edited();

        assert_eq!(c.binary, "01000001");
        assert_eq!(c.state(), SyncState::PropagatingFromText);
        match c.status() {
            Status::Converted(stats) => {
                assert_eq!(stats.text_chars, 1);
                assert_eq!(stats.binary_bits, 8);
            }
            other => panic!("expected Converted status, got {other:?}"),
        }

        c.end_cycle();
        assert_eq!(c.state(), SyncState::Idle);
    }

    #[test]
    fn binary_edit_propagates_to_text() {
        let mut c = SyncController::default();
        c.binary.push_str("01000001 01000010");
        c.on_binary_edited();

        assert_eq!(c.text, "AB");
        match c.status() {
            Status::Converted(stats) => {
                assert_eq!(stats.text_chars, 2);
                assert_eq!(stats.binary_bits, 16);
            }
            other => panic!("expected Converted status, got {other:?}"),
        }
    }

    #[test]
    fn echo_of_own_write_is_ignored() {
        let mut c = SyncController::default();
        c.text.push_str("hi");
        c.on_text_edited();
        let binary_before = c.binary.clone();

        // The toolkit reports the binary pane as changed in the same cycle;
        // that change is the controller's own write and must not bounce back.
        c.on_binary_edited();
        assert_eq!(c.text, "hi");
        assert_eq!(c.binary, binary_before);
        assert_eq!(c.state(), SyncState::PropagatingFromText);
    }

    #[test]
    fn echo_is_ignored_in_the_other_direction_too() {
        let mut c = SyncController::default();
        c.binary.push_str("01000001");
        c.on_binary_edited();

        c.on_text_edited();
        assert_eq!(c.text, "A");
        assert_eq!(c.binary, "01000001");
        assert_eq!(c.state(), SyncState::PropagatingFromBinary);
    }

    #[test]
    fn malformed_binary_leaves_text_untouched() {
        let mut c = SyncController::default();
        c.text.push_str("keep me");
        c.on_text_edited();
        c.end_cycle();

        c.binary = "0100000".into(); // 7 digits
        c.on_binary_edited();

        assert_eq!(c.text, "keep me");
        assert!(matches!(c.status(), Status::Error(_)));
    }

    #[test]
    fn invalid_utf8_surfaces_as_error_status() {
        let mut c = SyncController::default();
        c.binary = "11111111".into();
        c.on_binary_edited();

        assert_eq!(c.text, "");
        match c.status() {
            Status::Error(msg) => assert!(msg.contains("UTF-8")),
            other => panic!("expected Error status, got {other:?}"),
        }
    }

    #[test]
    fn next_cycle_accepts_the_opposite_direction() {
        let mut c = SyncController::default();
        c.text.push_str("A");
        c.on_text_edited();
        c.end_cycle();

        // A real user edit of the binary pane in a later cycle propagates.
        c.binary = "01000010".into();
        c.on_binary_edited();
        assert_eq!(c.text, "B");
    }

    #[test]
    fn clearing_a_pane_propagates() {
        let mut c = SyncController::default();
        c.text.push_str("A");
        c.on_text_edited();
        c.end_cycle();

        c.clear_binary();
        assert_eq!(c.text, "");
        assert_eq!(c.binary, "");
        c.end_cycle();

        c.text.push_str("中");
        c.on_text_edited();
        c.end_cycle();
        c.clear_text();
        assert_eq!(c.binary, "");
    }

    #[test]
    fn full_round_trip_through_both_panes() {
        let mut c = SyncController::default();
        c.text.push_str("héllo 🦀");
        c.on_text_edited();
        c.end_cycle();

        // Re-decode what the controller produced; the text must survive.
        c.text.clear();
        c.on_binary_edited();
        assert_eq!(c.text, "héllo 🦀");
    }
}
