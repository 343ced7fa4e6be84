// crates/scim-harness-core/src/transcript.rs
// ============================================================================
// Module: Request Transcript Sink
// Description: Shared append-only buffer for captured request records.
// Purpose: Collect mock-endpoint transcript entries for golden comparison.
// Dependencies: std::sync
// ============================================================================

//! ## Overview
//! Every mock endpoint appends a textual record of each inbound request to a
//! single shared sink. The orchestrator resets the sink before a client run
//! and snapshots it afterwards for comparison against the golden fixture.
//! Clones share the same buffer, so the server task and the sequential
//! orchestrator can hold handles independently.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;

// ============================================================================
// SECTION: Transcript Sink
// ============================================================================

/// Shared, resettable text buffer for captured request records.
///
/// Appends from concurrent request handlers interleave at entry granularity;
/// `reset` and `snapshot` are atomic with respect to appends. The buffer is
/// unbounded: a test run is short-lived by construction.
#[derive(Debug, Clone, Default)]
pub struct TranscriptSink {
    /// Shared transcript buffer.
    buffer: Arc<Mutex<String>>,
}

impl TranscriptSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends text to the transcript.
    pub fn append(&self, text: &str) {
        let Ok(mut buffer) = self.buffer.lock() else {
            return;
        };
        buffer.push_str(text);
    }

    /// Discards all captured content.
    pub fn reset(&self) {
        let Ok(mut buffer) = self.buffer.lock() else {
            return;
        };
        buffer.clear();
    }

    /// Returns the current transcript content.
    #[must_use]
    pub fn snapshot(&self) -> String {
        self.buffer.lock().map_or_else(|_| String::new(), |buffer| buffer.clone())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
