// crates/scim-harness-core/src/compare.rs
// ============================================================================
// Module: Transcript Comparison
// Description: Whitespace-insensitive golden-transcript comparison.
// Purpose: Decide step pass/fail from expected and received transcripts.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Golden fixtures and captured transcripts are compared after stripping
//! leading and trailing spaces, tabs, and newlines from both sides. Any other
//! byte-level difference is a mismatch; interior whitespace is significant.

// ============================================================================
// SECTION: Comparison
// ============================================================================

/// Strips leading and trailing spaces, tabs, and newlines.
#[must_use]
pub fn trim_transcript(text: &str) -> &str {
    text.trim_matches(|c| matches!(c, ' ' | '\n' | '\t'))
}

/// Whether a received transcript matches the expected fixture, ignoring
/// surrounding whitespace on both sides.
#[must_use]
pub fn transcripts_match(expected: &str, received: &str) -> bool {
    trim_transcript(expected) == trim_transcript(received)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
