// crates/scim-harness-core/src/failure.rs
// ============================================================================
// Module: Failure Injection
// Description: Shared handle for the per-step injected HTTP failure status.
// Purpose: Force the mock endpoint to fail every request during a step.
// Dependencies: std::sync::atomic
// ============================================================================

//! ## Overview
//! The orchestrator sets the injected status before each client run; every
//! mock-endpoint invocation during that run reads it. A set status
//! short-circuits all other response logic. The handle is clonable and
//! shared, not process-global: the orchestrator and the server each hold a
//! clone of the same underlying cell.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::atomic::AtomicU16;
use std::sync::atomic::Ordering;

// ============================================================================
// SECTION: Failure Injection
// ============================================================================

/// Clonable handle to the currently injected HTTP failure status.
///
/// Zero means no failure is injected. Writes happen-before the next client
/// invocation by the orchestrator's sequential set-then-invoke discipline;
/// the atomic only guards against torn reads from concurrent handlers.
#[derive(Debug, Clone, Default)]
pub struct FailureInjection {
    /// Current injected status; 0 when none.
    status: Arc<AtomicU16>,
}

impl FailureInjection {
    /// Creates a handle with no failure injected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Injects a failure status; 0 clears the injection.
    pub fn set(&self, status: u16) {
        self.status.store(status, Ordering::SeqCst);
    }

    /// Clears any injected failure.
    pub fn clear(&self) {
        self.set(0);
    }

    /// Returns the injected status, if one is set.
    #[must_use]
    pub fn current(&self) -> Option<u16> {
        match self.status.load(Ordering::SeqCst) {
            0 => None,
            status => Some(status),
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
