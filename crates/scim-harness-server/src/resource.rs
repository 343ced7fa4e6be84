// crates/scim-harness-server/src/resource.rs
// ============================================================================
// Module: SCIM Resource Types
// Description: The fixed set of resource types served by the mock endpoint.
// Purpose: Provide stable path labels for routing and transcript entries.
// Dependencies: none
// ============================================================================

//! ## Overview
//! The mock serves a fixed, enumerated set of SCIM resource types; the set
//! is closed at startup and doubles as the route table and the transcript
//! endpoint label. Labels are stable: they appear verbatim in golden
//! fixtures.

use std::fmt;

// ============================================================================
// SECTION: Resource Types
// ============================================================================

/// A SCIM resource type served by the mock endpoint.
///
/// # Invariants
/// - Labels are stable; golden fixtures depend on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    /// SCIM `Users` resources.
    Users,
    /// SCIM `StudentGroups` resources.
    StudentGroups,
    /// SCIM `Organisations` resources.
    Organisations,
    /// SCIM `SchoolUnits` resources.
    SchoolUnits,
    /// SCIM `SchoolUnitGroups` resources.
    SchoolUnitGroups,
    /// SCIM `Employments` resources.
    Employments,
    /// SCIM `Activities` resources.
    Activities,
    /// SCIM `Subjects` resources.
    Subjects,
    /// SCIM `Courses` resources.
    Courses,
}

impl ResourceType {
    /// All resource types, in route-registration order.
    pub const ALL: [Self; 9] = [
        Self::Users,
        Self::StudentGroups,
        Self::Organisations,
        Self::SchoolUnits,
        Self::SchoolUnitGroups,
        Self::Employments,
        Self::Activities,
        Self::Subjects,
        Self::Courses,
    ];

    /// Returns the stable path and transcript label for the resource type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Users => "Users",
            Self::StudentGroups => "StudentGroups",
            Self::Organisations => "Organisations",
            Self::SchoolUnits => "SchoolUnits",
            Self::SchoolUnitGroups => "SchoolUnitGroups",
            Self::Employments => "Employments",
            Self::Activities => "Activities",
            Self::Subjects => "Subjects",
            Self::Courses => "Courses",
        }
    }

    /// Resolves a path segment back to its resource type.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|resource| resource.as_str() == value)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
