//! Faculty model.
//!
//! A faculty member carries a hard weekly-hour ceiling. Assigned hours
//! are derived from the conflict tracker during a run, never stored
//! here, so the two can not drift apart.
//!
//! When no real instructor is free, passes fall back to a department-
//! scoped placeholder ("TBA") with unlimited hours. Placeholders are
//! flagged structurally; no code inspects the id string to detect them.

use serde::{Deserialize, Serialize};

/// Faculty identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FacultyId(pub String);

impl std::fmt::Display for FacultyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FacultyId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// An instructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faculty {
    /// Unique identifier.
    pub id: FacultyId,
    /// Human-readable name.
    pub name: String,
    /// Home department code.
    pub department: String,
    /// Hard ceiling on assigned hours per week.
    pub weekly_hour_cap: u8,
    /// Whether this is an unassigned/TBA stand-in.
    pub is_placeholder: bool,
}

impl Faculty {
    /// Creates a new faculty member.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        department: impl Into<String>,
        weekly_hour_cap: u8,
    ) -> Self {
        Self {
            id: FacultyId(id.into()),
            name: name.into(),
            department: department.into(),
            weekly_hour_cap,
            is_placeholder: false,
        }
    }

    /// Creates the unassigned placeholder for a department.
    ///
    /// Placeholders have unlimited hours and are never considered busy,
    /// guaranteeing every placement can complete.
    pub fn placeholder(department: &str) -> Self {
        Self {
            id: FacultyId(format!("TBA-{department}")),
            name: "TBA".to_string(),
            department: department.to_string(),
            weekly_hour_cap: u8::MAX,
            is_placeholder: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faculty_new() {
        let f = Faculty::new("F42", "A. Rao", "ECE", 18);
        assert_eq!(f.id, FacultyId("F42".into()));
        assert_eq!(f.weekly_hour_cap, 18);
        assert!(!f.is_placeholder);
    }

    #[test]
    fn test_placeholder() {
        let tba = Faculty::placeholder("CSE");
        assert!(tba.is_placeholder);
        assert_eq!(tba.department, "CSE");
        assert_eq!(tba.weekly_hour_cap, u8::MAX);
        // Department-scoped: distinct departments get distinct ids.
        assert_ne!(tba.id, Faculty::placeholder("ECE").id);
    }
}
