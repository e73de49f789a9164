//! Section model.
//!
//! A section is one cohort of students following a common weekly
//! schedule. Sections are loaded once per generation run and are
//! immutable during scheduling.

use serde::{Deserialize, Serialize};

use super::RoomId;

/// Stable numeric section identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SectionId(pub u32);

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// A cohort of students sharing one weekly timetable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Stable numeric id.
    pub id: SectionId,
    /// Owning department code (e.g. "CSE").
    pub department: String,
    /// Semester number, 1..=8.
    pub semester: u8,
    /// Section label within the cohort (e.g. "A", "B").
    pub label: String,
    /// Number of enrolled students.
    pub student_count: u32,
    /// Home classroom, if the section has one.
    pub dedicated_room: Option<RoomId>,
}

impl Section {
    /// Creates a new section.
    pub fn new(
        id: u32,
        department: impl Into<String>,
        semester: u8,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: SectionId(id),
            department: department.into(),
            semester,
            label: label.into(),
            student_count: 60,
            dedicated_room: None,
        }
    }

    /// Sets the enrolled student count.
    pub fn with_student_count(mut self, count: u32) -> Self {
        self.student_count = count;
        self
    }

    /// Sets the section's home classroom.
    pub fn with_dedicated_room(mut self, room: impl Into<String>) -> Self {
        self.dedicated_room = Some(RoomId(room.into()));
        self
    }

    /// Academic year derived from the semester (sem 1/2 → year 1, 3/4 → 2, ...).
    pub fn academic_year(&self) -> u8 {
        self.semester.div_ceil(2)
    }
}
