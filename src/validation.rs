//! Input validation for timetable catalogs.
//!
//! Checks structural integrity of sections, courses, faculty, and rooms
//! before normalization. Detects:
//! - Duplicate IDs
//! - References to undeclared departments
//! - Semester numbers outside 1..=8
//! - Courses with no teachable hours
//! - Dedicated-room references to unknown rooms
//!
//! Validation is exhaustive: every problem found is reported, not just
//! the first. Scheduling shortfalls are never validation errors — a
//! structurally sound catalog always produces a (possibly partial)
//! timetable.

use std::collections::HashSet;

use crate::catalog::Catalog;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// An entity references a department that was never declared.
    UnknownDepartment,
    /// A semester number outside 1..=8.
    SemesterOutOfRange,
    /// A course with zero theory and zero lab hours.
    EmptyCourse,
    /// A section's dedicated room is not in the room list.
    UnknownRoomReference,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a raw catalog.
///
/// Checks:
/// 1. No duplicate section IDs
/// 2. No duplicate faculty IDs
/// 3. No duplicate room IDs
/// 4. Sections, courses, and faculty reference declared departments
/// 5. Semester numbers are within 1..=8
/// 6. Every course has at least one teachable hour
/// 7. Dedicated rooms exist in the room list
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(catalog: &Catalog) -> ValidationResult {
    let mut errors = Vec::new();

    let departments: HashSet<&str> = catalog.departments.iter().map(String::as_str).collect();

    let mut room_ids = HashSet::new();
    for r in &catalog.rooms {
        if !room_ids.insert(r.id.0.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate room ID: {}", r.id),
            ));
        }
    }

    let mut section_ids = HashSet::new();
    for s in &catalog.sections {
        if !section_ids.insert(s.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate section ID: {}", s.id),
            ));
        }
        if !departments.contains(s.department.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownDepartment,
                format!(
                    "Section {} references undeclared department '{}'",
                    s.id, s.department
                ),
            ));
        }
        if !(1..=8).contains(&s.semester) {
            errors.push(ValidationError::new(
                ValidationErrorKind::SemesterOutOfRange,
                format!("Section {} has semester {}", s.id, s.semester),
            ));
        }
        if let Some(room) = &s.dedicated_room {
            if !room_ids.contains(room.0.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownRoomReference,
                    format!("Section {} dedicated room '{room}' does not exist", s.id),
                ));
            }
        }
    }

    let mut faculty_ids = HashSet::new();
    for f in &catalog.faculty {
        if !faculty_ids.insert(f.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate faculty ID: {}", f.id),
            ));
        }
        if !departments.contains(f.department.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownDepartment,
                format!(
                    "Faculty '{}' references undeclared department '{}'",
                    f.id, f.department
                ),
            ));
        }
    }

    for c in &catalog.courses {
        if !departments.contains(c.department.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownDepartment,
                format!(
                    "Course '{}' references undeclared department '{}'",
                    c.code, c.department
                ),
            ));
        }
        if !(1..=8).contains(&c.semester) {
            errors.push(ValidationError::new(
                ValidationErrorKind::SemesterOutOfRange,
                format!("Course '{}' has semester {}", c.code, c.semester),
            ));
        }
        if c.theory_hours == 0 && c.lab_hours == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyCourse,
                format!("Course '{}' has no theory or lab hours", c.code),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{RawCourse, RawFaculty};
    use crate::models::{Room, Section};

    fn sample_catalog() -> Catalog {
        Catalog::new()
            .with_department("CSE")
            .with_department("ECE")
            .with_section(Section::new(1, "CSE", 3, "A"))
            .with_section(Section::new(2, "ECE", 3, "A"))
            .with_course(RawCourse::new("CS301", "Data Structures", "CSE", 3).with_theory_hours(3))
            .with_faculty(RawFaculty::new("F1", "A. Rao", "CSE", 18).with_subject_code("CS301"))
            .with_room(Room::classroom("CSE-101", "CSE"))
    }

    #[test]
    fn test_valid_catalog() {
        assert!(validate_catalog(&sample_catalog()).is_ok());
    }

    #[test]
    fn test_duplicate_section_id() {
        let catalog = sample_catalog().with_section(Section::new(1, "CSE", 3, "B"));
        let errors = validate_catalog(&catalog).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_duplicate_room_id() {
        let catalog = sample_catalog().with_room(Room::classroom("CSE-101", "CSE"));
        let errors = validate_catalog(&catalog).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("room")));
    }

    #[test]
    fn test_unknown_department() {
        let catalog = sample_catalog().with_section(Section::new(9, "MECH", 3, "A"));
        let errors = validate_catalog(&catalog).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownDepartment));
    }

    #[test]
    fn test_semester_out_of_range() {
        let catalog =
            sample_catalog().with_course(RawCourse::new("X9", "X", "CSE", 9).with_theory_hours(2));
        let errors = validate_catalog(&catalog).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::SemesterOutOfRange));
    }

    #[test]
    fn test_empty_course() {
        let catalog = sample_catalog().with_course(RawCourse::new("Z0", "Zero", "CSE", 3));
        let errors = validate_catalog(&catalog).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyCourse));
    }

    #[test]
    fn test_unknown_dedicated_room() {
        let catalog = sample_catalog()
            .with_section(Section::new(3, "CSE", 5, "A").with_dedicated_room("NOPE"));
        let errors = validate_catalog(&catalog).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownRoomReference));
    }

    #[test]
    fn test_multiple_errors() {
        let catalog = Catalog::new()
            .with_section(Section::new(1, "GHOST", 0, "A"))
            .with_course(RawCourse::new("Z", "Z", "GHOST", 3));
        let errors = validate_catalog(&catalog).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
