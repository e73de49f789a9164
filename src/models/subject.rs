//! Subject (scheduling unit) model.
//!
//! A subject is a schedulable weekly-hour requirement derived from a
//! catalog course. A course carrying both theory and lab hours expands
//! into two separate subjects; the two never draw from the same weekly
//! hour pool.
//!
//! The category is a closed enumeration fixed at catalog-normalization
//! time. Scheduling passes dispatch on it exclusively; subject names are
//! never inspected downstream.

use serde::{Deserialize, Serialize};

use super::FacultyId;

/// Stable numeric subject identifier, assigned sequentially by the normalizer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SubjectId(pub u32);

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "U{}", self.0)
    }
}

/// Scheduling category of a subject.
///
/// Determines which pass places the subject and what synchronization
/// contract applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectCategory {
    /// Ordinary lecture hours, placed by the bulk theory pass.
    Theory,
    /// 2-consecutive-slot practical sessions in specialized rooms.
    Lab,
    /// Elective synchronized across every department of a semester;
    /// its slots are locked for the academic year.
    GlobalElective,
    /// Institution-wide elective with the same synchronization contract
    /// as `GlobalElective`, slotted independently.
    InstitutionalElective,
    /// Elective synchronized across the sections of one department.
    DepartmentalElective,
    /// Remedial subject constrained to the last slot of its day.
    Bridge,
}

impl SubjectCategory {
    /// Whether this category is placed by one of the elective passes.
    pub fn is_elective(self) -> bool {
        matches!(
            self,
            SubjectCategory::GlobalElective
                | SubjectCategory::InstitutionalElective
                | SubjectCategory::DepartmentalElective
        )
    }
}

/// Specialized room pool a lab subject is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabPool {
    /// Shared first-year science labs (physics, chemistry).
    SharedScience,
    /// Shared workshop / drawing labs.
    SharedWorkshop,
    /// General-purpose computer labs shared by the computing cluster.
    ComputerCluster,
    /// The owning department's own labs.
    Departmental,
}

/// A schedulable weekly requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Stable numeric id.
    pub id: SubjectId,
    /// Human-readable name.
    pub name: String,
    /// Catalog course code (e.g. "CS301").
    pub course_code: String,
    /// Owning department code.
    pub department: String,
    /// Semester number, 1..=8.
    pub semester: u8,
    /// Scheduling category, fixed at normalization.
    pub category: SubjectCategory,
    /// Required weekly sessions. For labs, one session spans two
    /// consecutive slots; for everything else, one slot.
    pub weekly_sessions: u8,
    /// Faculty eligible to teach this subject.
    pub eligible_faculty: Vec<FacultyId>,
    /// Normalized name used to merge near-duplicate elective entries
    /// that represent the same offering listed per department.
    pub sync_key: String,
    /// Room pool routing for lab subjects.
    pub lab_pool: Option<LabPool>,
    /// Parallel sub-groups when a capacity-limited lab splits the
    /// section into batches run simultaneously in distinct rooms.
    pub parallel_batches: u8,
    /// Whether the lab must run at one time across all sections of its
    /// department.
    pub department_synchronized: bool,
}

impl Subject {
    /// Creates a new subject.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        course_code: impl Into<String>,
        department: impl Into<String>,
        semester: u8,
        category: SubjectCategory,
        weekly_sessions: u8,
    ) -> Self {
        let name = name.into();
        let sync_key = sync_key(&name);
        Self {
            id: SubjectId(id),
            name,
            course_code: course_code.into(),
            department: department.into(),
            semester,
            category,
            weekly_sessions,
            eligible_faculty: Vec::new(),
            sync_key,
            lab_pool: None,
            parallel_batches: 1,
            department_synchronized: false,
        }
    }

    /// Sets the eligible faculty list.
    pub fn with_eligible_faculty(mut self, faculty: Vec<FacultyId>) -> Self {
        self.eligible_faculty = faculty;
        self
    }

    /// Sets the lab room pool.
    pub fn with_lab_pool(mut self, pool: LabPool) -> Self {
        self.lab_pool = Some(pool);
        self
    }

    /// Sets the parallel batch count.
    pub fn with_parallel_batches(mut self, batches: u8) -> Self {
        self.parallel_batches = batches.max(1);
        self
    }

    /// Marks the lab as synchronized across its department's sections.
    pub fn with_department_synchronized(mut self, sync: bool) -> Self {
        self.department_synchronized = sync;
        self
    }

    /// Academic year derived from the semester.
    pub fn academic_year(&self) -> u8 {
        self.semester.div_ceil(2)
    }
}

/// Normalizes a course name into a synchronization key.
///
/// Lowercases the name and collapses quotes, dashes, and runs of
/// whitespace so that per-department re-listings of the same elective
/// (e.g. `Open Elective - Group A` vs `"Open Elective" Group A`)
/// compare equal.
pub fn sync_key(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '"' | '\'' | '-' | '–' => ' ',
            c => c.to_ascii_lowercase(),
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_builder() {
        let s = Subject::new(1, "Data Structures", "CS301", "CSE", 3, SubjectCategory::Theory, 4)
            .with_eligible_faculty(vec![FacultyId("F1".into()), FacultyId("F2".into())]);

        assert_eq!(s.id, SubjectId(1));
        assert_eq!(s.category, SubjectCategory::Theory);
        assert_eq!(s.weekly_sessions, 4);
        assert_eq!(s.eligible_faculty.len(), 2);
        assert_eq!(s.parallel_batches, 1);
        assert_eq!(s.academic_year(), 2);
    }

    #[test]
    fn test_category_is_elective() {
        assert!(SubjectCategory::GlobalElective.is_elective());
        assert!(SubjectCategory::InstitutionalElective.is_elective());
        assert!(SubjectCategory::DepartmentalElective.is_elective());
        assert!(!SubjectCategory::Theory.is_elective());
        assert!(!SubjectCategory::Lab.is_elective());
        assert!(!SubjectCategory::Bridge.is_elective());
    }

    #[test]
    fn test_sync_key_merges_variants() {
        assert_eq!(
            sync_key("Open Elective - Group A"),
            sync_key("\"Open Elective\"  Group A")
        );
        assert_eq!(sync_key("Open Elective - Group A"), "open elective group a");
        assert_ne!(sync_key("Open Elective Group A"), sync_key("Open Elective Group B"));
    }

    #[test]
    fn test_batches_never_zero() {
        let s = Subject::new(1, "Lab", "CS1", "CSE", 1, SubjectCategory::Lab, 1)
            .with_parallel_batches(0);
        assert_eq!(s.parallel_batches, 1);
    }
}
