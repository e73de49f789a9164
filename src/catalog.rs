//! Raw catalog records and the catalog normalizer.
//!
//! The engine is handed raw course/faculty records by an external
//! orchestrator. The normalizer turns them into scheduling-ready
//! entities:
//!
//! - splits a combined theory+lab course into separate Theory and Lab
//!   subjects (each drawing from its own weekly-hour pool);
//! - converts weekly lab hours into whole 2-slot sessions;
//! - fixes each subject's [`SubjectCategory`] from the record's flags,
//!   once — downstream passes dispatch on the tag only, never on names;
//! - inverts faculty `subject_codes` into per-subject eligibility lists.
//!
//! Normalization is pure and deterministic: subject ids are assigned
//! sequentially in catalog order, so two runs over the same catalog
//! produce identical entities.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{
    Faculty, FacultyId, LabPool, Room, Section, Subject, SubjectCategory,
};

/// Which semesters a generation run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SemesterFilter {
    /// Semesters 1, 3, 5, 7.
    Odd,
    /// Semesters 2, 4, 6, 8.
    Even,
    /// All eight semesters.
    All,
}

impl SemesterFilter {
    /// Whether a semester is in scope for this run.
    pub fn contains(self, semester: u8) -> bool {
        match self {
            SemesterFilter::Odd => semester % 2 == 1,
            SemesterFilter::Even => semester % 2 == 0,
            SemesterFilter::All => true,
        }
    }
}

/// A raw course record as stored in the institution's catalog.
///
/// One record may expand into two scheduling units (theory + lab).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCourse {
    /// Course code (e.g. "CS301").
    pub code: String,
    /// Course name.
    pub name: String,
    /// Owning department code.
    pub department: String,
    /// Semester number, 1..=8.
    pub semester: u8,
    /// Weekly theory hours.
    pub theory_hours: u8,
    /// Weekly lab hours (converted to 2-slot sessions by the normalizer).
    pub lab_hours: u8,
    /// Synchronized across every department of the semester.
    pub global_elective: bool,
    /// Institution-wide elective, independently slotted.
    pub institutional_elective: bool,
    /// Synchronized within the owning department only.
    pub departmental_elective: bool,
    /// Remedial course pinned to the last slot of its day.
    pub bridge: bool,
    /// Specialized room pool for the lab component.
    pub lab_pool: Option<LabPool>,
    /// Parallel lab sub-groups (capacity-limited labs).
    pub lab_batches: u8,
    /// Lab must run at one time across all sections of the department.
    pub lab_department_synchronized: bool,
}

impl RawCourse {
    /// Creates a plain theory-only course.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        department: impl Into<String>,
        semester: u8,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            department: department.into(),
            semester,
            theory_hours: 0,
            lab_hours: 0,
            global_elective: false,
            institutional_elective: false,
            departmental_elective: false,
            bridge: false,
            lab_pool: None,
            lab_batches: 1,
            lab_department_synchronized: false,
        }
    }

    /// Sets weekly theory hours.
    pub fn with_theory_hours(mut self, hours: u8) -> Self {
        self.theory_hours = hours;
        self
    }

    /// Sets weekly lab hours.
    pub fn with_lab_hours(mut self, hours: u8) -> Self {
        self.lab_hours = hours;
        self
    }

    /// Flags the course as a global elective.
    pub fn as_global_elective(mut self) -> Self {
        self.global_elective = true;
        self
    }

    /// Flags the course as an institutional elective.
    pub fn as_institutional_elective(mut self) -> Self {
        self.institutional_elective = true;
        self
    }

    /// Flags the course as a departmental elective.
    pub fn as_departmental_elective(mut self) -> Self {
        self.departmental_elective = true;
        self
    }

    /// Flags the course as a bridge/remedial course.
    pub fn as_bridge(mut self) -> Self {
        self.bridge = true;
        self
    }

    /// Routes the lab component to a specialized room pool.
    pub fn with_lab_pool(mut self, pool: LabPool) -> Self {
        self.lab_pool = Some(pool);
        self
    }

    /// Sets the parallel lab batch count.
    pub fn with_lab_batches(mut self, batches: u8) -> Self {
        self.lab_batches = batches.max(1);
        self
    }

    /// Synchronizes the lab across the department's sections.
    pub fn with_lab_department_synchronized(mut self) -> Self {
        self.lab_department_synchronized = true;
        self
    }

    /// Category of the theory component, from the record's flags.
    ///
    /// Precedence mirrors the pass order: global > institutional >
    /// departmental > bridge > plain theory.
    pub fn theory_category(&self) -> SubjectCategory {
        if self.global_elective {
            SubjectCategory::GlobalElective
        } else if self.institutional_elective {
            SubjectCategory::InstitutionalElective
        } else if self.departmental_elective {
            SubjectCategory::DepartmentalElective
        } else if self.bridge {
            SubjectCategory::Bridge
        } else {
            SubjectCategory::Theory
        }
    }
}

/// A raw faculty record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFaculty {
    /// Unique identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Home department code.
    pub department: String,
    /// Hard weekly hour ceiling.
    pub max_hours_per_week: u8,
    /// Course codes this person may teach.
    pub subject_codes: Vec<String>,
}

impl RawFaculty {
    /// Creates a new faculty record.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        department: impl Into<String>,
        max_hours_per_week: u8,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department: department.into(),
            max_hours_per_week,
            subject_codes: Vec::new(),
        }
    }

    /// Adds a teachable course code.
    pub fn with_subject_code(mut self, code: impl Into<String>) -> Self {
        self.subject_codes.push(code.into());
        self
    }
}

/// The raw input catalog for one generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Known department codes.
    pub departments: Vec<String>,
    /// Student cohorts.
    pub sections: Vec<Section>,
    /// Course records.
    pub courses: Vec<RawCourse>,
    /// Instructors.
    pub faculty: Vec<RawFaculty>,
    /// Physical rooms.
    pub rooms: Vec<Room>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a department code.
    pub fn with_department(mut self, code: impl Into<String>) -> Self {
        self.departments.push(code.into());
        self
    }

    /// Adds a section.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Adds a course.
    pub fn with_course(mut self, course: RawCourse) -> Self {
        self.courses.push(course);
        self
    }

    /// Adds a faculty member.
    pub fn with_faculty(mut self, faculty: RawFaculty) -> Self {
        self.faculty.push(faculty);
        self
    }

    /// Adds a room.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }
}

/// Scheduling-ready entities produced by [`normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCatalog {
    /// Sections in scope for the run.
    pub sections: Vec<Section>,
    /// Expanded scheduling units.
    pub subjects: Vec<Subject>,
    /// Instructors.
    pub faculty: Vec<Faculty>,
    /// Physical rooms.
    pub rooms: Vec<Room>,
}

/// Weekly lab hours → whole 2-slot sessions.
///
/// 1-2 hours round to one session, 3-4 to two; longer labs take one
/// session per two hours.
pub fn lab_sessions(lab_hours: u8) -> u8 {
    match lab_hours {
        0 => 0,
        1..=2 => 1,
        3..=4 => 2,
        h => h / 2,
    }
}

/// Normalizes a validated catalog into scheduling-ready entities.
///
/// Sections and courses outside `filter` are dropped. Duplicate course
/// records — same (code, department, semester) listed twice — are
/// collapsed to the first occurrence. Every non-zero-hour component of
/// a course yields exactly one subject.
pub fn normalize(catalog: &Catalog, filter: SemesterFilter) -> NormalizedCatalog {
    let sections: Vec<Section> = catalog
        .sections
        .iter()
        .filter(|s| filter.contains(s.semester))
        .cloned()
        .collect();

    let faculty: Vec<Faculty> = catalog
        .faculty
        .iter()
        .map(|f| Faculty::new(&f.id, &f.name, &f.department, f.max_hours_per_week))
        .collect();

    // Invert subject_codes into code → eligible faculty.
    let mut eligible: HashMap<&str, Vec<FacultyId>> = HashMap::new();
    for f in &catalog.faculty {
        for code in &f.subject_codes {
            eligible
                .entry(code.as_str())
                .or_default()
                .push(FacultyId(f.id.clone()));
        }
    }

    let mut subjects = Vec::new();
    let mut seen = std::collections::HashSet::new();
    let mut next_id: u32 = 1;

    for course in &catalog.courses {
        if !filter.contains(course.semester) {
            continue;
        }
        let key = (
            course.code.as_str(),
            course.department.as_str(),
            course.semester,
        );
        if !seen.insert(key) {
            continue;
        }

        let teachers = eligible.get(course.code.as_str()).cloned().unwrap_or_default();

        if lab_sessions(course.lab_hours) > 0 {
            let lab = Subject::new(
                next_id,
                &course.name,
                &course.code,
                &course.department,
                course.semester,
                SubjectCategory::Lab,
                lab_sessions(course.lab_hours),
            )
            .with_eligible_faculty(teachers.clone())
            .with_lab_pool(course.lab_pool.unwrap_or(LabPool::Departmental))
            .with_parallel_batches(course.lab_batches)
            .with_department_synchronized(course.lab_department_synchronized);
            subjects.push(lab);
            next_id += 1;
        }

        if course.theory_hours > 0 {
            let theory = Subject::new(
                next_id,
                &course.name,
                &course.code,
                &course.department,
                course.semester,
                course.theory_category(),
                course.theory_hours,
            )
            .with_eligible_faculty(teachers);
            subjects.push(theory);
            next_id += 1;
        }
    }

    NormalizedCatalog {
        sections,
        subjects,
        faculty,
        rooms: catalog.rooms.clone(),
    }
}
