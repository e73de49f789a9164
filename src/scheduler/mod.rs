//! Multi-phase timetable generation.
//!
//! The engine places subjects in strict phase order, hardest
//! synchronization contract first:
//!
//! 1. Global electives (cross-department, slots locked per academic year)
//! 2. Institutional electives (same contract, slotted independently)
//! 3. Departmental electives (synchronized within one department)
//! 4. Department-synchronized labs
//! 5. Remaining labs (2-consecutive-slot sessions)
//! 6. Bulk theory (three placement rounds of decreasing strictness)
//! 7. Bridge subjects (pinned to last slots)
//! 8. Gap reporting (compaction is reported, never applied)
//!
//! Placement is greedy and assignments only accumulate; no phase
//! revisits an earlier phase's work. Anything that cannot be placed
//! becomes a shortfall entry in the result, never an error. The whole
//! pipeline is deterministic: identical catalogs produce identical
//! timetables.

mod bridge;
mod compact;
mod electives;
mod labs;
mod summary;
mod theory;

pub use compact::{GapReport, SectionGap};
pub use summary::FacultyLoad;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::allocator::FacultyAllocator;
use crate::catalog::{normalize, Catalog, NormalizedCatalog, SemesterFilter};
use crate::models::{
    Assignment, Day, Faculty, FacultyId, Room, RoomId, RoomKind, RoomRef, Section, SectionId,
    Shortfall, Slot, Subject, Timetable,
};
use crate::tracker::ConflictTracker;
use crate::validation::{validate_catalog, ValidationError};

/// Engine failure modes.
///
/// Scheduling difficulty is never an error; only a structurally broken
/// catalog refuses to run.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The catalog failed structural validation.
    #[error("catalog validation failed with {} error(s)", .0.len())]
    InvalidCatalog(Vec<ValidationError>),
}

/// Tunable engine behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Measure interior gaps after all phases.
    ///
    /// Off by default. Even when on, no assignment is moved: closing
    /// gaps would break elective and lab synchronization across
    /// sections, so the pass only reports (see [`GapReport`]).
    pub compaction: bool,
}

/// One generation run's input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// The raw institutional catalog.
    pub catalog: Catalog,
    /// Which semesters this run covers.
    pub semesters: SemesterFilter,
    /// Engine behavior switches.
    pub options: EngineOptions,
}

impl ScheduleRequest {
    /// Creates a request with default options.
    pub fn new(catalog: Catalog, semesters: SemesterFilter) -> Self {
        Self {
            catalog,
            semesters,
            options: EngineOptions::default(),
        }
    }

    /// Overrides the engine options.
    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }
}

/// A completed generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// The produced weekly timetable.
    pub timetable: Timetable,
    /// Per-faculty assigned hours against their ceiling.
    pub faculty_load: Vec<FacultyLoad>,
    /// Subjects that fell short of their weekly requirement.
    pub shortfalls: Vec<Shortfall>,
    /// Cells locked per academic year by the synchronized electives.
    pub locked_slots: BTreeMap<u8, Vec<(Day, Slot)>>,
    /// Slot-hours each lab room ended up hosting.
    pub lab_utilization: BTreeMap<RoomId, u32>,
    /// Interior gaps found by the measuring pass, if it ran.
    pub gap_report: Option<GapReport>,
}

/// The timetable generation engine.
#[derive(Debug, Default)]
pub struct Engine;

impl Engine {
    /// Creates an engine.
    pub fn new() -> Self {
        Self
    }

    /// Runs the full phase pipeline over a catalog.
    ///
    /// # Errors
    /// [`EngineError::InvalidCatalog`] when structural validation fails;
    /// every detected problem is included.
    pub fn generate(&self, request: &ScheduleRequest) -> Result<ScheduleResult, EngineError> {
        validate_catalog(&request.catalog).map_err(EngineError::InvalidCatalog)?;
        let catalog = normalize(&request.catalog, request.semesters);

        log::info!(
            "generating timetable: {} sections, {} subjects, {} faculty, {} rooms",
            catalog.sections.len(),
            catalog.subjects.len(),
            catalog.faculty.len(),
            catalog.rooms.len()
        );

        let mut state = PassState::new(&catalog);

        electives::run_global(&mut state);
        electives::run_institutional(&mut state);
        electives::run_departmental(&mut state);
        labs::run_department_synchronized(&mut state);
        labs::run(&mut state);
        theory::run(&mut state);
        bridge::run(&mut state);

        let gap_report = compact::run(&state, request.options.compaction);

        let faculty_load = summary::faculty_loads(&state);
        let locked_slots = state.tracker.locked_slots();

        log::info!(
            "generation complete: {} assignments, {} shortfalls",
            state.timetable.len(),
            state.shortfalls.len()
        );

        Ok(ScheduleResult {
            timetable: state.timetable,
            faculty_load,
            shortfalls: state.shortfalls,
            locked_slots,
            lab_utilization: state.lab_utilization,
            gap_report,
        })
    }
}

/// Shared mutable state threaded through the phases.
pub(crate) struct PassState<'a> {
    pub catalog: &'a NormalizedCatalog,
    pub allocator: FacultyAllocator<'a>,
    pub tracker: ConflictTracker,
    pub timetable: Timetable,
    pub shortfalls: Vec<Shortfall>,
    pub lab_utilization: BTreeMap<RoomId, u32>,
    /// Placeholder faculty handed out during the run, keyed by id, so
    /// reporting never has to parse anything out of the id string.
    pub placeholders: BTreeMap<FacultyId, Faculty>,
}

impl<'a> PassState<'a> {
    pub fn new(catalog: &'a NormalizedCatalog) -> Self {
        Self {
            catalog,
            allocator: FacultyAllocator::new(&catalog.faculty),
            tracker: ConflictTracker::new(),
            timetable: Timetable::new(),
            shortfalls: Vec::new(),
            lab_utilization: BTreeMap::new(),
            placeholders: BTreeMap::new(),
        }
    }

    /// Records and stores one assignment.
    pub fn place(&mut self, assignment: Assignment, faculty: &Faculty) {
        self.tracker.record(&assignment, faculty);
        if faculty.is_placeholder && !self.placeholders.contains_key(&faculty.id) {
            self.placeholders.insert(faculty.id.clone(), faculty.clone());
        }
        if assignment.is_lab {
            if let Some(room) = assignment.room.physical() {
                *self.lab_utilization.entry(room.clone()).or_insert(0) += 1;
            }
            for room in &assignment.batch_rooms {
                *self.lab_utilization.entry(room.clone()).or_insert(0) += 1;
            }
        }
        self.timetable.push(assignment);
    }

    /// Records a shortfall when a subject got fewer sessions than required.
    pub fn report_shortfall(&mut self, subject: &Subject, section: SectionId, assigned: u8) {
        if assigned >= subject.weekly_sessions {
            return;
        }
        log::warn!(
            "shortfall: {} for {} got {}/{} sessions",
            subject.name,
            section,
            assigned,
            subject.weekly_sessions
        );
        self.shortfalls.push(Shortfall {
            subject: subject.id,
            subject_name: subject.name.clone(),
            section,
            assigned,
            required: subject.weekly_sessions,
        });
    }

    /// A free classroom, optionally restricted to one department.
    pub fn free_classroom(&self, department: Option<&str>, day: Day, slot: Slot) -> Option<RoomId> {
        self.catalog
            .rooms
            .iter()
            .filter(|r| r.kind == RoomKind::Classroom)
            .filter(|r| department.map_or(true, |d| r.department == d))
            .find(|r| self.tracker.is_room_free(&r.id, day, slot))
            .map(|r| r.id.clone())
    }

    /// The section's dedicated classroom, if it exists, is a classroom,
    /// and is free at the cell.
    pub fn free_dedicated_room(&self, section: &Section, day: Day, slot: Slot) -> Option<RoomId> {
        let id = section.dedicated_room.as_ref()?;
        let room = self.catalog.rooms.iter().find(|r| &r.id == id)?;
        if room.kind == RoomKind::Classroom && self.tracker.is_room_free(&room.id, day, slot) {
            Some(room.id.clone())
        } else {
            None
        }
    }

    /// Classroom chain for lecture placements: dedicated room, then the
    /// section's department, then anywhere, then the virtual fallback.
    pub fn theory_room(&self, section: &Section, day: Day, slot: Slot) -> RoomRef {
        if let Some(id) = self.free_dedicated_room(section, day, slot) {
            return RoomRef::Physical(id);
        }
        if let Some(id) = self.free_classroom(Some(&section.department), day, slot) {
            return RoomRef::Physical(id);
        }
        if let Some(id) = self.free_classroom(None, day, slot) {
            return RoomRef::Physical(id);
        }
        RoomRef::Virtual {
            department: section.department.clone(),
        }
    }

    /// Free lab rooms at a cell, least-used first.
    pub fn free_lab_rooms(&self, candidates: &[&'a Room], day: Day, slot: Slot) -> Vec<&'a Room> {
        let mut free: Vec<&Room> = candidates
            .iter()
            .copied()
            .filter(|r| self.tracker.is_room_free(&r.id, day, slot))
            .collect();
        free.sort_by_key(|r| {
            (
                self.lab_utilization.get(&r.id).copied().unwrap_or(0),
                r.id.clone(),
            )
        });
        free
    }
}
