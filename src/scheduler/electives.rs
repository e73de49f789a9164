//! Synchronized elective phases.
//!
//! Electives listed per department under slightly different names are
//! merged by their normalized sync key, then placed at one (day, slot)
//! for every target section at once, so students from any section can
//! attend the same offering. Global and institutional electives
//! additionally lock their cells for the whole academic year; later
//! phases leave locked cells untouched.
//!
//! Cells are taken from fixed preference tables that bias electives
//! toward mid-day and late slots, stepping a cursor with an extra skip
//! after every hit so one offering's sessions spread across the week.

use std::collections::BTreeMap;

use crate::models::{Assignment, Day, RoomRef, Section, Slot, Subject, SubjectCategory};

use super::PassState;

/// Preferred cells for global electives.
const GLOBAL_SLOTS: [(Day, Slot); 15] = [
    (Day::Monday, 4),
    (Day::Wednesday, 5),
    (Day::Friday, 6),
    (Day::Tuesday, 4),
    (Day::Thursday, 5),
    (Day::Monday, 5),
    (Day::Wednesday, 6),
    (Day::Friday, 4),
    (Day::Tuesday, 5),
    (Day::Thursday, 6),
    (Day::Monday, 6),
    (Day::Wednesday, 4),
    (Day::Friday, 5),
    (Day::Tuesday, 6),
    (Day::Thursday, 4),
];

/// Preferred cells for institutional electives.
const INSTITUTIONAL_SLOTS: [(Day, Slot); 12] = [
    (Day::Monday, 3),
    (Day::Wednesday, 4),
    (Day::Friday, 5),
    (Day::Tuesday, 3),
    (Day::Thursday, 4),
    (Day::Monday, 2),
    (Day::Wednesday, 3),
    (Day::Friday, 2),
    (Day::Tuesday, 2),
    (Day::Thursday, 3),
    (Day::Monday, 5),
    (Day::Wednesday, 2),
];

/// Preferred cells for departmental electives.
const DEPARTMENTAL_SLOTS: [(Day, Slot); 9] = [
    (Day::Tuesday, 4),
    (Day::Thursday, 5),
    (Day::Monday, 3),
    (Day::Friday, 4),
    (Day::Wednesday, 3),
    (Day::Tuesday, 5),
    (Day::Thursday, 3),
    (Day::Friday, 3),
    (Day::Monday, 2),
];

/// Places global electives across every department of each semester.
pub(crate) fn run_global(state: &mut PassState<'_>) {
    run_synchronized(
        state,
        SubjectCategory::GlobalElective,
        &GLOBAL_SLOTS,
        Scope::Semester,
        true,
    );
}

/// Places institutional electives with the same cross-department
/// contract, from their own preference table.
pub(crate) fn run_institutional(state: &mut PassState<'_>) {
    run_synchronized(
        state,
        SubjectCategory::InstitutionalElective,
        &INSTITUTIONAL_SLOTS,
        Scope::Semester,
        true,
    );
}

/// Places departmental electives, synchronized within one department
/// only and without year locks.
pub(crate) fn run_departmental(state: &mut PassState<'_>) {
    run_synchronized(
        state,
        SubjectCategory::DepartmentalElective,
        &DEPARTMENTAL_SLOTS,
        Scope::Department,
        false,
    );
}

/// How widely a sync group's sections are gathered.
#[derive(Clone, Copy, PartialEq)]
enum Scope {
    /// Every section of the semester, across departments.
    Semester,
    /// Only the owning department's sections of the semester.
    Department,
}

fn run_synchronized(
    state: &mut PassState<'_>,
    category: SubjectCategory,
    preferred: &[(Day, Slot)],
    scope: Scope,
    lock: bool,
) {
    let catalog = state.catalog;

    // Merge per-department listings of the same offering.
    let mut groups: BTreeMap<(u8, String, String), Vec<&Subject>> = BTreeMap::new();
    for subject in catalog.subjects.iter().filter(|s| s.category == category) {
        let dept = match scope {
            Scope::Semester => String::new(),
            Scope::Department => subject.department.clone(),
        };
        groups
            .entry((subject.semester, dept, subject.sync_key.clone()))
            .or_default()
            .push(subject);
    }

    for ((semester, dept, _), mut variants) in groups {
        variants.sort_by_key(|s| s.id);
        // Representative carries the largest weekly requirement.
        let rep = *variants
            .iter()
            .max_by_key(|s| (s.weekly_sessions, std::cmp::Reverse(s.id)))
            .unwrap_or(&variants[0]);

        let mut sections: Vec<&Section> = catalog
            .sections
            .iter()
            .filter(|s| s.semester == semester)
            .filter(|s| scope == Scope::Semester || s.department == dept)
            .collect();
        sections.sort_by_key(|s| s.id);
        if sections.is_empty() {
            continue;
        }

        let year = rep.academic_year();
        let mut assigned: u8 = 0;
        let mut cursor = 0usize;

        while assigned < rep.weekly_sessions && cursor < preferred.len() {
            let (day, slot) = preferred[cursor];
            cursor += 1;

            if !day.has_slot(slot)
                || state.tracker.is_slot_locked_for_year(year, day, slot)
                || sections
                    .iter()
                    .any(|s| !state.tracker.is_section_free(s.id, day, slot))
            {
                continue;
            }

            for &section in &sections {
                let unit = variants
                    .iter()
                    .find(|s| s.department == section.department)
                    .copied()
                    .unwrap_or(rep);
                let room = elective_room(state, section, day, slot);
                let faculty =
                    state
                        .allocator
                        .select(&state.tracker, unit, day, &[slot], section, false);
                let assignment =
                    Assignment::new(section.id, day, slot, unit.id, room, faculty.id.clone());
                state.place(assignment, &faculty);
            }

            if lock {
                state.tracker.lock_slot_for_year(year, day, slot);
            }
            assigned += 1;
            // Extra skip so the next session lands elsewhere in the week.
            cursor += 1;
        }

        for section in &sections {
            let unit = variants
                .iter()
                .find(|s| s.department == section.department)
                .copied()
                .unwrap_or(rep);
            state.report_shortfall(unit, section.id, assigned);
        }
    }
}

fn elective_room(state: &PassState<'_>, section: &Section, day: Day, slot: Slot) -> RoomRef {
    if let Some(id) = state.free_dedicated_room(section, day, slot) {
        return RoomRef::Physical(id);
    }
    if let Some(id) = state.free_classroom(Some(&section.department), day, slot) {
        return RoomRef::Physical(id);
    }
    RoomRef::Virtual {
        department: section.department.clone(),
    }
}
