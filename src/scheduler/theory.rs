//! Bulk theory placement.
//!
//! Fills the remaining weekly lecture hours after the synchronized
//! phases have claimed their cells. Each section's subjects are taken
//! largest-requirement first, with the starting subject rotated per
//! section so parallel sections do not chase the same faculty and rooms
//! in the same order.
//!
//! Placement runs in three rounds of decreasing strictness:
//!
//! 1. Strict: one session per subject per day, never the same slot on
//!    three consecutive days, never adjacent to the same subject.
//! 2. Relaxed: any free weekday cell.
//! 3. Saturday: the half day takes what still remains.

use crate::models::{Assignment, Day, Section, Slot, Subject, SubjectCategory};
use crate::rotation;

use super::PassState;

pub(crate) fn run(state: &mut PassState<'_>) {
    let catalog = state.catalog;
    let mut sections: Vec<&Section> = catalog.sections.iter().collect();
    sections.sort_by_key(|s| s.id);

    for &section in &sections {
        // Rotation is keyed by the section's position among its own
        // department-semester peers, so a cohort schedules the same way
        // no matter what the rest of the institution looks like.
        let cohort_idx = sections
            .iter()
            .filter(|s| s.department == section.department && s.semester == section.semester)
            .position(|s| s.id == section.id)
            .unwrap_or(0);
        let mut subjects: Vec<&Subject> = catalog
            .subjects
            .iter()
            .filter(|s| {
                s.category == SubjectCategory::Theory
                    && s.department == section.department
                    && s.semester == section.semester
            })
            .collect();
        subjects.sort_by(|a, b| {
            b.weekly_sessions
                .cmp(&a.weekly_sessions)
                .then_with(|| a.course_code.cmp(&b.course_code))
        });
        if subjects.is_empty() {
            continue;
        }
        let n = subjects.len();
        subjects.rotate_left((cohort_idx * 2) % n);

        for &subject in &subjects {
            let mut assigned = strict_round(state, section, subject);
            if assigned < subject.weekly_sessions {
                assigned = relaxed_round(state, section, subject, assigned);
            }
            if assigned < subject.weekly_sessions {
                assigned = saturday_round(state, section, subject, assigned);
            }
            state.report_shortfall(subject, section.id, assigned);
        }
    }
}

/// One session per day, pattern- and adjacency-safe.
fn strict_round(state: &mut PassState<'_>, section: &Section, subject: &Subject) -> u8 {
    let year = section.academic_year();
    let day_offset = rotation::offset(section.id, subject.id, 0, Day::WEEKDAYS.len());
    let mut assigned: u8 = 0;

    'sessions: for _ in 0..subject.weekly_sessions {
        for i in 0..Day::WEEKDAYS.len() {
            let day = Day::WEEKDAYS[(day_offset + i) % Day::WEEKDAYS.len()];
            if state
                .tracker
                .section_has_subject_on_day(section.id, subject.id, day)
            {
                continue;
            }
            for &slot in day.slots() {
                if state.tracker.is_slot_locked_for_year(year, day, slot)
                    || !state.tracker.is_section_free(section.id, day, slot)
                    || state
                        .tracker
                        .would_repeat_pattern(section.id, subject.id, day, slot)
                    || state
                        .tracker
                        .has_adjacent_same_subject(section.id, subject.id, day, slot)
                {
                    continue;
                }
                place(state, section, subject, day, slot);
                assigned += 1;
                continue 'sessions;
            }
        }
        break;
    }
    assigned
}

/// Any free weekday cell, scanning the week in grid order.
fn relaxed_round(
    state: &mut PassState<'_>,
    section: &Section,
    subject: &Subject,
    mut assigned: u8,
) -> u8 {
    let year = section.academic_year();

    'sessions: while assigned < subject.weekly_sessions {
        for day in Day::WEEKDAYS {
            for &slot in day.slots() {
                if state.tracker.is_slot_locked_for_year(year, day, slot)
                    || !state.tracker.is_section_free(section.id, day, slot)
                {
                    continue;
                }
                place(state, section, subject, day, slot);
                assigned += 1;
                continue 'sessions;
            }
        }
        break;
    }
    assigned
}

/// Saturday overflow.
fn saturday_round(
    state: &mut PassState<'_>,
    section: &Section,
    subject: &Subject,
    mut assigned: u8,
) -> u8 {
    let year = section.academic_year();
    let day = Day::Saturday;

    for &slot in day.slots() {
        if assigned >= subject.weekly_sessions {
            break;
        }
        if state.tracker.is_slot_locked_for_year(year, day, slot)
            || !state.tracker.is_section_free(section.id, day, slot)
        {
            continue;
        }
        place(state, section, subject, day, slot);
        assigned += 1;
    }
    assigned
}

fn place(state: &mut PassState<'_>, section: &Section, subject: &Subject, day: Day, slot: Slot) {
    let room = state.theory_room(section, day, slot);
    let faculty = state
        .allocator
        .select(&state.tracker, subject, day, &[slot], section, false);
    let assignment = Assignment::new(section.id, day, slot, subject.id, room, faculty.id.clone());
    state.place(assignment, &faculty);
}
