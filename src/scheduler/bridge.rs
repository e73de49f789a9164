//! Bridge subject placement.
//!
//! Bridge (remedial) subjects sit in the structurally last slot of a
//! day so attending students can be pulled out without missing core
//! hours. When an earlier phase already took a day's last slot, the
//! cell is skipped rather than displacing the occupant; a bridge
//! subject that finds no free last slot becomes a shortfall.

use crate::models::{Assignment, Day, Section, Subject, SubjectCategory};

use super::PassState;

pub(crate) fn run(state: &mut PassState<'_>) {
    let catalog = state.catalog;
    let mut sections: Vec<&Section> = catalog.sections.iter().collect();
    sections.sort_by_key(|s| s.id);

    for section in sections {
        let mut subjects: Vec<&Subject> = catalog
            .subjects
            .iter()
            .filter(|s| {
                s.category == SubjectCategory::Bridge
                    && s.department == section.department
                    && s.semester == section.semester
            })
            .collect();
        subjects.sort_by_key(|s| s.id);

        for subject in subjects {
            let year = section.academic_year();
            let mut assigned: u8 = 0;

            'sessions: for _ in 0..subject.weekly_sessions {
                for day in Day::ALL {
                    let slot = day.last_slot();
                    if state.tracker.is_slot_locked_for_year(year, day, slot)
                        || !state.tracker.is_section_free(section.id, day, slot)
                        || state
                            .tracker
                            .section_has_subject_on_day(section.id, subject.id, day)
                    {
                        continue;
                    }
                    let room = state.theory_room(section, day, slot);
                    let faculty = state.allocator.select(
                        &state.tracker,
                        subject,
                        day,
                        &[slot],
                        section,
                        false,
                    );
                    let assignment = Assignment::new(
                        section.id,
                        day,
                        slot,
                        subject.id,
                        room,
                        faculty.id.clone(),
                    );
                    state.place(assignment, &faculty);
                    assigned += 1;
                    continue 'sessions;
                }
                break;
            }

            state.report_shortfall(subject, section.id, assigned);
        }
    }
}
