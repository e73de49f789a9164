//! Lab session phases.
//!
//! A lab session always occupies two consecutive slots in a specialized
//! room; labs never use the virtual fallback, so a session that finds
//! no room becomes a shortfall instead. Capacity-limited labs split the
//! section into parallel batches that each need their own room at the
//! same cell.
//!
//! Department-synchronized labs run first: every section of the
//! department takes the lab at one cell, each in a distinct room, which
//! lets departments pool equipment and staff. Remaining labs are placed
//! per section, first-year sections first since the shared science and
//! workshop pools they depend on congest fastest.

use crate::models::{Assignment, Day, LabPool, Room, RoomRef, Section, Slot, Subject, SubjectCategory};
use crate::rotation;

use super::PassState;

/// Places department-synchronized labs.
pub(crate) fn run_department_synchronized(state: &mut PassState<'_>) {
    let catalog = state.catalog;

    let mut subjects: Vec<&Subject> = catalog
        .subjects
        .iter()
        .filter(|s| s.category == SubjectCategory::Lab && s.department_synchronized)
        .collect();
    subjects.sort_by_key(|s| s.id);

    for subject in subjects {
        let mut sections: Vec<&Section> = catalog
            .sections
            .iter()
            .filter(|s| s.department == subject.department && s.semester == subject.semester)
            .collect();
        sections.sort_by_key(|s| s.id);
        if sections.is_empty() {
            continue;
        }

        let batches = usize::from(subject.parallel_batches);
        let mut assigned: u8 = 0;

        'sessions: for _ in 0..subject.weekly_sessions {
            for day in Day::ALL {
                if sections.iter().any(|&s| section_has_lab_on(state, s, day)) {
                    continue;
                }
                for &(s1, s2) in day.lab_slot_pairs() {
                    if !cell_open(state, subject, s1, s2, day, &sections) {
                        continue;
                    }
                    let pool = room_pool(state, subject, sections[0]);
                    let free = free_pair_rooms(state, &pool, day, s1, s2);
                    if free.len() < sections.len() * batches {
                        continue;
                    }

                    for &section in &sections {
                        place_session(state, subject, section, day, s1, s2, batches);
                    }
                    assigned += 1;
                    continue 'sessions;
                }
            }
            break;
        }

        for section in &sections {
            state.report_shortfall(subject, section.id, assigned);
        }
    }
}

/// Places all remaining lab subjects, section by section.
pub(crate) fn run(state: &mut PassState<'_>) {
    let catalog = state.catalog;

    let mut requests: Vec<(&Subject, &Section)> = Vec::new();
    for subject in catalog
        .subjects
        .iter()
        .filter(|s| s.category == SubjectCategory::Lab && !s.department_synchronized)
    {
        for section in catalog
            .sections
            .iter()
            .filter(|s| s.department == subject.department && s.semester == subject.semester)
        {
            requests.push((subject, section));
        }
    }
    // Shared first-year pools congest fastest, so first year goes first.
    requests.sort_by_key(|(subject, section)| {
        (
            subject.academic_year() != 1,
            section.department.clone(),
            subject.semester,
            subject.id,
            section.id,
        )
    });

    for (subject, section) in requests {
        let batches = usize::from(subject.parallel_batches);
        let day_offset = rotation::offset(section.id, subject.id, 1, Day::WEEKDAYS.len());
        let mut assigned: u8 = 0;

        'sessions: for _ in 0..subject.weekly_sessions {
            for i in 0..Day::WEEKDAYS.len() {
                let day = Day::WEEKDAYS[(day_offset + i) % Day::WEEKDAYS.len()];
                if section_has_lab_on(state, section, day) {
                    continue;
                }
                if try_day(state, subject, section, day, batches) {
                    assigned += 1;
                    continue 'sessions;
                }
            }
            // Weekdays exhausted; Saturday takes the overflow.
            if try_day(state, subject, section, Day::Saturday, batches) {
                assigned += 1;
                continue 'sessions;
            }
            break;
        }

        state.report_shortfall(subject, section.id, assigned);
    }
}

fn try_day(
    state: &mut PassState<'_>,
    subject: &Subject,
    section: &Section,
    day: Day,
    batches: usize,
) -> bool {
    let pairs = day.lab_slot_pairs();
    let pair_offset = rotation::offset(section.id, subject.id, 2, pairs.len());

    for i in 0..pairs.len() {
        let (s1, s2) = pairs[(pair_offset + i) % pairs.len()];
        if !cell_open(state, subject, s1, s2, day, std::slice::from_ref(&section)) {
            continue;
        }
        let pool = room_pool(state, subject, section);
        let free = free_pair_rooms(state, &pool, day, s1, s2);
        if free.len() < batches {
            continue;
        }
        if place_session(state, subject, section, day, s1, s2, batches) {
            return true;
        }
    }
    false
}

fn cell_open(
    state: &PassState<'_>,
    subject: &Subject,
    s1: Slot,
    s2: Slot,
    day: Day,
    sections: &[&Section],
) -> bool {
    let year = subject.academic_year();
    for &slot in &[s1, s2] {
        if state.tracker.is_slot_locked_for_year(year, day, slot) {
            return false;
        }
        for section in sections {
            if !state.tracker.is_section_free(section.id, day, slot) {
                return false;
            }
        }
    }
    true
}

fn section_has_lab_on(state: &PassState<'_>, section: &Section, day: Day) -> bool {
    state
        .timetable
        .section_day(section.id, day)
        .iter()
        .any(|a| a.is_lab)
}

/// Candidate rooms for a lab subject, widening from its tagged pool to
/// the department's own labs to the shared computer cluster.
fn room_pool<'a>(state: &PassState<'a>, subject: &Subject, section: &Section) -> Vec<&'a Room> {
    let labs = || state.catalog.rooms.iter().filter(|r| r.kind == crate::models::RoomKind::Lab);

    if let Some(pool) = subject.lab_pool {
        if pool != LabPool::Departmental {
            let tagged: Vec<&Room> = labs().filter(|r| r.lab_pool == Some(pool)).collect();
            if !tagged.is_empty() {
                return tagged;
            }
        }
    }
    let own: Vec<&Room> = labs()
        .filter(|r| r.department == section.department)
        .collect();
    if !own.is_empty() {
        return own;
    }
    labs()
        .filter(|r| r.lab_pool == Some(LabPool::ComputerCluster))
        .collect()
}

/// Rooms from the pool free across both slots, least-used first.
fn free_pair_rooms<'a>(
    state: &PassState<'a>,
    pool: &[&'a Room],
    day: Day,
    s1: Slot,
    s2: Slot,
) -> Vec<&'a Room> {
    state
        .free_lab_rooms(pool, day, s1)
        .into_iter()
        .filter(|r| state.tracker.is_room_free(&r.id, day, s2))
        .collect()
}

fn place_session(
    state: &mut PassState<'_>,
    subject: &Subject,
    section: &Section,
    day: Day,
    s1: Slot,
    s2: Slot,
    batches: usize,
) -> bool {
    let pool = room_pool(state, subject, section);
    let free = free_pair_rooms(state, &pool, day, s1, s2);
    if free.len() < batches {
        return false;
    }
    let rooms: Vec<_> = free.iter().take(batches).map(|r| r.id.clone()).collect();
    let primary = rooms[0].clone();
    let batch_rooms: Vec<_> = rooms[1..].to_vec();

    let faculty = state.allocator.select(
        &state.tracker,
        subject,
        day,
        &[s1, s2],
        section,
        true,
    );

    for slot in [s1, s2] {
        let assignment = Assignment::new(
            section.id,
            day,
            slot,
            subject.id,
            RoomRef::Physical(primary.clone()),
            faculty.id.clone(),
        )
        .as_lab()
        .with_batch_rooms(batch_rooms.clone());
        state.place(assignment, &faculty);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NormalizedCatalog;
    use crate::models::{Faculty, FacultyId, RoomId, SectionId};

    fn lab_subject(id: u32, sessions: u8) -> Subject {
        Subject::new(id, "Physics Lab", "PH101L", "CSE", 1, SubjectCategory::Lab, sessions)
            .with_eligible_faculty(vec![FacultyId("F1".into())])
            .with_lab_pool(LabPool::Departmental)
    }

    fn base_catalog(rooms: Vec<Room>, sections: Vec<Section>, subjects: Vec<Subject>) -> NormalizedCatalog {
        NormalizedCatalog {
            sections,
            subjects,
            faculty: vec![
                Faculty::new("F1", "A", "CSE", 24),
                Faculty::new("F2", "B", "CSE", 24),
            ],
            rooms,
        }
    }

    #[test]
    fn test_lab_occupies_consecutive_pair() {
        let catalog = base_catalog(
            vec![Room::lab("CSE-LAB-1", "CSE")],
            vec![Section::new(1, "CSE", 1, "A")],
            vec![lab_subject(1, 1)],
        );
        let mut state = PassState::new(&catalog);
        run(&mut state);

        let placed = state.timetable.for_section(SectionId(1));
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].day, placed[1].day);
        let (a, b) = (placed[0].slot.min(placed[1].slot), placed[0].slot.max(placed[1].slot));
        assert_eq!(a + 1, b);
        assert!(a % 2 == 1, "sessions start on an odd slot");
        assert!(placed.iter().all(|x| x.is_lab));
        // One faculty member covers both slots.
        assert_eq!(placed[0].faculty, placed[1].faculty);
    }

    #[test]
    fn test_single_room_two_sections_never_collide() {
        let catalog = base_catalog(
            vec![Room::lab("CSE-LAB-1", "CSE")],
            vec![Section::new(1, "CSE", 1, "A"), Section::new(2, "CSE", 1, "B")],
            vec![lab_subject(1, 1)],
        );
        let mut state = PassState::new(&catalog);
        run(&mut state);

        let in_lab = state.timetable.for_room(&RoomId("CSE-LAB-1".into()));
        let mut cells: Vec<(Day, Slot)> = in_lab.iter().map(|a| (a.day, a.slot)).collect();
        let before = cells.len();
        cells.sort_unstable();
        cells.dedup();
        assert_eq!(cells.len(), before, "room double-booked");
        assert!(state.shortfalls.is_empty());
    }

    #[test]
    fn test_parallel_batches_take_distinct_rooms() {
        let catalog = base_catalog(
            vec![Room::lab("CSE-LAB-1", "CSE"), Room::lab("CSE-LAB-2", "CSE")],
            vec![Section::new(1, "CSE", 1, "A")],
            vec![lab_subject(1, 1).with_parallel_batches(2)],
        );
        let mut state = PassState::new(&catalog);
        run(&mut state);

        let placed = state.timetable.for_section(SectionId(1));
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].batch_rooms.len(), 1);
        assert_ne!(
            placed[0].room.physical().unwrap(),
            &placed[0].batch_rooms[0]
        );
    }

    #[test]
    fn test_no_room_means_shortfall_not_virtual() {
        let catalog = base_catalog(
            vec![],
            vec![Section::new(1, "CSE", 1, "A")],
            vec![lab_subject(1, 2)],
        );
        let mut state = PassState::new(&catalog);
        run(&mut state);

        assert!(state.timetable.is_empty());
        assert_eq!(state.shortfalls.len(), 1);
        assert_eq!(state.shortfalls[0].assigned, 0);
    }

    #[test]
    fn test_department_synchronized_lab_shares_cell() {
        let catalog = base_catalog(
            vec![Room::lab("CSE-LAB-1", "CSE"), Room::lab("CSE-LAB-2", "CSE")],
            vec![Section::new(1, "CSE", 1, "A"), Section::new(2, "CSE", 1, "B")],
            vec![lab_subject(1, 1).with_department_synchronized(true)],
        );
        let mut state = PassState::new(&catalog);
        run_department_synchronized(&mut state);

        let s1 = state.timetable.for_section(SectionId(1));
        let s2 = state.timetable.for_section(SectionId(2));
        assert_eq!(s1.len(), 2);
        assert_eq!(s2.len(), 2);
        let cells1: Vec<(Day, Slot)> = s1.iter().map(|a| (a.day, a.slot)).collect();
        let cells2: Vec<(Day, Slot)> = s2.iter().map(|a| (a.day, a.slot)).collect();
        assert_eq!(cells1, cells2);
        // Distinct rooms per section.
        assert_ne!(s1[0].room, s2[0].room);
    }

    #[test]
    fn test_synchronized_lab_sessions_spread_across_days() {
        let catalog = base_catalog(
            vec![Room::lab("CSE-LAB-1", "CSE"), Room::lab("CSE-LAB-2", "CSE")],
            vec![Section::new(1, "CSE", 1, "A"), Section::new(2, "CSE", 1, "B")],
            vec![lab_subject(1, 2).with_department_synchronized(true)],
        );
        let mut state = PassState::new(&catalog);
        run_department_synchronized(&mut state);

        // Two sessions per section, never two on one day.
        for section in [SectionId(1), SectionId(2)] {
            let mut days: Vec<Day> = state
                .timetable
                .for_section(section)
                .iter()
                .map(|a| a.day)
                .collect();
            assert_eq!(days.len(), 4);
            days.sort_unstable();
            days.dedup();
            assert_eq!(days.len(), 2, "both sessions landed on one day");
        }
        assert!(state.shortfalls.is_empty());
    }

    #[test]
    fn test_synchronized_lab_needs_rooms_for_every_section() {
        // Two sections, one room: the synchronized cell can never open.
        let catalog = base_catalog(
            vec![Room::lab("CSE-LAB-1", "CSE")],
            vec![Section::new(1, "CSE", 1, "A"), Section::new(2, "CSE", 1, "B")],
            vec![lab_subject(1, 1).with_department_synchronized(true)],
        );
        let mut state = PassState::new(&catalog);
        run_department_synchronized(&mut state);

        assert!(state.timetable.is_empty());
        assert_eq!(state.shortfalls.len(), 2);
    }

    #[test]
    fn test_at_most_one_lab_per_day_per_section() {
        let catalog = base_catalog(
            vec![Room::lab("CSE-LAB-1", "CSE"), Room::lab("CSE-LAB-2", "CSE")],
            vec![Section::new(1, "CSE", 1, "A")],
            vec![lab_subject(1, 2), lab_subject(2, 2)],
        );
        let mut state = PassState::new(&catalog);
        run(&mut state);

        for day in Day::ALL {
            let labs_today = state
                .timetable
                .section_day(SectionId(1), day)
                .iter()
                .filter(|a| a.is_lab)
                .count();
            assert!(labs_today <= 2, "more than one session on {day}");
        }
        // Four sessions across the week, no two on one weekday.
        let mut days: Vec<Day> = state.timetable.iter().map(|a| a.day).collect();
        days.sort_unstable();
        days.dedup();
        assert_eq!(days.len(), 4);
    }

    #[test]
    fn test_tagged_pool_preferred_over_department() {
        let catalog = base_catalog(
            vec![
                Room::lab("CSE-LAB-1", "CSE"),
                Room::lab("PHY-LAB-1", "SCI").with_lab_pool(LabPool::SharedScience),
            ],
            vec![Section::new(1, "CSE", 1, "A")],
            vec![Subject::new(1, "Physics Lab", "PH101L", "CSE", 1, SubjectCategory::Lab, 1)
                .with_lab_pool(LabPool::SharedScience)],
        );
        let mut state = PassState::new(&catalog);
        run(&mut state);

        let placed = state.timetable.for_section(SectionId(1));
        assert_eq!(placed[0].room, RoomRef::Physical(RoomId("PHY-LAB-1".into())));
    }
}
