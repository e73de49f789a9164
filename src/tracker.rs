//! Occupancy and conflict tracking.
//!
//! [`ConflictTracker`] is the single source of truth for what is busy
//! during a generation run: section cells, physical rooms, faculty,
//! accumulated faculty hours, and the slots locked for an academic year
//! by the synchronized elective passes.
//!
//! All mutation goes through [`ConflictTracker::record`]; passes query
//! freely but never touch the indexes directly, so a placed assignment
//! can never leave the tracker and the timetable disagreeing.

use std::collections::{BTreeMap, HashMap, HashSet};

use itertools::Itertools;

use crate::models::{Assignment, Day, Faculty, FacultyId, RoomId, SectionId, Slot, SubjectId};

/// Mutable occupancy state for one generation run.
#[derive(Debug, Default)]
pub struct ConflictTracker {
    section_busy: HashSet<(SectionId, Day, Slot)>,
    room_busy: HashSet<(RoomId, Day, Slot)>,
    faculty_busy: HashSet<(FacultyId, Day, Slot)>,
    faculty_hours: HashMap<FacultyId, u32>,
    // Per faculty-day slot lists (sorted), with a lab flag per slot.
    faculty_day_slots: HashMap<(FacultyId, Day), Vec<(Slot, bool)>>,
    // Every (day, slot) a section has a given subject at.
    subject_history: HashMap<(SectionId, SubjectId), Vec<(Day, Slot)>>,
    // Which sections take a subject at a cell, across the institution.
    subject_slot_usage: HashMap<(SubjectId, Day, Slot), Vec<SectionId>>,
    locked_by_year: HashMap<u8, HashSet<(Day, Slot)>>,
}

impl ConflictTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a section's grid cell is unoccupied.
    pub fn is_section_free(&self, section: SectionId, day: Day, slot: Slot) -> bool {
        !self.section_busy.contains(&(section, day, slot))
    }

    /// Whether a physical room is unoccupied at a cell.
    pub fn is_room_free(&self, room: &RoomId, day: Day, slot: Slot) -> bool {
        !self.room_busy.contains(&(room.clone(), day, slot))
    }

    /// Whether a faculty member is unoccupied at a cell.
    ///
    /// The unassigned placeholder is always free.
    pub fn is_faculty_free(&self, faculty: &Faculty, day: Day, slot: Slot) -> bool {
        faculty.is_placeholder || !self.faculty_busy.contains(&(faculty.id.clone(), day, slot))
    }

    /// Hours assigned to a faculty member so far.
    pub fn faculty_hours(&self, faculty: &FacultyId) -> u32 {
        self.faculty_hours.get(faculty).copied().unwrap_or(0)
    }

    /// Locks a (day, slot) for an academic year.
    ///
    /// Later passes must leave locked cells untouched for every section
    /// of that year, so synchronized electives stay attendable.
    pub fn lock_slot_for_year(&mut self, year: u8, day: Day, slot: Slot) {
        self.locked_by_year.entry(year).or_default().insert((day, slot));
    }

    /// Whether a cell is locked for an academic year.
    pub fn is_slot_locked_for_year(&self, year: u8, day: Day, slot: Slot) -> bool {
        self.locked_by_year
            .get(&year)
            .is_some_and(|s| s.contains(&(day, slot)))
    }

    /// All locked cells, per academic year, in grid order.
    pub fn locked_slots(&self) -> BTreeMap<u8, Vec<(Day, Slot)>> {
        self.locked_by_year
            .iter()
            .map(|(year, cells)| {
                let v = cells
                    .iter()
                    .copied()
                    .sorted_by_key(|&(d, s)| (d.index(), s))
                    .collect();
                (*year, v)
            })
            .collect()
    }

    /// Records a placed assignment. The sole mutator besides slot locks.
    ///
    /// Virtual rooms and placeholder faculty are not indexed: both have
    /// unlimited concurrent capacity by definition.
    pub fn record(&mut self, assignment: &Assignment, faculty: &Faculty) {
        let (section, day, slot) = (assignment.section, assignment.day, assignment.slot);
        self.section_busy.insert((section, day, slot));

        if let Some(room) = assignment.room.physical() {
            self.room_busy.insert((room.clone(), day, slot));
        }
        for room in &assignment.batch_rooms {
            self.room_busy.insert((room.clone(), day, slot));
        }

        if !faculty.is_placeholder {
            self.faculty_busy.insert((faculty.id.clone(), day, slot));
            *self.faculty_hours.entry(faculty.id.clone()).or_insert(0) += 1;
            let slots = self
                .faculty_day_slots
                .entry((faculty.id.clone(), day))
                .or_default();
            slots.push((slot, assignment.is_lab));
            slots.sort_unstable();
        }

        self.subject_history
            .entry((section, assignment.subject))
            .or_default()
            .push((day, slot));
        self.subject_slot_usage
            .entry((assignment.subject, day, slot))
            .or_default()
            .push(section);
    }

    /// How many sections take a subject at a cell. Synchronized
    /// offerings show up here as one entry per attending section.
    pub fn sections_with_subject_at(&self, subject: SubjectId, day: Day, slot: Slot) -> usize {
        self.subject_slot_usage
            .get(&(subject, day, slot))
            .map_or(0, Vec::len)
    }

    /// Whether placing a subject at this cell would put it in the same
    /// slot on three consecutive days for the section.
    pub fn would_repeat_pattern(
        &self,
        section: SectionId,
        subject: SubjectId,
        day: Day,
        slot: Slot,
    ) -> bool {
        let Some(history) = self.subject_history.get(&(section, subject)) else {
            return false;
        };
        let at = |idx: i8| -> bool {
            if !(0..6).contains(&idx) {
                return false;
            }
            let d = Day::ALL[idx as usize];
            history.contains(&(d, slot))
        };
        let d = day.index() as i8;
        (at(d - 2) && at(d - 1)) || (at(d - 1) && at(d + 1)) || (at(d + 1) && at(d + 2))
    }

    /// Whether a section already has a subject scheduled on a day.
    pub fn section_has_subject_on_day(
        &self,
        section: SectionId,
        subject: SubjectId,
        day: Day,
    ) -> bool {
        self.subject_history
            .get(&(section, subject))
            .is_some_and(|h| h.iter().any(|&(d, _)| d == day))
    }

    /// Whether a section has a subject in a slot adjacent to the given
    /// one on the same day. Used to avoid hidden double periods.
    pub fn has_adjacent_same_subject(
        &self,
        section: SectionId,
        subject: SubjectId,
        day: Day,
        slot: Slot,
    ) -> bool {
        self.subject_history
            .get(&(section, subject))
            .is_some_and(|h| {
                h.iter()
                    .any(|&(d, s)| d == day && (s + 1 == slot || s == slot + 1))
            })
    }

    /// A section's occupied slots on one day, sorted.
    pub fn section_slots(&self, section: SectionId, day: Day) -> Vec<Slot> {
        let mut slots: Vec<Slot> = day
            .slots()
            .iter()
            .copied()
            .filter(|&s| !self.is_section_free(section, day, s))
            .collect();
        slots.sort_unstable();
        slots
    }

    /// Whether placing a theory slot here gives the faculty member two
    /// consecutive theory slots on this day.
    pub fn creates_back_to_back(&self, faculty: &FacultyId, day: Day, slot: Slot) -> bool {
        self.faculty_day_slots
            .get(&(faculty.clone(), day))
            .is_some_and(|slots| {
                slots
                    .iter()
                    .any(|&(s, is_lab)| !is_lab && (s + 1 == slot || s == slot + 1))
            })
    }

    /// Whether a faculty member already teaches back-to-back theory on a day.
    pub fn day_has_back_to_back(&self, faculty: &FacultyId, day: Day) -> bool {
        self.faculty_day_slots
            .get(&(faculty.clone(), day))
            .is_some_and(|slots| {
                slots.windows(2).any(|w| {
                    let (a, a_lab) = w[0];
                    let (b, b_lab) = w[1];
                    !a_lab && !b_lab && a + 1 == b
                })
            })
    }

    /// Number of days on which a faculty member teaches back-to-back theory.
    pub fn days_with_back_to_back(&self, faculty: &FacultyId) -> usize {
        Day::ALL
            .iter()
            .filter(|&&day| self.day_has_back_to_back(faculty, day))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoomRef;

    fn faculty() -> Faculty {
        Faculty::new("F1", "A", "CSE", 18)
    }

    fn assign(section: u32, day: Day, slot: Slot, subject: u32) -> Assignment {
        Assignment::new(
            SectionId(section),
            day,
            slot,
            SubjectId(subject),
            RoomRef::Physical(RoomId("R1".into())),
            FacultyId("F1".into()),
        )
    }

    #[test]
    fn test_record_busies_all_axes() {
        let mut t = ConflictTracker::new();
        let f = faculty();
        t.record(&assign(1, Day::Monday, 2, 10), &f);

        assert!(!t.is_section_free(SectionId(1), Day::Monday, 2));
        assert!(t.is_section_free(SectionId(1), Day::Monday, 3));
        assert!(!t.is_room_free(&RoomId("R1".into()), Day::Monday, 2));
        assert!(!t.is_faculty_free(&f, Day::Monday, 2));
        assert_eq!(t.faculty_hours(&f.id), 1);
    }

    #[test]
    fn test_placeholder_never_busy() {
        let mut t = ConflictTracker::new();
        let tba = Faculty::placeholder("CSE");
        let mut a = assign(1, Day::Monday, 1, 10);
        a.faculty = tba.id.clone();
        t.record(&a, &tba);

        assert!(t.is_faculty_free(&tba, Day::Monday, 1));
        assert_eq!(t.faculty_hours(&tba.id), 0);
        // The section cell is still consumed.
        assert!(!t.is_section_free(SectionId(1), Day::Monday, 1));
    }

    #[test]
    fn test_virtual_room_not_indexed() {
        let mut t = ConflictTracker::new();
        let f = faculty();
        let mut a = assign(1, Day::Monday, 1, 10);
        a.room = RoomRef::Virtual {
            department: "CSE".into(),
        };
        t.record(&a, &f);
        assert!(t.is_room_free(&RoomId("R1".into()), Day::Monday, 1));
    }

    #[test]
    fn test_batch_rooms_busied() {
        let mut t = ConflictTracker::new();
        let f = faculty();
        let a = assign(1, Day::Monday, 1, 10).with_batch_rooms(vec![RoomId("L2".into())]);
        t.record(&a, &f);
        assert!(!t.is_room_free(&RoomId("L2".into()), Day::Monday, 1));
    }

    #[test]
    fn test_cross_section_usage_counted() {
        let mut t = ConflictTracker::new();
        let f = faculty();
        t.record(&assign(1, Day::Monday, 4, 10), &f);
        let mut b = assign(2, Day::Monday, 4, 10);
        b.faculty = FacultyId("F2".into());
        t.record(&b, &Faculty::new("F2", "B", "ECE", 18));

        assert_eq!(t.sections_with_subject_at(SubjectId(10), Day::Monday, 4), 2);
        assert_eq!(t.sections_with_subject_at(SubjectId(10), Day::Monday, 5), 0);
        assert_eq!(t.sections_with_subject_at(SubjectId(11), Day::Monday, 4), 0);
    }

    #[test]
    fn test_year_locks() {
        let mut t = ConflictTracker::new();
        t.lock_slot_for_year(2, Day::Wednesday, 5);
        assert!(t.is_slot_locked_for_year(2, Day::Wednesday, 5));
        assert!(!t.is_slot_locked_for_year(3, Day::Wednesday, 5));
        assert_eq!(t.locked_slots()[&2], vec![(Day::Wednesday, 5)]);
    }

    #[test]
    fn test_pattern_detection() {
        let mut t = ConflictTracker::new();
        let f = faculty();
        t.record(&assign(1, Day::Monday, 3, 10), &f);
        t.record(&assign(1, Day::Tuesday, 3, 10), &f);

        // A third consecutive same-slot day in either direction.
        assert!(t.would_repeat_pattern(SectionId(1), SubjectId(10), Day::Wednesday, 3));
        // Different slot is fine.
        assert!(!t.would_repeat_pattern(SectionId(1), SubjectId(10), Day::Wednesday, 4));
        // Filling the middle of a gap also counts.
        let mut t2 = ConflictTracker::new();
        t2.record(&assign(1, Day::Monday, 3, 10), &f);
        t2.record(&assign(1, Day::Wednesday, 3, 10), &f);
        assert!(t2.would_repeat_pattern(SectionId(1), SubjectId(10), Day::Tuesday, 3));
    }

    #[test]
    fn test_adjacent_same_subject() {
        let mut t = ConflictTracker::new();
        let f = faculty();
        t.record(&assign(1, Day::Monday, 3, 10), &f);
        assert!(t.has_adjacent_same_subject(SectionId(1), SubjectId(10), Day::Monday, 4));
        assert!(t.has_adjacent_same_subject(SectionId(1), SubjectId(10), Day::Monday, 2));
        assert!(!t.has_adjacent_same_subject(SectionId(1), SubjectId(10), Day::Monday, 5));
        assert!(!t.has_adjacent_same_subject(SectionId(1), SubjectId(11), Day::Monday, 4));
    }

    #[test]
    fn test_back_to_back_tracking() {
        let mut t = ConflictTracker::new();
        let f = faculty();
        t.record(&assign(1, Day::Monday, 2, 10), &f);

        assert!(t.creates_back_to_back(&f.id, Day::Monday, 3));
        assert!(!t.creates_back_to_back(&f.id, Day::Monday, 5));
        assert!(!t.day_has_back_to_back(&f.id, Day::Monday));

        t.record(&assign(2, Day::Monday, 3, 11), &f);
        assert!(t.day_has_back_to_back(&f.id, Day::Monday));
        assert_eq!(t.days_with_back_to_back(&f.id), 1);
    }

    #[test]
    fn test_lab_slots_ignored_for_back_to_back() {
        let mut t = ConflictTracker::new();
        let f = faculty();
        t.record(&assign(1, Day::Monday, 2, 10).as_lab(), &f);
        assert!(!t.creates_back_to_back(&f.id, Day::Monday, 3));
    }

    #[test]
    fn test_section_slots() {
        let mut t = ConflictTracker::new();
        let f = faculty();
        t.record(&assign(1, Day::Monday, 4, 10), &f);
        t.record(&assign(1, Day::Monday, 1, 11), &f);
        assert_eq!(t.section_slots(SectionId(1), Day::Monday), vec![1, 4]);
    }
}
