//! Timetable (solution) model.
//!
//! A timetable is the accumulated set of assignments produced by the
//! scheduling passes, plus the shortfall entries for anything that
//! could not be fully placed. Assignments only ever accumulate; no pass
//! removes or rewrites an earlier pass's placements.
//!
//! Invariants (checked by the conflict tracker at placement time):
//! - at most one assignment per (section, day, slot);
//! - at most one per (room, day, slot) unless the room is virtual;
//! - at most one per (faculty, day, slot) unless the faculty is the
//!   unassigned placeholder.

use serde::{Deserialize, Serialize};

use super::{Day, FacultyId, RoomId, SectionId, Slot, SubjectId};

/// Room reference on an assignment.
///
/// Virtual rooms have unlimited concurrent capacity and exist only so
/// that a subject is never left unscheduled for lack of a physical
/// room; their presence in a result signals a capacity shortage
/// upstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomRef {
    /// A catalog room.
    Physical(RoomId),
    /// Department-scoped placement of last resort.
    Virtual {
        /// Department the fallback is attributed to.
        department: String,
    },
}

impl RoomRef {
    /// Whether this is a virtual fallback room.
    pub fn is_virtual(&self) -> bool {
        matches!(self, RoomRef::Virtual { .. })
    }

    /// The physical room id, if any.
    pub fn physical(&self) -> Option<&RoomId> {
        match self {
            RoomRef::Physical(id) => Some(id),
            RoomRef::Virtual { .. } => None,
        }
    }
}

/// One placed meeting: a (section, day, slot) cell of the weekly grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// The section attending.
    pub section: SectionId,
    /// Teaching day.
    pub day: Day,
    /// Slot within the day.
    pub slot: Slot,
    /// The subject taught.
    pub subject: SubjectId,
    /// Where it happens.
    pub room: RoomRef,
    /// Additional rooms occupied by parallel lab batches at this slot.
    pub batch_rooms: Vec<RoomId>,
    /// Who teaches it.
    pub faculty: FacultyId,
    /// Whether this is one slot of a 2-slot lab session.
    pub is_lab: bool,
}

impl Assignment {
    /// Creates a new theory-style assignment.
    pub fn new(
        section: SectionId,
        day: Day,
        slot: Slot,
        subject: SubjectId,
        room: RoomRef,
        faculty: FacultyId,
    ) -> Self {
        Self {
            section,
            day,
            slot,
            subject,
            room,
            batch_rooms: Vec::new(),
            faculty,
            is_lab: false,
        }
    }

    /// Marks the assignment as a lab slot.
    pub fn as_lab(mut self) -> Self {
        self.is_lab = true;
        self
    }

    /// Adds rooms occupied by parallel lab batches.
    pub fn with_batch_rooms(mut self, rooms: Vec<RoomId>) -> Self {
        self.batch_rooms = rooms;
        self
    }
}

/// A subject that fell short of its required weekly sessions for one
/// section. Reported, never fatal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shortfall {
    /// The under-scheduled subject.
    pub subject: SubjectId,
    /// Subject name, denormalized for reporting.
    pub subject_name: String,
    /// The affected section.
    pub section: SectionId,
    /// Sessions actually placed.
    pub assigned: u8,
    /// Sessions the catalog requires.
    pub required: u8,
}

/// A complete (or best-effort partial) weekly schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    /// All placed assignments, in placement order.
    pub assignments: Vec<Assignment>,
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an assignment.
    pub fn push(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Number of placed assignments.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether nothing has been placed.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Iterates over all assignments.
    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments.iter()
    }

    /// Looks up the assignment at a grid cell.
    pub fn get(&self, section: SectionId, day: Day, slot: Slot) -> Option<&Assignment> {
        self.assignments
            .iter()
            .find(|a| a.section == section && a.day == day && a.slot == slot)
    }

    /// All assignments for a section.
    pub fn for_section(&self, section: SectionId) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.section == section)
            .collect()
    }

    /// A section's assignments on one day, in slot order.
    pub fn section_day(&self, section: SectionId, day: Day) -> Vec<&Assignment> {
        let mut out: Vec<&Assignment> = self
            .assignments
            .iter()
            .filter(|a| a.section == section && a.day == day)
            .collect();
        out.sort_by_key(|a| a.slot);
        out
    }

    /// All assignments taught by a faculty member.
    pub fn for_faculty(&self, faculty: &FacultyId) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| &a.faculty == faculty)
            .collect()
    }

    /// All assignments held in a physical room (batch rooms included).
    pub fn for_room(&self, room: &RoomId) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.room.physical() == Some(room) || a.batch_rooms.contains(room))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Timetable {
        let mut t = Timetable::new();
        t.push(Assignment::new(
            SectionId(1),
            Day::Monday,
            1,
            SubjectId(10),
            RoomRef::Physical(RoomId("R1".into())),
            FacultyId("F1".into()),
        ));
        t.push(
            Assignment::new(
                SectionId(1),
                Day::Monday,
                3,
                SubjectId(11),
                RoomRef::Physical(RoomId("L1".into())),
                FacultyId("F2".into()),
            )
            .as_lab(),
        );
        t.push(Assignment::new(
            SectionId(2),
            Day::Tuesday,
            1,
            SubjectId(10),
            RoomRef::Virtual {
                department: "CSE".into(),
            },
            FacultyId("F1".into()),
        ));
        t
    }

    #[test]
    fn test_lookup() {
        let t = sample();
        assert_eq!(t.len(), 3);
        let a = t.get(SectionId(1), Day::Monday, 3).unwrap();
        assert!(a.is_lab);
        assert!(t.get(SectionId(1), Day::Monday, 2).is_none());
    }

    #[test]
    fn test_views() {
        let t = sample();
        assert_eq!(t.for_section(SectionId(1)).len(), 2);
        assert_eq!(t.for_faculty(&FacultyId("F1".into())).len(), 2);
        assert_eq!(t.for_room(&RoomId("L1".into())).len(), 1);
    }

    #[test]
    fn test_section_day_sorted() {
        let t = sample();
        let day = t.section_day(SectionId(1), Day::Monday);
        assert_eq!(day.iter().map(|a| a.slot).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_room_ref_virtual() {
        let v = RoomRef::Virtual {
            department: "ME".into(),
        };
        assert!(v.is_virtual());
        assert!(v.physical().is_none());
        let p = RoomRef::Physical(RoomId("R1".into()));
        assert_eq!(p.physical(), Some(&RoomId("R1".into())));
    }

    #[test]
    fn test_batch_rooms_counted_in_room_view() {
        let mut t = Timetable::new();
        t.push(
            Assignment::new(
                SectionId(1),
                Day::Friday,
                1,
                SubjectId(5),
                RoomRef::Physical(RoomId("L1".into())),
                FacultyId("F1".into()),
            )
            .as_lab()
            .with_batch_rooms(vec![RoomId("L2".into())]),
        );
        assert_eq!(t.for_room(&RoomId("L2".into())).len(), 1);
    }
}
