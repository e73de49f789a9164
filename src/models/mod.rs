//! Timetabling domain models.
//!
//! Core data types for representing an institutional timetabling
//! problem and its solution: sections (student cohorts), subjects
//! (schedulable weekly-hour units), faculty, rooms, the weekly time
//! grid, and the produced timetable.
//!
//! All times are (day, slot) cells of a fixed weekly grid; there is no
//! continuous time axis.

mod faculty;
mod room;
mod section;
mod subject;
mod timeslot;
mod timetable;

pub use faculty::{Faculty, FacultyId};
pub use room::{Room, RoomId, RoomKind};
pub use section::{Section, SectionId};
pub use subject::{sync_key, LabPool, Subject, SubjectCategory, SubjectId};
pub use timeslot::{Day, Slot};
pub use timetable::{Assignment, RoomRef, Shortfall, Timetable};
