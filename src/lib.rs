//! Weekly timetable generation for academic institutions.
//!
//! Builds section timetables on a Monday-Saturday grid (six slots on
//! weekdays, four on the Saturday half day) from a raw catalog of
//! sections, courses, faculty, and rooms. Placement is a deterministic
//! greedy pipeline that handles the hardest synchronization contracts
//! first — cross-department electives, then labs, then bulk theory —
//! and reports anything it cannot place as a shortfall instead of
//! failing.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Section`, `Subject`, `Faculty`,
//!   `Room`, `Day`, `Timetable`, `Assignment`
//! - **`catalog`**: Raw input records and the normalizer that expands
//!   them into scheduling units
//! - **`validation`**: Structural catalog checks before a run
//! - **`tracker`**: Occupancy state shared by all phases
//! - **`allocator`**: Load-balanced faculty selection
//! - **`rotation`**: Deterministic spread offsets
//! - **`scheduler`**: The phase pipeline and the `Engine` entry point
//!
//! # Example
//!
//! ```
//! use timetable_engine::catalog::{Catalog, RawCourse, RawFaculty, SemesterFilter};
//! use timetable_engine::models::{Room, Section};
//! use timetable_engine::scheduler::{Engine, ScheduleRequest};
//!
//! let catalog = Catalog::new()
//!     .with_department("CSE")
//!     .with_section(Section::new(1, "CSE", 3, "A"))
//!     .with_course(RawCourse::new("CS301", "Data Structures", "CSE", 3).with_theory_hours(3))
//!     .with_faculty(RawFaculty::new("F1", "A. Rao", "CSE", 18).with_subject_code("CS301"))
//!     .with_room(Room::classroom("CSE-101", "CSE"));
//!
//! let request = ScheduleRequest::new(catalog, SemesterFilter::Odd);
//! let result = Engine::new().generate(&request)?;
//! assert_eq!(result.timetable.len(), 3);
//! # Ok::<(), timetable_engine::scheduler::EngineError>(())
//! ```

pub mod allocator;
pub mod catalog;
pub mod models;
pub mod rotation;
pub mod scheduler;
pub mod tracker;
pub mod validation;
