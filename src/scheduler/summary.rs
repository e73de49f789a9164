//! Faculty workload summary.
//!
//! Reports assigned hours per instructor against their weekly ceiling.
//! Placeholder entries are reconstructed from the timetable, since the
//! tracker never accumulates hours for them: their hours are the slots
//! the institution still has to staff.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::FacultyId;

use super::PassState;

/// One instructor's weekly load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyLoad {
    /// Instructor id.
    pub faculty: FacultyId,
    /// Instructor name.
    pub name: String,
    /// Home department.
    pub department: String,
    /// Hours assigned this run.
    pub assigned_hours: u32,
    /// Weekly hour ceiling.
    pub weekly_hour_cap: u8,
    /// Whether this row is an unassigned placeholder.
    pub is_placeholder: bool,
}

/// Builds the per-faculty load table, real instructors first.
pub(crate) fn faculty_loads(state: &PassState<'_>) -> Vec<FacultyLoad> {
    let mut loads: Vec<FacultyLoad> = state
        .catalog
        .faculty
        .iter()
        .map(|f| FacultyLoad {
            faculty: f.id.clone(),
            name: f.name.clone(),
            department: f.department.clone(),
            assigned_hours: state.tracker.faculty_hours(&f.id),
            weekly_hour_cap: f.weekly_hour_cap,
            is_placeholder: false,
        })
        .collect();
    loads.sort_by(|a, b| a.faculty.cmp(&b.faculty));

    // Placeholder hours come straight off the timetable; the run keeps
    // the placeholder values themselves, so no id parsing is needed.
    let mut placeholder_hours: BTreeMap<&FacultyId, u32> = BTreeMap::new();
    for a in state.timetable.iter() {
        if state.placeholders.contains_key(&a.faculty) {
            *placeholder_hours.entry(&a.faculty).or_insert(0) += 1;
        }
    }
    for (id, hours) in placeholder_hours {
        let Some(placeholder) = state.placeholders.get(id) else {
            continue;
        };
        loads.push(FacultyLoad {
            faculty: placeholder.id.clone(),
            name: placeholder.name.clone(),
            department: placeholder.department.clone(),
            assigned_hours: hours,
            weekly_hour_cap: placeholder.weekly_hour_cap,
            is_placeholder: true,
        });
    }

    loads
}
