//! Gap measurement.
//!
//! An interior gap is a free slot strictly between a section's first
//! and last occupied slot of a day. Closing gaps by moving assignments
//! would break the cross-section synchronization the elective and lab
//! phases established, so this pass only measures: even when compaction
//! is requested it reports the gaps and moves nothing.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::models::{Day, SectionId, Slot};

use super::PassState;

/// One interior free slot in a section's day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionGap {
    /// The affected section.
    pub section: SectionId,
    /// Day of the gap.
    pub day: Day,
    /// The free slot.
    pub slot: Slot,
}

/// Interior gaps found across the timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapReport {
    /// Every gap, in section/day/slot order.
    pub gaps: Vec<SectionGap>,
    /// Total gap count.
    pub total_gaps: usize,
}

/// Measures interior gaps when the compaction option is on.
pub(crate) fn run(state: &PassState<'_>, enabled: bool) -> Option<GapReport> {
    if !enabled {
        return None;
    }

    let mut gaps = Vec::new();
    for section in state.catalog.sections.iter().map(|s| s.id).sorted_unstable() {
        for day in Day::ALL {
            let occupied = state.tracker.section_slots(section, day);
            let (Some(&first), Some(&last)) = (occupied.first(), occupied.last()) else {
                continue;
            };
            for slot in first..=last {
                if !occupied.contains(&slot) {
                    gaps.push(SectionGap { section, day, slot });
                }
            }
        }
    }

    let total_gaps = gaps.len();
    if total_gaps > 0 {
        log::info!("{total_gaps} interior gaps measured; assignments left in place");
    }
    Some(GapReport { gaps, total_gaps })
}
