//! Faculty selection with load balancing.
//!
//! Picks an instructor for each placement through widening eligibility
//! tiers: subject-eligible faculty first, then the owning department's
//! faculty, then anyone, and finally the department's unassigned
//! placeholder. Every real candidate must be free at all requested
//! slots and must stay within the weekly hour ceiling, so a placement
//! can always complete but never overloads a person.
//!
//! Within a tier, candidates are balanced by percentage-of-ceiling
//! load: everyone within ten points of the least-loaded candidate forms
//! a band, and a rotation offset picks from the band so consecutive
//! sections do not all land on the same person.

use std::collections::HashMap;

use crate::models::{Day, Faculty, Section, Slot, Subject};
use crate::rotation;
use crate::tracker::ConflictTracker;

/// Width of the load band considered equally loaded, in percentage points.
const LOAD_BAND_PCT: u32 = 10;

/// Days of back-to-back theory a faculty member may accumulate before
/// further back-to-back days are avoided.
const BACK_TO_BACK_DAY_LIMIT: usize = 1;

/// Per-run faculty selector.
#[derive(Debug)]
pub struct FacultyAllocator<'a> {
    faculty: &'a [Faculty],
    by_id: HashMap<&'a str, usize>,
}

impl<'a> FacultyAllocator<'a> {
    /// Creates an allocator over the normalized faculty list.
    pub fn new(faculty: &'a [Faculty]) -> Self {
        let by_id = faculty
            .iter()
            .enumerate()
            .map(|(i, f)| (f.id.0.as_str(), i))
            .collect();
        Self { faculty, by_id }
    }

    /// Selects an instructor for one placement covering `slots` on `day`.
    ///
    /// Never fails: when no real instructor fits, the subject
    /// department's placeholder is returned.
    pub fn select(
        &self,
        tracker: &ConflictTracker,
        subject: &Subject,
        day: Day,
        slots: &[Slot],
        section: &Section,
        is_lab: bool,
    ) -> Faculty {
        let eligible: Vec<&Faculty> = subject
            .eligible_faculty
            .iter()
            .filter_map(|id| self.by_id.get(id.0.as_str()).map(|&i| &self.faculty[i]))
            .collect();
        let departmental: Vec<&Faculty> = self
            .faculty
            .iter()
            .filter(|f| f.department == subject.department)
            .collect();
        let everyone: Vec<&Faculty> = self.faculty.iter().collect();

        for tier in [eligible, departmental, everyone] {
            if let Some(found) = self.pick(tracker, tier, subject, day, slots, section, is_lab) {
                return Faculty::clone(found);
            }
        }
        Faculty::placeholder(&subject.department)
    }

    fn pick(
        &self,
        tracker: &ConflictTracker,
        tier: Vec<&'a Faculty>,
        subject: &Subject,
        day: Day,
        slots: &[Slot],
        section: &Section,
        is_lab: bool,
    ) -> Option<&'a Faculty> {
        let mut fits: Vec<&Faculty> = tier
            .into_iter()
            .filter(|f| {
                slots.iter().all(|&s| tracker.is_faculty_free(f, day, s))
                    && tracker.faculty_hours(&f.id) + slots.len() as u32
                        <= u32::from(f.weekly_hour_cap)
            })
            .collect();
        if fits.is_empty() {
            return None;
        }
        fits.sort_by(|a, b| a.id.cmp(&b.id));
        fits.dedup_by(|a, b| a.id == b.id);

        // Theory placements avoid giving a person a second day of
        // back-to-back lectures when someone else fits.
        if !is_lab {
            let gentle: Vec<&Faculty> = fits
                .iter()
                .copied()
                .filter(|f| {
                    let would_add = slots.iter().any(|&s| {
                        tracker.creates_back_to_back(&f.id, day, s)
                            && !tracker.day_has_back_to_back(&f.id, day)
                    });
                    !(would_add && tracker.days_with_back_to_back(&f.id) >= BACK_TO_BACK_DAY_LIMIT)
                })
                .collect();
            if !gentle.is_empty() {
                fits = gentle;
            }
        }

        let pct = |f: &Faculty| -> u32 {
            tracker.faculty_hours(&f.id) * 100 / u32::from(f.weekly_hour_cap).max(1)
        };
        let min_pct = fits.iter().map(|&f| pct(f)).min().unwrap_or(0);
        let band: Vec<&Faculty> = fits
            .into_iter()
            .filter(|&f| pct(f) <= min_pct + LOAD_BAND_PCT)
            .collect();

        let idx = rotation::offset(
            section.id,
            subject.id,
            u8::from(is_lab),
            band.len(),
        );
        band.get(idx).copied()
    }
}
