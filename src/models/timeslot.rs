//! Weekly time grid: days and slots.
//!
//! The institution teaches Monday through Saturday. Weekdays have six
//! one-hour slots; Saturday is a half day with four. A `(Day, Slot)`
//! pair denotes a fixed wall-clock interval, so slot 3 on Tuesday is
//! the same time of day as slot 3 on Friday.
//!
//! Lab sessions always occupy a pair of consecutive slots; the valid
//! pairs are exposed via [`Day::lab_slot_pairs`].

use serde::{Deserialize, Serialize};

/// One-based slot number within a day.
pub type Slot = u8;

/// A teaching day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    /// All teaching days, Monday first.
    pub const ALL: [Day; 6] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    /// Full teaching days (Saturday excluded).
    pub const WEEKDAYS: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    /// Slots available on this day, in chronological order.
    pub fn slots(self) -> &'static [Slot] {
        match self {
            Day::Saturday => &[1, 2, 3, 4],
            _ => &[1, 2, 3, 4, 5, 6],
        }
    }

    /// The structurally last slot of this day.
    pub fn last_slot(self) -> Slot {
        match self {
            Day::Saturday => 4,
            _ => 6,
        }
    }

    /// Consecutive slot pairs usable for a 2-hour lab session.
    pub fn lab_slot_pairs(self) -> &'static [(Slot, Slot)] {
        match self {
            Day::Saturday => &[(1, 2), (3, 4)],
            _ => &[(1, 2), (3, 4), (5, 6)],
        }
    }

    /// Whether `slot` exists on this day.
    pub fn has_slot(self, slot: Slot) -> bool {
        slot >= 1 && slot <= self.last_slot()
    }

    /// Zero-based position in the week (Monday = 0).
    pub fn index(self) -> usize {
        match self {
            Day::Monday => 0,
            Day::Tuesday => 1,
            Day::Wednesday => 2,
            Day::Thursday => 3,
            Day::Friday => 4,
            Day::Saturday => 5,
        }
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturday_is_half_day() {
        assert_eq!(Day::Saturday.slots(), &[1, 2, 3, 4]);
        assert_eq!(Day::Saturday.last_slot(), 4);
        assert_eq!(Day::Saturday.lab_slot_pairs().len(), 2);
    }

    #[test]
    fn test_weekday_slots() {
        for day in Day::WEEKDAYS {
            assert_eq!(day.slots().len(), 6);
            assert_eq!(day.last_slot(), 6);
            assert_eq!(day.lab_slot_pairs(), &[(1, 2), (3, 4), (5, 6)]);
        }
    }

    #[test]
    fn test_has_slot() {
        assert!(Day::Monday.has_slot(6));
        assert!(!Day::Saturday.has_slot(5));
        assert!(!Day::Monday.has_slot(0));
    }

    #[test]
    fn test_day_ordering() {
        assert!(Day::Monday < Day::Saturday);
        assert_eq!(Day::Wednesday.index(), 2);
    }
}
