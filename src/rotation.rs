//! Deterministic rotation offsets.
//!
//! Scheduling passes spread sections across days, slots, and faculty
//! bands by rotating their starting index instead of drawing random
//! numbers. The offset is a pure function of the section, subject, and
//! pass, so identical inputs always reproduce the identical timetable.
//!
//! This is the single source of variety in the engine; no pass may
//! introduce spread any other way.

use crate::models::{SectionId, SubjectId};

/// Rotation offset for a (section, subject, pass) combination.
///
/// Mixes the inputs through wrapping multiply-xor rounds (the avalanche
/// constants are the usual 32-bit finalizer ones) and reduces modulo
/// `modulus`. A `modulus` of zero yields zero.
pub fn offset(section: SectionId, subject: SubjectId, pass_index: u8, modulus: usize) -> usize {
    if modulus == 0 {
        return 0;
    }
    let mut h = section
        .0
        .wrapping_mul(0x9E37_79B9)
        .wrapping_add(subject.0.wrapping_mul(0x85EB_CA6B))
        .wrapping_add(u32::from(pass_index).wrapping_mul(0xC2B2_AE35));
    h ^= h >> 16;
    h = h.wrapping_mul(0x85EB_CA6B);
    h ^= h >> 13;
    (h as usize) % modulus
}
