//! Room model.
//!
//! Physical rooms belong to a department (or a shared pool) and have a
//! type that scheduling passes respect strictly: theory never enters a
//! lab, labs never enter a classroom. Virtual placement-of-last-resort
//! rooms are not catalog entries; see [`crate::models::RoomRef`].

use serde::{Deserialize, Serialize};

use super::LabPool;

/// Room identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub String);

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Room type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    /// Ordinary lecture room.
    Classroom,
    /// Specialized practical room.
    Lab,
    /// Large shared venue.
    Auditorium,
}

/// A physical room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique identifier.
    pub id: RoomId,
    /// Owning department code, or a shared-pool code.
    pub department: String,
    /// Room type.
    pub kind: RoomKind,
    /// Seat capacity.
    pub capacity: u32,
    /// For labs: the specialized pool this room serves, if it is part
    /// of one beyond its own department.
    pub lab_pool: Option<LabPool>,
}

impl Room {
    /// Creates a new room.
    pub fn new(id: impl Into<String>, department: impl Into<String>, kind: RoomKind) -> Self {
        Self {
            id: RoomId(id.into()),
            department: department.into(),
            kind,
            capacity: 60,
            lab_pool: None,
        }
    }

    /// Creates a classroom.
    pub fn classroom(id: impl Into<String>, department: impl Into<String>) -> Self {
        Self::new(id, department, RoomKind::Classroom)
    }

    /// Creates a lab room.
    pub fn lab(id: impl Into<String>, department: impl Into<String>) -> Self {
        Self::new(id, department, RoomKind::Lab)
    }

    /// Sets the seat capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Tags the room as serving a specialized lab pool.
    pub fn with_lab_pool(mut self, pool: LabPool) -> Self {
        self.lab_pool = Some(pool);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_builders() {
        let c = Room::classroom("CSE-101", "CSE").with_capacity(70);
        assert_eq!(c.kind, RoomKind::Classroom);
        assert_eq!(c.capacity, 70);
        assert!(c.lab_pool.is_none());

        let l = Room::lab("PHY-LAB-1", "SCI").with_lab_pool(LabPool::SharedScience);
        assert_eq!(l.kind, RoomKind::Lab);
        assert_eq!(l.lab_pool, Some(LabPool::SharedScience));
    }
}
