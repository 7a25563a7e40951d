//! Adventure progress and the rooms it moves through

use serde::{Deserialize, Serialize};

/// Rooms of the adventure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Room {
    Start,
    PuzzleRoom,
    SecretRoom,
    TreasureRoom,
    End,
    /// Any tag this build does not know; the game ends on it
    #[serde(other)]
    Unknown,
}

impl Room {
    pub fn is_end(&self) -> bool {
        matches!(self, Room::End)
    }
}

impl std::fmt::Display for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Room::Start => write!(f, "Start Room"),
            Room::PuzzleRoom => write!(f, "Puzzle Room"),
            Room::SecretRoom => write!(f, "Secret Room"),
            Room::TreasureRoom => write!(f, "Treasure Room"),
            Room::End => write!(f, "The End"),
            Room::Unknown => write!(f, "Unknown Room"),
        }
    }
}

/// Everything the save file remembers about a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub current_room: Room,
    pub inventory: Vec<String>,
    pub score: u32,
    pub moves: Vec<String>,      // Append-only
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            current_room: Room::Start,
            inventory: Vec::new(),
            score: 0,
            moves: Vec::new(),
        }
    }
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line to the move log
    pub fn record(&mut self, entry: impl Into<String>) {
        self.moves.push(entry.into());
    }

    /// Put an item in the inventory and add its score bonus
    pub fn collect(&mut self, item: &str, points: u32) {
        self.inventory.push(item.to_string());
        self.award(points);
    }

    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn move_to(&mut self, room: Room) {
        self.current_room = room;
    }

    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|i| i == item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_progress_starts_empty() {
        let p = Progress::new();
        assert_eq!(p.current_room, Room::Start);
        assert!(p.inventory.is_empty());
        assert_eq!(p.score, 0);
        assert!(p.moves.is_empty());
    }

    #[test]
    fn rooms_use_snake_case_tags() {
        assert_eq!(serde_json::to_string(&Room::PuzzleRoom).unwrap(), "\"puzzle_room\"");
        let room: Room = serde_json::from_str("\"dungeon\"").unwrap();
        assert_eq!(room, Room::Unknown);
    }

    #[test]
    fn collecting_adds_item_and_points() {
        let mut p = Progress::new();
        p.collect("Bag of Gold", 30);
        assert!(p.has_item("Bag of Gold"));
        assert_eq!(p.score, 30);
    }
}
