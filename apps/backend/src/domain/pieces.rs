//! Core piece types: Piece, PieceKind, Color and the fixed 32-piece catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::rules::WEAK_HAND_THRESHOLD;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Color {
    Red,
    Black,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PieceKind {
    General,
    Advisor,
    Elephant,
    Chariot,
    Horse,
    Cannon,
    Soldier,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::General,
        PieceKind::Advisor,
        PieceKind::Elephant,
        PieceKind::Chariot,
        PieceKind::Horse,
        PieceKind::Cannon,
        PieceKind::Soldier,
    ];

    /// Copies of this kind per color in the catalog.
    pub const fn copies_per_color(self) -> u8 {
        match self {
            PieceKind::General => 1,
            PieceKind::Soldier => 5,
            _ => 2,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PieceKind::General => "GENERAL",
            PieceKind::Advisor => "ADVISOR",
            PieceKind::Elephant => "ELEPHANT",
            PieceKind::Chariot => "CHARIOT",
            PieceKind::Horse => "HORSE",
            PieceKind::Cannon => "CANNON",
            PieceKind::Soldier => "SOLDIER",
        }
    }
}

/// A single playable piece.
///
/// `id` is the catalog index (0..32) and is the only identity: two red
/// advisors share kind, color and points but never an id.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub id: u8,
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(id: u8, kind: PieceKind, color: Color) -> Self {
        Self { id, kind, color }
    }

    /// Point value. Red outranks black of the same kind by exactly one.
    pub const fn points(&self) -> u8 {
        let red = match self.kind {
            PieceKind::General => 14,
            PieceKind::Advisor => 12,
            PieceKind::Elephant => 10,
            PieceKind::Chariot => 8,
            PieceKind::Horse => 6,
            PieceKind::Cannon => 4,
            PieceKind::Soldier => 2,
        };
        match self.color {
            Color::Red => red,
            Color::Black => red - 1,
        }
    }

    /// Top-tier piece: anything a weak hand cannot hold.
    pub const fn is_special(&self) -> bool {
        self.points() > WEAK_HAND_THRESHOLD
    }

    /// Kind and color match (ids may differ).
    pub fn same_face(&self, other: &Piece) -> bool {
        self.kind == other.kind && self.color == other.color
    }

    pub fn name(&self) -> String {
        let color = match self.color {
            Color::Red => "RED",
            Color::Black => "BLACK",
        };
        format!("{}_{}", self.kind.as_str(), color)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.points())
    }
}

/// Total pieces in the catalog.
pub const CATALOG_SIZE: usize = 32;

/// The full catalog in canonical order: red first, then black, kinds from
/// General down to Soldier. Ids are assigned in this order.
pub fn full_catalog() -> Vec<Piece> {
    let mut catalog = Vec::with_capacity(CATALOG_SIZE);
    let mut id = 0u8;
    for color in [Color::Red, Color::Black] {
        for kind in PieceKind::ALL {
            for _ in 0..kind.copies_per_color() {
                catalog.push(Piece::new(id, kind, color));
                id += 1;
            }
        }
    }
    catalog
}

/// Look up a catalog piece by id.
pub fn piece_by_id(id: u8) -> Option<Piece> {
    full_catalog().into_iter().find(|p| p.id == id)
}

/// Sum of point values.
pub fn total_points(pieces: &[Piece]) -> u32 {
    pieces.iter().map(|p| p.points() as u32).sum()
}

/// Highest single point value, 0 for an empty slice.
pub fn max_points(pieces: &[Piece]) -> u8 {
    pieces.iter().map(|p| p.points()).max().unwrap_or(0)
}

/// Sort strongest first; ties keep catalog order.
pub fn sort_strongest_first(pieces: &mut [Piece]) {
    pieces.sort_by(|a, b| b.points().cmp(&a.points()).then(a.id.cmp(&b.id)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_sixteen_per_color() {
        let catalog = full_catalog();
        assert_eq!(catalog.len(), CATALOG_SIZE);
        let red = catalog.iter().filter(|p| p.color == Color::Red).count();
        let black = catalog.iter().filter(|p| p.color == Color::Black).count();
        assert_eq!((red, black), (16, 16));
    }

    #[test]
    fn catalog_ids_are_unique_and_dense() {
        let catalog = full_catalog();
        for (idx, piece) in catalog.iter().enumerate() {
            assert_eq!(piece.id as usize, idx);
        }
    }

    #[test]
    fn point_values_match_table() {
        let general_red = Piece::new(0, PieceKind::General, Color::Red);
        let general_black = Piece::new(16, PieceKind::General, Color::Black);
        let soldier_black = Piece::new(31, PieceKind::Soldier, Color::Black);
        assert_eq!(general_red.points(), 14);
        assert_eq!(general_black.points(), 13);
        assert_eq!(soldier_black.points(), 1);
        assert_eq!(general_red.name(), "GENERAL_RED");
    }

    #[test]
    fn special_pieces_are_above_nine() {
        let specials: Vec<String> = full_catalog()
            .iter()
            .filter(|p| p.is_special())
            .map(|p| p.name())
            .collect();
        // 2 generals, 4 advisors, 2 red elephants
        assert_eq!(specials.len(), 8);
        assert!(specials.iter().all(|n| n != "ELEPHANT_BLACK"));
    }

    #[test]
    fn catalog_point_total_is_stable() {
        assert_eq!(total_points(&full_catalog()), 2 * (14 + 24 + 20 + 16 + 12 + 8 + 10) - 16);
    }
}
