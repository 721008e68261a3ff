use std::fmt;

use super::piece::PieceType;
use super::square::{square_name, Square};

/// Move value exchanged with the protocol layer. `promotion` is
/// `PieceType::None` for non-promotions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: PieceType,
    pub is_capture: bool,
    pub is_castle: bool,
    pub is_en_passant: bool,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: PieceType::None,
            is_capture: false,
            is_castle: false,
            is_en_passant: false,
        }
    }

    pub fn capture(from: Square, to: Square) -> Self {
        Self {
            is_capture: true,
            ..Self::new(from, to)
        }
    }

    pub fn promotion(from: Square, to: Square, promotion: PieceType, is_capture: bool) -> Self {
        Self {
            promotion,
            is_capture,
            ..Self::new(from, to)
        }
    }

    pub fn castle(from: Square, to: Square) -> Self {
        Self {
            is_castle: true,
            ..Self::new(from, to)
        }
    }

    pub fn en_passant(from: Square, to: Square) -> Self {
        Self {
            is_capture: true,
            is_en_passant: true,
            ..Self::new(from, to)
        }
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion != PieceType::None
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", square_name(self.from), square_name(self.to))?;
        match self.promotion {
            PieceType::Knight => write!(f, "n"),
            PieceType::Bishop => write!(f, "b"),
            PieceType::Rook => write!(f, "r"),
            PieceType::Queen => write!(f, "q"),
            _ => Ok(()),
        }
    }
}
