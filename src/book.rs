//! Opening-book collaborator contract. The engine only ever asks for a move
//! suggestion; where the entries come from is the caller's business.

use std::collections::HashMap;

use rand::seq::SliceRandom;

use crate::board::{Move, Position};

pub trait OpeningBook {
    /// Suggest a move for `pos`, or `None` when the position is out of book.
    /// The engine still verifies legality before trusting the suggestion.
    fn lookup(&self, pos: &Position) -> Option<Move>;
}

/// Positions are keyed by piece placement and side to move; counters and
/// castling state are deliberately ignored so transpositions share entries.
fn position_key(pos: &Position) -> String {
    let fen = pos.to_fen();
    let mut fields = fen.split_whitespace();
    format!(
        "{} {}",
        fields.next().unwrap_or(""),
        fields.next().unwrap_or("")
    )
}

/// Book backed by a plain map, picking uniformly among the stored replies.
#[derive(Default)]
pub struct InMemoryBook {
    entries: HashMap<String, Vec<Move>>,
}

impl InMemoryBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pos: &Position, mv: Move) {
        self.entries.entry(position_key(pos)).or_default().push(mv);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl OpeningBook for InMemoryBook {
    fn lookup(&self, pos: &Position) -> Option<Move> {
        self.entries
            .get(&position_key(pos))?
            .choose(&mut rand::thread_rng())
            .copied()
    }
}
