pub mod bitboard;
pub mod fen;
pub mod moves;
pub mod piece;
pub mod position;
pub mod square;
pub mod tables;

pub use bitboard::Bitboard;
pub use fen::{FenError, START_FEN};
pub use moves::Move;
pub use piece::{Color, Piece, PieceType};
pub use position::{CastlingRights, Position, SquareIter};
pub use square::Square;

#[cfg(test)]
mod tests;
