use super::*;

mod en_passant;

/// Bare-kings board with extra pieces placed from `(square, fen char)` pairs.
pub fn board_with(side: Color, pieces: &[(Square, char)]) -> Position {
    let mut pos = Position::empty();
    pos.set_piece(square::E1, Piece::new(PieceType::King, Color::White));
    pos.set_piece(square::E8, Piece::new(PieceType::King, Color::Black));
    for &(sq, c) in pieces {
        pos.set_piece(sq, Piece::from_char(c).unwrap());
    }
    pos.set_side_to_move(side);
    pos
}
