use super::MoveList;
use crate::board::bitboard::get_bit;
use crate::board::position::SquareIter;
use crate::board::tables::KNIGHT_ATTACKS;
use crate::board::{Color, Move, PieceType, Position};

pub(super) fn generate(pos: &Position, us: Color, moves: &mut MoveList) {
    let enemies = pos.occupied_by(us.opposite());
    let own = pos.occupied_by(us);
    for from in SquareIter(pos.pieces(PieceType::Knight, us)) {
        for to in SquareIter(KNIGHT_ATTACKS[from as usize] & !own) {
            if get_bit(enemies, to) {
                moves.push(Move::capture(from, to));
            } else {
                moves.push(Move::new(from, to));
            }
        }
    }
}
