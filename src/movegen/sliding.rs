use super::MoveList;
use crate::board::bitboard::{get_bit, Bitboard};
use crate::board::position::SquareIter;
use crate::board::tables::{bishop_attacks, queen_attacks, rook_attacks};
use crate::board::{Color, Move, PieceType, Position};

fn emit(
    pos: &Position,
    us: Color,
    kind: PieceType,
    attacks: fn(crate::board::Square, Bitboard) -> Bitboard,
    moves: &mut MoveList,
) {
    let enemies = pos.occupied_by(us.opposite());
    let own = pos.occupied_by(us);
    let occupied = pos.occupied();
    for from in SquareIter(pos.pieces(kind, us)) {
        for to in SquareIter(attacks(from, occupied) & !own) {
            if get_bit(enemies, to) {
                moves.push(Move::capture(from, to));
            } else {
                moves.push(Move::new(from, to));
            }
        }
    }
}

pub(super) fn generate(pos: &Position, us: Color, moves: &mut MoveList) {
    emit(pos, us, PieceType::Bishop, bishop_attacks, moves);
    emit(pos, us, PieceType::Rook, rook_attacks, moves);
    emit(pos, us, PieceType::Queen, queen_attacks, moves);
}
