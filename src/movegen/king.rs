use super::MoveList;
use crate::board::bitboard::{bit, get_bit};
use crate::board::position::SquareIter;
use crate::board::square;
use crate::board::tables::KING_ATTACKS;
use crate::board::{Color, Move, PieceType, Position, Square};

pub(super) fn generate(pos: &Position, us: Color, moves: &mut MoveList) {
    let enemies = pos.occupied_by(us.opposite());
    let own = pos.occupied_by(us);
    for from in SquareIter(pos.pieces(PieceType::King, us)) {
        for to in SquareIter(KING_ATTACKS[from as usize] & !own) {
            if get_bit(enemies, to) {
                moves.push(Move::capture(from, to));
            } else {
                moves.push(Move::new(from, to));
            }
        }
    }
    generate_castles(pos, us, moves);
}

/// A castle needs the right, an empty corridor to the rook, and the king's
/// start, transit and destination squares free of enemy attack. The rook's
/// b-file square may be attacked on the queenside.
fn generate_castles(pos: &Position, us: Color, moves: &mut MoveList) {
    let (king_sq, kingside, queenside) = match us {
        Color::White => (
            square::E1,
            pos.castling_rights().white_kingside,
            pos.castling_rights().white_queenside,
        ),
        Color::Black => (
            square::E8,
            pos.castling_rights().black_kingside,
            pos.castling_rights().black_queenside,
        ),
    };
    if pos.piece_at(king_sq).kind != PieceType::King {
        return;
    }
    let them = us.opposite();
    let rooks = pos.pieces(PieceType::Rook, us);

    if kingside
        && get_bit(rooks, king_sq + 3)
        && corridor_empty(pos, &[king_sq + 1, king_sq + 2])
        && !pos.is_square_attacked(king_sq, them)
        && !pos.is_square_attacked(king_sq + 1, them)
        && !pos.is_square_attacked(king_sq + 2, them)
    {
        moves.push(Move::castle(king_sq, king_sq + 2));
    }

    if queenside
        && get_bit(rooks, king_sq - 4)
        && corridor_empty(pos, &[king_sq - 1, king_sq - 2, king_sq - 3])
        && !pos.is_square_attacked(king_sq, them)
        && !pos.is_square_attacked(king_sq - 1, them)
        && !pos.is_square_attacked(king_sq - 2, them)
    {
        moves.push(Move::castle(king_sq, king_sq - 2));
    }
}

fn corridor_empty(pos: &Position, squares: &[Square]) -> bool {
    squares.iter().all(|&sq| pos.occupied() & bit(sq) == 0)
}
