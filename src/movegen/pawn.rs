use super::MoveList;
use crate::board::bitboard::get_bit;
use crate::board::position::SquareIter;
use crate::board::square::rank_of;
use crate::board::tables::PAWN_ATTACKS;
use crate::board::{Color, Move, PieceType, Position, Square};

/// Promotion fan-out, queen first.
fn push_promotions(moves: &mut MoveList, from: Square, to: Square, is_capture: bool) {
    for kind in [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ] {
        moves.push(Move::promotion(from, to, kind, is_capture));
    }
}

pub(super) fn generate(pos: &Position, us: Color, moves: &mut MoveList) {
    let (push, start_rank, promo_rank): (i8, u8, u8) = match us {
        Color::White => (8, 1, 7),
        Color::Black => (-8, 6, 0),
    };
    let enemies = pos.occupied_by(us.opposite());
    let empty = !pos.occupied();

    for from in SquareIter(pos.pieces(PieceType::Pawn, us)) {
        // Pawns never stand on their promotion rank, so a single push always
        // stays on the board.
        let one = (from as i8 + push) as Square;
        if get_bit(empty, one) {
            if rank_of(one) == promo_rank {
                push_promotions(moves, from, one, false);
            } else {
                moves.push(Move::new(from, one));
                if rank_of(from) == start_rank {
                    let two = (one as i8 + push) as Square;
                    if get_bit(empty, two) {
                        moves.push(Move::new(from, two));
                    }
                }
            }
        }

        let attacks = PAWN_ATTACKS[us.index()][from as usize];
        for to in SquareIter(attacks & enemies) {
            if rank_of(to) == promo_rank {
                push_promotions(moves, from, to, true);
            } else {
                moves.push(Move::capture(from, to));
            }
        }

        if let Some(ep) = pos.en_passant_square() {
            if get_bit(attacks, ep) {
                moves.push(Move::en_passant(from, ep));
            }
        }
    }
}
