//! Pseudo-legal generation per piece type with a self-check filter on top.
//!
//! Generation order is fixed (pawns, knights, bishops, rooks, queens, king,
//! castles last) so downstream tie-breaking on equal ordering scores is
//! deterministic.

mod king;
mod knight;
mod pawn;
mod sliding;

use smallvec::SmallVec;

use crate::board::{Move, Position};

/// Move buffer sized so typical positions never spill to the heap.
pub type MoveList = SmallVec<[Move; 64]>;

/// Every move reachable by piece movement rules alone. May leave or put the
/// mover's own king in check.
pub fn pseudo_legal_moves(pos: &Position) -> MoveList {
    let mut moves = MoveList::new();
    let us = pos.side_to_move();
    pawn::generate(pos, us, &mut moves);
    knight::generate(pos, us, &mut moves);
    sliding::generate(pos, us, &mut moves);
    king::generate(pos, us, &mut moves);
    moves
}

/// Pseudo-legal moves minus those that leave the mover's king attacked.
pub fn legal_moves(pos: &Position) -> MoveList {
    pseudo_legal_moves(pos)
        .into_iter()
        .filter(|&mv| leaves_king_safe(pos, mv))
        .collect()
}

/// Full legality check for a single externally supplied move.
pub fn is_legal_move(pos: &Position, mv: Move) -> bool {
    pseudo_legal_moves(pos).contains(&mv) && leaves_king_safe(pos, mv)
}

fn leaves_king_safe(pos: &Position, mv: Move) -> bool {
    let mover = pos.side_to_move();
    let mut scratch = pos.scratch_copy();
    scratch.make_move(mv);
    !scratch.is_in_check(mover)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{square, Color, Piece, PieceType};

    fn names(moves: &MoveList) -> Vec<String> {
        moves.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let pos = Position::new();
        let moves = legal_moves(&pos);
        assert_eq!(moves.len(), 20);
        assert_eq!(moves.len(), pseudo_legal_moves(&pos).len());
        // Pawns are emitted before knights.
        assert!(moves[..16].iter().all(|m| pos.piece_at(m.from).kind == PieceType::Pawn));
    }

    #[test]
    fn pinned_piece_cannot_move_off_the_line() {
        // Knight on e2 is pinned by the rook on e8.
        let pos = Position::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        let moves = legal_moves(&pos);
        assert!(moves.iter().all(|m| m.from != 12));
        assert!(pseudo_legal_moves(&pos).iter().any(|m| m.from == 12));
    }

    #[test]
    fn in_check_only_resolving_moves_survive() {
        // Rook gives check on the e-file; block, capture, or step aside.
        let pos = Position::from_fen("4r1k1/8/8/8/8/8/3B4/4K3 w - - 0 1").unwrap();
        let moves = legal_moves(&pos);
        for mv in &moves {
            let mut scratch = pos.clone();
            scratch.make_move(*mv);
            assert!(!scratch.is_in_check(Color::White), "{} leaves check", mv);
        }
        assert!(names(&moves).contains(&"d2e3".to_string())); // block
    }

    #[test]
    fn promotions_fan_out_to_four_pieces() {
        let mut pos = Position::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let moves = legal_moves(&pos);
        let promos: Vec<_> = moves.iter().filter(|m| m.is_promotion()).collect();
        assert_eq!(promos.len(), 4);
        assert_eq!(promos[0].promotion, PieceType::Queen);
        pos.make_move(*promos[0]);
        assert_eq!(pos.piece_at(56), Piece::new(PieceType::Queen, Color::White));
    }

    #[test]
    fn en_passant_is_generated_only_while_available() {
        let pos =
            Position::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3")
                .unwrap();
        assert!(legal_moves(&pos).iter().any(|m| m.is_en_passant && m.to == 43));

        let gone =
            Position::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq - 0 3")
                .unwrap();
        assert!(legal_moves(&gone).iter().all(|m| !m.is_en_passant));
    }

    #[test]
    fn is_legal_move_rejects_fabricated_moves() {
        let pos = Position::new();
        assert!(is_legal_move(&pos, Move::new(12, 28)));
        assert!(!is_legal_move(&pos, Move::new(12, 36))); // e2e5
        assert!(!is_legal_move(&pos, Move::new(square::E1, 12))); // own pawn there
    }

    #[test]
    fn perft_from_start() {
        let mut pos = Position::new();
        assert_eq!(pos.perft(1), 20);
        assert_eq!(pos.perft(2), 400);
        assert_eq!(pos.perft(3), 8_902);
        assert_eq!(pos.perft(4), 197_281);
    }

    #[test]
    fn perft_kiwipete_depth_two() {
        // Castling, en passant and promotion all live in this position.
        let mut pos = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        assert_eq!(pos.perft(1), 48);
        assert_eq!(pos.perft(2), 2_039);
    }
}
