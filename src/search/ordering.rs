//! Move ordering: book move, captures (safe before unsafe, MVV-LVA within),
//! killers, then history with the destination's positional value as the last
//! tiebreak. A stable sort keeps generation order among equals, so ordering
//! only ever improves pruning and never changes which move wins a tie.

use std::cmp::Reverse;

use crate::board::{Color, Move, PieceType, Position, Square};
use crate::movegen::MoveList;

use super::eval::piece_value;
use super::psq::psq_value;

/// Deepest remaining depth the killer table tracks.
pub const MAX_KILLER_DEPTH: usize = 32;

const BOOK_SCORE: i32 = 1_000_000_000;
const SAFE_CAPTURE_BASE: i32 = 800_000_000;
const CAPTURE_BASE: i32 = 700_000_000;
const KILLER_SCORE: i32 = 600_000_000;
const HISTORY_SCALE: i32 = 1_000;

/// Quiet moves that caused a cutoff, two per remaining depth, most recent
/// first.
pub struct KillerTable {
    slots: [[Option<Move>; 2]; MAX_KILLER_DEPTH],
}

impl KillerTable {
    pub fn new() -> Self {
        Self {
            slots: [[None; 2]; MAX_KILLER_DEPTH],
        }
    }

    fn slot(depth: u32) -> usize {
        (depth as usize).min(MAX_KILLER_DEPTH - 1)
    }

    pub fn record(&mut self, depth: u32, mv: Move) {
        let slot = &mut self.slots[Self::slot(depth)];
        if slot[0] != Some(mv) {
            slot[1] = slot[0];
            slot[0] = Some(mv);
        }
    }

    pub fn contains(&self, depth: u32, mv: Move) -> bool {
        self.slots[Self::slot(depth)].contains(&Some(mv))
    }
}

/// Cutoff counts per (from, to) pair. Scores grow by depth squared and the
/// whole table is halved when any entry crosses the overflow threshold, so
/// old cutoffs decay instead of dominating forever.
pub struct HistoryTable {
    scores: [[i32; 64]; 64],
}

const HISTORY_OVERFLOW: i32 = 400_000;

impl HistoryTable {
    pub fn new() -> Self {
        Self {
            scores: [[0; 64]; 64],
        }
    }

    pub fn record(&mut self, mv: Move, depth: u32) {
        let cell = &mut self.scores[mv.from as usize][mv.to as usize];
        *cell += (depth * depth) as i32;
        if *cell > HISTORY_OVERFLOW {
            for row in &mut self.scores {
                for score in row.iter_mut() {
                    *score /= 2;
                }
            }
        }
    }

    pub fn get(&self, mv: Move) -> i32 {
        self.scores[mv.from as usize][mv.to as usize]
    }
}

fn capture_victim(pos: &Position, mv: Move) -> (PieceType, Square) {
    if mv.is_en_passant {
        let victim_sq = match pos.side_to_move() {
            Color::White => mv.to - 8,
            Color::Black => mv.to + 8,
        };
        (PieceType::Pawn, victim_sq)
    } else {
        (pos.piece_at(mv.to).kind, mv.to)
    }
}

/// A capture is safe when the victim is undefended, or when the trade gains
/// or ties material even against a defended victim.
pub fn is_safe_capture(pos: &Position, mv: Move) -> bool {
    let attacker = pos.piece_at(mv.from);
    let (victim, victim_sq) = capture_victim(pos, mv);
    let defended = pos.is_square_attacked(victim_sq, attacker.color.opposite());
    !defended || piece_value(victim) >= piece_value(attacker.kind)
}

fn score_move(
    pos: &Position,
    mv: Move,
    depth: u32,
    killers: &KillerTable,
    history: &HistoryTable,
    book_move: Option<Move>,
) -> i32 {
    if book_move == Some(mv) {
        return BOOK_SCORE;
    }
    if mv.is_capture {
        let attacker = pos.piece_at(mv.from);
        let (victim, _) = capture_victim(pos, mv);
        let mvv_lva = piece_value(victim) * 10 - piece_value(attacker.kind);
        let base = if is_safe_capture(pos, mv) {
            SAFE_CAPTURE_BASE
        } else {
            CAPTURE_BASE
        };
        return base + mvv_lva;
    }
    if killers.contains(depth, mv) {
        return KILLER_SCORE;
    }
    let mover = pos.piece_at(mv.from);
    history.get(mv) * HISTORY_SCALE + psq_value(mover.kind, mover.color, mv.to)
}

/// Sort `moves` best-first for the position at `depth` remaining plies.
pub fn order_moves(
    pos: &Position,
    moves: &mut MoveList,
    depth: u32,
    killers: &KillerTable,
    history: &HistoryTable,
    book_move: Option<Move>,
) {
    moves.sort_by_key(|&mv| Reverse(score_move(pos, mv, depth, killers, history, book_move)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::legal_moves;

    #[test]
    fn killer_slots_shift_most_recent_first() {
        let mut killers = KillerTable::new();
        let a = Move::new(0, 1);
        let b = Move::new(2, 3);
        let c = Move::new(4, 5);
        killers.record(3, a);
        killers.record(3, b);
        assert!(killers.contains(3, a) && killers.contains(3, b));
        killers.record(3, c);
        assert!(killers.contains(3, b) && killers.contains(3, c));
        assert!(!killers.contains(3, a));
        // Re-recording the newest entry does not evict the other slot.
        killers.record(3, c);
        assert!(killers.contains(3, b));
        // Other depths are unaffected.
        assert!(!killers.contains(4, c));
    }

    #[test]
    fn history_accumulates_and_halves_on_overflow() {
        let mut history = HistoryTable::new();
        let hot = Move::new(10, 20);
        let warm = Move::new(30, 40);
        history.record(warm, 4);
        assert_eq!(history.get(warm), 16);
        while history.get(hot) <= HISTORY_OVERFLOW / 2 {
            history.record(hot, 31);
        }
        let before_warm = history.get(warm);
        while history.get(warm) == before_warm {
            history.record(hot, 31);
        }
        // The halving hit every entry, not just the overflowing one.
        assert_eq!(history.get(warm), before_warm / 2);
    }

    #[test]
    fn captures_outrank_quiet_moves_and_safe_outranks_unsafe() {
        // White queen can take a defended pawn (losing) or an undefended
        // knight (safe).
        let pos =
            Position::from_fen("4k3/2p5/3p4/8/8/3Q3n/8/4K3 w - - 0 1").unwrap();
        assert!(is_safe_capture(&pos, Move::capture(19, 23)));
        assert!(!is_safe_capture(&pos, Move::capture(19, 43)));

        let mut moves = legal_moves(&pos);
        let killers = KillerTable::new();
        let history = HistoryTable::new();
        order_moves(&pos, &mut moves, 4, &killers, &history, None);

        assert!(moves[0].is_capture);
        assert_eq!(moves[0].to, 23); // Qxh3, undefended knight
        assert_eq!(moves[1].to, 43); // Qxd6, defended pawn
        assert!(moves.iter().skip(2).all(|m| !m.is_capture));
    }

    #[test]
    fn book_move_jumps_the_queue() {
        let pos = Position::new();
        let mut moves = legal_moves(&pos);
        let killers = KillerTable::new();
        let history = HistoryTable::new();
        let book = Move::new(6, 21); // Ng1f3
        order_moves(&pos, &mut moves, 4, &killers, &history, Some(book));
        assert_eq!(moves[0], book);
    }

    #[test]
    fn killer_beats_plain_history() {
        let pos = Position::new();
        let mut moves = legal_moves(&pos);
        let mut killers = KillerTable::new();
        let mut history = HistoryTable::new();
        let killer = Move::new(8, 16); // a2a3
        let busy = Move::new(15, 23); // h2h3
        killers.record(4, killer);
        history.record(busy, 5);
        order_moves(&pos, &mut moves, 4, &killers, &history, None);
        let killer_idx = moves.iter().position(|&m| m == killer).unwrap();
        let busy_idx = moves.iter().position(|&m| m == busy).unwrap();
        assert!(killer_idx < busy_idx);
    }

    #[test]
    fn stable_sort_keeps_generation_order_for_equal_scores() {
        let pos = Position::new();
        let mut moves = legal_moves(&pos);
        let killers = KillerTable::new();
        let history = HistoryTable::new();
        let baseline = moves.clone();
        order_moves(&pos, &mut moves, 4, &killers, &history, None);
        // Among zero-history quiet moves with equal positional value the
        // generated order survives.
        let first_a3 = baseline.iter().position(|m| m.to == 16).unwrap();
        let first_h3 = baseline.iter().position(|m| m.to == 23).unwrap();
        assert!(first_a3 < first_h3);
        let a3 = moves.iter().position(|m| m.to == 16).unwrap();
        let h3 = moves.iter().position(|m| m.to == 23).unwrap();
        assert!(a3 < h3);
    }
}
