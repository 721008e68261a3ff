//! Fixed-depth alpha-beta search over an exclusively owned `Position`.
//!
//! The search is single-threaded and runs to completion; `time_limit_ms` is
//! carried as configuration but never enforced. Killer and history tables
//! live on the engine and persist across calls, so ordering knowledge carries
//! over between successive searches in a game.

pub mod eval;
pub mod ordering;
pub mod psq;

use log::{debug, info};

use crate::board::{Move, Position};
use crate::book::OpeningBook;
use crate::movegen;

use self::ordering::{HistoryTable, KillerTable};

pub const MATE_SCORE: i32 = 10_000;
pub const DRAW_SCORE: i32 = 0;

/// Bound wide enough to dominate every evaluation, small enough to negate.
pub const INFINITY: i32 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
    pub depth: u32,
    pub nodes_searched: u64,
}

pub struct SearchEngine {
    pub max_depth: u32,
    /// Accepted for configuration parity; the search never checks the clock.
    pub time_limit_ms: u64,
    nodes: u64,
    killers: KillerTable,
    history: HistoryTable,
    book: Option<Box<dyn OpeningBook>>,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine {
    pub fn new() -> Self {
        Self {
            max_depth: 4,
            time_limit_ms: 5_000,
            nodes: 0,
            killers: KillerTable::new(),
            history: HistoryTable::new(),
            book: None,
        }
    }

    pub fn with_book(book: Box<dyn OpeningBook>) -> Self {
        Self {
            book: Some(book),
            ..Self::new()
        }
    }

    pub fn set_book(&mut self, book: Option<Box<dyn OpeningBook>>) {
        self.book = book;
    }

    /// Ordering knowledge persists across searches by design; call this for
    /// determinism across unrelated positions.
    pub fn reset_tables(&mut self) {
        self.killers = KillerTable::new();
        self.history = HistoryTable::new();
    }

    /// Pick the best move at fixed `depth`. A legal book move short-circuits
    /// the tree search entirely. With no legal moves the result carries the
    /// mate or draw score and no move.
    pub fn search(&mut self, pos: &mut Position, depth: u32) -> SearchResult {
        let depth = depth.max(1);
        self.nodes = 0;

        if let Some(book_move) = self.book_move(pos) {
            info!("book move {}", book_move);
            return SearchResult {
                best_move: Some(book_move),
                score: DRAW_SCORE,
                depth: 0,
                nodes_searched: 0,
            };
        }

        let mut moves = movegen::legal_moves(pos);
        if moves.is_empty() {
            let score = if pos.is_in_check(pos.side_to_move()) {
                -MATE_SCORE
            } else {
                DRAW_SCORE
            };
            return SearchResult {
                best_move: None,
                score,
                depth,
                nodes_searched: 0,
            };
        }

        ordering::order_moves(pos, &mut moves, depth, &self.killers, &self.history, None);

        let mut best_score = -INFINITY;
        let mut best_move = moves[0];
        for mv in moves {
            pos.make_move(mv);
            let score = -self.alpha_beta(pos, depth - 1, -INFINITY, INFINITY, false);
            pos.unmake_move(mv);
            debug!("root {} -> {}", mv, score);
            // Strictly greater: the earliest best-scoring move wins ties.
            if score > best_score {
                best_score = score;
                best_move = mv;
            }
        }

        info!(
            "depth {} best {} score {} nodes {}",
            depth, best_move, best_score, self.nodes
        );
        SearchResult {
            best_move: Some(best_move),
            score: best_score,
            depth,
            nodes_searched: self.nodes,
        }
    }

    fn book_move(&self, pos: &Position) -> Option<Move> {
        let mv = self.book.as_ref()?.lookup(pos)?;
        movegen::is_legal_move(pos, mv).then_some(mv)
    }

    /// Fail-hard alpha-beta with explicit maximizing/minimizing branches.
    pub fn alpha_beta(
        &mut self,
        pos: &mut Position,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes += 1;

        if depth == 0 {
            return eval::evaluate(pos);
        }

        let mut moves = movegen::legal_moves(pos);
        if moves.is_empty() {
            return if pos.is_in_check(pos.side_to_move()) {
                -MATE_SCORE
            } else {
                DRAW_SCORE
            };
        }

        let book_move = self.book.as_ref().and_then(|b| b.lookup(pos));
        ordering::order_moves(
            pos,
            &mut moves,
            depth,
            &self.killers,
            &self.history,
            book_move,
        );

        if maximizing {
            let mut best = -INFINITY;
            for mv in moves {
                pos.make_move(mv);
                let score = self.alpha_beta(pos, depth - 1, alpha, beta, false);
                pos.unmake_move(mv);
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    self.record_cutoff(mv, depth);
                    break;
                }
            }
            best
        } else {
            let mut best = INFINITY;
            for mv in moves {
                pos.make_move(mv);
                let score = self.alpha_beta(pos, depth - 1, alpha, beta, true);
                pos.unmake_move(mv);
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    self.record_cutoff(mv, depth);
                    break;
                }
            }
            best
        }
    }

    /// Cutoff bookkeeping: only quiet moves feed the killer and history
    /// tables; captures are already ordered by their own band.
    fn record_cutoff(&mut self, mv: Move, depth: u32) {
        if !mv.is_capture {
            self.killers.record(depth, mv);
            self.history.record(mv, depth);
        }
    }

    /// Full-width minimax without pruning. Same terminal handling as
    /// `alpha_beta`; kept as the reference the pruned search must agree with.
    pub fn minimax(&mut self, pos: &mut Position, depth: u32, maximizing: bool) -> i32 {
        self.nodes += 1;

        if depth == 0 {
            return eval::evaluate(pos);
        }

        let moves = movegen::legal_moves(pos);
        if moves.is_empty() {
            return if pos.is_in_check(pos.side_to_move()) {
                -MATE_SCORE
            } else {
                DRAW_SCORE
            };
        }

        let mut best = if maximizing { -INFINITY } else { INFINITY };
        for mv in moves {
            pos.make_move(mv);
            let score = self.minimax(pos, depth - 1, !maximizing);
            pos.unmake_move(mv);
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;

    #[test]
    fn finds_mate_in_one() {
        let mut pos = Position::from_fen("6k1/5ppp/8/8/8/8/8/4R1K1 w - - 0 1").unwrap();
        let mut engine = SearchEngine::new();
        let result = engine.search(&mut pos, 2);
        assert_eq!(result.best_move.unwrap().to_string(), "e1e8");
        assert!(result.nodes_searched > 0);
        // The search left the position untouched.
        assert_eq!(pos.side_to_move(), Color::White);
        assert_eq!(pos.to_fen(), "6k1/5ppp/8/8/8/8/8/4R1K1 w - - 0 1");
    }

    #[test]
    fn checkmated_side_reports_mate_score_and_no_move() {
        let mut pos = Position::from_fen("4R1k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        let mut engine = SearchEngine::new();
        let result = engine.search(&mut pos, 3);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, -MATE_SCORE);
        assert_eq!(result.nodes_searched, 0);
    }

    #[test]
    fn stalemate_reports_draw() {
        let mut pos = Position::from_fen("k7/2Q5/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        let mut engine = SearchEngine::new();
        let result = engine.search(&mut pos, 3);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, DRAW_SCORE);
    }

    #[test]
    fn grabs_a_hanging_queen() {
        // Rook takes the undefended queen on d5.
        let mut pos = Position::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").unwrap();
        let mut engine = SearchEngine::new();
        let result = engine.search(&mut pos, 1);
        assert_eq!(result.best_move.unwrap().to_string(), "d1d5");
        assert!(result.score > 0);
    }

    #[test]
    fn tables_persist_across_searches_until_reset() {
        fn any_history(engine: &SearchEngine) -> bool {
            (0..64).any(|f| (0..64).any(|t| engine.history.get(Move::new(f, t)) > 0))
        }

        let mut pos = Position::new();
        let mut engine = SearchEngine::new();
        engine.search(&mut pos, 3);
        assert!(any_history(&engine));
        engine.reset_tables();
        assert!(!any_history(&engine));
    }

    #[test]
    fn warmed_tables_do_not_change_the_search_score() {
        // Every root move gets the full window, so ordering state affects
        // node counts and tie order only, never the returned value.
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let mut cold_engine = SearchEngine::new();
        let cold = cold_engine.search(&mut Position::from_fen(fen).unwrap(), 3);

        let mut warm_engine = SearchEngine::new();
        warm_engine.search(&mut Position::new(), 3);
        let warm = warm_engine.search(&mut Position::from_fen(fen).unwrap(), 3);

        assert_eq!(cold.score, warm.score);
    }
}
