use fianchetto::board::{Move, Position};
use fianchetto::book::{InMemoryBook, OpeningBook};
use fianchetto::movegen;
use fianchetto::search::{SearchEngine, INFINITY};

const SAMPLE_FENS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
    "4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1",
    "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1",
    "6k1/5ppp/8/8/8/8/8/4R1K1 w - - 0 1",
];

#[test]
fn pruning_never_changes_the_score() {
    for fen in SAMPLE_FENS {
        for depth in 1..=3u32 {
            for maximizing in [true, false] {
                let mut pruned_pos = Position::from_fen(fen).unwrap();
                let mut engine = SearchEngine::new();
                let pruned =
                    engine.alpha_beta(&mut pruned_pos, depth, -INFINITY, INFINITY, maximizing);

                let mut full_pos = Position::from_fen(fen).unwrap();
                let mut reference = SearchEngine::new();
                let full = reference.minimax(&mut full_pos, depth, maximizing);

                assert_eq!(
                    pruned, full,
                    "{} depth {} maximizing {}",
                    fen, depth, maximizing
                );
            }
        }
    }
}

#[test]
fn search_restores_the_position_it_was_given() {
    for fen in SAMPLE_FENS {
        let mut pos = Position::from_fen(fen).unwrap();
        let mut engine = SearchEngine::new();
        engine.search(&mut pos, 3);
        assert_eq!(pos.to_fen(), *fen);
        assert!(pos.masks_consistent());
    }
}

#[test]
fn every_legal_move_round_trips_everywhere() {
    for fen in SAMPLE_FENS {
        let pos = Position::from_fen(fen).unwrap();
        for mv in movegen::legal_moves(&pos) {
            let mut copy = pos.clone();
            copy.make_move(mv);
            assert!(copy.masks_consistent(), "{} after {}", fen, mv);
            copy.unmake_move(mv);
            assert_eq!(copy, pos, "{} round-trip {}", fen, mv);
        }
    }
}

#[test]
fn book_move_short_circuits_the_tree_search() {
    let mut book = InMemoryBook::new();
    let start = Position::new();
    let nf3 = Move::new(6, 21);
    book.insert(&start, nf3);

    let mut engine = SearchEngine::with_book(Box::new(book));
    let mut pos = Position::new();
    let result = engine.search(&mut pos, 4);

    assert_eq!(result.best_move, Some(nf3));
    assert_eq!(result.nodes_searched, 0);
    assert_eq!(result.depth, 0);
}

#[test]
fn illegal_book_suggestion_falls_back_to_search() {
    struct BadBook;
    impl OpeningBook for BadBook {
        fn lookup(&self, _pos: &Position) -> Option<Move> {
            Some(Move::new(0, 63)) // Ra1h8 is never legal here
        }
    }

    let mut engine = SearchEngine::with_book(Box::new(BadBook));
    let mut pos = Position::new();
    let result = engine.search(&mut pos, 2);

    assert_ne!(result.best_move, Some(Move::new(0, 63)));
    assert!(result.nodes_searched > 0);
    assert!(movegen::is_legal_move(&Position::new(), result.best_move.unwrap()));
}

#[test]
fn deeper_search_visits_more_nodes() {
    let mut engine = SearchEngine::new();
    let shallow = engine.search(&mut Position::new(), 1).nodes_searched;
    engine.reset_tables();
    let deep = engine.search(&mut Position::new(), 3).nodes_searched;
    assert!(deep > shallow);
}
