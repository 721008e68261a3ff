use super::*;

#[test]
fn en_passant_capture_removes_bypassed_pawn() {
    // White pawn on e5, Black just played d7d5.
    let mut pos =
        Position::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3")
            .unwrap();
    let before = pos.clone();

    let mv = Move::en_passant(36, 43); // e5xd6
    pos.make_move(mv);
    assert_eq!(pos.piece_at(43), Piece::new(PieceType::Pawn, Color::White));
    assert!(pos.piece_at(35).is_none()); // d5 pawn is gone
    assert!(pos.piece_at(36).is_none());
    assert!(pos.masks_consistent());

    pos.unmake_move(mv);
    assert_eq!(pos, before);
    assert_eq!(pos.piece_at(35), Piece::new(PieceType::Pawn, Color::Black));
}

#[test]
fn black_en_passant_round_trip() {
    // Black pawn on d4, White just played e2e4.
    let mut pos =
        Position::from_fen("rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 3")
            .unwrap();
    let before = pos.clone();

    let mv = Move::en_passant(27, 20); // d4xe3
    pos.make_move(mv);
    assert_eq!(pos.piece_at(20), Piece::new(PieceType::Pawn, Color::Black));
    assert!(pos.piece_at(28).is_none()); // e4 pawn is gone

    pos.unmake_move(mv);
    assert_eq!(pos, before);
}

#[test]
fn pawn_on_e4_takes_d5_as_a_plain_capture() {
    // After d7d5 the e4 pawn captures on d5 directly; the ep target on d6 is
    // irrelevant to this move.
    let mut pos =
        Position::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2")
            .unwrap();
    let before = pos.clone();

    let mv = Move::capture(28, 35); // exd5
    pos.make_move(mv);
    assert_eq!(pos.piece_at(35), Piece::new(PieceType::Pawn, Color::White));
    assert_eq!(pos.en_passant_square(), None);

    pos.unmake_move(mv);
    assert_eq!(pos, before);
}
