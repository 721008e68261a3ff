//! Static evaluation. Scores are accumulated from White's point of view and
//! flipped at the end so the result is always relative to the side to move.
//! Every term is a pure function of the position.

use crate::board::bitboard::{bit, popcount, Bitboard};
use crate::board::position::SquareIter;
use crate::board::square::{file_of, rank_of};
use crate::board::tables::KING_ATTACKS;
use crate::board::{Color, Move, PieceType, Position, Square};
use crate::movegen;

use super::ordering::is_safe_capture;
use super::psq::psq_value;
use super::MATE_SCORE;

const ALL_KINDS: [PieceType; 6] = [
    PieceType::Pawn,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Rook,
    PieceType::Queen,
    PieceType::King,
];

const CENTER: Bitboard = bit(27) | bit(28) | bit(35) | bit(36); // d4 e4 d5 e5

pub fn piece_value(kind: PieceType) -> i32 {
    match kind {
        PieceType::Pawn => 100,
        PieceType::Knight => 300,
        PieceType::Bishop => 300,
        PieceType::Rook => 500,
        PieceType::Queen => 900,
        PieceType::King => 10_000,
        PieceType::None => 0,
    }
}

fn mobility_weight(kind: PieceType) -> i32 {
    match kind {
        PieceType::Knight => 4,
        PieceType::Bishop => 3,
        PieceType::Rook => 2,
        PieceType::Queen => 1,
        _ => 0,
    }
}

/// Side-relative score: positive favors the side to move, `-MATE_SCORE` when
/// the side to move is checkmated.
pub fn evaluate(pos: &Position) -> i32 {
    if pos.is_checkmate() {
        return -MATE_SCORE;
    }

    let mut score = 0;
    score += material_and_position(pos);
    score += mobility(pos, Color::White) - mobility(pos, Color::Black);
    score += king_safety(pos, Color::White) - king_safety(pos, Color::Black);
    score += pawn_structure(pos, Color::White) - pawn_structure(pos, Color::Black);
    score += center_control(pos, Color::White) - center_control(pos, Color::Black);
    score += development(pos, Color::White) - development(pos, Color::Black);
    score += hanging_pieces(pos);
    score += capture_exchanges(pos, Color::White) - capture_exchanges(pos, Color::Black);
    score += king_attack(pos, Color::White) - king_attack(pos, Color::Black);

    match pos.side_to_move() {
        Color::White => score,
        Color::Black => -score,
    }
}

fn material_and_position(pos: &Position) -> i32 {
    let mut score = 0;
    for color in [Color::White, Color::Black] {
        let sign = if color == Color::White { 1 } else { -1 };
        for kind in ALL_KINDS {
            for sq in SquareIter(pos.pieces(kind, color)) {
                score += sign * (piece_value(kind) + psq_value(kind, color, sq));
            }
        }
    }
    score
}

/// Weighted count of pseudo-legal destinations, knights weighted highest
/// since each blocked square costs them proportionally the most.
fn mobility(pos: &Position, color: Color) -> i32 {
    let own = pos.occupied_by(color);
    let mut score = 0;
    for kind in [
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
    ] {
        let weight = mobility_weight(kind);
        for sq in SquareIter(pos.pieces(kind, color)) {
            score += weight * popcount(pos.attacks_from(sq) & !own) as i32;
        }
    }
    score
}

fn king_safety(pos: &Position, color: Color) -> i32 {
    let Some(king) = pos.find_king(color) else {
        return 0;
    };
    let shield = popcount(KING_ATTACKS[king as usize] & pos.occupied_by(color)) as i32;
    let mut score = shield * 8;
    if pos.is_in_check(color) {
        score -= 40;
    }
    score
}

/// Squares a pawn of `color` on `sq` must pass to promote, own file plus the
/// two adjacent files.
fn passed_mask(sq: Square, color: Color) -> Bitboard {
    let file = file_of(sq) as i32;
    let mut mask = 0u64;
    for f in (file - 1).max(0)..=(file + 1).min(7) {
        for r in 0..8u8 {
            let ahead = match color {
                Color::White => r > rank_of(sq),
                Color::Black => r < rank_of(sq),
            };
            if ahead {
                mask |= bit(crate::board::square::make_square(f as u8, r));
            }
        }
    }
    mask
}

fn pawn_structure(pos: &Position, color: Color) -> i32 {
    let pawns = pos.pieces(PieceType::Pawn, color);
    let enemy_pawns = pos.pieces(PieceType::Pawn, color.opposite());
    let mut score = 0;

    for file in 0..8u8 {
        let on_file = popcount(pawns & crate::board::bitboard::file_mask(file)) as i32;
        if on_file > 1 {
            score -= 20 * (on_file - 1);
        }
    }

    for sq in SquareIter(pawns) {
        if enemy_pawns & passed_mask(sq, color) == 0 {
            let advancement = match color {
                Color::White => rank_of(sq),
                Color::Black => 7 - rank_of(sq),
            } as i32;
            score += 15 + 5 * advancement;
        }
    }
    score
}

fn center_control(pos: &Position, color: Color) -> i32 {
    let mut score = 10 * popcount(pos.occupied_by(color) & CENTER) as i32;
    for sq in SquareIter(pos.occupied_by(color)) {
        score += 5 * popcount(pos.attacks_from(sq) & CENTER) as i32;
    }
    score
}

/// Minor pieces off the back rank.
fn development(pos: &Position, color: Color) -> i32 {
    let minors = pos.pieces(PieceType::Knight, color) | pos.pieces(PieceType::Bishop, color);
    let back_rank = match color {
        Color::White => crate::board::bitboard::RANK_1,
        Color::Black => crate::board::bitboard::RANK_8,
    };
    10 * popcount(minors & !back_rank) as i32
}

/// Penalty for pieces standing on attacked squares, halved value when wholly
/// undefended, a tenth when a defender stands by. White-positive.
fn hanging_pieces(pos: &Position) -> i32 {
    let mut score = 0;
    for color in [Color::White, Color::Black] {
        let sign = if color == Color::White { -1 } else { 1 };
        let them = color.opposite();
        for kind in &ALL_KINDS[..5] {
            for sq in SquareIter(pos.pieces(*kind, color)) {
                if !pos.is_square_attacked(sq, them) {
                    continue;
                }
                let value = piece_value(*kind);
                if pos.is_square_attacked(sq, color) {
                    score += sign * (value / 10);
                } else {
                    score += sign * (value / 2);
                }
            }
        }
    }
    score
}

/// Immediate tactical chances: favorable captures available to `color`,
/// losing trades discounted.
fn capture_exchanges(pos: &Position, color: Color) -> i32 {
    let mut scratch = pos.scratch_copy();
    scratch.set_side_to_move(color);
    let mut score = 0;
    for mv in movegen::pseudo_legal_moves(&scratch) {
        if !mv.is_capture {
            continue;
        }
        let victim = victim_value(&scratch, mv);
        let attacker = piece_value(scratch.piece_at(mv.from).kind);
        if is_safe_capture(&scratch, mv) {
            score += victim / 20;
        } else {
            score -= (attacker - victim) / 20;
        }
    }
    score
}

fn victim_value(pos: &Position, mv: Move) -> i32 {
    if mv.is_en_passant {
        piece_value(PieceType::Pawn)
    } else {
        piece_value(pos.piece_at(mv.to).kind)
    }
}

fn chebyshev(a: Square, b: Square) -> i32 {
    let df = (file_of(a) as i32 - file_of(b) as i32).abs();
    let dr = (rank_of(a) as i32 - rank_of(b) as i32).abs();
    df.max(dr)
}

/// Pressure on the enemy king: pieces bearing on its neighborhood versus
/// defenders, plus a proximity bonus for close attackers.
fn king_attack(pos: &Position, color: Color) -> i32 {
    let Some(enemy_king) = pos.find_king(color.opposite()) else {
        return 0;
    };
    let zone = KING_ATTACKS[enemy_king as usize];
    let mut attackers = 0;
    let mut proximity = 0;
    for kind in [
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
    ] {
        for sq in SquareIter(pos.pieces(kind, color)) {
            if pos.attacks_from(sq) & zone != 0 {
                attackers += 1;
            }
            proximity += (7 - chebyshev(sq, enemy_king)).max(0);
        }
    }
    let mut defenders = 0;
    for sq in SquareIter(zone & pos.occupied_by(color.opposite())) {
        if pos.is_square_attacked(sq, color.opposite()) {
            defenders += 1;
        }
    }
    attackers * 15 - defenders * 10 + proximity * 2
}
