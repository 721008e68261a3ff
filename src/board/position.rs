use std::fmt;

use super::bitboard::{bit, get_bit, pop_lsb, popcount, Bitboard, RANK_2, RANK_7};
use super::moves::Move;
use super::piece::{Color, Piece, PieceType};
use super::square::{self, Square};
use super::tables::{
    bishop_attacks, queen_attacks, rook_attacks, KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS,
};

/// Kingside/queenside castling availability for both colors. Rights are only
/// ever cleared; nothing restores them except `unmake_move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub fn all() -> Self {
        Self {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }

    pub fn none() -> Self {
        Self {
            white_kingside: false,
            white_queenside: false,
            black_kingside: false,
            black_queenside: false,
        }
    }

    pub fn kingside(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_kingside,
            Color::Black => self.black_kingside,
        }
    }

    pub fn queenside(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_queenside,
            Color::Black => self.black_queenside,
        }
    }

    fn clear_color(&mut self, color: Color) {
        match color {
            Color::White => {
                self.white_kingside = false;
                self.white_queenside = false;
            }
            Color::Black => {
                self.black_kingside = false;
                self.black_queenside = false;
            }
        }
    }
}

/// State saved before a move so `unmake_move` can restore it exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Undo {
    captured: Piece,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u16,
    white_occ: Bitboard,
    black_occ: Bitboard,
    all_occ: Bitboard,
}

/// Mutable game state: 12 per-(type,color) occupancy masks plus derived
/// combined masks, side to move, castling rights, en-passant target, move
/// counters, and the undo history.
///
/// Mutation goes exclusively through strictly nested `make_move`/`unmake_move`
/// pairs; every unmake reverts the most recent make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    piece_bb: [Bitboard; 12],
    white_occ: Bitboard,
    black_occ: Bitboard,
    all_occ: Bitboard,
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u16,
    history: Vec<Undo>,
}

#[inline(always)]
fn bb_index(kind: PieceType, color: Color) -> usize {
    color.index() * 6 + kind.index()
}

/// Square of the pawn removed by an en-passant capture landing on `to`.
#[inline(always)]
fn ep_victim_square(to: Square, mover: Color) -> Square {
    match mover {
        Color::White => to - 8,
        Color::Black => to + 8,
    }
}

/// Rook relocation for a castle identified by the king's destination.
fn rook_castle_squares(king_to: Square) -> (Square, Square) {
    match king_to {
        square::G1 => (square::H1, square::F1),
        square::C1 => (square::A1, square::D1),
        square::G8 => (square::H8, square::F8),
        square::C8 => (square::A8, square::D8),
        _ => unreachable!("castle move with king destination {}", king_to),
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// Standard starting arrangement, White to move.
    pub fn new() -> Self {
        let mut piece_bb = [0u64; 12];
        piece_bb[0] = RANK_2; // white pawns
        piece_bb[1] = bit(square::B1) | bit(square::G1);
        piece_bb[2] = bit(square::C1) | bit(square::F1);
        piece_bb[3] = bit(square::A1) | bit(square::H1);
        piece_bb[4] = bit(square::D1);
        piece_bb[5] = bit(square::E1);
        piece_bb[6] = RANK_7; // black pawns
        piece_bb[7] = bit(square::B8) | bit(square::G8);
        piece_bb[8] = bit(square::C8) | bit(square::F8);
        piece_bb[9] = bit(square::A8) | bit(square::H8);
        piece_bb[10] = bit(square::D8);
        piece_bb[11] = bit(square::E8);

        let mut pos = Self {
            piece_bb,
            white_occ: 0,
            black_occ: 0,
            all_occ: 0,
            side_to_move: Color::White,
            castling: CastlingRights::all(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
        };
        pos.update_occupancy();
        pos
    }

    /// Board with no pieces and no castling rights. Used by tests and FEN
    /// parsing as a base for `set_piece`.
    pub fn empty() -> Self {
        Self {
            piece_bb: [0; 12],
            white_occ: 0,
            black_occ: 0,
            all_occ: 0,
            side_to_move: Color::White,
            castling: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
        }
    }

    // ---- accessors ----------------------------------------------------

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    pub fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.castling = rights;
    }

    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn set_en_passant_square(&mut self, sq: Option<Square>) {
        self.en_passant = sq;
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub fn set_halfmove_clock(&mut self, clock: u16) {
        self.halfmove_clock = clock;
    }

    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    pub fn set_fullmove_number(&mut self, number: u16) {
        self.fullmove_number = number.max(1);
    }

    /// Occupancy mask for one piece type of one color.
    #[inline(always)]
    pub fn pieces(&self, kind: PieceType, color: Color) -> Bitboard {
        self.piece_bb[bb_index(kind, color)]
    }

    #[inline(always)]
    pub fn occupied(&self) -> Bitboard {
        self.all_occ
    }

    #[inline(always)]
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        match color {
            Color::White => self.white_occ,
            Color::Black => self.black_occ,
        }
    }

    /// O(1) against the combined mask, then a scan of the 12 piece masks.
    pub fn piece_at(&self, sq: Square) -> Piece {
        if !get_bit(self.all_occ, sq) {
            return Piece::none();
        }
        for color in [Color::White, Color::Black] {
            if !get_bit(self.occupied_by(color), sq) {
                continue;
            }
            for kind in [
                PieceType::Pawn,
                PieceType::Knight,
                PieceType::Bishop,
                PieceType::Rook,
                PieceType::Queen,
                PieceType::King,
            ] {
                if get_bit(self.pieces(kind, color), sq) {
                    return Piece::new(kind, color);
                }
            }
        }
        Piece::none()
    }

    // ---- board editing ------------------------------------------------

    pub fn set_piece(&mut self, sq: Square, piece: Piece) {
        self.clear_square(sq);
        if !piece.is_none() {
            self.piece_bb[bb_index(piece.kind, piece.color)] |= bit(sq);
        }
        self.update_occupancy();
    }

    pub fn clear_square(&mut self, sq: Square) {
        let mask = !bit(sq);
        for bb in &mut self.piece_bb {
            *bb &= mask;
        }
        self.update_occupancy();
    }

    fn update_occupancy(&mut self) {
        self.white_occ = self.piece_bb[..6].iter().fold(0, |acc, bb| acc | bb);
        self.black_occ = self.piece_bb[6..].iter().fold(0, |acc, bb| acc | bb);
        self.all_occ = self.white_occ | self.black_occ;
    }

    /// Copy for speculative make-and-test, without dragging the undo history
    /// along.
    pub(crate) fn scratch_copy(&self) -> Position {
        Position {
            history: Vec::new(),
            ..self.clone()
        }
    }

    // ---- make / unmake ------------------------------------------------

    /// Apply `mv`. The move must come from the move generator (or have been
    /// verified with `movegen::is_legal_move`); nothing is validated here.
    pub fn make_move(&mut self, mv: Move) {
        let mover = self.piece_at(mv.from);
        let captured = if mv.is_en_passant {
            self.piece_at(ep_victim_square(mv.to, mover.color))
        } else {
            self.piece_at(mv.to)
        };

        self.history.push(Undo {
            captured,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            white_occ: self.white_occ,
            black_occ: self.black_occ,
            all_occ: self.all_occ,
        });

        self.clear_square(mv.from);

        if mv.is_castle {
            let (rook_from, rook_to) = rook_castle_squares(mv.to);
            self.clear_square(rook_from);
            self.set_piece(rook_to, Piece::new(PieceType::Rook, mover.color));
        }
        if mv.is_en_passant {
            self.clear_square(ep_victim_square(mv.to, mover.color));
        }

        let final_kind = if mv.is_promotion() {
            mv.promotion
        } else {
            mover.kind
        };
        self.set_piece(mv.to, Piece::new(final_kind, mover.color));

        // Castling rights: a king move drops both rights for that color; any
        // move touching a rook home square drops that side's right for good.
        if mover.kind == PieceType::King {
            self.castling.clear_color(mover.color);
        }
        for sq in [mv.from, mv.to] {
            match sq {
                square::A1 => self.castling.white_queenside = false,
                square::H1 => self.castling.white_kingside = false,
                square::A8 => self.castling.black_queenside = false,
                square::H8 => self.castling.black_kingside = false,
                _ => {}
            }
        }

        // En-passant target exists only right after a double pawn push.
        self.en_passant = if mover.kind == PieceType::Pawn
            && (mv.to as i16 - mv.from as i16).unsigned_abs() == 16
        {
            Some((mv.from + mv.to) / 2)
        } else {
            None
        };

        if mover.kind == PieceType::Pawn || !captured.is_none() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.opposite();
    }

    /// Revert the most recent `make_move`. Calling this with an empty history
    /// is a caller bug and fails fast.
    pub fn unmake_move(&mut self, mv: Move) {
        let undo = self
            .history
            .pop()
            .expect("unmake_move without a matching make_move");

        self.side_to_move = self.side_to_move.opposite();
        let mover_color = self.side_to_move;
        if mover_color == Color::Black {
            self.fullmove_number -= 1;
        }

        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;

        let piece_on_to = self.piece_at(mv.to);
        self.clear_square(mv.to);
        let moved = if mv.is_promotion() {
            Piece::new(PieceType::Pawn, mover_color)
        } else {
            piece_on_to
        };
        self.set_piece(mv.from, moved);

        if mv.is_castle {
            let (rook_from, rook_to) = rook_castle_squares(mv.to);
            self.clear_square(rook_to);
            self.set_piece(rook_from, Piece::new(PieceType::Rook, mover_color));
        }

        if mv.is_en_passant {
            self.set_piece(ep_victim_square(mv.to, mover_color), undo.captured);
        } else if !undo.captured.is_none() {
            self.set_piece(mv.to, undo.captured);
        }

        // The piece masks are rebuilt above; the combined masks come straight
        // from the undo record so restoration is bit-exact.
        self.white_occ = undo.white_occ;
        self.black_occ = undo.black_occ;
        self.all_occ = undo.all_occ;
    }

    // ---- attack and check queries -------------------------------------

    /// Is `sq` attacked by any piece of `by`? Sliding attacks stop at the
    /// first occupied square.
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        // A pawn of `by` attacks `sq` iff it sits on a square the opposite
        // color would attack from `sq`.
        let pawn_sources = PAWN_ATTACKS[by.opposite().index()][sq as usize];
        if pawn_sources & self.pieces(PieceType::Pawn, by) != 0 {
            return true;
        }
        if KNIGHT_ATTACKS[sq as usize] & self.pieces(PieceType::Knight, by) != 0 {
            return true;
        }
        if KING_ATTACKS[sq as usize] & self.pieces(PieceType::King, by) != 0 {
            return true;
        }
        let diagonals = self.pieces(PieceType::Bishop, by) | self.pieces(PieceType::Queen, by);
        if bishop_attacks(sq, self.all_occ) & diagonals != 0 {
            return true;
        }
        let straights = self.pieces(PieceType::Rook, by) | self.pieces(PieceType::Queen, by);
        rook_attacks(sq, self.all_occ) & straights != 0
    }

    /// Attack set of the piece standing on `sq` (empty for a vacant square).
    pub fn attacks_from(&self, sq: Square) -> Bitboard {
        let piece = self.piece_at(sq);
        match piece.kind {
            PieceType::Pawn => PAWN_ATTACKS[piece.color.index()][sq as usize],
            PieceType::Knight => KNIGHT_ATTACKS[sq as usize],
            PieceType::Bishop => bishop_attacks(sq, self.all_occ),
            PieceType::Rook => rook_attacks(sq, self.all_occ),
            PieceType::Queen => queen_attacks(sq, self.all_occ),
            PieceType::King => KING_ATTACKS[sq as usize],
            PieceType::None => 0,
        }
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        let kings = self.pieces(PieceType::King, color);
        if kings == 0 {
            None
        } else {
            Some(kings.trailing_zeros() as Square)
        }
    }

    /// A position without a king for `color` is illegal; this reports "not in
    /// check" for it rather than crashing, and such positions must not be
    /// searched.
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.find_king(color) {
            Some(king) => self.is_square_attacked(king, color.opposite()),
            None => false,
        }
    }

    /// Side to move is in check and has no legal reply.
    pub fn is_checkmate(&self) -> bool {
        self.is_in_check(self.side_to_move) && crate::movegen::legal_moves(self).is_empty()
    }

    /// Side to move is not in check and has no legal reply.
    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check(self.side_to_move) && crate::movegen::legal_moves(self).is_empty()
    }

    /// Occupancy invariants from the data model: the combined masks equal the
    /// union of the 12 piece masks, no square is claimed twice, and at most
    /// 32 pieces are on the board.
    pub fn masks_consistent(&self) -> bool {
        let mut union = 0u64;
        let mut total = 0u32;
        for (i, &bb) in self.piece_bb.iter().enumerate() {
            for &other in &self.piece_bb[i + 1..] {
                if bb & other != 0 {
                    return false;
                }
            }
            union |= bb;
            total += popcount(bb);
        }
        let white: Bitboard = self.piece_bb[..6].iter().fold(0, |acc, bb| acc | bb);
        union == self.all_occ
            && white == self.white_occ
            && (union & !white) == self.black_occ
            && total <= 32
    }

    // ---- perft --------------------------------------------------------

    /// Node count at fixed depth; validates the move generator against known
    /// counts.
    pub fn perft(&mut self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = crate::movegen::legal_moves(self);
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0;
        for mv in moves {
            self.make_move(mv);
            nodes += self.perft(depth - 1);
            self.unmake_move(mv);
        }
        nodes
    }

    /// Per-root-move perft breakdown, for debugging movegen discrepancies.
    pub fn divide(&mut self, depth: u32) -> Vec<(Move, u64)> {
        let mut out = Vec::new();
        for mv in crate::movegen::legal_moves(self) {
            self.make_move(mv);
            let nodes = self.perft(depth.saturating_sub(1));
            self.unmake_move(mv);
            out.push((mv, nodes));
        }
        out
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let sq = square::make_square(file, rank);
                write!(f, "{} ", self.piece_at(sq).to_char())?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")?;
        write!(
            f,
            "{} to move",
            match self.side_to_move {
                Color::White => "White",
                Color::Black => "Black",
            }
        )
    }
}

/// Iterate the set squares of a mask in LSB order.
pub struct SquareIter(pub Bitboard);

impl Iterator for SquareIter {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Some(pop_lsb(&mut self.0))
        }
    }
}
