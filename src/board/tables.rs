//! Precomputed attack tables, generated at compile time.

use super::bitboard::{bitscan_forward, bitscan_reverse, Bitboard};

/// KNIGHT_ATTACKS[square]: all squares a knight attacks from there.
pub static KNIGHT_ATTACKS: [Bitboard; 64] = generate_leaper_attacks(&[
    (2, 1),
    (2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (-2, 1),
    (-2, -1),
]);

/// KING_ATTACKS[square]: the up-to-eight adjacent squares.
pub static KING_ATTACKS: [Bitboard; 64] = generate_leaper_attacks(&[
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
]);

/// PAWN_ATTACKS[color][square]: diagonal capture squares (0 = White, 1 = Black).
pub static PAWN_ATTACKS: [[Bitboard; 64]; 2] = generate_pawn_attacks();

const fn generate_leaper_attacks(deltas: &[(i8, i8); 8]) -> [Bitboard; 64] {
    let mut attacks = [0u64; 64];
    let mut sq = 0;
    while sq < 64 {
        let rank = (sq / 8) as i8;
        let file = (sq % 8) as i8;
        let mut i = 0;
        while i < 8 {
            let (dr, df) = deltas[i];
            let r = rank + dr;
            let f = file + df;
            if r >= 0 && r < 8 && f >= 0 && f < 8 {
                attacks[sq] |= 1u64 << (r * 8 + f);
            }
            i += 1;
        }
        sq += 1;
    }
    attacks
}

const fn generate_pawn_attacks() -> [[Bitboard; 64]; 2] {
    let mut attacks = [[0u64; 64]; 2];
    let mut sq = 0;
    while sq < 64 {
        let rank = sq / 8;
        let file = sq % 8;

        if rank < 7 {
            if file > 0 {
                attacks[0][sq] |= 1u64 << (sq + 7);
            }
            if file < 7 {
                attacks[0][sq] |= 1u64 << (sq + 9);
            }
        }
        if rank > 0 {
            if file > 0 {
                attacks[1][sq] |= 1u64 << (sq - 9);
            }
            if file < 7 {
                attacks[1][sq] |= 1u64 << (sq - 7);
            }
        }
        sq += 1;
    }
    attacks
}

// Direction indices into RAYS.
pub const NORTH: usize = 0;
pub const NORTH_EAST: usize = 1;
pub const EAST: usize = 2;
pub const SOUTH_EAST: usize = 3;
pub const SOUTH: usize = 4;
pub const SOUTH_WEST: usize = 5;
pub const WEST: usize = 6;
pub const NORTH_WEST: usize = 7;

const DIAGONAL_DIRS: [usize; 4] = [NORTH_EAST, SOUTH_EAST, SOUTH_WEST, NORTH_WEST];
const STRAIGHT_DIRS: [usize; 4] = [NORTH, EAST, SOUTH, WEST];

/// RAYS[direction][square]: the full open-board ray in that direction.
pub static RAYS: [[Bitboard; 64]; 8] = generate_rays();

const fn generate_rays() -> [[Bitboard; 64]; 8] {
    // (dr, df) per direction index.
    let deltas: [(i8, i8); 8] = [
        (1, 0),
        (1, 1),
        (0, 1),
        (-1, 1),
        (-1, 0),
        (-1, -1),
        (0, -1),
        (1, -1),
    ];
    let mut rays = [[0u64; 64]; 8];
    let mut dir = 0;
    while dir < 8 {
        let (dr, df) = deltas[dir];
        let mut sq = 0;
        while sq < 64 {
            let mut r = (sq / 8) as i8 + dr;
            let mut f = (sq % 8) as i8 + df;
            while r >= 0 && r < 8 && f >= 0 && f < 8 {
                rays[dir][sq] |= 1u64 << (r * 8 + f);
                r += dr;
                f += df;
            }
            sq += 1;
        }
        dir += 1;
    }
    rays
}

#[inline(always)]
fn positive_dir(dir: usize) -> bool {
    matches!(dir, NORTH | NORTH_EAST | EAST | NORTH_WEST)
}

/// Ray attack in one direction, truncated at the first blocker (inclusive).
#[inline]
fn ray_attack(dir: usize, sq: u8, occupied: Bitboard) -> Bitboard {
    let ray = RAYS[dir][sq as usize];
    let blockers = ray & occupied;
    if blockers == 0 {
        return ray;
    }
    let first = if positive_dir(dir) {
        bitscan_forward(blockers)
    } else {
        bitscan_reverse(blockers)
    };
    ray & !RAYS[dir][first as usize]
}

/// Bishop attack set from `sq` given board occupancy; includes the first
/// blocker square on each diagonal.
pub fn bishop_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    let mut attacks = 0;
    for dir in DIAGONAL_DIRS {
        attacks |= ray_attack(dir, sq, occupied);
    }
    attacks
}

/// Rook attack set from `sq` given board occupancy.
pub fn rook_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    let mut attacks = 0;
    for dir in STRAIGHT_DIRS {
        attacks |= ray_attack(dir, sq, occupied);
    }
    attacks
}

pub fn queen_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)
}
