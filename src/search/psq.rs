//! Static positional tables, generated at compile time. Values are stored
//! from White's point of view; Black lookups mirror the rank.

use crate::board::{Color, PieceType, Square};

const fn center_distance(file: i32, rank: i32) -> i32 {
    let df = {
        let a = (file - 3).abs();
        let b = (file - 4).abs();
        if a > b {
            a
        } else {
            b
        }
    };
    let dr = {
        let a = (rank - 3).abs();
        let b = (rank - 4).abs();
        if a > b {
            a
        } else {
            b
        }
    };
    df + dr
}

const fn pawn_value(file: i32, rank: i32) -> i32 {
    let mut v = 0;
    if file >= 3 && file <= 4 {
        v += 10;
    }
    if rank >= 2 && rank <= 5 {
        v += rank * 5;
    } else if rank > 5 {
        v += 20;
    }
    if rank == 1 {
        v -= 5;
    }
    v
}

const fn knight_value(file: i32, rank: i32) -> i32 {
    let cd = center_distance(file, rank);
    let mut v = 0;
    if cd <= 1 {
        v += 20;
    } else if cd == 2 {
        v += 10;
    } else if cd >= 4 {
        v -= 10;
    }
    if (file == 0 || file == 7) && (rank == 0 || rank == 7) {
        v -= 15;
    }
    v
}

const fn bishop_value(file: i32, rank: i32) -> i32 {
    let cd = center_distance(file, rank);
    let mut v = 0;
    if cd <= 1 {
        v += 15;
    } else if cd == 2 {
        v += 8;
    }
    if file == rank || file == 7 - rank {
        v += 5;
    }
    v
}

const fn rook_value(file: i32, rank: i32) -> i32 {
    let mut v = 0;
    if file >= 2 && file <= 5 {
        v += 5;
    }
    if rank == 6 {
        v += 15;
    }
    v
}

const fn queen_value(file: i32, rank: i32) -> i32 {
    let mut v = 0;
    if center_distance(file, rank) <= 2 {
        v += 5;
    }
    if rank <= 1 {
        v -= 10;
    }
    v
}

const fn king_value(file: i32, rank: i32) -> i32 {
    let mut v = 0;
    if rank == 0 {
        v += 20;
    } else if rank == 1 {
        v += 10;
    } else if rank >= 3 {
        v -= 15;
    }
    if file <= 1 || file >= 6 {
        v += 5;
    }
    v
}

const fn build_table(kind: usize) -> [i32; 64] {
    let mut table = [0; 64];
    let mut sq = 0;
    while sq < 64 {
        let file = (sq & 7) as i32;
        let rank = (sq >> 3) as i32;
        table[sq] = match kind {
            0 => pawn_value(file, rank),
            1 => knight_value(file, rank),
            2 => bishop_value(file, rank),
            3 => rook_value(file, rank),
            4 => queen_value(file, rank),
            _ => king_value(file, rank),
        };
        sq += 1;
    }
    table
}

static PSQ: [[i32; 64]; 6] = [
    build_table(0),
    build_table(1),
    build_table(2),
    build_table(3),
    build_table(4),
    build_table(5),
];

/// Positional value of `kind` of `color` standing on `sq`.
#[inline(always)]
pub fn psq_value(kind: PieceType, color: Color, sq: Square) -> i32 {
    if kind == PieceType::None {
        return 0;
    }
    // XOR with 56 flips the rank, keeping the file.
    let sq = match color {
        Color::White => sq,
        Color::Black => sq ^ 56,
    };
    PSQ[kind.index()][sq as usize]
}
