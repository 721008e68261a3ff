/// 64-bit occupancy mask, one bit per square (a1 = bit 0).
pub type Bitboard = u64;

pub const EMPTY: Bitboard = 0;

#[inline(always)]
pub const fn bit(sq: u8) -> Bitboard {
    1u64 << sq
}

#[inline(always)]
pub fn get_bit(bb: Bitboard, sq: u8) -> bool {
    bb & bit(sq) != 0
}

#[inline(always)]
pub fn set_bit(bb: Bitboard, sq: u8) -> Bitboard {
    bb | bit(sq)
}

#[inline(always)]
pub fn clear_bit(bb: Bitboard, sq: u8) -> Bitboard {
    bb & !bit(sq)
}

/// Pop the least significant set bit and return its square index.
#[inline(always)]
pub fn pop_lsb(bb: &mut Bitboard) -> u8 {
    let sq = bb.trailing_zeros() as u8;
    *bb &= *bb - 1;
    sq
}

/// Index of the least significant set bit. Caller ensures `bb != 0`.
#[inline(always)]
pub fn bitscan_forward(bb: Bitboard) -> u8 {
    bb.trailing_zeros() as u8
}

/// Index of the most significant set bit. Caller ensures `bb != 0`.
#[inline(always)]
pub fn bitscan_reverse(bb: Bitboard) -> u8 {
    63 - bb.leading_zeros() as u8
}

#[inline(always)]
pub fn popcount(bb: Bitboard) -> u32 {
    bb.count_ones()
}

pub const FILE_A: Bitboard = 0x0101010101010101;
pub const FILE_H: Bitboard = 0x8080808080808080;

pub const RANK_1: Bitboard = 0x00000000000000FF;
pub const RANK_2: Bitboard = 0x000000000000FF00;
pub const RANK_7: Bitboard = 0x00FF000000000000;
pub const RANK_8: Bitboard = 0xFF00000000000000;

/// Mask of an entire file (0 = a-file).
#[inline(always)]
pub fn file_mask(file: u8) -> Bitboard {
    FILE_A << file
}

/// Mask of an entire rank (0 = first rank).
#[inline(always)]
pub fn rank_mask(rank: u8) -> Bitboard {
    RANK_1 << (8 * rank)
}
