// src/utils.rs
// Small free functions shared by the attack-table builders and move
// generator; kept separate from `bitboard` since these operate on
// (rank, file) pairs rather than bitboards directly.

use crate::bitboard::BitboardExt;

#[inline(always)]
pub fn square_index(rank: usize, file: usize) -> usize {
    rank * 8 + file
}

#[inline(always)]
pub fn pop_lsb(bb: &mut u64) -> usize {
    bb.pop_lsb() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_index_matches_a1_zero_convention() {
        assert_eq!(square_index(0, 0), 0); // a1
        assert_eq!(square_index(0, 7), 7); // h1
        assert_eq!(square_index(7, 0), 56); // a8
        assert_eq!(square_index(7, 7), 63); // h8
    }
}
