// Derives magic bitboard tables at startup: relevant-occupancy masks, the
// Carry-Rippler subset enumeration, ray-cast reference attacks, and a
// collision-free magic number per square. Ship-as-data (loading a
// precomputed blob) is handled by `super::loader`; this module is the
// from-scratch derivation path it falls back to.

use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::rng;

use super::attacks::{bishop_attacks_per_square, rook_attacks_per_square};
use super::search::find_magic_number_for_square;
use super::structs::{BishopMagicTables, MagicEntry, MagicTables, RookMagicTables};

/// Selects how the magic-finding RNG is seeded.
pub enum MagicTableSeed {
    /// Reproducible derivation; the same seed always yields the same tables.
    Fixed(u64),
    /// Seeded from the OS entropy source. Still collision-free, just not
    /// reproducible across runs.
    Random,
}

fn rook_mask(square: usize) -> u64 {
    let rank = (square / 8) as i32;
    let file = (square % 8) as i32;
    let mut mask = 0u64;

    for r in (rank + 1)..=6 {
        mask |= 1u64 << (file + r * 8);
    }
    for r in (1..rank).rev() {
        mask |= 1u64 << (file + r * 8);
    }
    for f in (file + 1)..=6 {
        mask |= 1u64 << (f + rank * 8);
    }
    for f in (1..file).rev() {
        mask |= 1u64 << (f + rank * 8);
    }

    mask
}

fn bishop_mask(square: usize) -> u64 {
    let rank = (square / 8) as i32;
    let file = (square % 8) as i32;
    let mut mask = 0u64;

    let mut r = rank + 1;
    let mut f = file + 1;
    while r <= 6 && f <= 6 {
        mask |= 1u64 << (f + r * 8);
        r += 1;
        f += 1;
    }
    r = rank + 1;
    f = file - 1;
    while r <= 6 && f >= 1 {
        mask |= 1u64 << (f + r * 8);
        r += 1;
        f -= 1;
    }
    r = rank - 1;
    f = file + 1;
    while r >= 1 && f <= 6 {
        mask |= 1u64 << (f + r * 8);
        r -= 1;
        f += 1;
    }
    r = rank - 1;
    f = file - 1;
    while r >= 1 && f >= 1 {
        mask |= 1u64 << (f + r * 8);
        r -= 1;
        f -= 1;
    }

    mask
}

/// Enumerates every subset of `mask` via the Carry-Rippler trick, including
/// the empty subset.
fn subsets_of(mask: u64) -> Vec<u64> {
    let mut subsets = Vec::with_capacity(1usize << mask.count_ones());
    let mut subset = 0u64;
    loop {
        subsets.push(subset);
        subset = subset.wrapping_sub(mask) & mask;
        if subset == 0 {
            break;
        }
    }
    subsets
}

fn build_entry<R: RngCore>(
    square: usize,
    mask: u64,
    reference: impl Fn(usize, u64) -> u64,
    rng: &mut R,
) -> Result<MagicEntry, String> {
    let bits = mask.count_ones();
    let shift = 64 - bits;
    let blockers = subsets_of(mask);
    let attacks: Vec<u64> = blockers.iter().map(|&b| reference(square, b)).collect();

    let magic = find_magic_number_for_square(&blockers, &attacks, shift, rng)?;

    let mut table = vec![0u64; 1usize << bits];
    for (&blocker, &attack) in blockers.iter().zip(attacks.iter()) {
        let index = (blocker.wrapping_mul(magic) >> shift) as usize;
        table[index] = attack;
    }

    Ok(MagicEntry {
        magic,
        shift,
        mask,
        table: table.into_boxed_slice(),
    })
}

fn build_tables<R: RngCore>(rng: &mut R) -> Result<MagicTables, String> {
    let mut rook_entries = Vec::with_capacity(64);
    let mut bishop_entries = Vec::with_capacity(64);

    for square in 0..64 {
        rook_entries.push(build_entry(
            square,
            rook_mask(square),
            rook_attacks_per_square,
            rng,
        )?);
        bishop_entries.push(build_entry(
            square,
            bishop_mask(square),
            bishop_attacks_per_square,
            rng,
        )?);
    }

    Ok(MagicTables {
        rook: RookMagicTables {
            entries: rook_entries,
        },
        bishop: BishopMagicTables {
            entries: bishop_entries,
        },
    })
}

pub fn generate_magic_tables(seed: MagicTableSeed) -> Result<MagicTables, String> {
    match seed {
        MagicTableSeed::Fixed(s) => {
            let mut rng = StdRng::seed_from_u64(s);
            build_tables(&mut rng)
        }
        MagicTableSeed::Random => {
            let mut rng = rng();
            build_tables(&mut rng)
        }
    }
}
