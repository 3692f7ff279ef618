//! RNG oracle for deterministic random number generation.
//!
//! Every roll in combat (dodge, crit, flee, enemy AI, loot) is derived from the
//! run seed and a monotonically increasing roll counter, so a replay with the
//! same seed and the same player inputs reproduces the same encounter.

/// RNG oracle for deterministic random number generation.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Always returns the same value. `FixedRng(0)` makes every chance roll a 1
/// (always succeeds), `FixedRng(99)` makes every roll a 100.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedRng(pub u32);

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

/// Purpose of a roll; mixed into the seed so distinct rolls in the same
/// action stay independent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum RollKind {
    Dodge = 0,
    Crit = 1,
    Flee = 2,
    EnemyAction = 3,
    EnemySkill = 4,
    Loot = 5,
}

/// Compute deterministic seed from run state components.
pub fn compute_seed(run_seed: u64, nonce: u64, turn: u32, context: u32) -> u64 {
    let mut hash = run_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (turn as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Roll source bound to a run: seed + a counter advanced on every roll.
pub struct Dice<'a> {
    rng: &'a dyn RngOracle,
    seed: u64,
    nonce: &'a mut u64,
    turn: u32,
}

impl<'a> Dice<'a> {
    pub fn new(rng: &'a dyn RngOracle, seed: u64, nonce: &'a mut u64, turn: u32) -> Self {
        Self {
            rng,
            seed,
            nonce,
            turn,
        }
    }

    fn next_seed(&mut self, kind: RollKind) -> u64 {
        let seed = compute_seed(self.seed, *self.nonce, self.turn, kind as u32);
        *self.nonce = self.nonce.wrapping_add(1);
        seed
    }

    /// Roll 1-100.
    pub fn d100(&mut self, kind: RollKind) -> u32 {
        let seed = self.next_seed(kind);
        self.rng.roll_d100(seed)
    }

    /// Succeeds with `percent` probability (`roll <= percent`).
    pub fn chance(&mut self, kind: RollKind, percent: u32) -> bool {
        percent > 0 && self.d100(kind) <= percent
    }

    /// Uniform index in `0..len`; `len` must be non-zero.
    pub fn index(&mut self, kind: RollKind, len: usize) -> usize {
        let seed = self.next_seed(kind);
        let max = len.saturating_sub(1).min(u32::MAX as usize) as u32;
        self.rng.range(seed, 0, max) as usize
    }
}
