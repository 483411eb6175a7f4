//! Piece queue - upcoming piece, swap slot, and the once-per-spawn latch
//!
//! The supplier owns randomization (uniform over the seven kinds) and the
//! swap bookkeeping. Drawing the next piece re-arms the swap latch; a
//! successful swap trips it, so the state machine can swap at most once per
//! spawn without tracking any of this itself.

use crate::core::collab::PieceSupplier;
use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

/// Uniform-random piece supplier with a single swap slot.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    next: PieceKind,
    swap_slot: Option<PieceKind>,
    has_swapped: bool,
    rng: SimpleRng,
}

impl PieceQueue {
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = random_kind(&mut rng);
        Self {
            next,
            swap_slot: None,
            has_swapped: false,
            rng,
        }
    }

    /// The upcoming piece, for the HUD preview.
    pub fn peek_next(&self) -> PieceKind {
        self.next
    }

    /// The held piece, for the HUD preview.
    pub fn peek_swap(&self) -> Option<PieceKind> {
        self.swap_slot
    }
}

impl PieceSupplier for PieceQueue {
    fn next_piece(&mut self) -> PieceKind {
        let piece = self.next;
        self.next = random_kind(&mut self.rng);
        self.has_swapped = false;
        piece
    }

    fn can_swap(&self) -> bool {
        !self.has_swapped
    }

    fn swap_preview(&self) -> PieceKind {
        self.swap_slot.unwrap_or(self.next)
    }

    /// Exchange `current` for the held piece. With nothing held yet, the
    /// queued piece is handed out instead and a fresh one is drawn.
    fn swap(&mut self, current: PieceKind) -> PieceKind {
        self.has_swapped = true;
        let out = match self.swap_slot {
            Some(held) => held,
            None => {
                let queued = self.next;
                self.next = random_kind(&mut self.rng);
                queued
            }
        };
        self.swap_slot = Some(current);
        out
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}

fn random_kind(rng: &mut SimpleRng) -> PieceKind {
    PieceKind::ALL[rng.next_range(7) as usize]
}
