//! Shatter module - the particle burst played when a row is cleared
//!
//! Every filled cell of a swept row breaks into 5 particles that drift with
//! a random velocity and shrink 4% per frame. Gameplay stays suspended while
//! any particle is still visible; the board and falling piece keep rendering
//! underneath.

use arrayvec::ArrayVec;

use crate::core::board::SweptRow;
use crate::core::rng::SimpleRng;
use crate::types::{PieceKind, BOARD_WIDTH};

/// Particles emitted per shattered block.
pub const PARTICLES_PER_BLOCK: usize = 5;
/// Multiplicative per-frame size decay (4% shrink).
pub const PARTICLE_DECAY: f32 = 0.96;
/// Below this size a particle no longer counts as visible.
pub const MIN_VISIBLE_SIZE: f32 = 0.05;

/// Hard cap on live particles. A full row emits 50; overlapping bursts from
/// a long multi-row clear stack, so leave generous headroom. Overflow just
/// drops extra sparks.
const MAX_PARTICLES: usize = (BOARD_WIDTH as usize) * PARTICLES_PER_BLOCK * 8;

/// One transient spark, in board-cell units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    /// Sprite reference: the kind of the cell this particle came from.
    pub kind: PieceKind,
}

/// The live particle batch for one (or several overlapping) row clears.
#[derive(Debug, Clone, Default)]
pub struct ShatterBatch {
    particles: ArrayVec<Particle, MAX_PARTICLES>,
}

impl ShatterBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit particles for every filled cell of a swept row.
    ///
    /// Velocity components are uniform in [-1, 1) board-units per frame,
    /// initial size uniform in [0.1, 0.6); particles start at the cell
    /// center.
    pub fn spawn_row(&mut self, row: &SweptRow, rng: &mut SimpleRng) {
        for (x, cell) in row.cells.iter().enumerate() {
            let Some(kind) = cell else {
                continue;
            };
            for _ in 0..PARTICLES_PER_BLOCK {
                let particle = Particle {
                    x: x as f32 + 0.5,
                    y: row.index as f32 + 0.5,
                    vx: rng.next_signed(),
                    vy: rng.next_signed(),
                    size: rng.next_f32() * 0.5 + 0.1,
                    kind: *kind,
                };
                let _ = self.particles.try_push(particle);
            }
        }
    }

    /// Advance one frame: move every particle by its velocity, shrink it.
    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.size *= PARTICLE_DECAY;
        }
    }

    /// True once no particle is visible anymore.
    pub fn finished(&self) -> bool {
        !self.particles.iter().any(|p| p.size > MIN_VISIBLE_SIZE)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn full_row(index: usize, kind: PieceKind) -> SweptRow {
        SweptRow {
            index,
            cells: [Some(kind); BOARD_WIDTH as usize],
        }
    }

    fn sparse_row(index: usize) -> SweptRow {
        let mut cells: [Cell; BOARD_WIDTH as usize] = [None; BOARD_WIDTH as usize];
        cells[2] = Some(PieceKind::T);
        cells[7] = Some(PieceKind::I);
        SweptRow { index, cells }
    }

    #[test]
    fn spawns_five_particles_per_filled_cell() {
        let mut rng = SimpleRng::new(1);
        let mut batch = ShatterBatch::new();

        batch.spawn_row(&sparse_row(19), &mut rng);
        assert_eq!(batch.len(), 2 * PARTICLES_PER_BLOCK);

        batch.spawn_row(&full_row(18, PieceKind::Z), &mut rng);
        assert_eq!(
            batch.len(),
            2 * PARTICLES_PER_BLOCK + BOARD_WIDTH as usize * PARTICLES_PER_BLOCK
        );
    }

    #[test]
    fn particles_start_at_cell_centers_with_bounded_randomness() {
        let mut rng = SimpleRng::new(42);
        let mut batch = ShatterBatch::new();
        batch.spawn_row(&sparse_row(5), &mut rng);

        for p in batch.particles() {
            assert!(p.x == 2.5 || p.x == 7.5);
            assert_eq!(p.y, 5.5);
            assert!((-1.0..1.0).contains(&p.vx));
            assert!((-1.0..1.0).contains(&p.vy));
            assert!((0.1..0.6).contains(&p.size));
        }
    }

    #[test]
    fn step_moves_and_decays() {
        let mut rng = SimpleRng::new(3);
        let mut batch = ShatterBatch::new();
        batch.spawn_row(&sparse_row(10), &mut rng);

        let before: Vec<Particle> = batch.particles().to_vec();
        batch.step();
        for (a, b) in before.iter().zip(batch.particles()) {
            assert_eq!(b.x, a.x + a.vx);
            assert_eq!(b.y, a.y + a.vy);
            assert_eq!(b.size, a.size * PARTICLE_DECAY);
        }
    }

    #[test]
    fn batch_eventually_finishes() {
        let mut rng = SimpleRng::new(8);
        let mut batch = ShatterBatch::new();
        batch.spawn_row(&full_row(19, PieceKind::O), &mut rng);
        assert!(!batch.finished());

        // Max initial size 0.6 shrinking 4%/frame passes 0.05 well inside
        // 100 frames: 0.6 * 0.96^100 ~= 0.01.
        for _ in 0..100 {
            batch.step();
        }
        assert!(batch.finished());
    }

    #[test]
    fn empty_batch_counts_as_finished() {
        assert!(ShatterBatch::new().finished());
    }

    #[test]
    fn spawn_order_is_deterministic_per_seed() {
        let mut a = ShatterBatch::new();
        let mut b = ShatterBatch::new();
        a.spawn_row(&full_row(19, PieceKind::L), &mut SimpleRng::new(7));
        b.spawn_row(&full_row(19, PieceKind::L), &mut SimpleRng::new(7));
        assert_eq!(a.particles(), b.particles());
    }
}
