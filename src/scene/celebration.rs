//! Completion particle burst.
//!
//! Pure data: the burst advances one step per [`ParticleBurst::step`] and
//! renderers draw whatever particles are still alive.

use glam::Vec2;
use rand::Rng;
use web_time::Duration;

use super::layout::SceneLayout;
use super::DISK_PALETTE;

/// Particles spawned per burst.
pub const PARTICLE_COUNT: usize = 50;
/// Steps a burst lives for.
pub const BURST_STEPS: u32 = 100;
/// Added to every particle's downward velocity each step.
pub const GRAVITY: f32 = 0.1;
/// Wall-clock interval between steps when animated in real time.
pub const STEP_INTERVAL: Duration = Duration::from_millis(16);

/// One confetti particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Centre, in layout units.
    pub position: Vec2,
    /// Displacement per step.
    pub velocity: Vec2,
    /// Diameter in layout units.
    pub size: f32,
    /// RGB colour drawn from the disk palette.
    pub color: [u8; 3],
}

/// A short-lived shower of particles fired when playback completes.
#[derive(Debug, Clone)]
pub struct ParticleBurst {
    particles: Vec<Particle>,
    steps_left: u32,
}

impl ParticleBurst {
    /// Scatter [`PARTICLE_COUNT`] particles over the drawing area using the
    /// thread-local generator.
    #[must_use]
    pub fn random(layout: &SceneLayout) -> Self {
        Self::spawn(layout, &mut rand::rng())
    }

    /// Scatter particles using `rng`.
    pub fn spawn<R: Rng + ?Sized>(layout: &SceneLayout, rng: &mut R) -> Self {
        let particles = (0..PARTICLE_COUNT)
            .map(|_| Particle {
                position: Vec2::new(
                    rng.random_range(0.0..=layout.width()),
                    rng.random_range(0.0..=layout.height()),
                ),
                velocity: Vec2::new(
                    rng.random_range(-2.0..=2.0),
                    rng.random_range(-3.0..=-1.0),
                ),
                size: f32::from(rng.random_range(5u8..=15)),
                color: DISK_PALETTE[rng.random_range(0..DISK_PALETTE.len())],
            })
            .collect();
        Self {
            particles,
            steps_left: BURST_STEPS,
        }
    }

    /// Advance every particle one step. Returns false once the burst has
    /// expired.
    pub fn step(&mut self) -> bool {
        if self.steps_left == 0 {
            return false;
        }
        for p in &mut self.particles {
            p.position += p.velocity;
            p.velocity.y += GRAVITY;
        }
        self.steps_left -= 1;
        if self.steps_left == 0 {
            self.particles.clear();
        }
        true
    }

    /// Whether every step has been taken.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.steps_left == 0
    }


    /// Live particles.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}
