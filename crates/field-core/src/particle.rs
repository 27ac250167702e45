//! Particle Motion
//!
//! A particle drifts at constant speed and bounces off the edges of the
//! surface by flipping the sign of the offending velocity component.

use rand::Rng;

use field_events::ParticleSnapshot;

use crate::geometry::Bounds;
use crate::vector::Vector2;

/// A single animated point.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vector2,
    /// Logical units per frame
    pub velocity: Vector2,
    pub radius: f32,
}

impl Particle {
    pub fn new(position: Vector2, velocity: Vector2, radius: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
        }
    }

    /// Seeds a particle uniformly inside `bounds` with each velocity
    /// component uniform in `[-max_speed, max_speed)`.
    ///
    /// Positions are `unit sample * extent`, so an empty extent places the
    /// particle on the origin instead of sampling an empty range.
    pub fn spawn<R: Rng>(rng: &mut R, bounds: Bounds, max_speed: f32, radius: f32) -> Self {
        let position = Vector2::new(
            rng.gen::<f32>() * bounds.width,
            rng.gen::<f32>() * bounds.height,
        );
        let velocity = Vector2::new(
            (rng.gen::<f32>() - 0.5) * 2.0 * max_speed,
            (rng.gen::<f32>() - 0.5) * 2.0 * max_speed,
        );
        Self::new(position, velocity, radius)
    }

    /// Advances one frame, then reflects off any edge it crossed.
    pub fn update(&mut self, bounds: Bounds) {
        advance_position(self);
        reflect_on_boundary(self, bounds);
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn snapshot(&self, index: usize) -> ParticleSnapshot {
        ParticleSnapshot {
            index,
            x: self.position.x,
            y: self.position.y,
            vx: self.velocity.x,
            vy: self.velocity.y,
            radius: self.radius,
        }
    }
}

/// `position += velocity`.
pub fn advance_position(particle: &mut Particle) {
    particle.position += particle.velocity;
}

/// Negates each velocity component whose coordinate lies outside
/// `[0, extent]`. Position is left where it is, so a particle may sit up to
/// one step outside until the next advance brings it back.
pub fn reflect_on_boundary(particle: &mut Particle, bounds: Bounds) {
    if particle.position.x < 0.0 || particle.position.x > bounds.width {
        particle.velocity.x = -particle.velocity.x;
    }
    if particle.position.y < 0.0 || particle.position.y > bounds.height {
        particle.velocity.y = -particle.velocity.y;
    }
}

/// Seeds `count` particles.
pub fn seed_particles<R: Rng>(
    rng: &mut R,
    count: usize,
    bounds: Bounds,
    max_speed: f32,
    radius: f32,
) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle::spawn(rng, bounds, max_speed, radius))
        .collect()
}

/// Moves every particle to the same relative spot in `to`.
pub fn rescale_positions(particles: &mut [Particle], from: Bounds, to: Bounds) {
    let sx = to.width / from.width;
    let sy = to.height / from.height;
    for particle in particles {
        particle.position = Vector2::new(particle.position.x * sx, particle.position.y * sy);
    }
}
