//! Proximity connections between particles.

use crate::particle::Particle;

/// Alpha of the most opaque connection line, at distance 0.
pub const DEFAULT_MAX_ALPHA: f32 = 0.15;

/// Distance over which alpha falls by 1.0.
pub const DEFAULT_FADE_DISTANCE: f32 = 2000.0;

/// Pairs further apart than this get no line.
pub const DEFAULT_MAX_DISTANCE: f32 = 200.0;

/// `max(0, max_alpha - distance / fade_distance)`.
pub fn line_opacity(distance: f32, max_alpha: f32, fade_distance: f32) -> f32 {
    (max_alpha - distance / fade_distance).max(0.0)
}

/// Number of unordered distinct pairs among `n` particles.
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Calls `f(a, b, distance)` once for every unordered pair, `a` before `b`.
pub fn for_each_pair<F>(particles: &[Particle], mut f: F)
where
    F: FnMut(&Particle, &Particle, f32),
{
    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            f(a, b, a.position.distance(b.position));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector2;

    fn opacity(d: f32) -> f32 {
        line_opacity(d, DEFAULT_MAX_ALPHA, DEFAULT_FADE_DISTANCE)
    }

    #[test]
    fn test_opacity_boundaries() {
        assert_eq!(opacity(0.0), 0.15);
        assert!((opacity(200.0) - 0.05).abs() < 1e-6);
        assert_eq!(opacity(300.0), 0.0);
        assert_eq!(opacity(400.0), 0.0);
    }

    #[test]
    fn test_opacity_monotonic() {
        let mut last = opacity(0.0);
        for d in 1..300 {
            let current = opacity(d as f32);
            assert!(current <= last);
            last = current;
        }
    }

    #[test]
    fn test_pair_count() {
        assert_eq!(pair_count(0), 0);
        assert_eq!(pair_count(1), 0);
        assert_eq!(pair_count(20), 190);
    }

    #[test]
    fn test_each_pair_visited_once() {
        let particles: Vec<Particle> = (0..5)
            .map(|i| Particle::new(Vector2::new(i as f32, 0.0), Vector2::ZERO, 6.0))
            .collect();

        let mut visits = Vec::new();
        for_each_pair(&particles, |a, b, d| {
            assert!(a.position.x < b.position.x);
            assert_eq!(d, b.position.x - a.position.x);
            visits.push((a.position.x as i32, b.position.x as i32));
        });

        assert_eq!(visits.len(), pair_count(5));
        visits.sort();
        visits.dedup();
        assert_eq!(visits.len(), 10);
    }
}
