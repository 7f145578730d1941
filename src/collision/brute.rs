use crate::collision::CollisionDetector;
use crate::core::container::Container;
use crate::error::Result;

/// All-pairs broad phase, `O(n^2)`.
///
/// Used as the reference the partitioned strategies are checked against.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForce;

impl CollisionDetector for BruteForce {
    fn name(&self) -> &'static str {
        "brute_force"
    }

    fn candidate_pairs(&mut self, container: &Container) -> Result<Vec<(usize, usize)>> {
        let n = container.len();
        let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                pairs.push((i, j));
            }
        }
        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::colour::DEFAULT_PALETTE;
    use crate::core::Particle;

    #[test]
    fn every_pair_is_a_candidate() -> Result<()> {
        let mut c = Container::new(400, 400, [0.0, 0.0])?;
        for k in 0..4 {
            let x = 50.0 + 80.0 * k as f64;
            c.add_particle(Particle::new(10.0, 1.0, [x, 200.0], [0.0, 0.0], DEFAULT_PALETTE[0])?);
        }
        let pairs = BruteForce.candidate_pairs(&c)?;
        assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        Ok(())
    }
}
