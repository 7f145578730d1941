//! Sweep-and-prune over vertical bins.
//!
//! The container is cut into `sections` equal-width bins along x and every
//! particle is filed under the bin holding its center. Each bin is then swept
//! together with the next `reach` bins, where `reach` is the number of bins a
//! pair of the largest particles can span: entries are sorted by the left edge
//! of their x-interval, the active list is pruned once an interval ends, and
//! survivors are filtered on y-interval overlap.
//!
//! A pair is only reported from the bin of its leftmost member, so no pair is
//! emitted twice.

use crate::collision::{canonicalize, max_radius, CollisionDetector};
use crate::core::container::Container;
use crate::core::Particle;
use crate::error::{Error, Result};
use ordered_float::NotNan;

/// Sweep-and-prune collision detector.
#[derive(Debug, Clone)]
pub struct SweepDetector {
    sections: usize,
    bins: Vec<Vec<usize>>,
}

/// One particle queued for a sweep.
#[derive(Debug, Clone, Copy)]
struct Entry {
    left: NotNan<f64>,
    index: usize,
    /// Whether the particle belongs to the bin being swept.
    home: bool,
}

impl SweepDetector {
    /// Split the width into `sections` equal vertical bins.
    ///
    /// Errors: `Error::InvalidParam` if `sections == 0`.
    pub fn new(sections: usize) -> Result<Self> {
        if sections == 0 {
            return Err(Error::InvalidParam("sections must be >= 1".into()));
        }
        Ok(Self {
            sections,
            bins: vec![Vec::new(); sections],
        })
    }

    /// Number of vertical bins.
    pub fn sections(&self) -> usize {
        self.sections
    }

    fn rebin(&mut self, particles: &[Particle], bin_width: f64) {
        for bin in &mut self.bins {
            bin.clear();
        }
        let last = self.sections - 1;
        for (i, p) in particles.iter().enumerate() {
            let b = (p.center[0] / bin_width).floor();
            let b = if b <= 0.0 { 0 } else { (b as usize).min(last) };
            self.bins[b].push(i);
        }
    }
}

impl CollisionDetector for SweepDetector {
    fn name(&self) -> &'static str {
        "sweep"
    }

    fn candidate_pairs(&mut self, container: &Container) -> Result<Vec<(usize, usize)>> {
        let particles = container.particles();
        let mut pairs = Vec::new();
        if particles.len() < 2 {
            return Ok(pairs);
        }

        let bin_width = container.extent()[0] / self.sections as f64;
        let reach = ((2.0 * max_radius(particles) / bin_width).ceil() as usize).max(1);
        self.rebin(particles, bin_width);

        let mut entries: Vec<Entry> = Vec::new();
        let mut active: Vec<Entry> = Vec::new();
        for b in 0..self.sections {
            if self.bins[b].is_empty() {
                continue;
            }
            let last = (b + reach).min(self.sections - 1);

            entries.clear();
            for (offset, bin) in self.bins[b..=last].iter().enumerate() {
                for &i in bin {
                    let p = &particles[i];
                    let left = NotNan::new(p.center[0] - p.radius).map_err(|_| {
                        Error::InvalidParam(format!("particle {i} has a NaN position"))
                    })?;
                    entries.push(Entry {
                        left,
                        index: i,
                        home: offset == 0,
                    });
                }
            }
            entries.sort_unstable_by_key(|e| (e.left, e.index));

            active.clear();
            for &e in &entries {
                let p = &particles[e.index];
                active.retain(|a| {
                    let q = &particles[a.index];
                    q.center[0] + q.radius >= *e.left
                });
                for a in &active {
                    if !(e.home || a.home) {
                        continue;
                    }
                    let q = &particles[a.index];
                    if (p.center[1] - q.center[1]).abs() <= p.radius + q.radius {
                        pairs.push((a.index, e.index));
                    }
                }
                active.push(e);
            }
        }

        canonicalize(&mut pairs);
        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::BruteForce;
    use crate::core::colour::DEFAULT_PALETTE;
    use rand::{rngs::StdRng, SeedableRng};

    fn ball(center: [f64; 2]) -> Result<Particle> {
        Particle::new(10.0, 1.0, center, [0.0, 0.0], DEFAULT_PALETTE[0])
    }

    #[test]
    fn zero_sections_rejected() {
        assert!(SweepDetector::new(0).is_err());
    }

    #[test]
    fn pair_across_bin_boundary_found() -> Result<()> {
        // bin width 50: centers 45 and 60 land in bins 0 and 1
        let c = Container::with_particles(
            200,
            200,
            [0.0, 0.0],
            vec![ball([45.0, 100.0])?, ball([60.0, 100.0])?, ball([150.0, 100.0])?],
        )?;
        let mut sweep = SweepDetector::new(4)?;
        assert_eq!(sweep.candidate_pairs(&c)?, vec![(0, 1)]);
        Ok(())
    }

    #[test]
    fn y_separated_pairs_are_pruned() -> Result<()> {
        let c = Container::with_particles(
            200,
            200,
            [0.0, 0.0],
            vec![ball([100.0, 20.0])?, ball([105.0, 150.0])?],
        )?;
        let mut sweep = SweepDetector::new(1)?;
        assert!(sweep.candidate_pairs(&c)?.is_empty());
        Ok(())
    }

    #[test]
    fn many_thin_sections_still_find_contacts() -> Result<()> {
        // bins narrower than a particle diameter
        let c = Container::with_particles(
            200,
            200,
            [0.0, 0.0],
            vec![ball([30.0, 100.0])?, ball([48.0, 100.0])?],
        )?;
        let mut sweep = SweepDetector::new(50)?;
        assert_eq!(sweep.candidate_pairs(&c)?, vec![(0, 1)]);
        Ok(())
    }

    #[test]
    fn candidates_cover_every_brute_force_contact() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(314);
        let mut c = Container::new(300, 300, [0.0, 0.0])?;
        c.add_random_particle(40, &mut rng);
        let ps = c.particles();

        let overlapping: Vec<(usize, usize)> = BruteForce
            .candidate_pairs(&c)?
            .into_iter()
            .filter(|&(i, j)| ps[i].overlaps(&ps[j]))
            .collect();

        for sections in [1, 3, 7, 30] {
            let mut sweep = SweepDetector::new(sections)?;
            let pairs = sweep.candidate_pairs(&c)?;
            for pair in &overlapping {
                assert!(pairs.contains(pair), "sections={sections} missed {pair:?}");
            }
        }
        Ok(())
    }
}
