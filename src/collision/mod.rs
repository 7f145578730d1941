//! Pairwise particle collisions.
//!
//! A detector runs once per tick, after the container has integrated its
//! particles. It has two halves:
//! - **Broad phase** (`candidate_pairs`): strategy specific. Returns every pair
//!   that *might* overlap, canonicalized as `(min, max)` and strictly sorted.
//! - **Narrow phase + resolution** ([`resolve::resolve_contacts`]): shared by all
//!   strategies. Confirms overlaps, applies elastic impulses and separation from
//!   a single consistent read of the particle state, then re-enforces walls.
//!
//! Strategies only differ in how many pairs they hand to the narrow phase, so
//! for the same container they must report the same contacts.

pub mod brute;
pub mod kdtree;
pub mod resolve;
pub mod sweep;

pub use brute::BruteForce;
pub use kdtree::{KdTree, KdTreeDetector};
pub use resolve::{resolve_contacts, CollisionReport};
pub use sweep::SweepDetector;

use crate::core::container::{tick_length, Container};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Per-tick collision strategy operating on a container's particles.
pub trait CollisionDetector {
    /// Short strategy name, used in diagnostics and errors.
    fn name(&self) -> &'static str;

    /// Candidate pairs `(i, j)`, `i < j`, sorted and without duplicates.
    ///
    /// Strategies must override this; the default reports
    /// `Error::NotImplemented` so a missing broad phase never silently skips
    /// collisions.
    fn candidate_pairs(&mut self, container: &Container) -> Result<Vec<(usize, usize)>> {
        let _ = container;
        Err(Error::NotImplemented(self.name()))
    }

    /// Detect and resolve all particle contacts for one tick.
    ///
    /// Errors: `Error::InvalidParam` if `fps == 0`; `Error::NotImplemented`
    /// if the strategy has no broad phase.
    fn update(&mut self, container: &mut Container, fps: u32) -> Result<CollisionReport> {
        tick_length(fps)?;
        let pairs = self.candidate_pairs(container)?;
        let report = resolve_contacts(container, &pairs);
        log::debug!(
            "{}: {} candidates, {} contacts, {} resolved",
            self.name(),
            report.candidates,
            report.contacts,
            report.resolved
        );
        Ok(report)
    }
}

/// Strategy selector, usable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetectorKind {
    /// Test every pair.
    BruteForce,
    /// Sweep-and-prune over `sections` vertical bins.
    Sweep { sections: usize },
    /// Balanced k-d tree rebuilt each tick.
    KdTree,
}

impl Default for DetectorKind {
    fn default() -> Self {
        DetectorKind::Sweep { sections: 8 }
    }
}

impl DetectorKind {
    /// Instantiate the selected strategy.
    ///
    /// Errors: `Error::InvalidParam` for `Sweep { sections: 0 }`.
    pub fn build(self) -> Result<Box<dyn CollisionDetector>> {
        Ok(match self {
            DetectorKind::BruteForce => Box::new(BruteForce),
            DetectorKind::Sweep { sections } => Box::new(SweepDetector::new(sections)?),
            DetectorKind::KdTree => Box::new(KdTreeDetector::new()),
        })
    }
}

/// Sort and de-duplicate `(min, max)` pairs in place.
pub(crate) fn canonicalize(pairs: &mut Vec<(usize, usize)>) {
    for pair in pairs.iter_mut() {
        if pair.0 > pair.1 {
            *pair = (pair.1, pair.0);
        }
    }
    pairs.sort_unstable();
    pairs.dedup();
}

/// Largest radius in the slice, or 0 when empty.
pub(crate) fn max_radius(particles: &[crate::core::Particle]) -> f64 {
    particles.iter().map(|p| p.radius).fold(0.0, f64::max)
}
