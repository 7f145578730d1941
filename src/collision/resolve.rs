use crate::core::container::Container;
use crate::core::particle::{Particle, DIM};

/// Center distances at or below this are treated as coincident.
const EPS_DIST: f64 = 1e-12;

/// Counts from one detection pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Pairs handed over by the broad phase.
    pub candidates: usize,
    /// Candidates whose circles actually overlap.
    pub contacts: usize,
    /// Contacts that were approaching and received an impulse.
    pub resolved: usize,
    /// Particles pushed back inside the walls after resolution.
    pub wall_corrections: usize,
}

/// A confirmed overlap between two particles.
#[derive(Debug, Clone, Copy)]
struct Contact {
    /// Unit normal from the first particle towards the second.
    normal: [f64; DIM],
    /// Penetration depth (> 0).
    depth: f64,
}

impl Contact {
    fn between(a: &Particle, b: &Particle) -> Option<Self> {
        let d = [b.center[0] - a.center[0], b.center[1] - a.center[1]];
        let r_sum = a.radius + b.radius;
        let dist_sq = dot(&d, &d);
        if dist_sq >= r_sum * r_sum {
            return None;
        }
        let dist = dist_sq.sqrt();
        if dist <= EPS_DIST {
            // Coincident centers: pick a fixed axis so the result stays deterministic
            return Some(Self {
                normal: [1.0, 0.0],
                depth: r_sum,
            });
        }
        Some(Self {
            normal: [d[0] / dist, d[1] / dist],
            depth: r_sum - dist,
        })
    }
}

/// Narrow phase and elastic resolution for a set of candidate pairs.
///
/// All contacts are evaluated against the particle state at entry; velocity
/// and position corrections are accumulated and applied together afterwards,
/// so the order of `pairs` does not bias the outcome. Each touched particle is
/// then clamped inside the container, reflecting any outward velocity.
pub fn resolve_contacts(container: &mut Container, pairs: &[(usize, usize)]) -> CollisionReport {
    let mut report = CollisionReport {
        candidates: pairs.len(),
        ..CollisionReport::default()
    };

    let n = container.len();
    let mut dv = vec![[0.0_f64; DIM]; n];
    let mut dx = vec![[0.0_f64; DIM]; n];
    let mut touched = vec![false; n];

    let particles = container.particles();
    for &(i, j) in pairs {
        let (Some(pi), Some(pj)) = (particles.get(i), particles.get(j)) else {
            log::warn!("skipping pair ({i}, {j}): only {n} particles");
            continue;
        };
        if i == j {
            log::warn!("skipping self pair ({i}, {j})");
            continue;
        }
        let Some(contact) = Contact::between(pi, pj) else {
            continue;
        };
        report.contacts += 1;
        touched[i] = true;
        touched[j] = true;

        let (mi, mj) = (pi.mass, pj.mass);
        let total = mi + mj;
        let nrm = contact.normal;

        // Push apart along the normal, heavier particle moves less
        for k in 0..DIM {
            dx[i][k] -= contact.depth * (mj / total) * nrm[k];
            dx[j][k] += contact.depth * (mi / total) * nrm[k];
        }

        let u = [
            pj.velocity[0] - pi.velocity[0],
            pj.velocity[1] - pi.velocity[1],
        ];
        let u_n = dot(&u, &nrm);
        if u_n >= 0.0 {
            // Already separating
            continue;
        }
        let fi = (2.0 * mj / total) * u_n;
        let fj = (2.0 * mi / total) * u_n;
        for k in 0..DIM {
            dv[i][k] += fi * nrm[k];
            dv[j][k] -= fj * nrm[k];
        }
        report.resolved += 1;
    }

    if report.contacts == 0 {
        return report;
    }

    let extent = container.extent();
    for (i, p) in container.particles_mut().iter_mut().enumerate() {
        if !touched[i] {
            continue;
        }
        for k in 0..DIM {
            p.velocity[k] += dv[i][k];
            p.center[k] += dx[i][k];
        }
        if enforce_walls(p, extent) {
            report.wall_corrections += 1;
        }
    }
    report
}

/// Clamp the particle into `[r, extent - r]` on each axis, reflecting any
/// velocity component that still points out of the box. Returns whether a
/// correction was needed.
fn enforce_walls(p: &mut Particle, extent: [f64; DIM]) -> bool {
    let mut corrected = false;
    for k in 0..DIM {
        let lo = p.radius;
        let hi = extent[k] - p.radius;
        if p.center[k] < lo {
            p.center[k] = lo;
            if p.velocity[k] < 0.0 {
                p.velocity[k] = -p.velocity[k];
            }
            corrected = true;
        } else if p.center[k] > hi {
            p.center[k] = hi;
            if p.velocity[k] > 0.0 {
                p.velocity[k] = -p.velocity[k];
            }
            corrected = true;
        }
    }
    corrected
}

#[inline]
fn dot(a: &[f64; DIM], b: &[f64; DIM]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
