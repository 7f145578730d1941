use crate::core::colour::Colour;
use crate::error::{Error, Result};
/// Fixed spatial dimension (2D).
pub const DIM: usize = 2;

/// Coordinate axis of the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Both axes in update order.
    pub const ALL: [Axis; DIM] = [Axis::X, Axis::Y];

    /// Position of this axis in `[x, y]` arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }

    /// The other axis.
    #[inline]
    pub fn next(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

impl TryFrom<usize> for Axis {
    type Error = Error;

    fn try_from(d: usize) -> Result<Self> {
        match d {
            0 => Ok(Axis::X),
            1 => Ok(Axis::Y),
            _ => Err(Error::InvalidParam(format!(
                "dimension index must be 0 or 1, got {d}"
            ))),
        }
    }
}

/// A circular particle bouncing inside a container.
///
/// Fields:
/// - `center`: position [x, y] in pixels
/// - `velocity`: [vx, vy] in pixels per reference tick
/// - `acceleration`: constant [ax, ay] added to the velocity once per tick
/// - `radius`, `mass`: strictly positive
/// - `constraints`: [width, height] of the container the particle reflects against,
///   `None` until the particle is inserted (a free particle has no walls)
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Position (x, y).
    pub center: [f64; DIM],
    /// Velocity (vx, vy).
    pub velocity: [f64; DIM],
    /// Constant acceleration (ax, ay).
    pub acceleration: [f64; DIM],
    /// Radius (> 0).
    pub radius: f64,
    /// Mass (> 0).
    pub mass: f64,
    /// Display colour.
    pub colour: Colour,
    /// Container extent (width, height); set when the particle is inserted.
    pub constraints: Option<[f64; DIM]>,
}

impl Particle {
    /// Create a new particle after validating invariants.
    ///
    /// Acceleration starts at zero and there are no walls; the container sets
    /// both when the particle is inserted.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `radius` or `mass` is non-positive or any component is NaN/inf.
    pub fn new(
        radius: f64,
        mass: f64,
        center: [f64; DIM],
        velocity: [f64; DIM],
        colour: Colour,
    ) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::InvalidParam("mass must be finite and > 0".into()));
        }
        if !center.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("center must be finite".into()));
        }
        if !velocity.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        Ok(Self {
            center,
            velocity,
            acceleration: [0.0; DIM],
            radius,
            mass,
            colour,
            constraints: None,
        })
    }

    /// Builder-style acceleration override.
    pub fn with_acceleration(mut self, acceleration: [f64; DIM]) -> Result<Self> {
        if !acceleration.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("acceleration must be finite".into()));
        }
        self.acceleration = acceleration;
        Ok(self)
    }

    /// Whether the particle's extent along `axis` touches or crosses either wall.
    /// Always false for a particle outside any container.
    #[inline]
    pub fn collide(&self, axis: Axis) -> bool {
        let Some(extent) = self.constraints else {
            return false;
        };
        let d = axis.index();
        self.center[d] + self.radius >= extent[d] || self.center[d] - self.radius <= 0.0
    }

    /// [`Particle::collide`] for a raw dimension index (0 = x, 1 = y).
    pub fn collide_index(&self, d: usize) -> Result<bool> {
        Ok(self.collide(Axis::try_from(d)?))
    }

    /// Advance one tick of length `dt` (semi-implicit Euler).
    ///
    /// Per axis: move by `floor(velocity * dt)`, reflect on wall contact,
    /// then add the acceleration. The floor keeps integral pixel coordinates
    /// integral.
    pub fn update(&mut self, dt: f64) {
        for axis in Axis::ALL {
            let d = axis.index();
            self.center[d] += (self.velocity[d] * dt).floor();
            if self.collide(axis) {
                self.velocity[d] = -self.velocity[d];
            }
            self.velocity[d] += self.acceleration[d];
        }
    }

    /// Kinetic energy in mass-pixel units per reference tick squared.
    pub fn kinetic_energy(&self) -> f64 {
        let [vx, vy] = self.velocity;
        self.mass * (vx * vx + vy * vy) / 2.0
    }

    /// Linear momentum m v.
    #[inline]
    pub fn momentum(&self) -> [f64; DIM] {
        [self.mass * self.velocity[0], self.mass * self.velocity[1]]
    }

    /// Circles overlap strictly (touching is not a contact).
    pub fn overlaps(&self, other: &Particle) -> bool {
        let dx = other.center[0] - self.center[0];
        let dy = other.center[1] - self.center[1];
        let r_sum = self.radius + other.radius;
        dx * dx + dy * dy < r_sum * r_sum
    }
}
