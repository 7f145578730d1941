use crate::core::colour::Colour;
use crate::core::frame::ParticleView;
use crate::core::particle::{Particle, DIM};
use crate::error::{Error, Result};
use rand::Rng;

/// Smallest accepted container side, in pixels.
pub const MIN_SIDE: u32 = 100;

/// Frame rate at which one tick advances the simulation by `dt = 1`.
pub const REFERENCE_FPS: f64 = 60.0;

/// Rectangular box `[0, width] x [0, height]` owning its particles.
///
/// Every particle is admitted through [`Container::check_in_bounds`]; on
/// admission it takes the container's acceleration and dimensions.
#[derive(Debug, Clone)]
pub struct Container {
    width: u32,
    height: u32,
    acceleration: [f64; DIM],
    particles: Vec<Particle>,
}

impl Container {
    /// Create an empty container.
    ///
    /// Errors: `Error::InvalidParam` if either side is below [`MIN_SIDE`] or
    /// the acceleration is not finite.
    pub fn new(width: u32, height: u32, acceleration: [f64; DIM]) -> Result<Self> {
        if width < MIN_SIDE || height < MIN_SIDE {
            return Err(Error::InvalidParam(format!(
                "container must be at least {MIN_SIDE}x{MIN_SIDE}, got {width}x{height}"
            )));
        }
        if !acceleration.iter().all(|a| a.is_finite()) {
            return Err(Error::InvalidParam("acceleration must be finite".into()));
        }
        Ok(Self {
            width,
            height,
            acceleration,
            particles: Vec::new(),
        })
    }

    /// Create a container and admit `particles` in order, dropping (with a
    /// warning) any that do not fit.
    pub fn with_particles(
        width: u32,
        height: u32,
        acceleration: [f64; DIM],
        particles: impl IntoIterator<Item = Particle>,
    ) -> Result<Self> {
        let mut container = Self::new(width, height, acceleration)?;
        for p in particles {
            container.add_particle(p);
        }
        Ok(container)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Container extent as floating point `[width, height]`.
    #[inline]
    pub fn extent(&self) -> [f64; DIM] {
        [f64::from(self.width), f64::from(self.height)]
    }

    /// Acceleration given to every admitted particle.
    pub fn acceleration(&self) -> [f64; DIM] {
        self.acceleration
    }

    /// Particles in membership (insertion) order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access for collision detectors and scene setup.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Number of admitted particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// True if no particle has been admitted.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// True iff the particle's full extent lies within `[0, width] x [0, height]`.
    pub fn check_in_bounds(&self, particle: &Particle) -> bool {
        let [w, h] = self.extent();
        let [x, y] = particle.center;
        let r = particle.radius;
        x + r <= w && x - r >= 0.0 && y + r <= h && y - r >= 0.0
    }

    /// Admit a particle, or report why it was refused.
    ///
    /// Errors: `Error::OutOfBounds` if the particle fails [`Container::check_in_bounds`].
    pub fn try_add_particle(&mut self, mut particle: Particle) -> Result<()> {
        if !self.check_in_bounds(&particle) {
            return Err(Error::OutOfBounds(format!(
                "particle at ({}, {}) with radius {} does not fit in {}x{}",
                particle.center[0], particle.center[1], particle.radius, self.width, self.height
            )));
        }
        particle.constraints = Some(self.extent());
        particle.acceleration = self.acceleration;
        self.particles.push(particle);
        Ok(())
    }

    /// Admit a particle; out-of-bounds particles are dropped with a warning.
    /// Returns whether the particle was kept.
    pub fn add_particle(&mut self, particle: Particle) -> bool {
        match self.try_add_particle(particle) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("particle omitted: {e}");
                false
            }
        }
    }

    /// Add `quantity` random particles that fit the container.
    ///
    /// With `s` the shorter side: integer radius in `[0.05 s, 0.1 s]`, integer
    /// center anywhere the particle fits, integer velocity per axis in
    /// `[-0.05 s, 0.05 s]`, integer mass in `[1, 10]`, palette colour.
    pub fn add_random_particle<R: Rng + ?Sized>(&mut self, quantity: usize, rng: &mut R) {
        let short = i64::from(self.width.min(self.height));
        let r_lo = short * 5 / 100;
        let r_hi = short / 10;
        let v_max = short * 5 / 100;
        let (w, h) = (i64::from(self.width), i64::from(self.height));

        for _ in 0..quantity {
            let r = rng.random_range(r_lo..=r_hi);
            let cx = rng.random_range(r..=w - r);
            let cy = rng.random_range(r..=h - r);
            let v = [
                rng.random_range(-v_max..=v_max) as f64,
                rng.random_range(-v_max..=v_max) as f64,
            ];
            let mass = rng.random_range(1..=10u32);
            let colour = Colour::random(rng);

            match Particle::new(r as f64, f64::from(mass), [cx as f64, cy as f64], v, colour) {
                Ok(p) => {
                    self.add_particle(p);
                }
                Err(e) => log::warn!("random particle rejected: {e}"),
            }
        }
    }

    /// Advance every particle by one tick at the given frame rate.
    ///
    /// `dt = 60 / fps`, so motion speed is independent of the frame rate.
    ///
    /// Errors: `Error::InvalidParam` if `fps == 0`.
    pub fn update(&mut self, fps: u32) -> Result<()> {
        let dt = tick_length(fps)?;
        for p in &mut self.particles {
            p.update(dt);
        }
        Ok(())
    }

    /// Read-only view of every particle, in membership order.
    pub fn snapshot(&self) -> Vec<ParticleView> {
        self.particles.iter().map(ParticleView::from).collect()
    }

    /// Sum of the particles' kinetic energies.
    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(|p| p.kinetic_energy()).sum()
    }

    /// Total linear momentum (diagnostic).
    pub fn momentum(&self) -> [f64; DIM] {
        self.particles.iter().fold([0.0; DIM], |acc, p| {
            let m = p.momentum();
            [acc[0] + m[0], acc[1] + m[1]]
        })
    }
}

/// Tick length for a frame rate, normalised to [`REFERENCE_FPS`].
pub(crate) fn tick_length(fps: u32) -> Result<f64> {
    if fps == 0 {
        return Err(Error::InvalidParam("fps must be > 0".into()));
    }
    Ok(REFERENCE_FPS / f64::from(fps))
}
