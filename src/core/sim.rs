use crate::collision::{CollisionDetector, CollisionReport};
use crate::config::SceneConfig;
use crate::core::container::{tick_length, Container};
use crate::core::frame::{Frame, FrameSink};
use crate::error::{Error, Result};
use rand::{rng, rngs::StdRng, Rng, SeedableRng};
use std::fmt;

/// Totals accumulated over a [`Simulation::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames handed to the sink.
    pub frames: u64,
    /// Overlapping pairs seen by the detector.
    pub contacts: usize,
    /// Pairs that received an elastic impulse.
    pub resolved: usize,
    /// Particles pushed back inside the walls after resolution.
    pub wall_corrections: usize,
}

impl RunSummary {
    fn absorb(&mut self, report: &CollisionReport) {
        self.contacts += report.contacts;
        self.resolved += report.resolved;
        self.wall_corrections += report.wall_corrections;
    }
}

/// Fixed-rate driver: one tick per rendered frame.
///
/// Each frame is captured *before* its tick is applied, so frame 0 shows the
/// initial scene and the sink never observes a half-updated container.
pub struct Simulation {
    container: Container,
    detector: Box<dyn CollisionDetector>,
    fps: u32,
    duration: u32,
    ticks: u64,
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("container", &self.container)
            .field("detector", &self.detector.name())
            .field("fps", &self.fps)
            .field("duration", &self.duration)
            .field("ticks", &self.ticks)
            .finish()
    }
}

impl Simulation {
    /// Errors: `Error::InvalidParam` if `fps == 0`.
    pub fn new(
        container: Container,
        detector: Box<dyn CollisionDetector>,
        fps: u32,
        duration: u32,
    ) -> Result<Self> {
        tick_length(fps)?;
        Ok(Self {
            container,
            detector,
            fps,
            duration,
            ticks: 0,
        })
    }

    /// Build a randomly populated scene from a configuration.
    ///
    /// The same `seed` always yields the same scene.
    pub fn from_config(cfg: &SceneConfig) -> Result<Self> {
        cfg.validate()?;
        let mut rng: StdRng = match cfg.seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rng().random()),
        };
        let mut container = Container::new(cfg.width, cfg.height, cfg.acceleration)?;
        container.add_random_particle(cfg.particles, &mut rng);
        if container.len() != cfg.particles {
            return Err(Error::InvalidParam(format!(
                "only {} of {} random particles fit the container",
                container.len(),
                cfg.particles
            )));
        }
        Self::new(container, cfg.detector.build()?, cfg.fps, cfg.duration)
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Scene setup access; not to be used while a sink is drawing.
    pub fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }

    pub fn detector_name(&self) -> &'static str {
        self.detector.name()
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// `fps * duration`.
    pub fn total_frames(&self) -> u64 {
        u64::from(self.fps) * u64::from(self.duration)
    }

    /// Ticks applied so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Snapshot of the current state, indexed by the number of ticks applied.
    pub fn capture(&self) -> Frame {
        Frame {
            index: self.ticks,
            resolution: (self.container.width(), self.container.height()),
            particles: self.container.snapshot(),
        }
    }

    /// Apply one tick: integrate and wall-reflect every particle, then detect
    /// and resolve particle contacts.
    pub fn step(&mut self) -> Result<CollisionReport> {
        self.container.update(self.fps)?;
        let report = self.detector.update(&mut self.container, self.fps)?;
        self.ticks += 1;
        Ok(report)
    }

    /// Run `total_frames` frames into `sink`, then finish the sink.
    pub fn run<S: FrameSink + ?Sized>(&mut self, sink: &mut S) -> Result<RunSummary> {
        let total = self.total_frames();
        log::debug!(
            "running {} frames at {} fps with {} particles ({})",
            total,
            self.fps,
            self.container.len(),
            self.detector.name()
        );

        let mut summary = RunSummary::default();
        for _ in 0..total {
            let frame = self.capture();
            sink.write_frame(&frame)?;
            log::trace!("frame {} written", frame.index);

            let report = self.step()?;
            summary.absorb(&report);
            summary.frames += 1;
        }
        sink.finish()?;

        log::debug!(
            "run finished: {} frames, {} contacts, {} resolved",
            summary.frames,
            summary.contacts,
            summary.resolved
        );
        Ok(summary)
    }
}
