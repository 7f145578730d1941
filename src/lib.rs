//! Circular particles bouncing inside a rectangular container.
//!
//! - `core`: [`Particle`], [`Container`] and the fixed-rate [`Simulation`]
//!   driver that hands pre-tick [`Frame`]s to a [`FrameSink`].
//! - `collision`: the [`CollisionDetector`] trait and its broad phases
//!   (brute force, sweep-and-prune, k-d tree) sharing one elastic resolver.
//! - `config`: serde-backed [`SceneConfig`].
//!
//! ```no_run
//! use bouncebox::{FrameRecorder, SceneConfig, Simulation};
//!
//! # fn main() -> bouncebox::Result<()> {
//! let cfg = SceneConfig::from_json_str(r#"{ "width": 640, "height": 480, "seed": 1 }"#)?;
//! let mut sim = Simulation::from_config(&cfg)?;
//! let mut frames = FrameRecorder::new();
//! sim.run(&mut frames)?;
//! # Ok(())
//! # }
//! ```

pub mod collision;
pub mod config;
pub mod core;
pub mod error;

pub use crate::collision::{CollisionDetector, CollisionReport, DetectorKind};
pub use crate::config::SceneConfig;
pub use crate::core::{
    Colour, Container, Frame, FrameRecorder, FrameSink, Particle, RunSummary, Simulation,
};
pub use crate::error::{Error, Result};
