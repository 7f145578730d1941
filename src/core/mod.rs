//! Particle, container and the fixed-rate simulation driver.

pub mod colour;
pub mod container;
pub mod frame;
pub mod particle;
pub mod sim;

pub use colour::{Colour, DEFAULT_PALETTE};
pub use container::Container;
pub use frame::{Frame, FrameRecorder, FrameSink, JsonLinesSink, ParticleView};
pub use particle::{Axis, Particle};
pub use sim::{RunSummary, Simulation};
