//! Scene configuration.
//!
//! Every field has a default, so a JSON document only needs to name what it
//! changes:
//!
//! ```json
//! { "width": 640, "height": 480, "particles": 12, "seed": 7,
//!   "detector": { "kind": "kd_tree" } }
//! ```

use crate::collision::DetectorKind;
use crate::core::container::MIN_SIDE;
use crate::core::particle::DIM;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters for a complete simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Container width and output resolution width, in pixels.
    pub width: u32,
    /// Container height and output resolution height, in pixels.
    pub height: u32,
    /// Frames per second.
    pub fps: u32,
    /// Length of the run in seconds.
    pub duration: u32,
    /// Number of randomly generated particles.
    pub particles: usize,
    /// Acceleration shared by every particle.
    pub acceleration: [f64; DIM],
    /// RNG seed for scene generation; `None` draws one from the thread rng.
    pub seed: Option<u64>,
    /// Broad-phase strategy.
    pub detector: DetectorKind,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 1440,
            height: 1440,
            fps: 144,
            duration: 5,
            particles: 5,
            acceleration: [0.0, 0.0],
            seed: None,
            detector: DetectorKind::default(),
        }
    }
}

impl SceneConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check the contract the simulation relies on.
    ///
    /// Errors: `Error::InvalidParam` describing the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        if self.width < MIN_SIDE || self.height < MIN_SIDE {
            return Err(Error::InvalidParam(format!(
                "width and height must be >= {MIN_SIDE}, got {}x{}",
                self.width, self.height
            )));
        }
        if self.fps == 0 {
            return Err(Error::InvalidParam("fps must be > 0".into()));
        }
        if !self.acceleration.iter().all(|a| a.is_finite()) {
            return Err(Error::InvalidParam("acceleration must be finite".into()));
        }
        if let DetectorKind::Sweep { sections: 0 } = self.detector {
            return Err(Error::InvalidParam("sweep sections must be >= 1".into()));
        }
        Ok(())
    }

    /// Number of frames the run produces.
    pub fn total_frames(&self) -> u64 {
        u64::from(self.fps) * u64::from(self.duration)
    }
}
