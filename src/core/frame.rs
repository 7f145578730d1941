use crate::core::colour::Colour;
use crate::core::particle::{Particle, DIM};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// What a renderer needs to draw one particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub center: [f64; DIM],
    pub radius: f64,
    pub colour: Colour,
}

impl From<&Particle> for ParticleView {
    fn from(p: &Particle) -> Self {
        Self {
            center: p.center,
            radius: p.radius,
            colour: p.colour,
        }
    }
}

/// Immutable snapshot of the container taken before a tick is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Presentation index, starting at 0.
    pub index: u64,
    /// Target resolution (width, height).
    pub resolution: (u32, u32),
    /// Particles in container membership order.
    pub particles: Vec<ParticleView>,
}

/// Consumer of frames in presentation order (renderer, encoder, recorder).
///
/// The sink owns its output lifecycle: it is handed every frame through
/// `write_frame` and then `finish` exactly once after the last one.
pub trait FrameSink {
    fn write_frame(&mut self, frame: &Frame) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Keeps every frame in memory.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    pub frames: Vec<Frame>,
    pub finished: bool,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameSink for FrameRecorder {
    fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

/// Writes one JSON object per frame, newline separated, for an external
/// renderer to replay.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    out: W,
    written: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    /// Number of frames written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        serde_json::to_writer(&mut self.out, frame)?;
        self.out.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::colour::DEFAULT_PALETTE;

    fn frame(index: u64) -> Frame {
        Frame {
            index,
            resolution: (200, 100),
            particles: vec![ParticleView {
                center: [20.0, 30.0],
                radius: 5.0,
                colour: DEFAULT_PALETTE[3],
            }],
        }
    }

    #[test]
    fn recorder_keeps_order_and_finish() -> Result<()> {
        let mut rec = FrameRecorder::new();
        rec.write_frame(&frame(0))?;
        rec.write_frame(&frame(1))?;
        rec.finish()?;
        assert!(rec.finished);
        let indices: Vec<u64> = rec.frames.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![0, 1]);
        Ok(())
    }

    #[test]
    fn json_lines_one_frame_per_line() -> Result<()> {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.write_frame(&frame(0))?;
        sink.write_frame(&frame(1))?;
        sink.finish()?;
        assert_eq!(sink.written(), 2);

        let bytes = sink.into_inner();
        let text = String::from_utf8_lossy(&bytes);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let back: Frame = serde_json::from_str(lines[1])?;
        assert_eq!(back, frame(1));
        Ok(())
    }
}
