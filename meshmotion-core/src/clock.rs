//! Frame timing inputs for animators

/// Clock reading handed to every tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Seconds since the animation started
    pub elapsed: f32,
    /// Seconds since the previous tick
    pub delta: f32,
}

impl FrameTime {
    pub fn new(elapsed: f32, delta: f32) -> Self {
        Self { elapsed, delta }
    }

    /// A reading at `elapsed` seconds with no known previous frame
    pub fn at(elapsed: f32) -> Self {
        Self {
            elapsed,
            delta: 0.0,
        }
    }
}

/// Deterministic clock that advances by a fixed step per frame
#[derive(Debug, Clone, Copy)]
pub struct FixedStepClock {
    step: f32,
    frame: u64,
}

impl FixedStepClock {
    pub fn new(step: f32) -> Self {
        Self { step, frame: 0 }
    }

    /// Clock stepping at `fps` frames per second
    pub fn from_fps(fps: u32) -> Self {
        Self::new(1.0 / fps.max(1) as f32)
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Move to the next frame and return its reading.
    ///
    /// Elapsed time is `frame * step` rather than a running sum.
    pub fn advance(&mut self) -> FrameTime {
        self.frame += 1;
        FrameTime::new(self.frame as f32 * self.step, self.step)
    }

    pub fn reset(&mut self) {
        self.frame = 0;
    }
}
