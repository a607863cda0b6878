/// Fixed-rate frame loop driving a car scene
use anyhow::Result;
use meshmotion_core::{CarScene, FrameTime};
use nalgebra::Point3;
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::status::{FrameStatus, StatusLine};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopSettings {
    pub fps: u32,
    pub duration: Duration,
    pub show_status: bool,
}

/// What a finished run did
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub frames: u64,
    pub elapsed: Duration,
    pub average_fps: f32,
    pub final_position: Point3<f32>,
}

/// Main application struct: ticks the scene once per frame
pub struct FrameLoopApp {
    scene: CarScene,
    settings: LoopSettings,
    status: Option<StatusLine>,
    frame_count: u64,
    fps: f32,
}

impl FrameLoopApp {
    pub fn new(scene: CarScene, settings: LoopSettings) -> Self {
        Self {
            scene,
            settings,
            status: settings.show_status.then(StatusLine::new),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn scene(&self) -> &CarScene {
        &self.scene
    }

    /// Run until the configured duration has passed, drawing status to `out`
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<RunSummary> {
        let target_frame_time = Duration::from_secs_f32(1.0 / self.settings.fps as f32);
        info!(
            fps = self.settings.fps,
            seconds = self.settings.duration.as_secs_f32(),
            "starting frame loop"
        );

        let start = Instant::now();
        let mut last_tick = start;
        let mut fps_window = start;
        let mut window_frames = 0u32;
        let mut time = FrameTime::default();

        while start.elapsed() < self.settings.duration {
            let frame_start = Instant::now();
            time = FrameTime::new(
                (frame_start - start).as_secs_f32(),
                (frame_start - last_tick).as_secs_f32(),
            );
            last_tick = frame_start;

            // Update
            self.scene.tick(&time)?;
            self.frame_count += 1;
            window_frames += 1;

            // Status
            let report = self.frame_status(&time);
            if let Some(status) = self.status.as_mut() {
                status.draw(out, &report)?;
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - fps_window).as_secs() >= 1 {
                self.fps = window_frames as f32 / (now - fps_window).as_secs_f32();
                debug!(fps = self.fps, frame = self.frame_count, "frame rate");
                window_frames = 0;
                fps_window = now;
            }

            // Frame timing
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }
        }

        if let Some(status) = self.status.as_mut() {
            status.finish(out)?;
        }

        let elapsed = start.elapsed();
        Ok(RunSummary {
            frames: self.frame_count,
            elapsed,
            average_fps: self.frame_count as f32 / elapsed.as_secs_f32().max(f32::EPSILON),
            final_position: self.scene.position(time.elapsed),
        })
    }

    fn frame_status(&self, time: &FrameTime) -> FrameStatus {
        let wheel_spin = self
            .scene
            .wheels()
            .first()
            .map(|wheel| wheel.spin_angle(time.elapsed).rem_euclid(360.0))
            .unwrap_or(0.0);

        FrameStatus {
            frame: self.frame_count,
            elapsed: time.elapsed,
            fps: self.fps,
            position: self.scene.position(time.elapsed),
            heading: self.scene.heading_degrees(time.elapsed),
            wheel_spin,
        }
    }
}
