/// Single-line live status display for the frame loop
use crossterm::{
    cursor::MoveToColumn,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
    QueueableCommand,
};
use nalgebra::Point3;
use std::io::Write;

/// Values shown for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStatus {
    pub frame: u64,
    pub elapsed: f32,
    pub fps: f32,
    pub position: Point3<f32>,
    pub heading: f32,
    pub wheel_spin: f32,
}

impl FrameStatus {
    pub fn render(&self) -> String {
        format!(
            "frame {:>6} | t {:>7.2}s | {:>5.1} fps | car ({:>7.2}, {:>7.2}, {:>7.2}) | heading {:>6.1}° | wheel {:>5.1}°",
            self.frame,
            self.elapsed,
            self.fps,
            self.position.x,
            self.position.y,
            self.position.z,
            self.heading,
            self.wheel_spin,
        )
    }
}

/// Redraws one terminal line in place
#[derive(Debug, Default)]
pub struct StatusLine {
    drawn: bool,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw<W: Write>(&mut self, writer: &mut W, status: &FrameStatus) -> std::io::Result<()> {
        writer.queue(MoveToColumn(0))?;
        writer.queue(Clear(ClearType::CurrentLine))?;
        writer.queue(SetForegroundColor(Color::Cyan))?;
        writer.queue(Print(status.render()))?;
        writer.queue(ResetColor)?;
        writer.flush()?;
        self.drawn = true;
        Ok(())
    }

    /// Move past the status line so later output starts on a fresh line
    pub fn finish<W: Write>(&mut self, writer: &mut W) -> std::io::Result<()> {
        if self.drawn {
            writer.queue(Print('\n'))?;
            writer.flush()?;
            self.drawn = false;
        }
        Ok(())
    }
}
