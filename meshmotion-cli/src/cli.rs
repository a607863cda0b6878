/// Command-line interface definitions
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use meshmotion_core::{obj, Axis, HeadingPolicy, Mesh, SceneParams, WheelShape};
use nalgebra::Vector3;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::app::LoopSettings;
use crate::config;
use crate::vector::parse_vec3;

/// Heading rate used when `--heading fixed` is given without a rate
pub const DEFAULT_HEADING_RATE: f32 = 90.0;

#[derive(Debug, Parser)]
#[command(name = "meshmotion")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Animate mesh vertices with hand-built affine transforms", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Drive a car scene in a fixed-rate frame loop
    Run(RunArgs),
    /// Generate a spoked wheel and write it as OBJ
    Wheel(WheelArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HeadingArg {
    /// Face the direction of travel
    Follow,
    /// Turn at a constant rate about Y
    Fixed,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Scene configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Car displacement per second as X,Y,Z
    #[arg(short, long, value_parser = parse_vec3, allow_hyphen_values = true)]
    pub displacement: Option<Vector3<f32>>,

    /// Heading policy for the car body
    #[arg(long, value_enum)]
    pub heading: Option<HeadingArg>,

    /// Degrees per second for the fixed heading policy
    #[arg(long, allow_hyphen_values = true)]
    pub heading_rate: Option<f32>,

    /// Wheel spin in degrees per second
    #[arg(long, allow_hyphen_values = true)]
    pub wheel_speed: Option<f32>,

    /// Target frames per second
    #[arg(long, default_value = "30")]
    pub fps: u32,

    /// How long to run, in seconds
    #[arg(short, long, default_value = "5")]
    pub seconds: f32,

    /// Do not draw the live status line
    #[arg(short, long)]
    pub quiet: bool,
}

impl RunArgs {
    /// Load the configured scene and apply command-line overrides
    pub fn scene_params(&self) -> Result<SceneParams> {
        let mut params = config::load_scene(self.config.as_deref())?;

        if let Some(displacement) = self.displacement {
            params.car.displacement = displacement;
        }
        if let Some(speed) = self.wheel_speed {
            params.wheels.spin_speed = speed;
        }

        params.car.heading = match (self.heading, self.heading_rate) {
            (Some(HeadingArg::Follow), _) => HeadingPolicy::FollowTravel,
            (Some(HeadingArg::Fixed), rate) | (None, rate @ Some(_)) => {
                let axis = match params.car.heading {
                    HeadingPolicy::FixedRate { axis, .. } => axis,
                    HeadingPolicy::FollowTravel => Axis::Y,
                };
                HeadingPolicy::FixedRate {
                    degrees_per_second: rate.unwrap_or(DEFAULT_HEADING_RATE),
                    axis,
                }
            }
            (None, None) => params.car.heading,
        };

        Ok(params)
    }

    pub fn loop_settings(&self) -> Result<LoopSettings> {
        let duration = Duration::try_from_secs_f32(self.seconds)
            .with_context(|| format!("Invalid run time {} seconds", self.seconds))?;
        Ok(LoopSettings {
            fps: self.fps.max(1),
            duration,
            show_status: !self.quiet,
        })
    }
}

#[derive(Debug, Args)]
pub struct WheelArgs {
    /// Number of spokes between 3 and 360
    #[arg(short = 'n', long, default_value = "8")]
    pub spokes: u32,

    /// Radius of the wheel
    #[arg(short, long, default_value = "1.0")]
    pub radius: f32,

    /// Thickness of the wheel
    #[arg(short, long, default_value = "0.5")]
    pub thickness: f32,

    /// Output OBJ file
    #[arg(short, long, default_value = "wheel.obj")]
    pub output: PathBuf,
}

impl WheelArgs {
    /// Generate the wheel and write it to the output file
    pub fn execute(&self) -> Result<()> {
        let shape = WheelShape::new(self.spokes, self.radius, self.thickness).context("Invalid wheel shape")?;
        let mesh = Mesh::wheel(&shape);

        let file = File::create(&self.output)
            .with_context(|| format!("Failed to create {}", self.output.display()))?;
        obj::write_obj(&mesh, &shape.object_name(), BufWriter::new(file))
            .with_context(|| format!("Failed to write {}", self.output.display()))?;

        info!(
            path = %self.output.display(),
            vertices = mesh.vertex_count(),
            faces = mesh.triangle_count(),
            "wrote wheel"
        );
        Ok(())
    }
}
