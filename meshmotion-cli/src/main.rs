//! meshmotion - drive a car scene or generate wheel meshes
//!
//! Examples:
//!   meshmotion run --displacement 1,0,-1 --seconds 10
//!   meshmotion run --config scene.toml --heading fixed --heading-rate 45
//!   meshmotion wheel -n 12 -r 0.4 -t 0.2 -o wheel.obj

use anyhow::{Context, Result};
use clap::Parser;
use meshmotion_cli::{Cli, Command, FrameLoopApp};
use meshmotion_core::CarScene;
use std::io::stdout;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Run(args) => {
            let params = args.scene_params()?;
            let settings = args.loop_settings()?;
            let scene = CarScene::from_params(&params).context("Failed to build car scene")?;

            let mut app = FrameLoopApp::new(scene, settings);
            let summary = app.run(&mut stdout())?;

            info!(
                frames = summary.frames,
                seconds = summary.elapsed.as_secs_f32(),
                average_fps = summary.average_fps,
                x = summary.final_position.x,
                y = summary.final_position.y,
                z = summary.final_position.z,
                "run finished"
            );
        }
        Command::Wheel(args) => args.execute()?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
