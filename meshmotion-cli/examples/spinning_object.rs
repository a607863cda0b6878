//! Example: step a single spinning, drifting cube and print its first corner
//!
//! Usage: cargo run --example spinning_object -- [frames]

use std::env;
use meshmotion_core::{Axis, FixedStepClock, Mesh, ObjectAnimator};
use nalgebra::Vector3;

fn main() -> anyhow::Result<()> {
    let frames: u32 = match env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 10,
    };

    let mut object = ObjectAnimator::new(Mesh::cube(1.0), Vector3::new(0.5, 0.0, 0.0), 45.0, Axis::Y)?;
    let mut clock = FixedStepClock::from_fps(4);

    for _ in 0..frames {
        let time = clock.advance();
        object.tick(&time)?;
        let corner = object.mesh().positions()[0];
        println!(
            "t = {:>5.2}s  corner = ({:>6.3}, {:>6.3}, {:>6.3})",
            time.elapsed, corner.x, corner.y, corner.z
        );
    }

    Ok(())
}
