//! Scene configuration file handling
//!
//! Scenes are described in TOML. Every table and field is optional:
//!
//! ```toml
//! [car]
//! displacement = [0.0, 0.0, -1.5]
//! heading = { mode = "fixed_rate", degrees_per_second = 45.0, axis = "y" }
//!
//! [wheels]
//! spin_speed = 200.0
//! shape = { spokes = 12, radius = 0.2, thickness = 0.1 }
//!
//! [body]
//! width = 0.8
//! ```

use anyhow::{Context, Result};
use meshmotion_core::SceneParams;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parse scene parameters from TOML text
pub fn parse_scene(text: &str) -> Result<SceneParams> {
    let params: SceneParams = toml::from_str(text).context("Failed to parse scene configuration")?;
    params.validate().context("Invalid scene configuration")?;
    Ok(params)
}

/// Load scene parameters, falling back to defaults when no file is given
pub fn load_scene(path: Option<&Path>) -> Result<SceneParams> {
    let Some(path) = path else {
        debug!("no scene file given, using defaults");
        return Ok(SceneParams::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene file {}", path.display()))?;
    let params = parse_scene(&text).with_context(|| format!("In scene file {}", path.display()))?;
    debug!(path = %path.display(), "loaded scene file");
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshmotion_core::{Axis, HeadingPolicy};
    use nalgebra::Vector3;

    #[test]
    fn test_defaults_without_file() {
        assert_eq!(load_scene(None).unwrap(), SceneParams::default());
    }

    #[test]
    fn test_parse_documented_example() {
        let params = parse_scene(
            r#"
            [car]
            displacement = [0.0, 0.0, -1.5]
            heading = { mode = "fixed_rate", degrees_per_second = 45.0, axis = "y" }

            [wheels]
            spin_speed = 200.0
            shape = { spokes = 12, radius = 0.2, thickness = 0.1 }

            [body]
            width = 0.8
            "#,
        )
        .unwrap();

        assert_eq!(params.car.displacement, Vector3::new(0.0, 0.0, -1.5));
        assert_eq!(
            params.car.heading,
            HeadingPolicy::FixedRate {
                degrees_per_second: 45.0,
                axis: Axis::Y
            }
        );
        assert_eq!(params.wheels.shape.spokes, 12);
    }

    #[test]
    fn test_invalid_shape_is_reported() {
        let err = parse_scene("[wheels]\nshape = { spokes = 2 }\n").unwrap_err();
        assert!(format!("{:#}", err).contains("spokes"));
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = load_scene(Some(Path::new("/nonexistent/scene.toml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/scene.toml"));
    }
}
