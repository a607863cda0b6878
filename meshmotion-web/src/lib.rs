//! meshmotion web - WASM binding for JavaScript hosts
//!
//! The host owns rendering; this crate ticks the car scene and hands back
//! flattened vertex, normal and index buffers for upload.

use meshmotion_core::{CarScene, FrameTime, Mesh, SceneParams};
use nalgebra::{Point3, Vector3};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WebCarScene {
    scene: CarScene,
}

#[wasm_bindgen]
impl WebCarScene {
    /// Car with canonical wheels driving at `(dx, dy, dz)` units per second
    #[wasm_bindgen(constructor)]
    pub fn new(dx: f32, dy: f32, dz: f32) -> Result<WebCarScene, JsValue> {
        let mut params = SceneParams::default();
        params.car.displacement = Vector3::new(dx, dy, dz);

        let scene = CarScene::from_params(&params).map_err(|e| JsValue::from_str(&e.to_string()))?;
        tracing::debug!(dx, dy, dz, "web car scene created");
        Ok(WebCarScene { scene })
    }

    /// Advance to `elapsed` seconds
    pub fn tick(&mut self, elapsed: f32, delta: f32) -> Result<(), JsValue> {
        self.scene
            .tick(&FrameTime::new(elapsed, delta))
            .map(|_| ())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn body_positions(&self) -> Vec<f32> {
        flatten_points(self.scene.body().mesh().positions())
    }

    pub fn body_normals(&self) -> Vec<f32> {
        flatten_vectors(self.scene.body().mesh().normals())
    }

    pub fn body_indices(&self) -> Vec<u32> {
        flatten_indices(self.scene.body().mesh())
    }

    pub fn wheel_count(&self) -> usize {
        self.scene.wheels().len()
    }

    /// Empty when `index` is out of range
    pub fn wheel_positions(&self, index: usize) -> Vec<f32> {
        self.scene
            .wheels()
            .get(index)
            .map(|wheel| flatten_points(wheel.mesh().positions()))
            .unwrap_or_default()
    }

    pub fn wheel_normals(&self, index: usize) -> Vec<f32> {
        self.scene
            .wheels()
            .get(index)
            .map(|wheel| flatten_vectors(wheel.mesh().normals()))
            .unwrap_or_default()
    }

    /// Index buffer shared by every wheel
    pub fn wheel_indices(&self) -> Vec<u32> {
        self.scene
            .wheels()
            .first()
            .map(|wheel| flatten_indices(wheel.mesh()))
            .unwrap_or_default()
    }
}

fn flatten_points(points: &[Point3<f32>]) -> Vec<f32> {
    points.iter().flat_map(|p| [p.x, p.y, p.z]).collect()
}

fn flatten_vectors(vectors: &[Vector3<f32>]) -> Vec<f32> {
    vectors.iter().flat_map(|v| [v.x, v.y, v.z]).collect()
}

fn flatten_indices(mesh: &Mesh) -> Vec<u32> {
    mesh.triangles().iter().flatten().copied().collect()
}
