#![allow(dead_code)]
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

use ndarray::Array3;
use segview_core::{ImagingToolkit, PolyMesh, StlEncoding, ToolkitError, Volume};
use segview_render::{
    BackendError, Primitive, Renderer, Rgb, SceneBuilder, Surface, SurfaceStyle, VolumeStyle,
};

/// Toolkit keeping volumes and meshes in memory behind marker files.
///
/// When gated, the first toolkit call blocks until the test releases it.
#[derive(Default)]
pub struct MemoryToolkit {
    volumes: Mutex<HashMap<PathBuf, Volume>>,
    meshes: Mutex<HashMap<PathBuf, PolyMesh>>,
    gate: Mutex<Option<Receiver<()>>>,
    /// Makes the next `read_volume` panic, as a crashing native library would.
    pub panic_once: AtomicBool,
    pub thresholds: AtomicUsize,
    pub stl_writes: AtomicUsize,
}

impl MemoryToolkit {
    pub fn add_source(&self, path: &Path, volume: Volume) {
        fs::write(path, b"NRRD0004 labels").unwrap();
        self.volumes
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), volume);
    }

    /// Blocks the next toolkit call until the returned sender fires.
    pub fn gate(&self) -> Sender<()> {
        let (tx, rx) = channel();
        *self.gate.lock().unwrap() = Some(rx);
        tx
    }

    fn pass_gate(&self) {
        let gate = self.gate.lock().unwrap().take();
        if let Some(rx) = gate {
            let _ = rx.recv();
        }
    }
}

impl ImagingToolkit for MemoryToolkit {
    fn read_volume(&self, path: &Path) -> Result<Volume, ToolkitError> {
        self.pass_gate();
        if self.panic_once.swap(false, Ordering::SeqCst) {
            panic!("imaging library aborted reading {}", path.display());
        }
        self.volumes
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| ToolkitError::new("read_volume", format!("{} not found", path.display())))
    }

    fn write_volume(&self, volume: &Volume, path: &Path, _compress: bool) -> Result<(), ToolkitError> {
        fs::write(path, b"NRRD0004 mask").map_err(|e| ToolkitError::io("write_volume", path, &e))?;
        self.volumes
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), volume.clone());
        Ok(())
    }

    fn binary_threshold(&self, volume: &Volume, lower: f64, upper: f64) -> Result<Volume, ToolkitError> {
        self.thresholds.fetch_add(1, Ordering::SeqCst);
        let voxels = volume.voxels().mapv(|v| {
            let v = f64::from(v);
            if v >= lower && v <= upper {
                1.0
            } else {
                0.0
            }
        });
        Volume::new(voxels, volume.spacing()).map_err(|e| ToolkitError::new("binary_threshold", e.to_string()))
    }

    fn marching_cubes(&self, volume: &Volume, _iso_value: f64) -> Result<PolyMesh, ToolkitError> {
        let points = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        PolyMesh::new(points, vec![[0, 1, 2]; volume.foreground_count()])
            .map_err(|e| ToolkitError::new("marching_cubes", e.to_string()))
    }

    fn read_mesh(&self, path: &Path) -> Result<PolyMesh, ToolkitError> {
        self.meshes
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| ToolkitError::new("read_mesh", "file not found"))
    }

    fn write_mesh(&self, mesh: &PolyMesh, path: &Path) -> Result<(), ToolkitError> {
        fs::write(path, b"<VTKFile/>").map_err(|e| ToolkitError::io("write_mesh", path, &e))?;
        self.meshes
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), mesh.clone());
        Ok(())
    }

    fn write_stl(&self, mesh: &PolyMesh, path: &Path, _encoding: StlEncoding) -> Result<(), ToolkitError> {
        self.stl_writes.fetch_add(1, Ordering::SeqCst);
        fs::write(path, format!("solid {}", mesh.triangle_count()))
            .map_err(|e| ToolkitError::io("write_stl", path, &e))
    }
}

/// 10x10x10 label volume with 50 voxels of label 2 and 30 of label 7.
pub fn label_volume(spacing: [f64; 3]) -> Volume {
    let mut voxels = Array3::<f32>::zeros((10, 10, 10));
    for (i, v) in voxels.iter_mut().enumerate() {
        if i < 50 {
            *v = 2.0;
        } else if i < 80 {
            *v = 7.0;
        }
    }
    Volume::new(voxels, spacing).unwrap()
}

/// What a content handle was built from.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Primitive(Primitive),
    Volume(PathBuf),
    Mesh(usize),
}

#[derive(Debug, Default)]
pub struct FakeRenderer {
    pub shown: usize,
    pub renders: usize,
}

impl Renderer for FakeRenderer {
    type Content = Content;

    fn add_content(&mut self, _content: &Content) {
        self.shown += 1;
    }

    fn remove_all_content(&mut self) {
        self.shown = 0;
    }

    fn render(&mut self) {
        self.renders += 1;
    }

    fn reset_camera(&mut self) {}
}

pub struct FakeSurface;

impl Surface for FakeSurface {
    type Renderer = FakeRenderer;

    fn attach_renderer(&mut self, _background: Rgb) -> Result<FakeRenderer, BackendError> {
        Ok(FakeRenderer::default())
    }
}

pub fn surfaces(n: usize) -> Vec<FakeSurface> {
    (0..n).map(|_| FakeSurface).collect()
}

#[derive(Default)]
pub struct FakeBuilder;

impl SceneBuilder<FakeRenderer> for FakeBuilder {
    fn primitive(&mut self, _r: &FakeRenderer, primitive: &Primitive) -> Result<Content, BackendError> {
        Ok(Content::Primitive(*primitive))
    }

    fn volume(&mut self, _r: &FakeRenderer, source: &Path, _style: &VolumeStyle) -> Result<Content, BackendError> {
        Ok(Content::Volume(source.to_path_buf()))
    }

    fn surface(
        &mut self,
        _r: &FakeRenderer,
        mesh: &Arc<PolyMesh>,
        _style: &SurfaceStyle,
    ) -> Result<Content, BackendError> {
        Ok(Content::Mesh(mesh.triangle_count()))
    }
}
