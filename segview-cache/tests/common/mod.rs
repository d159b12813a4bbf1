#![allow(dead_code)]
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use ndarray::Array3;
use segview_core::{ImagingToolkit, PolyMesh, StlEncoding, ToolkitError, Volume};

/// Call counters of [`MemoryToolkit`].
#[derive(Default)]
pub struct Calls {
    pub read_volume: AtomicUsize,
    pub write_volume: AtomicUsize,
    pub threshold: AtomicUsize,
    pub marching_cubes: AtomicUsize,
    pub read_mesh: AtomicUsize,
    pub write_mesh: AtomicUsize,
    pub write_stl: AtomicUsize,
}

impl Calls {
    pub fn writes(&self) -> usize {
        self.write_volume.load(Ordering::SeqCst)
            + self.write_mesh.load(Ordering::SeqCst)
            + self.write_stl.load(Ordering::SeqCst)
    }

    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

/// Toolkit keeping decoded data in memory and writing marker files, so the
/// cache sees real files on disk.
#[derive(Default)]
pub struct MemoryToolkit {
    volumes: Mutex<HashMap<PathBuf, Volume>>,
    meshes: Mutex<HashMap<PathBuf, PolyMesh>>,
    pub calls: Calls,
    pub compressed: Mutex<Vec<bool>>,
}

impl MemoryToolkit {
    /// Registers a source volume and creates its file.
    pub fn add_source(&self, path: &Path, volume: Volume) {
        fs::write(path, b"NRRD0004 source").unwrap();
        self.volumes
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), volume);
    }
}

impl ImagingToolkit for MemoryToolkit {
    fn read_volume(&self, path: &Path) -> Result<Volume, ToolkitError> {
        self.calls.read_volume.fetch_add(1, Ordering::SeqCst);
        if !path.exists() {
            return Err(ToolkitError::new("read_volume", "file not found"));
        }
        self.volumes
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| ToolkitError::new("read_volume", "not a NRRD file"))
    }

    fn write_volume(
        &self,
        volume: &Volume,
        path: &Path,
        compress: bool,
    ) -> Result<(), ToolkitError> {
        self.calls.write_volume.fetch_add(1, Ordering::SeqCst);
        self.compressed.lock().unwrap().push(compress);
        fs::write(path, b"NRRD0004 mask").map_err(|e| ToolkitError::io("write_volume", path, &e))?;
        self.volumes
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), volume.clone());
        Ok(())
    }

    fn binary_threshold(
        &self,
        volume: &Volume,
        lower: f64,
        upper: f64,
    ) -> Result<Volume, ToolkitError> {
        self.calls.threshold.fetch_add(1, Ordering::SeqCst);
        let voxels = volume.voxels().mapv(|v| {
            let v = f64::from(v);
            if v >= lower && v <= upper {
                1.0
            } else {
                0.0
            }
        });
        Volume::new(voxels, volume.spacing())
            .map(|v| v.with_origin(volume.origin()))
            .map_err(|e| ToolkitError::new("binary_threshold", e.to_string()))
    }

    fn marching_cubes(&self, volume: &Volume, iso_value: f64) -> Result<PolyMesh, ToolkitError> {
        self.calls.marching_cubes.fetch_add(1, Ordering::SeqCst);
        assert_eq!(iso_value, 1.0);
        let count = volume.foreground_count();
        let points = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        PolyMesh::new(points, vec![[0, 1, 2]; count])
            .map_err(|e| ToolkitError::new("marching_cubes", e.to_string()))
    }

    fn read_mesh(&self, path: &Path) -> Result<PolyMesh, ToolkitError> {
        self.calls.read_mesh.fetch_add(1, Ordering::SeqCst);
        self.meshes
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| ToolkitError::new("read_mesh", "file not found"))
    }

    fn write_mesh(&self, mesh: &PolyMesh, path: &Path) -> Result<(), ToolkitError> {
        self.calls.write_mesh.fetch_add(1, Ordering::SeqCst);
        fs::write(path, b"<VTKFile type=\"PolyData\"/>")
            .map_err(|e| ToolkitError::io("write_mesh", path, &e))?;
        self.meshes
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), mesh.clone());
        Ok(())
    }

    fn write_stl(
        &self,
        mesh: &PolyMesh,
        path: &Path,
        encoding: StlEncoding,
    ) -> Result<(), ToolkitError> {
        self.calls.write_stl.fetch_add(1, Ordering::SeqCst);
        assert_eq!(encoding, StlEncoding::Binary);
        let bytes = format!("stl {} triangles", mesh.triangle_count());
        fs::write(path, bytes).map_err(|e| ToolkitError::io("write_stl", path, &e))
    }
}

/// 10x10x10 label volume: 50 voxels of label 2, 30 of label 7, rest 0.
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
