#![allow(dead_code)]
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use segview_core::PolyMesh;
use segview_render::{
    BackendError, Primitive, Renderer, Rgb, SceneBuilder, Surface, SurfaceStyle, VolumeStyle,
};

/// What a piece of test content stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Primitive(Primitive),
    Volume(PathBuf),
    Mesh(usize),
}

/// Content handle that counts live instances.
#[derive(Debug)]
pub struct Actor {
    pub id: u32,
    pub item: Item,
    live: Rc<Cell<usize>>,
}

impl Drop for Actor {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

#[derive(Debug)]
pub struct FakeRenderer {
    pub surface_id: usize,
    pub background: Rgb,
    pub shown: Vec<u32>,
    pub renders: usize,
    pub camera_resets: usize,
}

impl Renderer for FakeRenderer {
    type Content = Actor;

    fn add_content(&mut self, content: &Actor) {
        self.shown.push(content.id);
    }

    fn remove_all_content(&mut self) {
        self.shown.clear();
    }

    fn render(&mut self) {
        self.renders += 1;
    }

    fn reset_camera(&mut self) {
        self.camera_resets += 1;
    }
}

pub struct FakeSurface {
    pub id: usize,
    pub attached: usize,
}

impl Surface for FakeSurface {
    type Renderer = FakeRenderer;

    fn attach_renderer(&mut self, background: Rgb) -> Result<FakeRenderer, BackendError> {
        self.attached += 1;
        Ok(FakeRenderer {
            surface_id: self.id,
            background,
            shown: Vec::new(),
            renders: 0,
            camera_resets: 0,
        })
    }
}

pub fn surfaces(n: usize) -> Vec<FakeSurface> {
    (0..n).map(|id| FakeSurface { id, attached: 0 }).collect()
}

#[derive(Default)]
pub struct FakeBuilder {
    next_id: u32,
    pub live: Rc<Cell<usize>>,
    pub fail_volumes: bool,
}

impl FakeBuilder {
    pub fn live_count(&self) -> usize {
        self.live.get()
    }

    fn make(&mut self, item: Item) -> Actor {
        self.next_id += 1;
        self.live.set(self.live.get() + 1);
        Actor {
            id: self.next_id,
            item,
            live: Rc::clone(&self.live),
        }
    }
}

impl SceneBuilder<FakeRenderer> for FakeBuilder {
    fn primitive(
        &mut self,
        _renderer: &FakeRenderer,
        primitive: &Primitive,
    ) -> Result<Actor, BackendError> {
        Ok(self.make(Item::Primitive(*primitive)))
    }

    fn volume(
        &mut self,
        _renderer: &FakeRenderer,
        source: &Path,
        _style: &VolumeStyle,
    ) -> Result<Actor, BackendError> {
        if self.fail_volumes {
            return Err(BackendError::new("unsupported NRRD encoding"));
        }
        Ok(self.make(Item::Volume(source.to_path_buf())))
    }

    fn surface(
        &mut self,
        _renderer: &FakeRenderer,
        mesh: &Arc<PolyMesh>,
        _style: &SurfaceStyle,
    ) -> Result<Actor, BackendError> {
        Ok(self.make(Item::Mesh(mesh.triangle_count())))
    }
}

/// Unit-spaced triangle mesh.
pub fn triangle() -> PolyMesh {
    PolyMesh::new(
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        vec![[0, 1, 2]],
    )
    .unwrap()
}
