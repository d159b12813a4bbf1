//! Visual styles for volumes, surfaces and primitives.

use crate::Rgb;

/// Colour transfer function control point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferPoint {
    /// Scalar value (CT intensity).
    pub value: f64,
    /// Colour at `value`.
    pub color: Rgb,
}

/// Piecewise opacity control point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpacityPoint {
    /// Scalar value or gradient magnitude.
    pub value: f64,
    /// Opacity at `value`, in `[0, 1]`.
    pub opacity: f64,
}

const fn tp(value: f64, color: Rgb) -> TransferPoint {
    TransferPoint { value, color }
}

const fn op(value: f64, opacity: f64) -> OpacityPoint {
    OpacityPoint { value, opacity }
}

/// Direct volume rendering parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeStyle {
    /// Scalar-to-colour mapping.
    pub color: Vec<TransferPoint>,
    /// Scalar-to-opacity mapping.
    pub scalar_opacity: Vec<OpacityPoint>,
    /// Gradient-magnitude-to-opacity mapping.
    pub gradient_opacity: Vec<OpacityPoint>,
    /// Trilinear instead of nearest-neighbour sampling.
    pub linear_interpolation: bool,
    /// Apply lighting to the volume.
    pub shade: bool,
    /// Ambient lighting coefficient.
    pub ambient: f64,
    /// Diffuse lighting coefficient.
    pub diffuse: f64,
    /// Specular lighting coefficient.
    pub specular: f64,
}

impl Default for VolumeStyle {
    /// Soft tissue in skin tones, bone in ivory.
    fn default() -> Self {
        let tissue = [240.0 / 255.0, 184.0 / 255.0, 160.0 / 255.0];
        Self {
            color: vec![
                tp(0.0, [0.0, 0.0, 0.0]),
                tp(500.0, tissue),
                tp(1150.0, tissue),
                tp(1500.0, [1.0, 1.0, 240.0 / 255.0]),
            ],
            scalar_opacity: vec![
                op(0.0, 0.0),
                op(500.0, 0.15),
                op(1150.0, 0.15),
                op(1500.0, 0.85),
            ],
            gradient_opacity: vec![op(0.0, 0.0), op(90.0, 0.5), op(100.0, 1.0)],
            linear_interpolation: true,
            shade: true,
            ambient: 0.4,
            diffuse: 0.6,
            specular: 0.2,
        }
    }
}

/// Surface mesh material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceStyle {
    /// Diffuse colour.
    pub diffuse_color: Rgb,
    /// Diffuse coefficient.
    pub diffuse: f64,
    /// Specular coefficient.
    pub specular: f64,
    /// Specular exponent.
    pub specular_power: f64,
    /// Colour by point scalars instead of the material colour.
    pub scalar_visibility: bool,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            diffuse_color: [1.0, 1.0, 240.0 / 255.0],
            diffuse: 0.8,
            specular: 0.3,
            specular_power: 60.0,
            scalar_visibility: false,
        }
    }
}

/// Primitive geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Axis-aligned unit cube.
    Cube,
}

/// How primitive faces are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    /// Filled faces.
    Surface,
    /// Edges only.
    Wireframe,
}

/// Simple shape shown as a placeholder or added on request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    /// Geometry drawn.
    pub shape: Shape,
    /// Fill or edge colour.
    pub color: Rgb,
    /// Filled or wireframe.
    pub representation: Representation,
}

impl Primitive {
    /// Filled cube of the given colour.
    #[must_use]
    pub fn cube(color: Rgb) -> Self {
        Self {
            shape: Shape::Cube,
            color,
            representation: Representation::Surface,
        }
    }

    /// Red wireframe cube marking an empty viewport.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            shape: Shape::Cube,
            color: [1.0, 0.0, 0.0],
            representation: Representation::Wireframe,
        }
    }
}

/// Cycles through hues so consecutive primitives are told apart.
#[derive(Debug, Clone, Default)]
pub struct ColorPalette {
    step: u32,
}

impl ColorPalette {
    const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_895;

    /// Returns the next colour.
    pub fn next_color(&mut self) -> Rgb {
        let hue = (f64::from(self.step) * Self::GOLDEN_RATIO_CONJUGATE).fract();
        self.step = self.step.wrapping_add(1);
        hsv_to_rgb(hue, 0.65, 0.95)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb {
    let h6 = h * 6.0;
    let sector = h6.floor();
    let f = h6 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as u32) % 6 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}
