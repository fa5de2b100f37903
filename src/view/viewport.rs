//! CPU mirror of the coordinate mapping done in `shaders/rect.wgsl`.

use glam::Vec2;

use crate::model::constants::{HALF_VIEWPORT_HEIGHT, HALF_VIEWPORT_WIDTH};
use crate::model::RectDraw;

pub const RECT_SHADER_SRC: &str = include_str!("shaders/rect.wgsl");

pub const HALF_VIEWPORT: Vec2 = Vec2::new(HALF_VIEWPORT_WIDTH, HALF_VIEWPORT_HEIGHT);

/// Logical pixel -> normalized device coordinates, Y flipped so that
/// larger logical Y is further down the screen.
pub fn to_ndc(logical: Vec2) -> Vec2 {
    let ndc = logical / HALF_VIEWPORT - Vec2::ONE;
    Vec2::new(ndc.x, -ndc.y)
}

/// Where a unit-quad vertex lands for a given rect.
pub fn map_vertex(local: Vec2, rect: &RectDraw) -> Vec2 {
    let scaled = local * Vec2::new(rect.width, rect.height) + Vec2::new(rect.x, rect.y);
    to_ndc(scaled)
}

/// The four NDC corners of `rect`, in quad vertex order.
pub fn rect_corners_ndc(rect: &RectDraw) -> [Vec2; 4] {
    crate::view::quad::QUAD_VERTICES.map(|v| map_vertex(Vec2::from(v.pos), rect))
}
