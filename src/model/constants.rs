//! Fixed game constants, all in logical pixels.
//!
//! The logical viewport is the coordinate space every position lives in. The
//! rect shader bakes in half of it, so both must change together.

pub const VIEWPORT_WIDTH: f32 = 800.0;
pub const VIEWPORT_HEIGHT: f32 = 600.0;

pub const HALF_VIEWPORT_WIDTH: f32 = VIEWPORT_WIDTH / 2.0;
pub const HALF_VIEWPORT_HEIGHT: f32 = VIEWPORT_HEIGHT / 2.0;

pub const PADDLE_WIDTH: f32 = 20.0;
pub const PADDLE_HEIGHT: f32 = 100.0;
/// Distance a paddle moves per frame while its key is held.
pub const PADDLE_STEP: f32 = 5.0;
pub const PADDLE_START_Y: f32 = 250.0;

/// X of the left paddle's left edge.
pub const LEFT_PADDLE_X: f32 = 30.0;
/// X of the right paddle's left edge; also its bounce threshold.
pub const RIGHT_PADDLE_X: f32 = VIEWPORT_WIDTH - 50.0;
/// The ball bounces off the left paddle once its left edge reaches this X.
pub const LEFT_BOUNCE_X: f32 = 50.0;

pub const BALL_SIZE: f32 = 20.0;
pub const BALL_START_X: f32 = 390.0;
pub const BALL_START_Y: f32 = 290.0;
pub const BALL_START_VX: f32 = 3.0;
pub const BALL_START_VY: f32 = 2.0;

pub const ENTITY_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const CLEAR_COLOR: [f32; 3] = [0.1, 0.1, 0.15];

pub const WINDOW_TITLE: &str = "Pong 2D";
