use glam::Vec2;

use crate::model::constants::{
    BALL_SIZE, BALL_START_VX, BALL_START_VY, BALL_START_X, BALL_START_Y,
};

/// The ball. `position` is its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl Ball {
    pub fn new() -> Self {
        Self {
            position: Vec2::new(BALL_START_X, BALL_START_Y),
            velocity: Vec2::new(BALL_START_VX, BALL_START_VY),
        }
    }

    pub fn integrate(&mut self) {
        self.position += self.velocity;
    }

    pub fn bounce_x(&mut self) {
        self.velocity.x = -self.velocity.x;
    }

    pub fn bounce_y(&mut self) {
        self.velocity.y = -self.velocity.y;
    }

    pub fn left(&self) -> f32 {
        self.position.x
    }

    pub fn right(&self) -> f32 {
        self.position.x + BALL_SIZE
    }

    pub fn top(&self) -> f32 {
        self.position.y
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + BALL_SIZE
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}
