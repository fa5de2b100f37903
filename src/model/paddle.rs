use crate::model::constants::{
    LEFT_PADDLE_X, PADDLE_HEIGHT, PADDLE_START_Y, PADDLE_STEP, PADDLE_WIDTH, RIGHT_PADDLE_X,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Up/down key state for one paddle, sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleInput {
    pub up: bool,
    pub down: bool,
}

/// A paddle; only its vertical position changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub side: Side,
    /// Top edge in logical pixels
    pub y: f32,
}

impl Paddle {
    pub fn new(side: Side) -> Self {
        Self { side, y: PADDLE_START_Y }
    }

    pub fn x(&self) -> f32 {
        match self.side {
            Side::Left => LEFT_PADDLE_X,
            Side::Right => RIGHT_PADDLE_X,
        }
    }

    /// Move by one step per held key. Holding both cancels out and there is
    /// no clamp to the viewport.
    pub fn apply_input(&mut self, input: PaddleInput) {
        if input.up {
            self.y -= PADDLE_STEP;
        }
        if input.down {
            self.y += PADDLE_STEP;
        }
    }

    /// True if `[top, top + height]` touches this paddle's vertical extent (inclusive).
    pub fn overlaps_vertically(&self, top: f32, height: f32) -> bool {
        top + height >= self.y && top <= self.y + PADDLE_HEIGHT
    }

    pub fn size(&self) -> (f32, f32) {
        (PADDLE_WIDTH, PADDLE_HEIGHT)
    }
}
