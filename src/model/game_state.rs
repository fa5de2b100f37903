use crate::model::constants::{
    BALL_SIZE, ENTITY_COLOR, LEFT_BOUNCE_X, RIGHT_PADDLE_X, VIEWPORT_HEIGHT,
};
use crate::model::{Ball, Paddle, PaddleInput, Side};

/// Key state for both paddles for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: PaddleInput,
    pub right: PaddleInput,
}

/// One rectangle to draw this frame, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectDraw {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: [f32; 3],
}

/// Everything the simulation owns: two paddles and one ball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            left: Paddle::new(Side::Left),
            right: Paddle::new(Side::Right),
            ball: Ball::new(),
        }
    }

    /// Advance one frame: paddles from input, ball by its velocity, then
    /// every collision rule is checked independently of the others.
    pub fn advance(&mut self, input: &FrameInput) {
        self.left.apply_input(input.left);
        self.right.apply_input(input.right);

        self.ball.integrate();

        // Walls
        if self.ball.top() <= 0.0 || self.ball.bottom() >= VIEWPORT_HEIGHT {
            self.ball.bounce_y();
        }

        // Left paddle
        if self.ball.left() <= LEFT_BOUNCE_X
            && self.left.overlaps_vertically(self.ball.top(), BALL_SIZE)
        {
            self.ball.bounce_x();
        }

        // Right paddle
        if self.ball.right() >= RIGHT_PADDLE_X
            && self.right.overlaps_vertically(self.ball.top(), BALL_SIZE)
        {
            self.ball.bounce_x();
        }
    }

    /// Draw requests in paint order: left paddle, right paddle, ball.
    pub fn draw_requests(&self) -> [RectDraw; 3] {
        [
            paddle_rect(&self.left),
            paddle_rect(&self.right),
            RectDraw {
                x: self.ball.position.x,
                y: self.ball.position.y,
                width: BALL_SIZE,
                height: BALL_SIZE,
                color: ENTITY_COLOR,
            },
        ]
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

fn paddle_rect(paddle: &Paddle) -> RectDraw {
    let (width, height) = paddle.size();
    RectDraw {
        x: paddle.x(),
        y: paddle.y,
        width,
        height,
        color: ENTITY_COLOR,
    }
}

/// Value form of [`GameState::advance`].
pub fn advance(state: GameState, input: &FrameInput) -> GameState {
    let mut next = state;
    next.advance(input);
    next
}
