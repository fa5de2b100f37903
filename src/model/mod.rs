// MODEL: Simulation state and data
pub mod constants;
pub mod paddle;
pub mod ball;
pub mod game_state;

pub use paddle::{Paddle, PaddleInput, Side};
pub use ball::Ball;
pub use game_state::{advance, FrameInput, GameState, RectDraw};
