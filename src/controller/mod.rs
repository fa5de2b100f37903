// CONTROLLER: Input and the frame loop
pub mod host;
pub mod input;
pub mod frame_loop;

pub use host::{Host, KeySource};
pub use input::{Key, KeyBindings, PressedKeys};
pub use frame_loop::{FrameLoop, FrameStats, LoopState};
