use crate::controller::input::Key;

/// Per-frame key state queries.
pub trait KeySource {
    fn is_key_pressed(&self, key: Key) -> bool;
}

/// A poll-style host: the loop asks it for keys and whether to stop, and
/// gives it a chance to pump its events after each presented frame.
pub trait Host: KeySource {
    fn should_close(&self) -> bool;
    fn poll_events(&mut self);
}
