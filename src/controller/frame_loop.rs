use std::time::{Duration, Instant};

use crate::controller::host::{Host, KeySource};
use crate::controller::input::KeyBindings;
use crate::model::constants::CLEAR_COLOR;
use crate::model::GameState;
use crate::view::render::{draw_entities, RenderBackend};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// Frame counter with a once-per-second FPS estimate
#[derive(Debug, Clone)]
pub struct FrameStats {
    pub frames: u64,
    pub fps: f32,
    window_frames: u32,
    window_start: Instant,
}

impl FrameStats {
    pub fn new(now: Instant) -> Self {
        Self {
            frames: 0,
            fps: 0.0,
            window_frames: 0,
            window_start: now,
        }
    }

    /// Count a presented frame. Returns the new FPS estimate once a second has passed.
    pub fn record_frame(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        self.window_frames += 1;

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < Duration::from_secs(1) {
            return None;
        }
        self.fps = self.window_frames as f32 / elapsed.as_secs_f32();
        self.window_frames = 0;
        self.window_start = now;
        Some(self.fps)
    }
}

/// Input -> simulation -> render -> present, one step per frame until closed.
pub struct FrameLoop {
    state: GameState,
    status: LoopState,
    bindings: KeyBindings,
    stats: FrameStats,
}

impl FrameLoop {
    pub fn new(bindings: KeyBindings) -> Self {
        Self::with_state(GameState::new(), bindings)
    }

    pub fn with_state(state: GameState, bindings: KeyBindings) -> Self {
        Self {
            state,
            status: LoopState::Running,
            bindings,
            stats: FrameStats::new(Instant::now()),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> LoopState {
        self.status
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Run one frame. Does nothing once terminated.
    pub fn tick<K, B>(&mut self, keys: &K, backend: &mut B)
    where
        K: KeySource + ?Sized,
        B: RenderBackend + ?Sized,
    {
        if self.status == LoopState::Terminated {
            return;
        }

        let input = self.bindings.sample(keys);
        self.state.advance(&input);

        backend.clear_frame(CLEAR_COLOR);
        draw_entities(backend, &self.state);
        backend.present();

        if backend.is_lost() {
            tracing::error!("render backend lost, stopping");
            self.terminate();
        }

        if let Some(fps) = self.stats.record_frame(Instant::now()) {
            tracing::debug!(
                fps = format_args!("{fps:.1}"),
                frames = self.stats.frames,
                ball_x = self.state.ball.position.x,
                ball_y = self.state.ball.position.y,
                "frame stats"
            );
        }
    }

    /// Close signal observed; later ticks are ignored.
    pub fn terminate(&mut self) {
        if self.status == LoopState::Running {
            tracing::info!(frames = self.stats.frames, "frame loop terminated");
            self.status = LoopState::Terminated;
        }
    }

    /// Drive the loop against a poll-style host until it asks to close.
    /// Returns the final simulation state.
    pub fn run<H, B>(mut self, host: &mut H, backend: &mut B) -> GameState
    where
        H: Host + ?Sized,
        B: RenderBackend + ?Sized,
    {
        while self.status == LoopState::Running && !host.should_close() {
            self.tick(&*host, backend);
            host.poll_events();
        }
        self.terminate();
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::input::{Key, PressedKeys};
    use crate::view::render::recording::{Call, RecordingBackend};
    use glam::Vec2;

    /// Host that holds a fixed set of keys and closes after `frames` polls.
    struct ScriptedHost {
        keys: PressedKeys,
        polls: u32,
        frames: u32,
    }

    impl ScriptedHost {
        fn closing_after(frames: u32) -> Self {
            Self { keys: PressedKeys::new(), polls: 0, frames }
        }
    }

    impl KeySource for ScriptedHost {
        fn is_key_pressed(&self, key: Key) -> bool {
            self.keys.is_key_pressed(key)
        }
    }

    impl Host for ScriptedHost {
        fn should_close(&self) -> bool {
            self.polls >= self.frames
        }

        fn poll_events(&mut self) {
            self.polls += 1;
        }
    }

    #[test]
    fn test_tick_order() {
        let mut frame_loop = FrameLoop::new(KeyBindings::default());
        let mut backend = RecordingBackend::default();
        frame_loop.tick(&PressedKeys::new(), &mut backend);

        assert_eq!(backend.calls.first(), Some(&Call::Clear(CLEAR_COLOR)));
        assert_eq!(backend.calls.last(), Some(&Call::Present));
        assert_eq!(backend.count(&Call::DrawIndexed(6)), 3);
        assert_eq!(backend.calls.len(), 14);
    }

    #[test]
    fn test_simulation_runs_before_render() {
        let mut frame_loop = FrameLoop::new(KeyBindings::default());
        let mut backend = RecordingBackend::default();
        frame_loop.tick(&PressedKeys::new(), &mut backend);

        // Ball drawn at its position after one step
        assert_eq!(backend.uniforms()[2].pos, [393.0, 292.0]);
    }

    #[test]
    fn test_input_reaches_paddles() {
        let mut keys = PressedKeys::new();
        keys.press(Key::W);
        keys.press(Key::ArrowDown);

        let mut frame_loop = FrameLoop::new(KeyBindings::default());
        let mut backend = RecordingBackend::default();
        frame_loop.tick(&keys, &mut backend);
        frame_loop.tick(&keys, &mut backend);

        assert_eq!(frame_loop.state().left.y, 240.0);
        assert_eq!(frame_loop.state().right.y, 260.0);
    }

    #[test]
    fn test_run_until_close() {
        let mut host = ScriptedHost::closing_after(10);
        let mut backend = RecordingBackend::default();
        let state = FrameLoop::new(KeyBindings::default()).run(&mut host, &mut backend);

        assert_eq!(backend.count(&Call::Present), 10);
        assert_eq!(backend.count(&Call::DrawIndexed(6)), 30);
        assert_eq!(state.ball.position, Vec2::new(390.0 + 30.0, 290.0 + 20.0));
    }

    #[test]
    fn test_already_closed_host_draws_nothing() {
        let mut host = ScriptedHost::closing_after(0);
        let mut backend = RecordingBackend::default();
        let state = FrameLoop::new(KeyBindings::default()).run(&mut host, &mut backend);

        assert!(backend.calls.is_empty());
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_lost_backend_terminates_tick() {
        let mut frame_loop = FrameLoop::new(KeyBindings::default());
        let mut backend = RecordingBackend { lost: true, ..Default::default() };
        frame_loop.tick(&PressedKeys::new(), &mut backend);

        // the frame in flight still finishes
        assert_eq!(backend.calls.last(), Some(&Call::Present));
        assert_eq!(frame_loop.status(), LoopState::Terminated);
    }

    #[test]
    fn test_lost_backend_stops_run_before_close() {
        let mut host = ScriptedHost::closing_after(10);
        let mut backend = RecordingBackend { lost: true, ..Default::default() };
        let state = FrameLoop::new(KeyBindings::default()).run(&mut host, &mut backend);

        assert_eq!(backend.count(&Call::Present), 1);
        assert_eq!(state.ball.position, Vec2::new(393.0, 292.0));
    }

    #[test]
    fn test_healthy_backend_keeps_running() {
        let mut frame_loop = FrameLoop::new(KeyBindings::default());
        let mut backend = RecordingBackend::default();
        for _ in 0..3 {
            frame_loop.tick(&PressedKeys::new(), &mut backend);
        }
        assert_eq!(frame_loop.status(), LoopState::Running);
    }

    #[test]
    fn test_terminated_loop_ignores_ticks() {
        let mut frame_loop = FrameLoop::new(KeyBindings::default());
        frame_loop.terminate();
        assert_eq!(frame_loop.status(), LoopState::Terminated);

        let mut backend = RecordingBackend::default();
        frame_loop.tick(&PressedKeys::new(), &mut backend);
        assert!(backend.calls.is_empty());
        assert_eq!(*frame_loop.state(), GameState::new());
    }

    #[test]
    fn test_frame_stats_reports_once_per_second() {
        let start = Instant::now();
        let mut stats = FrameStats::new(start);
        for i in 1..60u64 {
            assert_eq!(stats.record_frame(start + Duration::from_millis(i * 16)), None);
        }
        let fps = stats.record_frame(start + Duration::from_secs(1));
        assert_eq!(fps, Some(60.0));
        assert_eq!(stats.frames, 60);
    }
}
