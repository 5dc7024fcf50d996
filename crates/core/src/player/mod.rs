//! Generic frame-based playback controller.
//!
//! A [`Player`] owns a pre-materialised sequence of [`Frame`]s and a playback
//! position. Automatic advancement is a chain of single-shot ticks held in one
//! [`TickTimer`] slot; every operation that moves the position or stops
//! playback cancels that slot first, so a stale tick can never overwrite a
//! manual seek.
//!
//! The player never fails. Empty sequences, out of range seeks and stepping
//! past either end degrade to clamping or doing nothing.

pub mod driver;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::timeline::{Clock, SystemClock, TickTimer};
use crate::Frame;

pub use driver::{spawn_player, PlayerHandle};

/// Delay between automatic advances when nothing else is configured.
pub const DEFAULT_SPEED: Duration = Duration::from_millis(1000);

const MIN_SPEED: Duration = Duration::from_millis(1);
const MAX_SPEED: Duration = Duration::from_millis(u64::MAX);

/// Consumer notified with the active snapshot and its index.
pub type FrameCallback<T> = Box<dyn FnMut(&T, usize) + Send>;

/// Coarse state of a player, derived from its position and flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    Empty,
    Ready,
    Playing,
    Paused,
    Complete,
}

/// Read-only view of a player for transport widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    /// `-1` before the first frame has been shown.
    pub current_frame: isize,
    pub total_frames: usize,
    pub is_playing: bool,
    pub is_paused: bool,
    pub is_complete: bool,
    pub speed_ms: u64,
    pub state: PlaybackState,
}

pub struct Player<T, C = SystemClock> {
    frames: Vec<Frame<T>>,
    position: Option<usize>,
    playing: bool,
    speed: Duration,
    timer: TickTimer,
    clock: C,
    on_frame_change: Option<FrameCallback<T>>,
}

impl<T> Player<T, SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl<T> Default for Player<T, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Clock> Player<T, C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            frames: Vec::new(),
            position: None,
            playing: false,
            speed: DEFAULT_SPEED,
            timer: TickTimer::new(),
            clock,
            on_frame_change: None,
        }
    }

    pub fn with_speed(mut self, speed: Duration) -> Self {
        self.set_speed(speed);
        self
    }

    /// Registers the single consumer, replacing any previous one.
    pub fn on_frame_change<F>(&mut self, callback: F)
    where
        F: FnMut(&T, usize) + Send + 'static,
    {
        self.on_frame_change = Some(Box::new(callback));
    }

    pub(crate) fn set_callback(&mut self, callback: FrameCallback<T>) {
        self.on_frame_change = Some(callback);
    }

    /// Replaces the whole sequence and rewinds to the not-started position.
    pub fn load_frames(&mut self, frames: Vec<Frame<T>>) {
        self.stop();
        self.frames = frames;
        self.position = None;
        tracing::info!(total = self.frames.len(), "frames loaded");
    }

    /// Starts automatic advancement. Playing from the last frame restarts
    /// from the beginning.
    pub fn play(&mut self) {
        if self.frames.is_empty() {
            return;
        }
        if self.playing && self.timer.is_armed() {
            return;
        }
        if self.position.is_some_and(|index| index >= self.last_index()) {
            self.position = None;
        }
        self.playing = true;
        let deadline = self.clock.now().saturating_add(self.speed);
        self.timer.arm(deadline);
        tracing::debug!(from = self.current_frame(), ?deadline, "play");
    }

    pub fn pause(&mut self) {
        if self.frames.is_empty() {
            return;
        }
        self.stop();
        tracing::debug!(at = self.current_frame(), "pause");
    }

    pub fn step_forward(&mut self) {
        if self.frames.is_empty() {
            return;
        }
        self.stop();
        let next = self.position.map_or(0, |index| index + 1);
        if next > self.last_index() {
            return;
        }
        self.position = Some(next);
        tracing::debug!(to = next, "step forward");
        self.notify();
    }

    /// Steps back one frame. Stepping back from frame 0 returns to the
    /// not-started position without notifying.
    pub fn step_backward(&mut self) {
        if self.frames.is_empty() {
            return;
        }
        self.stop();
        match self.position {
            None => {}
            Some(0) => {
                self.position = None;
                tracing::debug!("step backward to start");
            }
            Some(index) => {
                self.position = Some(index - 1);
                tracing::debug!(to = index - 1, "step backward");
                self.notify();
            }
        }
    }

    /// Seeks to `index`, clamped into `-1..=total_frames - 1`.
    pub fn go_to_frame(&mut self, index: isize) {
        if self.frames.is_empty() {
            return;
        }
        self.stop();
        let last = self.last_index() as isize;
        let clamped = index.clamp(-1, last);
        self.position = usize::try_from(clamped).ok();
        tracing::debug!(requested = index, to = clamped, "seek");
        self.notify();
    }

    /// Rewinds to the not-started position, keeping the loaded frames.
    pub fn reset(&mut self) {
        if self.frames.is_empty() {
            return;
        }
        self.stop();
        self.position = None;
        tracing::debug!("reset");
    }

    /// Discards the loaded frames.
    pub fn clear(&mut self) {
        self.stop();
        self.frames.clear();
        self.position = None;
        tracing::debug!("clear");
    }

    /// Sets the delay for future automatic advances, clamped to
    /// `1..=u64::MAX` milliseconds. A tick that is already pending keeps its
    /// deadline.
    pub fn set_speed(&mut self, speed: Duration) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }

    pub fn set_speed_ms(&mut self, milliseconds: u64) {
        self.set_speed(Duration::from_millis(milliseconds));
    }

    /// Fires every tick that is due, in order. Returns how many frames were
    /// advanced.
    pub fn poll(&mut self) -> usize {
        let mut advanced = 0;
        while self.timer.is_due(self.clock.now()) {
            let Some(deadline) = self.timer.cancel() else {
                break;
            };
            if !self.playing {
                break;
            }
            if !self.tick(deadline) {
                break;
            }
            advanced += 1;
        }
        advanced
    }

    /// Deadline of the single pending tick, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timer.deadline()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn frames(&self) -> &[Frame<T>] {
        &self.frames
    }

    pub fn current(&self) -> Option<&Frame<T>> {
        self.position.and_then(|index| self.frames.get(index))
    }

    pub fn current_snapshot(&self) -> Option<&T> {
        self.current().map(|frame| &frame.snapshot)
    }

    pub fn current_description(&self) -> Option<&str> {
        self.current().map(|frame| frame.description.as_str())
    }

    /// Current index, `-1` before the first frame.
    pub fn current_frame(&self) -> isize {
        self.position.map_or(-1, |index| index as isize)
    }

    pub fn total_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_complete(&self) -> bool {
        !self.frames.is_empty() && self.position == Some(self.last_index())
    }

    pub fn is_paused(&self) -> bool {
        !self.playing && self.position.is_some() && !self.is_complete()
    }

    pub fn speed(&self) -> Duration {
        self.speed
    }

    pub fn state(&self) -> PlaybackState {
        if self.frames.is_empty() {
            PlaybackState::Empty
        } else if self.playing {
            PlaybackState::Playing
        } else if self.is_complete() {
            PlaybackState::Complete
        } else if self.position.is_some() {
            PlaybackState::Paused
        } else {
            PlaybackState::Ready
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus {
            current_frame: self.current_frame(),
            total_frames: self.total_frames(),
            is_playing: self.playing,
            is_paused: self.is_paused(),
            is_complete: self.is_complete(),
            speed_ms: u64::try_from(self.speed.as_millis()).unwrap_or(u64::MAX),
            state: self.state(),
        }
    }

    /// One automatic advance scheduled for `deadline`. Returns false when
    /// playback stopped instead of advancing.
    fn tick(&mut self, deadline: Duration) -> bool {
        let next = self.position.map_or(0, |index| index + 1);
        if next > self.last_index() {
            self.playing = false;
            return false;
        }
        self.position = Some(next);
        self.notify();
        if next == self.last_index() {
            self.playing = false;
            tracing::info!(frames = self.frames.len(), "playback complete");
        } else {
            self.timer.arm(deadline.saturating_add(self.speed));
        }
        true
    }

    fn stop(&mut self) {
        self.timer.cancel();
        self.playing = false;
    }

    fn notify(&mut self) {
        let Some(index) = self.position else {
            return;
        };
        if let (Some(callback), Some(frame)) =
            (self.on_frame_change.as_mut(), self.frames.get(index))
        {
            callback(&frame.snapshot, index);
        }
    }

    fn last_index(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }
}

impl<T, C> Drop for Player<T, C> {
    fn drop(&mut self) {
        self.timer.cancel();
        self.on_frame_change = None;
    }
}

impl<T, C> fmt::Debug for Player<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("total_frames", &self.frames.len())
            .field("position", &self.position)
            .field("playing", &self.playing)
            .field("speed", &self.speed)
            .field("timer", &self.timer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::timeline::ManualClock;

    const TICK: Duration = Duration::from_millis(100);

    fn frames(labels: &[&'static str]) -> Vec<Frame<&'static str>> {
        labels
            .iter()
            .map(|label| Frame::new(*label, format!("show {label}")))
            .collect()
    }

    fn player_with(
        labels: &[&'static str],
    ) -> (
        Player<&'static str, ManualClock>,
        ManualClock,
        Arc<Mutex<Vec<(&'static str, usize)>>>,
    ) {
        let clock = ManualClock::new();
        let mut player = Player::with_clock(clock.clone()).with_speed(TICK);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        player.on_frame_change(move |snapshot, index| {
            sink.lock().unwrap().push((*snapshot, index));
        });
        player.load_frames(frames(labels));
        (player, clock, seen)
    }

    fn advance(player: &mut Player<&'static str, ManualClock>, clock: &ManualClock, by: Duration) {
        clock.advance(by);
        player.poll();
    }

    #[test]
    fn plays_three_frames_to_completion() {
        let (mut player, clock, seen) = player_with(&["A", "B", "C"]);
        player.play();
        assert_eq!(player.state(), PlaybackState::Playing);

        advance(&mut player, &clock, Duration::from_millis(350));

        assert_eq!(player.current_frame(), 2);
        assert_eq!(player.current_snapshot(), Some(&"C"));
        assert!(player.is_complete());
        assert!(!player.is_playing());
        assert_eq!(player.next_deadline(), None);
        assert_eq!(*seen.lock().unwrap(), vec![("A", 0), ("B", 1), ("C", 2)]);
        assert_eq!(player.state(), PlaybackState::Complete);
    }

    #[test]
    fn ticks_fire_only_after_the_configured_delay() {
        let (mut player, clock, seen) = player_with(&["A", "B"]);
        player.play();

        advance(&mut player, &clock, Duration::from_millis(99));
        assert_eq!(player.current_frame(), -1);
        advance(&mut player, &clock, Duration::from_millis(1));
        assert_eq!(player.current_frame(), 0);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn play_after_completion_restarts_at_first_frame() {
        let (mut player, clock, seen) = player_with(&["A", "B"]);
        player.play();
        advance(&mut player, &clock, Duration::from_secs(1));
        assert!(player.is_complete());
        seen.lock().unwrap().clear();

        player.play();
        assert_eq!(player.current_frame(), -1);
        advance(&mut player, &clock, TICK);

        assert_eq!(seen.lock().unwrap().first(), Some(&("A", 0)));
    }

    #[test]
    fn pause_then_play_resumes_from_paused_index() {
        let (mut player, clock, seen) = player_with(&["A", "B", "C", "D"]);
        player.play();
        advance(&mut player, &clock, Duration::from_millis(200));
        player.pause();
        assert!(player.is_paused());
        assert_eq!(player.current_frame(), 1);

        advance(&mut player, &clock, Duration::from_secs(5));
        assert_eq!(player.current_frame(), 1);

        player.play();
        advance(&mut player, &clock, TICK);
        assert_eq!(player.current_frame(), 2);
        assert_eq!(seen.lock().unwrap().last(), Some(&("C", 2)));
    }

    #[test]
    fn pause_within_a_tick_cancels_the_pending_advance() {
        let (mut player, clock, seen) = player_with(&["A", "B", "C"]);
        player.play();
        advance(&mut player, &clock, Duration::from_millis(50));
        player.pause();

        advance(&mut player, &clock, Duration::from_secs(2));
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(player.next_deadline(), None);
    }

    #[test]
    fn stepping_and_seeking_scenario() {
        let (mut player, _clock, seen) = player_with(&["A", "B", "C", "D", "E"]);
        player.step_forward();
        player.step_forward();
        assert_eq!(player.current_frame(), 1);

        player.go_to_frame(10);
        assert_eq!(player.current_frame(), 4);

        player.step_backward();
        assert_eq!(player.current_frame(), 3);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![("A", 0), ("B", 1), ("E", 4), ("D", 3)]
        );
    }

    #[test]
    fn step_forward_stops_at_last_frame() {
        let (mut player, _clock, seen) = player_with(&["A", "B"]);
        let mut observed = vec![player.current_frame()];
        for _ in 0..5 {
            player.step_forward();
            observed.push(player.current_frame());
        }
        assert_eq!(observed, vec![-1, 0, 1, 1, 1, 1]);
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn step_backward_floors_at_not_started() {
        let (mut player, _clock, seen) = player_with(&["A", "B", "C"]);
        player.go_to_frame(2);
        seen.lock().unwrap().clear();

        for _ in 0..6 {
            player.step_backward();
        }
        assert_eq!(player.current_frame(), -1);
        assert_eq!(*seen.lock().unwrap(), vec![("B", 1), ("A", 0)]);
        assert_eq!(player.state(), PlaybackState::Ready);
    }

    #[test]
    fn go_to_frame_clamps_every_index() {
        let (mut player, _clock, _seen) = player_with(&["A", "B", "C"]);
        let cases = [(-50, -1), (-1, -1), (0, 0), (2, 2), (3, 2), (isize::MAX, 2)];
        for (requested, expected) in cases {
            player.go_to_frame(requested);
            assert_eq!(player.current_frame(), expected, "requested {requested}");
        }
    }

    #[test]
    fn seeking_to_not_started_does_not_notify() {
        let (mut player, _clock, seen) = player_with(&["A", "B"]);
        player.go_to_frame(-7);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn manual_step_interrupts_autoplay() {
        let (mut player, clock, seen) = player_with(&["A", "B", "C", "D"]);
        player.play();
        advance(&mut player, &clock, TICK);
        player.step_forward();
        assert!(!player.is_playing());
        assert_eq!(player.next_deadline(), None);

        advance(&mut player, &clock, Duration::from_secs(1));
        assert_eq!(player.current_frame(), 1);
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn empty_player_ignores_transport() {
        let (mut player, clock, seen) = player_with(&[]);
        player.play();
        assert!(!player.is_playing());
        player.step_forward();
        player.step_backward();
        player.go_to_frame(3);
        player.reset();
        advance(&mut player, &clock, Duration::from_secs(1));

        assert_eq!(player.current_frame(), -1);
        assert!(seen.lock().unwrap().is_empty());
        assert!(!player.is_complete());
        assert_eq!(player.state(), PlaybackState::Empty);
    }

    #[test]
    fn clear_discards_frames_and_disables_transport() {
        let (mut player, clock, seen) = player_with(&["A", "B"]);
        player.play();
        player.clear();
        assert_eq!(player.total_frames(), 0);

        player.play();
        player.step_forward();
        advance(&mut player, &clock, Duration::from_secs(1));
        assert!(seen.lock().unwrap().is_empty());

        player.load_frames(frames(&["X"]));
        player.step_forward();
        assert_eq!(*seen.lock().unwrap(), vec![("X", 0)]);
    }

    #[test]
    fn reset_keeps_frames() {
        let (mut player, _clock, _seen) = player_with(&["A", "B"]);
        player.go_to_frame(1);
        player.reset();
        assert_eq!(player.current_frame(), -1);
        assert_eq!(player.total_frames(), 2);
    }

    #[test]
    fn loading_mid_playback_discards_pending_tick() {
        let (mut player, clock, seen) = player_with(&["A", "B", "C"]);
        player.play();
        advance(&mut player, &clock, TICK);
        player.load_frames(frames(&["X", "Y"]));

        assert_eq!(player.current_frame(), -1);
        assert!(!player.is_playing());
        assert_eq!(player.next_deadline(), None);
        advance(&mut player, &clock, Duration::from_secs(1));
        assert_eq!(*seen.lock().unwrap(), vec![("A", 0)]);
    }

    #[test]
    fn speed_change_applies_from_the_next_tick() {
        let (mut player, clock, _seen) = player_with(&["A", "B", "C"]);
        player.play();
        player.set_speed(Duration::from_millis(500));
        assert_eq!(player.next_deadline(), Some(TICK));

        advance(&mut player, &clock, TICK);
        assert_eq!(player.current_frame(), 0);
        assert_eq!(player.next_deadline(), Some(Duration::from_millis(600)));

        advance(&mut player, &clock, Duration::from_millis(499));
        assert_eq!(player.current_frame(), 0);
        advance(&mut player, &clock, Duration::from_millis(1));
        assert_eq!(player.current_frame(), 1);
    }

    #[test]
    fn speed_change_alone_does_not_notify() {
        let (mut player, _clock, seen) = player_with(&["A"]);
        player.set_speed_ms(10);
        player.set_speed_ms(0);
        assert_eq!(player.speed(), Duration::from_millis(1));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn huge_speed_saturates_instead_of_overflowing() {
        let (mut player, clock, seen) = player_with(&["A", "B"]);
        clock.advance(Duration::from_millis(5));
        player.set_speed(Duration::MAX);
        assert_eq!(player.speed(), Duration::from_millis(u64::MAX));
        assert_eq!(player.status().speed_ms, u64::MAX);

        player.play();
        assert!(player.is_playing());
        assert_eq!(
            player.next_deadline(),
            Some(Duration::from_millis(5) + Duration::from_millis(u64::MAX))
        );

        advance(&mut player, &clock, Duration::from_secs(3600));
        assert_eq!(player.current_frame(), -1);
        assert!(seen.lock().unwrap().is_empty());

        player.set_speed(Duration::from_millis(10));
        player.pause();
        player.play();
        advance(&mut player, &clock, Duration::from_millis(10));
        assert_eq!(*seen.lock().unwrap(), vec![("A", 0)]);
    }

    #[test]
    fn single_frame_plays_once_and_completes() {
        let (mut player, clock, seen) = player_with(&["A"]);
        player.play();
        advance(&mut player, &clock, TICK);

        assert_eq!(*seen.lock().unwrap(), vec![("A", 0)]);
        assert!(player.is_complete());
        assert!(!player.is_playing());
        assert_eq!(player.next_deadline(), None);

        advance(&mut player, &clock, Duration::from_secs(1));
        assert_eq!(seen.lock().unwrap().len(), 1);
        assert_eq!(player.state(), PlaybackState::Complete);
    }

    #[test]
    fn repeated_play_keeps_a_single_pending_tick() {
        let (mut player, clock, seen) = player_with(&["A", "B", "C"]);
        player.play();
        advance(&mut player, &clock, Duration::from_millis(60));
        player.play();
        assert_eq!(player.next_deadline(), Some(TICK));

        advance(&mut player, &clock, Duration::from_millis(40));
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn play_then_pause_leaves_player_paused() {
        let (mut player, clock, seen) = player_with(&["A", "B"]);
        player.play();
        player.pause();
        advance(&mut player, &clock, Duration::from_secs(1));

        assert!(!player.is_playing());
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(player.state(), PlaybackState::Ready);
    }

    #[test]
    fn uninterrupted_run_notifies_once_per_frame_in_order() {
        let labels = ["a", "b", "c", "d", "e", "f", "g"];
        let (mut player, clock, seen) = player_with(&labels);
        player.play();
        for _ in 0..20 {
            advance(&mut player, &clock, Duration::from_millis(37));
        }
        let indices: Vec<usize> = seen.lock().unwrap().iter().map(|(_, i)| *i).collect();
        assert_eq!(indices, (0..labels.len()).collect::<Vec<_>>());
    }

    #[test]
    fn status_reports_derived_flags() {
        let (mut player, _clock, _seen) = player_with(&["A", "B", "C"]);
        player.go_to_frame(1);

        let status = player.status();
        assert_eq!(status.current_frame, 1);
        assert_eq!(status.total_frames, 3);
        assert!(status.is_paused);
        assert!(!status.is_complete);
        assert_eq!(status.speed_ms, 100);
        assert_eq!(status.state, PlaybackState::Paused);
        assert_eq!(player.current_description(), Some("show B"));
    }
}
