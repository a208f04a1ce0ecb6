//! Fixed-slot animation scheduler.
//!
//! The scheduler keeps a small, fixed set of independent timed channels and
//! advances all of them from a single [`AnimationScheduler::tick`]. It only
//! produces linear progress; easing and the actual rendering are done by the
//! owner of the channel inside the update handler.
//!
//! # Re-entrancy
//!
//! Update handlers never get access to the scheduler. Instead they return an
//! [`AfterUpdate`] which the scheduler applies once the handler has returned.
//! Returning [`AfterUpdate::Restart`] or [`AfterUpdate::Start`] from a
//! `Completed` update is how looping effects keep themselves alive: the new
//! run starts at the completing tick and its first update is delivered on the
//! next tick.

use embassy_time::{Duration, Instant};

use crate::effect::ColorMode;

/// Channel driving the petal actuator
pub const PETALS_CHANNEL: usize = 0;
/// Channel driving the LED ring
pub const LIGHT_CHANNEL: usize = 1;
/// Number of channels used by the device
pub const CHANNEL_COUNT: usize = 2;

/// Lifecycle of a single channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationState {
    /// Nothing is scheduled on the channel
    Idle,
    /// The channel is being advanced every tick
    Running,
    /// The run reached its duration; reported exactly once per run
    Completed,
}

/// Tag identifying what a channel run is animating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationTask {
    /// Petal movement between two angles
    Petals,
    /// LED ring effect in the given color mode
    Light(ColorMode),
}

/// Scheduler configured for the device channels
pub type Animations = AnimationScheduler<AnimationTask, CHANNEL_COUNT>;

/// Snapshot handed to the update handler
#[derive(Debug, Clone, Copy)]
pub struct AnimationUpdate<K> {
    /// Channel index
    pub channel: usize,
    /// Tag the run was started with
    pub task: K,
    /// Linear progress in `[0, 1]`
    pub progress: f32,
    /// `Running`, or `Completed` for the final update of a run
    pub state: AnimationState,
}

impl<K> AnimationUpdate<K> {
    /// Check if this is the final update of the run
    pub fn is_completed(&self) -> bool {
        self.state == AnimationState::Completed
    }
}

/// What the scheduler should do with the channel after an update
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AfterUpdate<K> {
    /// Keep running, or settle to `Idle` if the run just completed
    Continue,
    /// Run the same task again with the same duration
    Restart,
    /// Replace the run with a new task and duration
    Start { duration: Duration, task: K },
}

#[derive(Debug, Clone, Copy)]
struct AnimationChannel<K> {
    state: AnimationState,
    task: Option<K>,
    start: Instant,
    duration: Duration,
    progress: f32,
}

impl<K: Copy> AnimationChannel<K> {
    const fn idle() -> Self {
        Self {
            state: AnimationState::Idle,
            task: None,
            start: Instant::from_millis(0),
            duration: Duration::from_millis(0),
            progress: 0.0,
        }
    }

    fn begin(&mut self, task: K, duration: Duration, now: Instant) {
        self.task = Some(task);
        self.duration = duration;
        self.restart(now);
    }

    fn restart(&mut self, now: Instant) {
        self.state = AnimationState::Running;
        self.start = now;
        self.progress = 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    fn progress_at(&self, elapsed: Duration) -> f32 {
        let ratio = elapsed.as_ticks() as f32 / self.duration.as_ticks() as f32;
        // Never step backwards, even if the caller's clock does
        ratio.clamp(self.progress, 1.0)
    }
}

/// Fixed set of independently timed animation channels
#[derive(Debug)]
pub struct AnimationScheduler<K: Copy, const N: usize> {
    channels: [AnimationChannel<K>; N],
}

impl<K: Copy, const N: usize> Default for AnimationScheduler<K, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy, const N: usize> AnimationScheduler<K, N> {
    /// Create a scheduler with all channels idle
    pub fn new() -> Self {
        Self {
            channels: core::array::from_fn(|_| AnimationChannel::idle()),
        }
    }

    /// Start a run on `channel`, replacing whatever was running there.
    ///
    /// Timing begins at `now`. A zero duration completes on the next tick.
    pub fn start(&mut self, channel: usize, duration: Duration, task: K, now: Instant) {
        if let Some(slot) = self.channels.get_mut(channel) {
            slot.begin(task, duration, now);
        }
    }

    /// Cancel the run on `channel` immediately, without a final update.
    ///
    /// With `retain` the last progress value stays readable through
    /// [`Self::progress`], otherwise it is reset to zero.
    pub fn stop(&mut self, channel: usize, retain: bool) {
        if let Some(slot) = self.channels.get_mut(channel) {
            slot.state = AnimationState::Idle;
            if !retain {
                slot.progress = 0.0;
            }
        }
    }

    /// Advance every running channel to `now`.
    ///
    /// `on_update` is invoked once per running channel. When a run reaches its
    /// duration the handler sees progress `1.0` and [`AnimationState::Completed`]
    /// exactly once; the channel then goes idle unless the handler asks for a
    /// restart.
    pub fn tick<F>(&mut self, now: Instant, mut on_update: F)
    where
        F: FnMut(AnimationUpdate<K>) -> AfterUpdate<K>,
    {
        for (index, slot) in self.channels.iter_mut().enumerate() {
            if slot.state != AnimationState::Running {
                continue;
            }
            let Some(task) = slot.task else {
                slot.state = AnimationState::Idle;
                continue;
            };

            let elapsed = now
                .checked_duration_since(slot.start)
                .unwrap_or(Duration::from_ticks(0));
            let finished = elapsed >= slot.duration;
            if finished {
                slot.progress = 1.0;
                slot.state = AnimationState::Completed;
            } else {
                slot.progress = slot.progress_at(elapsed);
            }

            let after = on_update(AnimationUpdate {
                channel: index,
                task,
                progress: slot.progress,
                state: slot.state,
            });

            match after {
                AfterUpdate::Continue => {
                    if finished {
                        slot.state = AnimationState::Idle;
                    }
                }
                AfterUpdate::Restart => slot.restart(now),
                AfterUpdate::Start { duration, task } => slot.begin(task, duration, now),
            }
        }
    }

    /// Check if `channel` has a run in progress
    pub fn is_active(&self, channel: usize) -> bool {
        self.channels
            .get(channel)
            .is_some_and(|slot| slot.state == AnimationState::Running)
    }

    /// Check if any channel has a run in progress
    pub fn is_animating(&self) -> bool {
        self.channels
            .iter()
            .any(|slot| slot.state == AnimationState::Running)
    }

    /// Current state of `channel` (`Idle` for unknown channels)
    pub fn state(&self, channel: usize) -> AnimationState {
        self.channels
            .get(channel)
            .map_or(AnimationState::Idle, |slot| slot.state)
    }

    /// Last progress reported on `channel` (`0.0` for unknown channels)
    pub fn progress(&self, channel: usize) -> f32 {
        self.channels.get(channel).map_or(0.0, |slot| slot.progress)
    }

    /// Task of the run in progress on `channel`
    pub fn task(&self, channel: usize) -> Option<K> {
        self.channels
            .get(channel)
            .filter(|slot| slot.state == AnimationState::Running)
            .and_then(|slot| slot.task)
    }
}
