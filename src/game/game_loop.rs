//! A fixed- or variable-timestep scheduler: the `update`/`draw` pacing that
//! drives a game (or any periodic simulation) independently of its render
//! device.
//!
//! In fixed-step mode, `update` is called zero or more times per tick at a
//! constant tick size, catching up after a stall up to a clamp, while `draw`
//! is always called exactly once per tick. In variable-step mode, `update`
//! is called once per tick with however much time actually elapsed.

use std::cell::Cell as StdCell;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::game::clock::Clock;

/// Converts a millisecond duration to ticks at the given rate, truncating.
pub fn ms_to_ticks(ms: u64, clocks_per_second: u64) -> u64 {
    (ms as u128 * clocks_per_second as u128 / 1000) as u64
}

/// Converts a tick count to milliseconds at the given rate, truncating.
pub fn ticks_to_ms(ticks: u64, clocks_per_second: u64) -> u64 {
    if clocks_per_second == 0 {
        return 0;
    }
    (ticks as u128 * 1000 / clocks_per_second as u128) as u64
}

/// Tuning knobs for a [`GameLoop`]. [`Default`] matches a typical
/// 60-ish-fps fixed-step game: a 16ms target step, a half-second catch-up
/// clamp, and a millisecond-resolution clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLoopConfig {
    /// Run `update` at a constant tick size (`true`), or once per tick with
    /// whatever elapsed (`false`).
    pub is_fixed_time_step: bool,
    /// The fixed step size, in milliseconds. Ignored when
    /// `is_fixed_time_step` is false.
    pub target_elapsed_time_ms: u64,
    /// The most elapsed time a single tick will ever account for; a stall
    /// longer than this is silently dropped rather than causing a burst of
    /// catch-up updates.
    pub max_elapsed_time_ms: u64,
    /// The tick rate of the paired [`Clock`], e.g. 1000 for a
    /// millisecond-resolution clock.
    pub clocks_per_second: u64,
}

impl Default for GameLoopConfig {
    fn default() -> Self {
        GameLoopConfig {
            is_fixed_time_step: true,
            target_elapsed_time_ms: 16,
            max_elapsed_time_ms: 500,
            clocks_per_second: 1000,
        }
    }
}

/// A snapshot of timing state passed to `update` and `draw` callbacks for a
/// single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameTime {
    /// Total ticks simulated since the loop started running.
    pub total_ticks: u64,
    /// Ticks simulated during this tick (the fixed step times the number
    /// of steps taken, or the raw elapsed time in variable-step mode).
    pub elapsed_ticks: u64,
    /// [`Self::elapsed_ticks`] converted to milliseconds.
    pub elapsed_ms: u64,
    /// Set once the loop has fallen behind by several consecutive ticks
    /// and cleared once it has fully caught up.
    pub is_running_slowly: bool,
    /// The most recently published frames-per-second sample.
    pub current_fps: u32,
    /// How many ticks behind the fixed-step catch-up loop currently is.
    pub frame_lag: u32,
    /// How many `update` calls this tick made (always 1 outside fixed-step
    /// mode).
    pub step_count: u32,
}

/// A handle that lets code reachable from `update`/`draw` — including code
/// that doesn't otherwise have access to the `GameLoop` itself — ask the
/// loop to stop after the current tick.
#[derive(Debug, Clone, Default)]
pub struct ExitHandle(Rc<StdCell<bool>>);

impl ExitHandle {
    /// Requests that the loop stop once the current tick finishes.
    pub fn exit(&self) {
        self.0.set(true);
    }

    /// Whether [`Self::exit`] has been called.
    pub fn should_exit(&self) -> bool {
        self.0.get()
    }
}

/// The fixed/variable-timestep scheduler.
///
/// `GameLoop` does not own the simulation's state; `run` and `tick` thread a
/// `&mut S` through to the `update`/`draw` callbacks on every call instead,
/// so the loop itself stays reusable across different state shapes.
pub struct GameLoop<C: Clock> {
    config: GameLoopConfig,
    clock: C,
    target_ticks: u64,
    max_ticks: u64,
    previous_ticks: u64,
    accumulated_ticks: u64,
    total_ticks: u64,
    frame_lag: u32,
    is_running_slowly: bool,
    fps_frame_counter: u32,
    fps_window_ticks: u64,
    current_fps: u32,
    exit: ExitHandle,
    initialized: bool,
}

impl<C: Clock> GameLoop<C> {
    /// Builds a loop with the given config and clock. Call [`Self::init`]
    /// before [`Self::run`] or [`Self::tick`].
    pub fn new(config: GameLoopConfig, clock: C) -> Self {
        GameLoop {
            config,
            clock,
            target_ticks: ms_to_ticks(config.target_elapsed_time_ms, config.clocks_per_second),
            max_ticks: ms_to_ticks(config.max_elapsed_time_ms, config.clocks_per_second),
            previous_ticks: 0,
            accumulated_ticks: 0,
            total_ticks: 0,
            frame_lag: 0,
            is_running_slowly: false,
            fps_frame_counter: 0,
            fps_window_ticks: 0,
            current_fps: 0,
            exit: ExitHandle::default(),
            initialized: false,
        }
    }

    /// A clonable handle that can request the loop exit from within an
    /// `update`/`draw` callback or from state reachable from one.
    pub fn exit_handle(&self) -> ExitHandle {
        self.exit.clone()
    }

    /// The most recently published frames-per-second sample.
    pub fn current_fps(&self) -> u32 {
        self.current_fps
    }

    /// Re-derives the target/max tick counts from the config and marks the
    /// loop ready to run. Must be called before [`Self::run`] or
    /// [`Self::tick`].
    pub fn init(&mut self) -> Result<()> {
        self.target_ticks = ms_to_ticks(self.config.target_elapsed_time_ms, self.config.clocks_per_second);
        self.max_ticks = ms_to_ticks(self.config.max_elapsed_time_ms, self.config.clocks_per_second);
        self.initialized = true;
        Ok(())
    }

    /// Runs ticks until [`ExitHandle::exit`] is called, invoking `update`
    /// and `draw` on `shared` each tick per [`Self::tick`].
    pub fn run<S, U, D>(&mut self, shared: &mut S, mut update: U, mut draw: D) -> Result<()>
    where
        U: FnMut(&GameTime, &mut S),
        D: FnMut(&GameTime, &mut S),
    {
        if !self.initialized {
            return Err(Error::GameNotInitialized);
        }
        self.previous_ticks = self.clock.now_ticks();
        let mut game_time = GameTime::default();
        while !self.exit.should_exit() {
            self.tick(&mut game_time, shared, &mut update, &mut draw)?;
        }
        Ok(())
    }

    /// Runs a single tick: paces against the clock, advances simulation
    /// time, and calls `update` (once, or zero-or-more times in
    /// fixed-step mode to catch up) followed by exactly one `draw` call.
    ///
    /// `game_time` is reused across calls and updated in place so callers
    /// driving ticks manually (rather than via [`Self::run`]) can inspect
    /// it between ticks.
    pub fn tick<S, U, D>(
        &mut self,
        game_time: &mut GameTime,
        shared: &mut S,
        update: &mut U,
        draw: &mut D,
    ) -> Result<()>
    where
        U: FnMut(&GameTime, &mut S),
        D: FnMut(&GameTime, &mut S),
    {
        if !self.initialized {
            return Err(Error::GameNotInitialized);
        }

        loop {
            let current_ticks = self.clock.now_ticks();
            self.accumulated_ticks += current_ticks.saturating_sub(self.previous_ticks);
            self.previous_ticks = current_ticks;

            if self.config.is_fixed_time_step && self.accumulated_ticks < self.target_ticks {
                let remaining = self.target_ticks - self.accumulated_ticks;
                let sleep_ms = ticks_to_ms(remaining, self.config.clocks_per_second).max(1);
                self.clock.sleep(sleep_ms);
                continue;
            }
            break;
        }

        if self.accumulated_ticks > self.max_ticks {
            self.accumulated_ticks = self.max_ticks;
        }

        if self.config.is_fixed_time_step {
            self.tick_fixed(game_time, shared, update);
        } else {
            self.tick_variable(game_time, shared, update);
        }

        draw(game_time, shared);
        self.fps_frame_counter += 1;

        Ok(())
    }

    fn tick_fixed<S, U>(&mut self, game_time: &mut GameTime, shared: &mut S, update: &mut U)
    where
        U: FnMut(&GameTime, &mut S),
    {
        let mut step_count = 0u32;

        while self.accumulated_ticks >= self.target_ticks && !self.exit.should_exit() {
            self.accumulated_ticks -= self.target_ticks;
            self.total_ticks += self.target_ticks;
            step_count += 1;

            game_time.step_count = step_count;
            game_time.total_ticks = self.total_ticks;
            game_time.elapsed_ticks = self.target_ticks;
            game_time.elapsed_ms = ticks_to_ms(self.target_ticks, self.config.clocks_per_second);
            self.update_fps_window(self.target_ticks, game_time);

            update(game_time, shared);
        }

        self.frame_lag += step_count.saturating_sub(1);
        if self.is_running_slowly {
            if self.frame_lag == 0 {
                self.is_running_slowly = false;
                debug!(target: "gridterm::game_loop", "running_slowly_cleared");
            }
        } else if self.frame_lag >= 5 {
            self.is_running_slowly = true;
            warn!(target: "gridterm::game_loop", frame_lag = self.frame_lag, "running_slowly_set");
        }
        if step_count == 1 && self.frame_lag > 0 {
            self.frame_lag -= 1;
        }

        game_time.elapsed_ticks = self.target_ticks * step_count as u64;
        game_time.elapsed_ms = ticks_to_ms(game_time.elapsed_ticks, self.config.clocks_per_second);
        game_time.total_ticks = self.total_ticks;
        game_time.frame_lag = self.frame_lag;
        game_time.is_running_slowly = self.is_running_slowly;
        game_time.current_fps = self.current_fps;
    }

    fn tick_variable<S, U>(&mut self, game_time: &mut GameTime, shared: &mut S, update: &mut U)
    where
        U: FnMut(&GameTime, &mut S),
    {
        let elapsed = self.accumulated_ticks;
        self.total_ticks += elapsed;
        self.accumulated_ticks = 0;

        game_time.step_count = 1;
        game_time.elapsed_ticks = elapsed;
        game_time.elapsed_ms = ticks_to_ms(elapsed, self.config.clocks_per_second);
        game_time.total_ticks = self.total_ticks;
        self.update_fps_window(elapsed, game_time);

        update(game_time, shared);

        game_time.frame_lag = self.frame_lag;
        game_time.is_running_slowly = self.is_running_slowly;
        game_time.current_fps = self.current_fps;
    }

    fn update_fps_window(&mut self, elapsed_this_step: u64, game_time: &mut GameTime) {
        self.fps_window_ticks += elapsed_this_step;
        if self.fps_window_ticks > self.config.clocks_per_second {
            self.current_fps = self.fps_frame_counter;
            self.fps_frame_counter = 0;
            self.fps_window_ticks -= self.config.clocks_per_second;
        }
        game_time.current_fps = self.current_fps;
    }
}
