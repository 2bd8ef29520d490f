//! # Game Loop
//!
//! A fixed- or variable-timestep scheduler decoupled from rendering: it
//! paces `update`/`draw` callbacks against a [`Clock`] and reports timing
//! (total ticks, catch-up lag, FPS) through a [`GameTime`] snapshot.
//!
//! ## Components
//!
//! - [`clock`] — the [`Clock`] trait a host's time source implements;
//!   [`SystemClock`] for production use, [`FakeClock`] for deterministic
//!   tests.
//! - [`game_loop`] — [`GameLoop`], [`GameLoopConfig`], [`GameTime`], and
//!   [`ExitHandle`].
//!
//! ## Usage
//!
//! ```rust
//! use gridterm::game::{GameLoop, GameLoopConfig, SystemClock};
//!
//! let mut scheduler = GameLoop::new(GameLoopConfig::default(), SystemClock::new());
//! scheduler.init()?;
//! let exit = scheduler.exit_handle();
//!
//! let mut ticks_seen = 0u32;
//! scheduler.run(
//!     &mut ticks_seen,
//!     |_time, ticks| {
//!         *ticks += 1;
//!         if *ticks >= 2 {
//!             exit.exit();
//!         }
//!     },
//!     |_time, _ticks| {},
//! )?;
//! # Ok::<(), gridterm::Error>(())
//! ```

pub mod clock;
pub mod game_loop;

pub use clock::{Clock, SystemClock};
pub use game_loop::{ms_to_ticks, ticks_to_ms, ExitHandle, GameLoop, GameLoopConfig, GameTime};

#[cfg(any(test, feature = "test-util"))]
pub use clock::FakeClock;
