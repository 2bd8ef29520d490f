//! # Rendering System
//!
//! The rendering system reconciles an in-memory grid of styled cells
//! against what was last drawn and emits the minimum sequence of draw calls
//! needed to bring a render device up to date.
//!
//! ## Architecture
//!
//! - [`buffer`] — the double-buffered grid: per-cell current/next slots and
//!   a packed dirty-state byte. Internal; the public surface is `Console`.
//! - [`device`] — the [`RenderDevice`] trait a host implements to receive
//!   draw calls.
//! - [`console`] — [`Console`], the public drawing API (`put`, `pick`,
//!   `clear`, `print`, ...) and the reconciliation sweep (`render`).
//!
//! ## Usage
//!
//! ```rust
//! use gridterm::{Console, Cell, Color, StyleFlags, RenderDevice};
//!
//! struct Log;
//! impl RenderDevice for Log {
//!     fn draw_cell(&mut self, _x: u16, _y: u16, _cell: Cell) {}
//!     fn draw_run(&mut self, _x: u16, _y: u16, _bytes: &[u8], _fg: Color, _bg: Color, _style: StyleFlags) {}
//! }
//!
//! let mut console = Console::new(80, 24, Log)?;
//! console.put(0, 0, Cell::new(b'A', Color::Green, Color::Black, StyleFlags::NONE));
//! let draw_calls = console.render()?;
//! assert_eq!(draw_calls, 1);
//! # Ok::<(), gridterm::Error>(())
//! ```

pub(crate) mod buffer;
pub mod console;
pub mod device;

pub use console::{Console, ConsoleConfig, MIN_DIMENSION};
pub use device::RenderDevice;

#[cfg(any(test, feature = "test-util"))]
pub use device::{DrawCall, RecordingDevice};
