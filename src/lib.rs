//! # gridterm - a reconciling character-grid renderer and game loop
//!
//! `gridterm` gives a terminal UI or terminal game two things: a
//! double-buffered grid of styled character cells that reconciles itself
//! into the minimum run of draw calls each frame, and a fixed/variable
//! timestep scheduler to drive `update`/`draw` independently of how fast
//! drawing actually happens.
//!
//! ## Quick Start
//!
//! ```rust
//! use gridterm::{Cell, Color, Console, RenderDevice, StyleFlags};
//!
//! struct Log;
//! impl RenderDevice for Log {
//!     fn draw_cell(&mut self, _x: u16, _y: u16, _cell: Cell) {}
//!     fn draw_run(&mut self, _x: u16, _y: u16, _bytes: &[u8], _fg: Color, _bg: Color, _style: StyleFlags) {}
//! }
//!
//! let mut console = Console::new(80, 24, Log)?;
//! console.print(0, 0, b"hello", Color::Green, Color::Black, StyleFlags::NONE);
//! console.render()?;
//! # Ok::<(), gridterm::Error>(())
//! ```
//!
//! ## Main Components
//!
//! - [`render`] - the double-buffered grid, the [`RenderDevice`] contract,
//!   and [`Console`], the reconciling drawing API.
//! - [`game`] - the fixed/variable timestep scheduler ([`game::GameLoop`]).
//! - [`term`] - a [`crossterm`]-backed [`RenderDevice`] for hosts that want
//!   one out of the box.
//! - [`cell`], [`color`], [`style`] - the cell model: [`Cell`], [`Color`],
//!   [`StyleFlags`].
//! - [`error`] - the crate's [`Error`] and [`Result`] types.

pub mod cell;
pub mod color;
pub mod error;
pub mod game;
pub mod render;
pub mod style;
pub mod term;

pub use cell::Cell;
pub use color::Color;
pub use error::{Error, Result};
pub use render::{Console, ConsoleConfig, RenderDevice, MIN_DIMENSION};
pub use style::StyleFlags;

#[cfg(any(test, feature = "test-util"))]
pub use render::{DrawCall, RecordingDevice};

/// Common imports for `gridterm` applications.
///
/// ```rust
/// use gridterm::prelude::*;
///
/// let style = StyleFlags::BOLD | StyleFlags::ITALIC;
/// let cell = Cell::new(b'x', Color::Red, Color::Black, style);
/// ```
pub mod prelude {
    pub use crate::game::{GameLoop, GameLoopConfig, GameTime, SystemClock};
    pub use crate::{Cell, Color, Console, ConsoleConfig, Error, RenderDevice, Result, StyleFlags};
}
