//! # Error Handling
//!
//! `gridterm` uses a single [`Error`] enum for everything that can go wrong.
//! Most functions return `Result<T>`, which is just `Result<T, Error>`.
//!
//! Coordinates that fall outside the grid are *not* errors: `put`/`clear`/
//! `pick` silently reject them (returning `false`, or the empty cell) as part
//! of the reconciliation model's own rules. `Error` is reserved for usage
//! mistakes — bad dimensions, a missing render device, a game loop run
//! before it's initialized — and the one structural fault the renderer can
//! detect in itself. There is no "uninitialized console" variant: a
//! `Console` only ever exists via `Console::new`/`Console::with_config`,
//! which always leave it fully initialized.
//!
//! ## Usage
//!
//! ```rust
//! use gridterm::{Result, Error, Console};
//!
//! fn setup(device: impl gridterm::RenderDevice + 'static) -> Result<()> {
//!     let console = Console::new(80, 24, device)?; // Uses ? for error propagation
//!     match some_operation(&console) {
//!         Err(Error::NoRenderDevice) => println!("no render device installed"),
//!         Err(e) => println!("error: {e}"),
//!         Ok(_) => {}
//!     }
//!     Ok(())
//! }
//! # fn some_operation(_: &gridterm::Console) -> Result<()> { Ok(()) }
//! ```

use thiserror::Error;

/// All possible `gridterm` errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// `Console::new` / `Console::resize` was called with a width or height
    /// below the minimum of 2.
    #[error("invalid console dimensions {width}x{height}, both must be >= 2")]
    InvalidDimensions {
        /// The requested width.
        width: u16,
        /// The requested height.
        height: u16,
    },

    /// A render was attempted without a render device installed.
    #[error("no render device installed")]
    NoRenderDevice,

    /// The renderer's line buffer overran the console width during a sweep.
    /// This indicates a bug in the renderer itself, not a usage error; it
    /// should be unreachable in normal operation.
    #[error("renderer line buffer overran console width (internal fault)")]
    RenderFault,

    /// `GameLoop::run` or `GameLoop::tick` was called before `init`.
    #[error("game loop has not been initialized")]
    GameNotInitialized,
}

/// Shorthand for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
