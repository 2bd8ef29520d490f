//! The render device contract: the two callback slots a host implements to
//! receive draw calls from [`super::console::Console::render`].

use crate::{Cell, Color, StyleFlags};

/// A sink for the renderer's draw calls.
///
/// Both methods are invoked only during [`Console::render`](super::console::Console::render),
/// always with positions inside the grid. `draw_run` is only ever called
/// with `bytes.len() >= 2` and `x + bytes.len() as u16 <= width`; a
/// single-cell run always goes through `draw_cell` instead. Implementations
/// must not retain `bytes` past the call and should not re-enter the
/// console's drawing API from within either callback.
pub trait RenderDevice {
    /// Render one cell at `(x, y)`.
    fn draw_cell(&mut self, x: u16, y: u16, cell: Cell);

    /// Render a horizontal run of `bytes.len()` characters starting at
    /// `(x, y)`, all sharing `fg`, `bg`, and `style`.
    fn draw_run(&mut self, x: u16, y: u16, bytes: &[u8], fg: Color, bg: Color, style: StyleFlags);
}

/// A [`RenderDevice`] that records every call it receives, for tests.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingDevice {
    /// Every draw call received, in emission order.
    pub calls: Vec<DrawCall>,
}

/// One recorded call to a [`RecordingDevice`].
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    /// A `draw_cell` call.
    Cell { x: u16, y: u16, cell: Cell },
    /// A `draw_run` call; `text` holds the run's bytes without the internal
    /// NUL terminator the renderer's scratch buffer uses.
    Run {
        x: u16,
        y: u16,
        text: Vec<u8>,
        fg: Color,
        bg: Color,
        style: StyleFlags,
    },
}

#[cfg(any(test, feature = "test-util"))]
impl RenderDevice for RecordingDevice {
    fn draw_cell(&mut self, x: u16, y: u16, cell: Cell) {
        self.calls.push(DrawCall::Cell { x, y, cell });
    }

    fn draw_run(&mut self, x: u16, y: u16, bytes: &[u8], fg: Color, bg: Color, style: StyleFlags) {
        self.calls.push(DrawCall::Run {
            x,
            y,
            text: bytes.to_vec(),
            fg,
            bg,
            style,
        });
    }
}
