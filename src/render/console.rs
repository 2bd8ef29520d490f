//! The public drawing API and the reconciliation renderer.
//!
//! [`Console`] owns the grid ([`ScreenBuffer`]), the installed
//! [`RenderDevice`], and the scratch line buffer used while sweeping. It is
//! an ordinary owned value — no process-wide statics — so nothing prevents
//! a caller from running several independent consoles side by side.
//!
//! `Console` is generic over its device rather than boxing a trait object:
//! the device is known at the call site and this keeps `render`'s hot path
//! free of a vtable indirection per draw call.

use tracing::trace;

use super::buffer::ScreenBuffer;
use super::device::RenderDevice;
use crate::{Cell, Error, Result};

/// Minimum width and height a console may be created with.
pub const MIN_DIMENSION: u16 = 2;

/// Constructible, `Default`-able console dimensions — the same plain-struct
/// configuration convention as [`crate::game::GameLoopConfig`]. Pair with
/// [`Console::with_config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Console width in cells.
    pub width: u16,
    /// Console height in cells.
    pub height: u16,
}

impl Default for ConsoleConfig {
    /// 80x24, the traditional default terminal size.
    fn default() -> Self {
        ConsoleConfig {
            width: 80,
            height: 24,
        }
    }
}

/// A reconciling character-grid console: a double-buffered model plus a
/// pluggable [`RenderDevice`] back end of type `D`.
pub struct Console<D: RenderDevice> {
    buffer: ScreenBuffer,
    device: Option<D>,
    line_buffer: Vec<u8>,
    screen_dirty: bool,
}

impl<D: RenderDevice> Console<D> {
    /// Creates a console of `width` x `height` cells bound to `device`.
    /// Both dimensions must be at least [`MIN_DIMENSION`].
    pub fn new(width: u16, height: u16, device: D) -> Result<Console<D>> {
        if width < MIN_DIMENSION || height < MIN_DIMENSION {
            return Err(Error::InvalidDimensions { width, height });
        }
        trace!(target: "gridterm::console", width, height, "console_init");
        Ok(Console {
            buffer: ScreenBuffer::new(width, height),
            device: Some(device),
            line_buffer: Vec::with_capacity(width as usize + 1),
            screen_dirty: false,
        })
    }

    /// Equivalent to [`Console::new`], taking dimensions from a
    /// [`ConsoleConfig`].
    pub fn with_config(config: ConsoleConfig, device: D) -> Result<Console<D>> {
        Console::new(config.width, config.height, device)
    }

    /// Console width in cells.
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    /// Console height in cells.
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    /// Re-initializes the console in place: same dimensions if `width` and
    /// `height` match the current size (equivalent to [`Console::reset`]),
    /// otherwise frees and reallocates the grid at the new size.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        if width < MIN_DIMENSION || height < MIN_DIMENSION {
            return Err(Error::InvalidDimensions { width, height });
        }
        if width == self.buffer.width() && height == self.buffer.height() {
            self.reset();
            return Ok(());
        }
        trace!(target: "gridterm::console", width, height, "console_resize");
        self.buffer = ScreenBuffer::new(width, height);
        self.line_buffer = Vec::with_capacity(width as usize + 1);
        self.screen_dirty = false;
        Ok(())
    }

    /// Unbinds the render device. Drawing operations keep working against
    /// the in-memory grid; `render` returns [`Error::NoRenderDevice`] until
    /// a device is bound again via [`Console::set_device`].
    pub fn clear_device(&mut self) -> Option<D> {
        self.device.take()
    }

    /// Installs (or replaces) the render device, returning the previous one
    /// if any.
    pub fn set_device(&mut self, device: D) -> Option<D> {
        self.device.replace(device)
    }

    /// Borrows the installed device, if any.
    pub fn device(&self) -> Option<&D> {
        self.device.as_ref()
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.buffer.width() && y < self.buffer.height() {
            Some(y as usize * self.buffer.width() as usize + x as usize)
        } else {
            None
        }
    }

    /// Writes `cell` at `(x, y)`. Returns `false` if the position is out of
    /// the drawing area or if the write was a no-op (the pending value
    /// already equals `cell`, or the grid already shows `cell` and nothing
    /// was pending).
    ///
    /// The dirty flag at this position is an invariant maintained by this
    /// decision table, not by counting calls: `current != next` if and only
    /// if dirty is set, regardless of how many `put`s ran between renders.
    pub fn put(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        let Some(index) = self.index(x, y) else {
            return false;
        };
        // Index was just bounds-checked against buffer dimensions, so this
        // read cannot fail.
        let state = self.buffer.get_state(index).expect("index in range");

        if cell == state.next {
            return false;
        }

        if state.is_dirty {
            self.buffer.put_next(index, cell);
            if cell == state.current {
                self.buffer.clear_dirty(index);
            }
            self.screen_dirty = true;
            return true;
        }

        if cell == state.current {
            return false;
        }

        self.buffer.put_next(index, cell);
        self.screen_dirty = true;
        true
    }

    /// Unpacks `packed` and calls [`Console::put`].
    pub fn puti(&mut self, x: u16, y: u16, packed: u32) -> bool {
        self.put(x, y, Cell::unpack(packed))
    }

    /// Writes `bytes` starting at `(x, y)`, one [`Console::put`] per byte,
    /// stopping at the first zero byte or at the row edge, whichever comes
    /// first. Truncates at `width - x` characters — content past the row
    /// edge is dropped, never wrapped to the next row.
    pub fn print(
        &mut self,
        x: u16,
        y: u16,
        bytes: &[u8],
        fg: crate::Color,
        bg: crate::Color,
        style: crate::StyleFlags,
    ) {
        if x >= self.buffer.width() {
            return;
        }
        let max_chars = (self.buffer.width() - x) as usize;
        for (i, &byte) in bytes.iter().take_while(|&&b| b != 0).enumerate() {
            if i >= max_chars {
                break;
            }
            self.put(x + i as u16, y, Cell::new(byte, fg, bg, style));
        }
    }

    /// Returns the cell `put` would compare against at the next render:
    /// the pending value if one is queued, otherwise the current value.
    /// Out-of-area positions return [`Cell::EMPTY`].
    pub fn pick(&self, x: u16, y: u16) -> Cell {
        let Some(index) = self.index(x, y) else {
            return Cell::EMPTY;
        };
        let state = self.buffer.get_state(index).expect("index in range");
        if state.is_dirty { state.next } else { state.current }
    }

    /// Equivalent to `put(x, y, Cell::EMPTY)`.
    pub fn clear(&mut self, x: u16, y: u16) -> bool {
        self.put(x, y, Cell::EMPTY)
    }

    /// Clears every cell in the exclusive rectangle `[x, x+w) x [y, y+h)`.
    /// Out-of-range coordinates within the sweep are silently dropped by
    /// `clear`'s own bounds check.
    pub fn clear_area(&mut self, x: u16, y: u16, w: u16, h: u16) {
        for tmp_y in y..y.saturating_add(h) {
            for tmp_x in x..x.saturating_add(w) {
                self.clear(tmp_x, tmp_y);
            }
        }
    }

    /// Sets every state byte to zero and zeroes both slots of every cell.
    pub fn reset(&mut self) {
        self.buffer.reset();
        self.screen_dirty = false;
        trace!(target: "gridterm::console", "console_reset");
    }

    /// Scans the grid once, coalescing contiguous same-style dirty cells on
    /// each row into a single draw call, and returns the number of draw
    /// calls emitted.
    ///
    /// Returns immediately with `Ok(0)` if nothing is dirty — idle frames
    /// are free. Fails with [`Error::NoRenderDevice`] if no device is
    /// installed.
    pub fn render(&mut self) -> Result<usize> {
        if !self.screen_dirty {
            return Ok(0);
        }
        if self.device.is_none() {
            return Err(Error::NoRenderDevice);
        }

        let width = self.buffer.width();
        let area = self.buffer.area();

        let mut draw_call_count = 0usize;
        let mut prev_written_index: i64 = -2;
        let mut draw_x: u16 = 0;
        let mut draw_y: u16 = 0;
        let mut last_cell = Cell::EMPTY;
        self.line_buffer.clear();

        for i in 0..area {
            let x = (i % width as usize) as u16;
            let y = (i / width as usize) as u16;

            let must_flush_before =
                (prev_written_index != i as i64 - 1) || self.line_buffer.len() == width as usize;
            if must_flush_before && !self.line_buffer.is_empty() {
                draw_call_count += self.flush_line(draw_x, draw_y, last_cell)?;
            }

            let Some(state) = self.buffer.get_state(i) else {
                continue;
            };
            if !state.is_dirty {
                continue;
            }

            if !self.line_buffer.is_empty() && !state.next.style_eq(&last_cell) {
                draw_call_count += self.flush_line(draw_x, draw_y, last_cell)?;
            }

            if self.line_buffer.is_empty() {
                draw_x = x;
                draw_y = y;
            }

            if self.line_buffer.len() >= width as usize {
                return Err(Error::RenderFault);
            }
            self.line_buffer.push(state.next.ch);
            last_cell = state.next;
            self.buffer.swap_and_clear_dirty(i);
            prev_written_index = i as i64;
        }

        if !self.line_buffer.is_empty() {
            draw_call_count += self.flush_line(draw_x, draw_y, last_cell)?;
        }

        self.screen_dirty = false;
        trace!(target: "gridterm::console", draw_call_count, "render_complete");
        Ok(draw_call_count)
    }

    fn flush_line(&mut self, x: u16, y: u16, last_cell: Cell) -> Result<usize> {
        let device = self.device.as_mut().ok_or(Error::NoRenderDevice)?;
        match self.line_buffer.len() {
            0 => Ok(0),
            1 => {
                device.draw_cell(x, y, last_cell);
                self.line_buffer.clear();
                Ok(1)
            }
            _ => {
                device.draw_run(
                    x,
                    y,
                    &self.line_buffer,
                    last_cell.fg,
                    last_cell.bg,
                    last_cell.style,
                );
                self.line_buffer.clear();
                Ok(1)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::device::{DrawCall, RecordingDevice};
    use crate::{Color, StyleFlags};

    fn cell(ch: u8) -> Cell {
        Cell::new(ch, Color::Black, Color::Black, StyleFlags::NONE)
    }

    fn green(ch: u8) -> Cell {
        Cell::new(ch, Color::Green, Color::Black, StyleFlags::NONE)
    }

    fn console(w: u16, h: u16) -> Console<RecordingDevice> {
        Console::new(w, h, RecordingDevice::default()).unwrap()
    }

    /// Renders and returns (draw_call_count, calls recorded during this
    /// render). Swaps a fresh recorder back in so subsequent renders start
    /// with an empty call log.
    fn render_and_take(console: &mut Console<RecordingDevice>) -> (usize, Vec<DrawCall>) {
        let count = console.render().unwrap();
        let recorder = console.set_device(RecordingDevice::default()).unwrap();
        (count, recorder.calls)
    }

    #[test]
    fn reset_then_render_emits_nothing() {
        let mut c = console(4, 4);
        let (count, calls) = render_and_take(&mut c);
        assert_eq!(count, 0);
        assert!(calls.is_empty());
    }

    #[test]
    fn single_cell_emits_one_draw_cell_call() {
        let mut c = console(4, 4);
        c.put(0, 1, cell(b'A'));
        let (count, calls) = render_and_take(&mut c);
        assert_eq!(count, 1);
        assert_eq!(
            calls,
            vec![DrawCall::Cell {
                x: 0,
                y: 1,
                cell: cell(b'A')
            }]
        );
    }

    #[test]
    fn ten_cell_run_emits_one_draw_run_call() {
        let mut c = console(12, 4);
        for x in 0..10u16 {
            c.put(x, 1, cell(b'A'));
        }
        let (count, calls) = render_and_take(&mut c);
        assert_eq!(count, 1);
        assert_eq!(
            calls,
            vec![DrawCall::Run {
                x: 0,
                y: 1,
                text: vec![b'A'; 10],
                fg: Color::Black,
                bg: Color::Black,
                style: StyleFlags::NONE,
            }]
        );
    }

    #[test]
    fn style_change_mid_row_splits_into_two_runs() {
        let mut c = console(12, 4);
        for x in 0..5u16 {
            c.put(x, 1, cell(b'A'));
        }
        for x in 5..10u16 {
            c.put(x, 1, green(b'B'));
        }
        let (count, calls) = render_and_take(&mut c);
        assert_eq!(count, 2);
        assert_eq!(
            calls,
            vec![
                DrawCall::Run {
                    x: 0,
                    y: 1,
                    text: vec![b'A'; 5],
                    fg: Color::Black,
                    bg: Color::Black,
                    style: StyleFlags::NONE,
                },
                DrawCall::Run {
                    x: 5,
                    y: 1,
                    text: vec![b'B'; 5],
                    fg: Color::Green,
                    bg: Color::Black,
                    style: StyleFlags::NONE,
                },
            ]
        );
    }

    #[test]
    fn non_contiguous_cells_produce_two_calls() {
        let mut c = console(80, 25);
        c.put(1, 1, cell(b'A'));
        render_and_take(&mut c);
        c.put(0, 1, cell(b'A'));
        c.put(79, 24, cell(b'B'));
        let (count, _calls) = render_and_take(&mut c);
        assert_eq!(count, 2);
    }

    #[test]
    fn no_idle_cost_when_screen_not_dirty() {
        let mut c = console(4, 4);
        c.put(0, 0, cell(b'A'));
        c.render().unwrap();
        let (count, calls) = render_and_take(&mut c);
        assert_eq!(count, 0);
        assert!(calls.is_empty());
    }

    #[test]
    fn out_of_bounds_put_is_rejected() {
        let mut c = console(4, 4);
        assert!(!c.put(4, 0, cell(b'A')));
        assert!(!c.put(0, 4, cell(b'A')));
    }

    #[test]
    fn idempotent_put_returns_false_on_repeat() {
        let mut c = console(4, 4);
        assert!(c.put(1, 1, cell(b'A')));
        assert!(!c.put(1, 1, cell(b'A')));
    }

    #[test]
    fn cancelling_put_after_render_clears_dirty_and_restores_pick() {
        let mut c = console(4, 4);
        c.put(1, 1, cell(b'A'));
        c.render().unwrap();
        c.put(1, 1, cell(b'B'));
        c.put(1, 1, cell(b'A'));
        assert_eq!(c.pick(1, 1), cell(b'A'));
        assert_eq!(c.render().unwrap(), 0);
    }

    #[test]
    fn print_truncates_at_row_edge_without_wrapping() {
        let mut c = console(5, 2);
        c.print(0, 0, b"1234567", Color::Black, Color::Black, StyleFlags::NONE);
        for x in 0..5u16 {
            assert_eq!(c.pick(x, 0).ch, b"12345"[x as usize]);
        }
        assert_eq!(c.pick(0, 1), Cell::EMPTY);
    }

    #[test]
    fn print_truncates_relative_to_starting_column() {
        let mut c = console(5, 1);
        c.print(3, 0, b"abcdef", Color::Black, Color::Black, StyleFlags::NONE);
        assert_eq!(c.pick(3, 0).ch, b'a');
        assert_eq!(c.pick(4, 0).ch, b'b');
    }

    #[test]
    fn clear_area_is_exclusive_w_by_h() {
        let mut c = console(5, 5);
        for y in 0..5u16 {
            for x in 0..5u16 {
                c.put(x, y, cell(b'#'));
            }
        }
        c.render().unwrap();
        c.clear_area(0, 0, 2, 2);
        for y in 0..2u16 {
            for x in 0..2u16 {
                assert_eq!(c.pick(x, y), Cell::EMPTY);
            }
        }
        // (2, 2) is outside the exclusive 2x2 rectangle and must survive.
        assert_eq!(c.pick(2, 2), cell(b'#'));
    }

    #[test]
    fn render_without_device_errors() {
        let mut c = console(3, 3);
        c.put(0, 0, cell(b'A'));
        c.clear_device();
        assert_eq!(c.render(), Err(Error::NoRenderDevice));
    }

    #[test]
    fn invalid_dimensions_are_rejected() {
        assert_eq!(
            Console::new(1, 10, RecordingDevice::default()).unwrap_err(),
            Error::InvalidDimensions { width: 1, height: 10 }
        );
        assert_eq!(
            Console::new(10, 0, RecordingDevice::default()).unwrap_err(),
            Error::InvalidDimensions { width: 10, height: 0 }
        );
    }

    #[test]
    fn with_config_uses_config_dimensions() {
        let config = ConsoleConfig { width: 10, height: 6 };
        let c = Console::with_config(config, RecordingDevice::default()).unwrap();
        assert_eq!(c.width(), 10);
        assert_eq!(c.height(), 6);
    }

    #[test]
    fn console_config_default_is_80x24() {
        assert_eq!(ConsoleConfig::default(), ConsoleConfig { width: 80, height: 24 });
    }
}
