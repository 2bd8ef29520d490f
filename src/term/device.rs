//! A [`RenderDevice`] backed by [`crossterm`].
//!
//! This is a thin adapter: it translates draw calls into crossterm
//! queued commands and leaves buffering/flushing to the caller, so a host
//! can batch an entire `Console::render` behind one `flush`.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{
    Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::cursor::MoveTo;

use crate::render::RenderDevice;
use crate::{Cell, Color, StyleFlags};

/// Writes draw calls to any [`Write`] target (typically [`std::io::Stdout`])
/// via crossterm's queued command API.
///
/// Nothing is flushed automatically; call [`Self::flush`] after a
/// `Console::render` call to push the queued bytes to the terminal.
pub struct CrosstermDevice<W: Write> {
    out: W,
}

impl<W: Write> CrosstermDevice<W> {
    /// Wraps a writer. `out` is typically `std::io::stdout()`.
    pub fn new(out: W) -> Self {
        CrosstermDevice { out }
    }

    /// Flushes all commands queued since the last flush.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Unwraps the device, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn set_colors_and_style(&mut self, fg: Color, bg: Color, style: StyleFlags) -> io::Result<()> {
        queue!(
            self.out,
            SetForegroundColor(to_crossterm_color(fg)),
            SetBackgroundColor(to_crossterm_color(bg)),
            SetAttribute(Attribute::Reset),
        )?;
        for attribute in attributes_for(style) {
            queue!(self.out, SetAttribute(attribute))?;
        }
        Ok(())
    }
}

impl<W: Write> RenderDevice for CrosstermDevice<W> {
    fn draw_cell(&mut self, x: u16, y: u16, cell: Cell) {
        let _ = self.set_colors_and_style(cell.fg, cell.bg, cell.style);
        let _ = queue!(self.out, MoveTo(x, y), Print(cell.ch as char));
    }

    fn draw_run(&mut self, x: u16, y: u16, bytes: &[u8], fg: Color, bg: Color, style: StyleFlags) {
        let _ = self.set_colors_and_style(fg, bg, style);
        let text = String::from_utf8_lossy(bytes);
        let _ = queue!(self.out, MoveTo(x, y), Print(text));
    }
}

fn to_crossterm_color(color: Color) -> CtColor {
    match color {
        Color::Black => CtColor::Black,
        Color::Red => CtColor::DarkRed,
        Color::Green => CtColor::DarkGreen,
        Color::Yellow => CtColor::DarkYellow,
        Color::Blue => CtColor::DarkBlue,
        Color::Magenta => CtColor::DarkMagenta,
        Color::Cyan => CtColor::DarkCyan,
        Color::Grey => CtColor::Grey,
        Color::BrightBlack => CtColor::DarkGrey,
        Color::BrightRed => CtColor::Red,
        Color::BrightGreen => CtColor::Green,
        Color::BrightYellow => CtColor::Yellow,
        Color::BrightBlue => CtColor::Blue,
        Color::BrightMagenta => CtColor::Magenta,
        Color::BrightCyan => CtColor::Cyan,
        Color::BrightWhite => CtColor::White,
    }
}

/// `OVERLINED` is a full-byte sentinel, not a combinable bit (see
/// [`StyleFlags`]), so it's checked first and maps to a single attribute.
fn attributes_for(style: StyleFlags) -> Vec<Attribute> {
    if style.bits() == StyleFlags::OVERLINED.bits() {
        return vec![Attribute::OverLined];
    }
    let mut attrs = Vec::new();
    if style.contains(StyleFlags::BOLD) {
        attrs.push(Attribute::Bold);
    }
    if style.contains(StyleFlags::FAINT) {
        attrs.push(Attribute::Dim);
    }
    if style.contains(StyleFlags::ITALIC) {
        attrs.push(Attribute::Italic);
    }
    if style.contains(StyleFlags::UNDERLINE) {
        attrs.push(Attribute::Underlined);
    }
    if style.contains(StyleFlags::INVERT) {
        attrs.push(Attribute::Reverse);
    }
    if style.contains(StyleFlags::CROSSED_OUT) {
        attrs.push(Attribute::CrossedOut);
    }
    if style.contains(StyleFlags::FRAKTUR) {
        attrs.push(Attribute::Fraktur);
    }
    if style.contains(StyleFlags::DOUBLE_UNDERLINE) {
        attrs.push(Attribute::DoubleUnderlined);
    }
    attrs
}
