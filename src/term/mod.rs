/*! Terminal-related utilities.

This module contains framework-level helpers for getting draw calls onto a
real terminal.

Currently included:
- `device`: a [`RenderDevice`](crate::RenderDevice) implementation backed by
  [`crossterm`], for hosts that don't want to write their own.

Writing your own `RenderDevice` is expected and first-class — this one
exists so a host can get a terminal on screen without doing so.
*/

pub mod device;

pub use device::CrosstermDevice;
