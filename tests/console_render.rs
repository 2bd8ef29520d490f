//! End-to-end scenarios for `Console::render`, driven entirely through the
//! public API with a recording device.

use gridterm::{Cell, Color, Console, DrawCall, RecordingDevice, StyleFlags};

fn console(width: u16, height: u16) -> Console<RecordingDevice> {
    Console::new(width, height, RecordingDevice::default()).unwrap()
}

fn render_and_take(console: &mut Console<RecordingDevice>) -> (usize, Vec<DrawCall>) {
    let count = console.render().unwrap();
    let device = console.set_device(RecordingDevice::default()).unwrap();
    (count, device.calls)
}

#[test]
fn reset_then_render_emits_nothing() {
    let mut c = console(10, 5);
    c.reset();
    let (count, calls) = render_and_take(&mut c);
    assert_eq!(count, 0);
    assert!(calls.is_empty());
}

#[test]
fn single_cell_emits_one_draw_cell_call() {
    let mut c = console(10, 5);
    c.put(2, 1, Cell::new(b'A', Color::Green, Color::Black, StyleFlags::NONE));
    let (count, calls) = render_and_take(&mut c);
    assert_eq!(count, 1);
    assert_eq!(
        calls,
        vec![DrawCall::Cell {
            x: 2,
            y: 1,
            cell: Cell::new(b'A', Color::Green, Color::Black, StyleFlags::NONE),
        }]
    );
}

#[test]
fn ten_cell_run_emits_one_draw_run_call() {
    let mut c = console(20, 3);
    for x in 0..10 {
        c.put(x, 0, Cell::new(b'x', Color::Red, Color::Black, StyleFlags::NONE));
    }
    let (count, calls) = render_and_take(&mut c);
    assert_eq!(count, 1);
    match &calls[0] {
        DrawCall::Run { x, y, text, .. } => {
            assert_eq!(*x, 0);
            assert_eq!(*y, 0);
            assert_eq!(text.len(), 10);
        }
        other => panic!("expected a run, got {other:?}"),
    }
}

#[test]
fn two_style_split_row_produces_two_runs() {
    let mut c = console(20, 3);
    for x in 0..5 {
        c.put(x, 0, Cell::new(b'a', Color::Red, Color::Black, StyleFlags::NONE));
    }
    for x in 5..10 {
        c.put(x, 0, Cell::new(b'b', Color::Blue, Color::Black, StyleFlags::BOLD));
    }
    let (count, calls) = render_and_take(&mut c);
    assert_eq!(count, 2);
    assert_eq!(calls.len(), 2);
}

#[test]
fn two_independent_renders_each_report_only_their_own_dirty_cells() {
    let mut c = console(10, 5);
    c.put(0, 0, Cell::new(b'A', Color::Green, Color::Black, StyleFlags::NONE));
    let (first_count, _) = render_and_take(&mut c);
    assert_eq!(first_count, 1);

    let (second_count, second_calls) = render_and_take(&mut c);
    assert_eq!(second_count, 0);
    assert!(second_calls.is_empty());

    c.put(1, 1, Cell::new(b'B', Color::Blue, Color::Black, StyleFlags::NONE));
    let (third_count, _) = render_and_take(&mut c);
    assert_eq!(third_count, 1);
}

#[test]
fn cancel_before_render_leaves_nothing_dirty() {
    let mut c = console(10, 5);
    let original = c.pick(3, 3);
    c.put(3, 3, Cell::new(b'Z', Color::Yellow, Color::Black, StyleFlags::NONE));
    c.put(3, 3, original);
    let (count, calls) = render_and_take(&mut c);
    assert_eq!(count, 0);
    assert!(calls.is_empty());
    assert_eq!(c.pick(3, 3), original);
}
