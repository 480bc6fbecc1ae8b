use super::*;
use crate::foundation::core::Rgba8;

const BG: [u8; 4] = [10, 10, 10, 255];

fn small_spec() -> CollageSpec {
    CollageSpec {
        canvas_width: 60,
        canvas_height: 40,
        cell_size: 10,
        columns: 4,
        rows: 2,
        corner_radius: 5.0,
        background: Rgba8::opaque(10, 10, 10),
    }
}

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> PreparedImage {
    let data: Vec<u8> = std::iter::repeat_n(rgba, (w * h) as usize)
        .flatten()
        .collect();
    PreparedImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(data),
    }
}

fn assert_close(actual: [u8; 4], expected: [u8; 4]) {
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert!(a.abs_diff(*e) <= 2, "got {actual:?}, expected {expected:?}");
    }
}

#[test]
fn empty_canvas_is_pure_background() {
    let frame = CollageCanvas::new(&small_spec()).unwrap().finish().unwrap();
    assert_eq!((frame.width, frame.height), (60, 40));
    assert_eq!(frame.data.len(), 60 * 40 * 4);
    assert!(frame.data.chunks_exact(4).all(|px| px == BG));
}

#[test]
fn drawn_cells_fill_their_slot_and_leave_others_untouched() {
    let mut canvas = CollageCanvas::new(&small_spec()).unwrap();
    canvas.draw_cell(0, &solid(4, 4, [255, 0, 0, 255])).unwrap();
    canvas.draw_cell(5, &solid(7, 3, [0, 0, 255, 255])).unwrap();
    let frame = canvas.finish().unwrap();

    // Grid origin is (10, 10); cell 5 is row 1, col 1.
    assert_close(frame.pixel(15, 15).unwrap(), [255, 0, 0, 255]);
    assert_close(frame.pixel(25, 25).unwrap(), [0, 0, 255, 255]);
    assert_close(frame.pixel(21, 21).unwrap(), [0, 0, 255, 255]);
    assert_eq!(frame.pixel(25, 15).unwrap(), BG);
    assert_eq!(frame.pixel(15, 25).unwrap(), BG);
}

#[test]
fn rounded_clip_keeps_corners_and_outside_as_background() {
    let spec = small_spec();
    let mut canvas = CollageCanvas::new(&spec).unwrap();
    let cover = solid(3, 3, [0, 255, 0, 255]);
    for i in 0..spec.grid_capacity() {
        canvas.draw_cell(i, &cover).unwrap();
    }
    let frame = canvas.finish().unwrap();

    // Corners of the grid box fall outside the 5px radius.
    for (x, y) in [(10, 10), (49, 10), (10, 29), (49, 29)] {
        assert_eq!(frame.pixel(x, y).unwrap(), BG, "corner ({x}, {y})");
    }
    // Just outside the grid box.
    for (x, y) in [(9, 20), (50, 20), (30, 9), (30, 30)] {
        assert_eq!(frame.pixel(x, y).unwrap(), BG, "outside ({x}, {y})");
    }
    // Interior edges are fully covered.
    assert_close(frame.pixel(10, 20).unwrap(), [0, 255, 0, 255]);
    assert_close(frame.pixel(30, 10).unwrap(), [0, 255, 0, 255]);
}

#[test]
fn draw_outside_grid_is_rejected() {
    let mut canvas = CollageCanvas::new(&small_spec()).unwrap();
    let err = canvas.draw_cell(8, &solid(1, 1, [1, 2, 3, 255])).unwrap_err();
    assert!(matches!(err, AlbumWallError::Render(_)));
}

#[test]
fn invalid_spec_fails_allocation() {
    let spec = CollageSpec {
        columns: 7,
        ..small_spec()
    };
    assert!(CollageCanvas::new(&spec).is_err());
}

#[test]
fn pixel_lookup_is_bounds_checked() {
    let frame = CollageCanvas::new(&small_spec()).unwrap().finish().unwrap();
    assert!(frame.pixel(59, 39).is_some());
    assert!(frame.pixel(60, 0).is_none());
    assert!(frame.pixel(0, 40).is_none());
}
