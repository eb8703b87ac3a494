//! Rendering the same tree twice must produce byte-identical rasters, and
//! placement order must stay load-bearing for z-order.

use fizz::{
    hsl, Canvas, Ellipse, GifRecorder, IntoShape, Point, Rectangle, Rgba, RoundRect, ShapeRef,
    Star,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn busy_canvas() -> Canvas {
    let mut canvas = Canvas::new((120.0, 90.0), Rgba::WHITE);
    canvas.put(
        Rectangle::new((60.0, 30.0), Rgba::parse("steelblue").unwrap()).into_shape(),
        (5.0, 5.0),
    );
    canvas.put(
        Ellipse::circle((0.0, 0.0), 20.0, Rgba::parse("tomato").unwrap()).into_shape(),
        (80.0, 40.0),
    );
    canvas.put(
        Star::new(5, 15.0, 0.5, Rgba::parse("gold").unwrap()).into_shape(),
        (40.0, 60.0),
    );
    canvas.put(
        RoundRect::new((40.0, 25.0), 8.0, hsl(210.0, (40.0, 90.0), 50.0, 42)).into_shape(),
        (10.0, 50.0),
    );
    canvas
}

#[test]
fn repeated_renders_are_byte_identical() {
    init_tracing();
    let canvas = busy_canvas();
    let a = canvas.render().unwrap();
    let b = canvas.render().unwrap();
    assert_eq!(a.as_raw(), b.as_raw());
}

#[test]
fn independently_built_trees_render_identically() {
    let a = busy_canvas().render().unwrap();
    let b = busy_canvas().render().unwrap();
    assert_eq!(a.as_raw(), b.as_raw());
}

#[test]
fn later_placements_paint_over_earlier_ones() {
    let red: ShapeRef = Rectangle::new((20.0, 20.0), Rgba::RED).into_shape();
    let blue: ShapeRef = Rectangle::new((20.0, 20.0), Rgba::parse("blue").unwrap()).into_shape();

    let mut canvas = Canvas::new((20.0, 20.0), Rgba::WHITE);
    canvas.put(red.clone(), (0.0, 0.0));
    canvas.put(blue.clone(), (0.0, 0.0));
    let img = canvas.render().unwrap();
    assert_eq!(img.get_pixel(10, 10).0, [0, 0, 255, 255]);

    let mut reversed = Canvas::new((20.0, 20.0), Rgba::WHITE);
    reversed.put(blue, (0.0, 0.0));
    reversed.put(red, (0.0, 0.0));
    let img = reversed.render().unwrap();
    assert_eq!(img.get_pixel(10, 10).0, [255, 0, 0, 255]);
}

#[test]
fn moving_a_placement_changes_only_the_next_render() {
    let mut canvas = Canvas::new((30.0, 30.0), Rgba::WHITE);
    let label = canvas.put(
        Rectangle::new((10.0, 10.0), Rgba::RED).into_shape(),
        (0.0, 0.0),
    );
    let before = canvas.render().unwrap();
    assert_eq!(before.get_pixel(5, 5).0, [255, 0, 0, 255]);

    assert!(canvas.move_to(&label, Point::new(15.0, 15.0)));
    let after = canvas.render().unwrap();
    assert_eq!(after.get_pixel(5, 5).0, [255, 255, 255, 255]);
    assert_eq!(after.get_pixel(20, 20).0, [255, 0, 0, 255]);
}

#[test]
fn gif_capture_encodes_one_frame_per_add() {
    let mut canvas = Canvas::new((16.0, 16.0), Rgba::WHITE);
    let label = canvas.put(
        Rectangle::new((4.0, 4.0), Rgba::RED).into_shape(),
        (0.0, 0.0),
    );

    let mut recorder = GifRecorder::new();
    for step in 0..4 {
        canvas.move_to(&label, Point::new(f64::from(step) * 3.0, 0.0));
        recorder.add(&canvas).unwrap();
    }
    assert_eq!(recorder.len(), 4);

    let mut buffer = Vec::new();
    recorder.write_to(&mut buffer, 12).unwrap();
    assert_eq!(&buffer[..6], b"GIF89a");
    assert!(buffer.len() > 64);
}
