//! End-to-end scenarios through the public API.

use cropframe::*;

const IMAGE: Size = Size::new(1200.0, 800.0);
const VIEWPORT: Size = Size::new(1000.0, 1000.0);

fn quiet() -> CropSettings {
    CropSettings {
        auto_zoom_enabled: false,
        ..CropSettings::default()
    }
}

fn assert_rect(actual: Rect, expected: Rect) {
    assert!(
        actual.approx_eq(&expected, 1e-9),
        "expected {expected:?}, got {actual:?}"
    );
}

// ---- Padding and rotation ----

#[test]
fn padded_initial_selection() {
    let s = SelectionSession::show(IMAGE, &quiet(), VIEWPORT).unwrap();
    assert_eq!(s.orientation(), Orientation::Normal);
    assert_rect(s.selection(), Rect::new(120.0, 80.0, 960.0, 640.0));
}

#[test]
fn rotate_clockwise_swaps_and_reprojects() {
    let mut s = SelectionSession::show(IMAGE, &quiet(), VIEWPORT).unwrap();
    s.rotate_clockwise(1);
    assert_eq!(s.oriented_size(), Size::new(800.0, 1200.0));
    assert_rect(s.selection(), Rect::new(80.0, 120.0, 640.0, 960.0));
}

#[test]
fn four_clockwise_rotations_are_identity() {
    let mut s = SelectionSession::show(IMAGE, &quiet(), VIEWPORT).unwrap();
    s.update_selection(
        Point::new(37.0, 11.0),
        Size::new(501.0, 203.0),
        PivotSet::EMPTY,
    );
    let start = (s.orientation(), s.selection(), s.oriented_size());

    let mut seen = Vec::new();
    for _ in 0..4 {
        s.rotate_clockwise(1);
        seen.push(s.orientation());
    }
    assert_eq!(
        seen,
        [
            Orientation::Rotate270,
            Orientation::Rotate180,
            Orientation::Rotate90,
            Orientation::Normal
        ]
    );
    assert_eq!((s.orientation(), s.selection(), s.oriented_size()), start);
}

#[test]
fn four_rotations_from_every_orientation() {
    for o in Orientation::ALL {
        let mut s = SelectionSession::show(
            IMAGE,
            &CropSettings {
                initial_orientation: o,
                ..quiet()
            },
            VIEWPORT,
        )
        .unwrap();
        s.update_selection(
            Point::new(40.0, 30.0),
            Size::new(300.0, 200.0),
            PivotSet::EMPTY,
        );
        let start = s.selection();
        for _ in 0..4 {
            s.rotate_clockwise(1);
        }
        assert_eq!(s.orientation(), o);
        assert_eq!(s.selection(), start, "{o:?}");
    }
}

#[test]
fn double_flips_restore_selection() {
    let mut s = SelectionSession::show(IMAGE, &quiet(), VIEWPORT).unwrap();
    s.update_selection(
        Point::new(100.0, 50.0),
        Size::new(300.0, 200.0),
        PivotSet::EMPTY,
    );
    let start = s.selection();

    s.flip_horizontal();
    assert_eq!(s.selection(), Rect::new(800.0, 50.0, 300.0, 200.0));
    s.flip_horizontal();
    assert_eq!(s.selection(), start);

    s.flip_vertical();
    assert_eq!(s.selection(), Rect::new(100.0, 550.0, 300.0, 200.0));
    s.flip_vertical();
    assert_eq!(s.selection(), start);
}

#[test]
fn every_orientation_reachable_and_reversible() {
    let original = Size::new(640.0, 480.0);
    let r = Rect::new(15.0, 25.0, 100.0, 60.0);
    for o in Orientation::ALL {
        let there = reproject_rect(Orientation::Normal, o, r, original);
        assert!(there.is_within(oriented_size(o, original), 0.0), "{o:?}");
        let back = reproject_rect(o, Orientation::Normal, there, original);
        assert_rect(back, r);
    }
}

// ---- Square policy ----

#[test]
fn square_policy_absorbs_delta_symmetrically() {
    let constraints = Constraints::new(Size::splat(10.0), Size::splat(1000.0), AspectRange::SQUARE);
    let r = solve(
        Rect::new(100.0, 100.0, 500.0, 300.0),
        PivotSet::EMPTY,
        &constraints,
        Size::new(1000.0, 1000.0),
    );
    assert_eq!(r.size, Size::new(500.0, 500.0));
    assert_eq!(r.position, Point::new(100.0, 0.0));
}

#[test]
fn square_session_through_rotations_stays_square() {
    let settings = CropSettings {
        auto_zoom_enabled: false,
        ..CropSettings::square()
    };
    let mut s = SelectionSession::show(IMAGE, &settings, VIEWPORT).unwrap();
    for pivot in [PivotSet::EMPTY, Edge::Right.into(), Edge::Top.into()] {
        s.update_selection(Point::new(90.0, 10.0), Size::new(700.0, 20.0), pivot);
        s.rotate_clockwise(1);
        let r = s.selection();
        assert_eq!(r.size.width, r.size.height, "{r:?}");
        assert!(r.is_within(s.oriented_size(), 0.0));
    }
}

// ---- Auto-zoom ----

#[test]
fn small_selection_zoom_target() {
    let t = compute_target_zoom_for(Rect::new(450.0, 450.0, 100.0, 100.0), 1.0);
    assert!((t.scale - 6.4).abs() < 1e-9, "{}", t.scale);
}

fn compute_target_zoom_for(selection: Rect, scale: f64) -> ZoomTarget {
    viewport::compute_target_zoom(
        selection,
        scale,
        Point::ORIGIN,
        VIEWPORT,
        Size::new(1000.0, 1000.0),
        &ZoomThresholds::default(),
    )
    .unwrap()
}

#[test]
fn gesture_lifecycle_frames_selection() {
    let mut s = SelectionSession::show(IMAGE, &CropSettings::default(), VIEWPORT).unwrap();
    let fit = s.zoom().min_scale;

    s.begin_gesture();
    s.update_selection(
        Point::new(600.0, 400.0),
        Size::new(120.0, 120.0),
        Edge::Left.into(),
    );
    s.end_gesture();
    let target = s.transition().unwrap().target_scale();
    assert!(target > fit);

    let mut ticks = 0;
    while s.advance(0.05).is_some() {
        ticks += 1;
        assert!(ticks < 100, "transition never finished");
    }
    assert_eq!(s.zoom().current_scale, target);

    // Selection center lands in the viewport center unless the pan is clamped.
    let on_screen = s.selection_on_screen();
    assert!((on_screen.center().x - 500.0).abs() < 1e-6, "{on_screen:?}");
    assert!((on_screen.center().y - 500.0).abs() < 1e-6, "{on_screen:?}");
}

#[test]
fn new_gesture_interrupts_zoom() {
    let mut s = SelectionSession::show(IMAGE, &CropSettings::default(), VIEWPORT).unwrap();
    s.begin_gesture();
    s.update_selection(
        Point::new(600.0, 400.0),
        Size::new(120.0, 120.0),
        PivotSet::EMPTY,
    );
    s.end_gesture();
    let sample = s.advance(0.01).unwrap();

    s.begin_gesture();
    assert!(!s.is_transitioning());
    assert_eq!(s.zoom().current_scale, sample.scale);
    assert_eq!(s.advance(1.0), None);
}

// ---- Crop completion ----

struct FakeRenderer {
    max: u32,
    requests: Vec<CropRequest>,
}

#[derive(Debug)]
struct RenderError;

impl core::fmt::Display for RenderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("render target lost")
    }
}

impl Rasterizer for FakeRenderer {
    type Image = Vec<u8>;
    type Error = RenderError;

    fn max_dimension(&self) -> u32 {
        self.max
    }

    fn render(&mut self, request: &CropRequest) -> Result<Vec<u8>, RenderError> {
        self.requests.push(*request);
        if request.output.0 > 2000 {
            return Err(RenderError);
        }
        Ok(vec![0; (request.output.0 * request.output.1 * 3) as usize])
    }
}

#[test]
fn confirm_produces_image_in_oriented_space() {
    let mut s = SelectionSession::show(IMAGE, &quiet(), VIEWPORT).unwrap();
    s.flip_horizontal();
    s.update_selection(
        Point::new(10.0, 20.0),
        Size::new(30.0, 40.0),
        PivotSet::EMPTY,
    );
    // Below the 80px default minimum: clamped up.
    assert_eq!(s.selection().size, Size::new(80.0, 80.0));

    let mut renderer = FakeRenderer {
        max: 8192,
        requests: Vec::new(),
    };
    let image = s.confirm(&mut renderer, None).into_image().unwrap();
    assert_eq!(image.len(), 80 * 80 * 3);

    let req = renderer.requests[0];
    assert_eq!(req.orientation, Orientation::FlipHorizontal);
    assert_eq!(req.output, (80, 80));
    assert_eq!(
        req.source_rect.position.x,
        1200.0 - req.selection.position.x - 80.0
    );
}

#[test]
fn confirm_clamps_to_renderer_limit() {
    let s = SelectionSession::show(IMAGE, &quiet(), VIEWPORT).unwrap();
    let mut renderer = FakeRenderer {
        max: 480,
        requests: Vec::new(),
    };
    assert!(s.confirm(&mut renderer, None).is_success());
    assert_eq!(renderer.requests[0].output, (480, 320));
}

#[test]
fn failed_render_reports_failure() {
    let s = SelectionSession::show(IMAGE, &quiet(), VIEWPORT).unwrap();
    let mut renderer = FakeRenderer {
        max: 8192,
        requests: Vec::new(),
    };
    let triple = |w: u32, h: u32| (w * 3, h * 3);
    let outcome = s.confirm(&mut renderer, Some(&triple));
    assert_eq!(outcome, CropOutcome::Failed);
    assert_eq!(renderer.requests[0].output, (2880, 1920));

    let outcome = s.confirm(&mut renderer, None);
    assert!(outcome.is_success());
}

#[test]
fn cancel_reports_no_image() {
    let s = SelectionSession::show(IMAGE, &quiet(), VIEWPORT).unwrap();
    assert_eq!(s.cancel::<Vec<u8>>().into_image(), None);
}

// ---- Configuration ----

#[test]
fn settings_from_json_drive_session() {
    let settings: CropSettings = serde_json::from_str(
        r#"{
            "auto_zoom_enabled": false,
            "pixel_perfect": true,
            "initial_orientation": "Rotate90",
            "min_aspect": 1.0,
            "max_aspect": 1.0,
            "padding": { "left": 0.25, "right": 0.25, "top": 0.25, "bottom": 0.25 }
        }"#,
    )
    .unwrap();
    let s = SelectionSession::show(Size::new(1001.0, 601.0), &settings, VIEWPORT).unwrap();
    assert_eq!(s.oriented_size(), Size::new(601.0, 1001.0));
    let r = s.selection();
    assert_eq!(r.size.width, r.size.height);
    assert_eq!(r.size.width, r.size.width.round());
    assert!(r.is_within(s.oriented_size(), 0.0));
}

#[test]
fn degenerate_image_rejected() {
    for size in [Size::ZERO, Size::new(-5.0, 5.0), Size::new(f64::NAN, 5.0)] {
        let err = SelectionSession::show(size, &quiet(), VIEWPORT).unwrap_err();
        assert!(matches!(err, SessionError::EmptyImage { .. }));
        assert!(err.to_string().contains("image size"));
    }
}
