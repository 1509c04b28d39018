use egui::{Vec2, pos2, vec2};
use handwriting_board::input::{
    DeviceCapability, OffsetNode, PointerEvent, PointerPhase, RawPosition, dispatch,
    distance_to_body, resolve_position,
};
use handwriting_board::{LineStyle, RasterSurface, StrokeRecorder};

/// Flat offset-parent chain: each element is an index into `offsets`,
/// the last entry is the body.
#[derive(Clone)]
struct Chain {
    offsets: Vec<Vec2>,
    index: usize,
}

impl OffsetNode for Chain {
    fn offset_left(&self) -> f32 {
        self.offsets[self.index].x
    }

    fn offset_top(&self) -> f32 {
        self.offsets[self.index].y
    }

    fn offset_parent(&self) -> Option<Self> {
        (self.index + 1 < self.offsets.len()).then(|| Chain {
            offsets: self.offsets.clone(),
            index: self.index + 1,
        })
    }

    fn is_body(&self) -> bool {
        self.index == self.offsets.len() - 1
    }
}

fn canvas_in_page() -> Chain {
    Chain {
        offsets: vec![vec2(10.0, 20.0), vec2(30.0, 40.0), vec2(999.0, 999.0)],
        index: 0,
    }
}

/// Feed DOM-like events through phase mapping, position resolution and routing
fn feed(
    recorder: &mut StrokeRecorder<RasterSurface>,
    element: &Chain,
    events: &[(PointerPhase, RawPosition)],
) {
    for (phase, raw) in events {
        let position = resolve_position(raw, element);
        if let Some(event) = PointerEvent::from_phase(*phase, position) {
            dispatch(recorder, event);
        }
    }
}

fn touch(x: f32, y: f32) -> RawPosition {
    RawPosition {
        offset: None,
        page: Some(pos2(x, y)),
    }
}

fn mouse(x: f32, y: f32) -> RawPosition {
    RawPosition {
        offset: Some(pos2(x, y)),
        page: None,
    }
}

#[test]
fn test_body_offset_is_not_counted() {
    assert_eq!(distance_to_body(&canvas_in_page()), vec2(40.0, 60.0));
}

#[test]
fn test_touch_stroke_is_recorded_in_canvas_space() {
    let element = canvas_in_page();
    let mut recorder = StrokeRecorder::new(RasterSurface::new(100, 100), LineStyle::default());

    feed(
        &mut recorder,
        &element,
        &[
            (PointerPhase::Down, touch(50.0, 70.0)),
            (PointerPhase::Move, touch(60.0, 80.0)),
            (PointerPhase::Up, RawPosition::default()),
        ],
    );

    let strokes = recorder.history().undo_stack();
    assert_eq!(strokes.len(), 1);
    assert_eq!(strokes[0].points(), &[pos2(10.0, 10.0), pos2(20.0, 20.0)]);
    assert!(!recorder.session().is_down());
}

#[test]
fn test_mouse_leave_ends_the_stroke() {
    let element = canvas_in_page();
    let mut recorder = StrokeRecorder::new(RasterSurface::new(100, 100), LineStyle::default());

    feed(
        &mut recorder,
        &element,
        &[
            (PointerPhase::Down, mouse(1.0, 1.0)),
            (PointerPhase::Move, mouse(5.0, 5.0)),
            (PointerPhase::Leave, RawPosition::default()),
            (PointerPhase::Move, mouse(9.0, 9.0)),
        ],
    );

    let strokes = recorder.history().undo_stack();
    assert_eq!(strokes[0].points(), &[pos2(1.0, 1.0), pos2(5.0, 5.0)]);
}

#[test]
fn test_down_without_coordinates_is_dropped() {
    let element = canvas_in_page();
    let mut recorder = StrokeRecorder::new(RasterSurface::new(100, 100), LineStyle::default());

    feed(
        &mut recorder,
        &element,
        &[
            (PointerPhase::Down, RawPosition::default()),
            (PointerPhase::Move, mouse(5.0, 5.0)),
        ],
    );

    assert!(recorder.history().undo_stack().is_empty());
    assert!(recorder.surface().is_blank());
}

#[test]
fn test_capability_decides_event_family() {
    let ipad = "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X)";
    let names: Vec<_> = DeviceCapability::from_user_agent(ipad)
        .listened_events()
        .iter()
        .map(|(name, _)| *name)
        .collect();
    assert_eq!(names, vec!["touchstart", "touchmove", "touchend"]);

    let desktop = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";
    let names: Vec<_> = DeviceCapability::from_user_agent(desktop)
        .listened_events()
        .iter()
        .map(|(name, _)| *name)
        .collect();
    assert_eq!(names, vec!["mousedown", "mousemove", "mouseup", "mouseleave"]);
}
