use std::cell::RefCell;
use std::rc::Rc;

use scene2d::api::{
    FrameOutcome, FrameReport, HoverLabel, HoverSink, HoverTarget, ManualFrameScheduler,
    PickOutcome, SceneCollaborators, TextLabels, TraceDescriptor,
};
use scene2d::core::{AxisState, DataPoint, Rect};
use scene2d::interaction::{DragMode, PointerCamera};
use scene2d::render::{NullSurface, NullSurfaceProvider};
use scene2d::{Scene, SceneLayout, SceneOptions};

#[derive(Debug, Clone, PartialEq)]
enum HoverEvent {
    Show(HoverLabel, HoverTarget),
    Hide(HoverTarget),
}

#[derive(Clone, Default)]
struct RecordingHover {
    events: Rc<RefCell<Vec<HoverEvent>>>,
}

impl HoverSink for RecordingHover {
    fn show_hover(&mut self, label: &HoverLabel, target: HoverTarget) {
        self.events
            .borrow_mut()
            .push(HoverEvent::Show(label.clone(), target));
    }

    fn hide_hover(&mut self, target: HoverTarget) {
        self.events.borrow_mut().push(HoverEvent::Hide(target));
    }
}

struct Harness {
    scene: Scene<NullSurface>,
    scheduler: ManualFrameScheduler,
    camera: PointerCamera,
    hover: RecordingHover,
}

impl Harness {
    /// 400x400 CSS canvas with both axes fixed to `[0, 10]`, so the view box
    /// `[50, 50, 350, 350]` maps one data unit to 30px.
    fn new(drag_mode: DragMode) -> Self {
        let scheduler = ManualFrameScheduler::new();
        let camera = PointerCamera::new();
        let hover = RecordingHover::default();
        let layout = Self::layout(drag_mode);
        let mut provider = NullSurfaceProvider::default();
        let mut scene = Scene::new(
            &mut provider,
            SceneOptions::default(),
            layout.clone(),
            SceneCollaborators::headless()
                .with_scheduler(scheduler.clone())
                .with_camera(camera.clone())
                .with_hover(hover.clone()),
        )
        .expect("scene init");

        let trace = TraceDescriptor::new("a", "scattergl")
            .with_points(vec![0.0, 5.0, 10.0], vec![0.0, 5.0, 10.0])
            .with_name("series a")
            .with_text(TextLabels::PerPoint(vec![
                "low".to_owned(),
                "mid".to_owned(),
                "high".to_owned(),
            ]));
        scene.plot(&[trace], layout).expect("plot");

        Self {
            scene,
            scheduler,
            camera,
            hover,
        }
    }

    fn layout(drag_mode: DragMode) -> SceneLayout {
        SceneLayout::new(400.0, 400.0)
            .with_drag_mode(drag_mode)
            .with_axes(AxisState::fixed(0.0, 10.0), AxisState::fixed(0.0, 10.0))
    }

    fn frame(&mut self) -> FrameReport {
        let token = self.scheduler.take_next().expect("pending frame");
        match self.scene.on_animation_frame(token).expect("frame") {
            FrameOutcome::Rendered(report) => report,
            FrameOutcome::Skipped => panic!("frame should render"),
        }
    }

    fn events(&self) -> Vec<HoverEvent> {
        self.hover.events.borrow().clone()
    }
}

#[test]
fn hovering_a_point_forwards_one_label() {
    let mut harness = Harness::new(DragMode::Zoom);
    let target = harness.scene.hover_target();

    // Data (5, 5) sits at CSS (200, 200).
    harness.camera.move_pointer(201.0, 199.0);
    let report = harness.frame();

    let Some(PickOutcome::Hover { label, selection }) = report.pick else {
        panic!("expected hover");
    };
    assert_eq!(selection.trace_uid, "a");
    assert_eq!(selection.point_index, 1);
    assert_eq!(label.x, 200.0);
    assert_eq!(label.y, 200.0);
    assert_eq!(label.x_label, "5");
    assert_eq!(label.y_label, "5");
    assert_eq!(label.text, "mid");
    assert_eq!(label.name.as_deref(), Some("series a"));
    assert_eq!(harness.events(), vec![HoverEvent::Show(label, target)]);
    assert_eq!(
        harness.scene.surface().spikes.center,
        Some(DataPoint::new(5.0, 5.0))
    );
}

#[test]
fn repeated_hover_on_the_same_point_is_forwarded_once() {
    let mut harness = Harness::new(DragMode::Zoom);
    harness.camera.move_pointer(200.0, 200.0);
    harness.frame();

    harness.camera.move_pointer(203.0, 198.0);
    let report = harness.frame();

    assert_eq!(report.pick, Some(PickOutcome::Unchanged));
    assert_eq!(harness.events().len(), 1);
}

#[test]
fn moving_to_another_point_forwards_a_new_hover() {
    let mut harness = Harness::new(DragMode::Zoom);
    harness.camera.move_pointer(200.0, 200.0);
    harness.frame();

    // Data (10, 10) sits at CSS (350, 50).
    harness.camera.move_pointer(350.0, 50.0);
    harness.frame();

    let events = harness.events();
    assert_eq!(events.len(), 2);
    let HoverEvent::Show(label, _) = &events[1] else {
        panic!("expected a second show");
    };
    assert_eq!(label.text, "high");
    assert_eq!(
        harness.scene.pick_resolver().last_pick(),
        Some(("a", DataPoint::new(10.0, 10.0)))
    );
}

#[test]
fn leaving_every_point_unhovers_once() {
    let mut harness = Harness::new(DragMode::Zoom);
    let target = harness.scene.hover_target();
    harness.camera.move_pointer(200.0, 200.0);
    harness.frame();

    harness.camera.move_pointer(120.0, 300.0);
    let first = harness.frame();
    let second = harness.frame();

    assert_eq!(first.pick, Some(PickOutcome::Unhover));
    assert_eq!(second.pick, Some(PickOutcome::Unchanged));
    assert_eq!(harness.events().last(), Some(&HoverEvent::Hide(target)));
    assert_eq!(harness.events().len(), 2);
    assert_eq!(harness.scene.surface().spikes.center, None);
    assert!(!harness.scene.pick_resolver().is_hovering());
}

#[test]
fn degenerate_data_box_skips_picking() {
    let mut harness = Harness::new(DragMode::Zoom);
    harness.camera.set_data_box(Rect::new(0.0, 0.0, 0.0, 10.0));
    harness.camera.move_pointer(200.0, 200.0);
    let picks_before = harness.scene.surface().pick_count;

    let report = harness.frame();

    assert_eq!(report.pick, Some(PickOutcome::Skipped));
    assert_eq!(harness.scene.surface().pick_count, picks_before);
    assert!(harness.events().is_empty());
}

#[test]
fn zoom_box_is_normalized_and_suppresses_picking() {
    let mut harness = Harness::new(DragMode::Zoom);
    harness.camera.move_pointer(200.0, 200.0);
    harness.camera.begin_box([8.0, 2.0]);
    harness.camera.drag_box_to([3.0, 6.0]);
    let dirty_before = harness.scene.surface().dirty_count;

    let report = harness.frame();

    assert!(report.select_box_active);
    assert!(report.pick.is_none());
    assert_eq!(harness.scene.surface().pick_count, 0);
    let overlay = harness.scene.surface().select_box.expect("overlay pushed");
    assert!(overlay.enabled);
    assert_eq!(overlay.select_box, Rect::new(3.0, 2.0, 8.0, 6.0));
    assert_eq!(harness.scene.surface().dirty_count, dirty_before + 1);
    assert!(harness.events().is_empty());
}

#[test]
fn ending_the_box_hides_the_overlay_and_resumes_picking() {
    let mut harness = Harness::new(DragMode::Zoom);
    harness.camera.move_pointer(200.0, 200.0);
    harness.camera.begin_box([1.0, 1.0]);
    harness.camera.drag_box_to([2.0, 2.0]);
    harness.frame();

    harness.camera.end_box();
    let report = harness.frame();

    assert!(!report.select_box_active);
    assert!(!harness.scene.select_box().enabled);
    let overlay = harness.scene.surface().select_box.expect("overlay pushed");
    assert!(!overlay.enabled);
    assert!(matches!(report.pick, Some(PickOutcome::Hover { .. })));
}

#[test]
fn pan_mode_ignores_box_gestures() {
    let mut harness = Harness::new(DragMode::Pan);
    harness.camera.move_pointer(200.0, 200.0);
    harness.camera.begin_box([1.0, 1.0]);
    harness.camera.drag_box_to([2.0, 2.0]);

    let report = harness.frame();

    assert!(!report.select_box_active);
    assert!(harness.scene.surface().select_box.is_none());
    assert!(matches!(report.pick, Some(PickOutcome::Hover { .. })));
}

#[test]
fn pixel_ratio_does_not_shift_hover_anchor() {
    let scheduler = ManualFrameScheduler::new();
    let camera = PointerCamera::new();
    let layout = Harness::layout(DragMode::Zoom);
    let mut provider = NullSurfaceProvider::default();
    let mut scene = Scene::new(
        &mut provider,
        SceneOptions::default().with_pixel_ratio(2.0),
        layout.clone(),
        SceneCollaborators::headless()
            .with_scheduler(scheduler.clone())
            .with_camera(camera.clone()),
    )
    .expect("scene init");
    scene
        .plot(
            &[TraceDescriptor::new("a", "scattergl").with_points(vec![5.0], vec![5.0])],
            layout,
        )
        .expect("plot");

    camera.move_pointer(200.0, 200.0);
    let token = scheduler.take_next().expect("frame");
    let FrameOutcome::Rendered(report) = scene.on_animation_frame(token).expect("frame") else {
        panic!("frame should render");
    };

    let Some(PickOutcome::Hover { label, .. }) = report.pick else {
        panic!("expected hover");
    };
    assert_eq!((label.x, label.y), (200.0, 200.0));
}

#[test]
fn destroy_hides_a_visible_hover_once() {
    let mut harness = Harness::new(DragMode::Zoom);
    let target = harness.scene.hover_target();
    harness.camera.move_pointer(200.0, 200.0);
    harness.frame();

    harness.scene.destroy();
    harness.scene.destroy();

    let events = harness.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events.last(), Some(&HoverEvent::Hide(target)));
    assert!(!harness.scene.pick_resolver().is_hovering());
}

#[test]
fn destroy_without_hover_emits_nothing() {
    let mut harness = Harness::new(DragMode::Zoom);

    harness.scene.destroy();

    assert!(harness.events().is_empty());
}
