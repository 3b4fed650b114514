use approx::assert_abs_diff_eq;
use scene2d::api::{
    FrameOutcome, ManualFrameScheduler, SceneCollaborators, Trace, TraceDescriptor, TraceFactory,
    TraceFactoryRegistry,
};
use scene2d::core::{AxisState, Rect};
use scene2d::interaction::PointerCamera;
use scene2d::render::{NullSurface, NullSurfaceProvider, RenderSurface};
use scene2d::{ChartError, ChartResult, Scene, SceneLayout, SceneOptions};

fn scene_with(
    layout: SceneLayout,
    options: SceneOptions,
    collaborators: SceneCollaborators,
) -> Scene<NullSurface> {
    let mut provider = NullSurfaceProvider::default();
    Scene::new(&mut provider, options, layout, collaborators).expect("scene init")
}

fn headless(layout: SceneLayout) -> Scene<NullSurface> {
    scene_with(layout, SceneOptions::default(), SceneCollaborators::headless())
}

fn line(uid: &str, x: Vec<f64>, y: Vec<f64>) -> TraceDescriptor {
    TraceDescriptor::new(uid, "scattergl").with_points(x, y)
}

#[test]
fn plot_creates_trace_and_aggregates_bounds() {
    let mut scene = headless(SceneLayout::new(400.0, 400.0));

    let report = scene
        .plot(
            &[line("a", vec![0.0, 1.0], vec![0.0, 1.0])],
            SceneLayout::new(400.0, 400.0),
        )
        .expect("plot");

    assert_eq!(report.created, 1);
    assert_eq!(scene.trace_uids(), vec!["a".to_owned()]);
    assert_eq!(scene.bounds(), Rect::new(0.0, 0.0, 1.0, 1.0));
    assert_eq!(scene.surface().live_object_count(), 1);
}

#[test]
fn replotting_without_a_uid_disposes_it_once() {
    let mut scene = headless(SceneLayout::new(400.0, 400.0));
    scene
        .plot(
            &[line("a", vec![0.0, 1.0], vec![0.0, 1.0])],
            SceneLayout::new(400.0, 400.0),
        )
        .expect("first plot");
    let object = scene.traces().get("a").expect("trace a").object_id();

    let report = scene
        .plot(&[], SceneLayout::new(400.0, 400.0))
        .expect("second plot");
    scene
        .plot(&[], SceneLayout::new(400.0, 400.0))
        .expect("third plot");

    assert_eq!(report.removed, 1);
    assert!(scene.trace_uids().is_empty());
    assert_eq!(scene.surface().released, vec![object]);
    assert_eq!(scene.bounds(), Rect::new(-1.0, -1.0, 1.0, 1.0));
}

#[test]
fn replotting_an_existing_uid_updates_in_place() {
    let mut scene = headless(SceneLayout::new(400.0, 400.0));
    scene
        .plot(
            &[line("a", vec![0.0, 1.0], vec![0.0, 1.0])],
            SceneLayout::new(400.0, 400.0),
        )
        .expect("first plot");
    let object = scene.traces().get("a").expect("trace a").object_id();

    let report = scene
        .plot(
            &[line("a", vec![2.0, 5.0], vec![-3.0, 4.0])],
            SceneLayout::new(400.0, 400.0),
        )
        .expect("second plot");

    assert_eq!(report.updated, 1);
    assert_eq!(report.created, 0);
    assert_eq!(scene.traces().get("a").expect("trace a").object_id(), object);
    assert_eq!(scene.bounds(), Rect::new(2.0, -3.0, 5.0, 4.0));
    assert!(scene.surface().released.is_empty());
}

#[test]
fn unknown_trace_kinds_are_skipped_without_error() {
    let mut scene = headless(SceneLayout::new(400.0, 400.0));

    let report = scene
        .plot(
            &[
                TraceDescriptor::new("h", "heatmapgl"),
                line("a", vec![0.0], vec![0.0]),
            ],
            SceneLayout::new(400.0, 400.0),
        )
        .expect("plot");

    assert_eq!(report.skipped, 1);
    assert_eq!(scene.trace_uids(), vec!["a".to_owned()]);
}

#[test]
fn autorange_pads_both_ends_by_ten_pixels() {
    let mut scene = headless(SceneLayout::new(400.0, 400.0));
    scene
        .plot(
            &[line("a", vec![0.0, 1.0], vec![0.0, 1.0])],
            SceneLayout::new(400.0, 400.0),
        )
        .expect("plot");

    // View box is 300px wide; 280px remain between the pads.
    let pad = 10.0 / 280.0;
    let layout = scene.layout();
    assert_abs_diff_eq!(layout.x_axis.range[0], -pad, epsilon = 1e-12);
    assert_abs_diff_eq!(layout.x_axis.range[1], 1.0 + pad, epsilon = 1e-12);
    assert_abs_diff_eq!(layout.y_axis.range[0], -pad, epsilon = 1e-12);
    assert_abs_diff_eq!(layout.y_axis.range[1], 1.0 + pad, epsilon = 1e-12);
    assert_abs_diff_eq!(layout.x_axis.length, 300.0, epsilon = 1e-12);
    assert_eq!(scene.config().data_box, layout.data_box());
    assert_eq!(scene.surface().data_box, layout.data_box());
}

#[test]
fn fixed_axes_keep_their_range() {
    let layout = SceneLayout::new(400.0, 400.0)
        .with_axes(AxisState::fixed(0.0, 10.0), AxisState::fixed(-5.0, 5.0));
    let mut scene = headless(layout.clone());

    scene
        .plot(&[line("a", vec![0.0, 1.0], vec![0.0, 1.0])], layout)
        .expect("plot");

    assert_eq!(scene.layout().data_box(), Rect::new(0.0, -5.0, 10.0, 5.0));
}

#[test]
fn single_valued_axis_gets_unit_margin() {
    let mut scene = headless(SceneLayout::new(400.0, 400.0));
    scene
        .plot(
            &[line("a", vec![3.0, 3.0], vec![0.0, 1.0])],
            SceneLayout::new(400.0, 400.0),
        )
        .expect("plot");

    assert_eq!(scene.layout().x_axis.range, [2.0, 4.0]);
}

#[test]
fn plot_uploads_ticks_and_layout_presentation() {
    let layout = SceneLayout::new(400.0, 400.0).with_axes(
        AxisState::fixed(0.0, 10.0).with_title("time"),
        AxisState::fixed(0.0, 10.0),
    );
    let mut scene = headless(layout.clone());

    scene.plot(&[], layout).expect("plot");

    let config = scene.config();
    assert!(!config.ticks.x.is_empty());
    assert_eq!(config.ticks, scene.surface().config.clone().expect("pushed").ticks);
    assert_eq!(config.x_title.as_deref(), Some("time"));
    assert_eq!(config.view_box, Rect::new(50.0, 50.0, 350.0, 350.0));
    assert_eq!(scene.layout().x_axis.ticks, config.ticks.x);
}

#[test]
fn canvas_resizes_only_when_device_size_changes() {
    let mut scene = scene_with(
        SceneLayout::new(400.0, 300.0),
        SceneOptions::default().with_pixel_ratio(2.0),
        SceneCollaborators::headless(),
    );

    scene.plot(&[], SceneLayout::new(400.0, 300.0)).expect("same size");
    assert_eq!(scene.surface().resize_count, 0);

    // 800.4 and 800.5 device pixels both round up to 801.
    scene.plot(&[], SceneLayout::new(400.2, 300.0)).expect("grow");
    assert_eq!(scene.surface().resize_count, 1);
    assert_eq!(scene.canvas().width, 801);

    scene.plot(&[], SceneLayout::new(400.25, 300.0)).expect("same device size");
    assert_eq!(scene.surface().resize_count, 1);
}

#[test]
fn plot_rejects_invalid_layout_without_side_effects() {
    let mut scene = headless(SceneLayout::new(400.0, 400.0));
    let updates = scene.surface().update_count;

    let result = scene.plot(
        &[line("a", vec![0.0], vec![0.0])],
        SceneLayout::new(400.0, f64::NAN),
    );

    assert!(matches!(result, Err(ChartError::InvalidViewport { .. })));
    assert!(scene.trace_uids().is_empty());
    assert_eq!(scene.surface().update_count, updates);
}

#[test]
fn camera_changed_skips_upload_when_ticks_are_unchanged() {
    let mut scene = headless(SceneLayout::new(400.0, 400.0));
    scene
        .plot(
            &[line("a", vec![0.0, 1.0], vec![0.0, 1.0])],
            SceneLayout::new(400.0, 400.0),
        )
        .expect("plot");
    let updates = scene.surface().update_count;

    assert!(!scene.camera_changed().expect("first sync"));
    assert!(!scene.camera_changed().expect("second sync"));

    assert_eq!(scene.surface().update_count, updates);
    assert_eq!(scene.tick_stats().skipped, 2);
}

#[test]
fn camera_range_update_uploads_new_ticks_on_next_frame() {
    let scheduler = ManualFrameScheduler::new();
    let camera = PointerCamera::new();
    let mut scene = scene_with(
        SceneLayout::new(400.0, 400.0),
        SceneOptions::default(),
        SceneCollaborators::headless()
            .with_scheduler(scheduler.clone())
            .with_camera(camera.clone()),
    );
    scene
        .plot(
            &[line("a", vec![0.0, 1.0], vec![0.0, 1.0])],
            SceneLayout::new(400.0, 400.0),
        )
        .expect("plot");
    let updates = scene.surface().update_count;

    camera.set_data_box(Rect::new(0.0, 0.0, 100.0, 100.0));
    let token = scheduler.take_next().expect("frame");
    let outcome = scene.on_animation_frame(token).expect("frame");

    let FrameOutcome::Rendered(report) = outcome else {
        panic!("frame should render");
    };
    assert!(report.ticks_uploaded);
    assert_eq!(scene.surface().update_count, updates + 1);
    assert_eq!(scene.layout().data_box(), Rect::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(scene.surface().data_box, Rect::new(0.0, 0.0, 100.0, 100.0));
    assert!(camera.snapshot().pending_range.is_none());
}

struct DecliningFactory;

impl TraceFactory for DecliningFactory {
    fn create(
        &self,
        _surface: &mut dyn RenderSurface,
        _descriptor: &TraceDescriptor,
    ) -> ChartResult<Option<Box<dyn Trace>>> {
        Ok(None)
    }
}

#[test]
fn registered_factories_may_decline_descriptors() {
    let mut factories = TraceFactoryRegistry::with_defaults();
    factories
        .register("pointcloud", Box::new(DecliningFactory))
        .expect("register");
    assert!(matches!(
        factories.register("pointcloud", Box::new(DecliningFactory)),
        Err(ChartError::InvalidData(_))
    ));
    let mut scene = scene_with(
        SceneLayout::new(400.0, 400.0),
        SceneOptions::default(),
        SceneCollaborators::headless().with_factories(factories),
    );

    let report = scene
        .plot(
            &[
                TraceDescriptor::new("p", "pointcloud"),
                line("a", vec![1.0], vec![2.0]),
            ],
            SceneLayout::new(400.0, 400.0),
        )
        .expect("plot");

    assert_eq!(report.skipped, 1);
    assert_eq!(report.created, 1);
    assert_eq!(scene.surface().live_object_count(), 1);
}

#[test]
fn rejected_plot_keeps_previous_traces_and_bounds() {
    let mut scene = headless(SceneLayout::new(400.0, 400.0));
    scene
        .plot(
            &[line("old", vec![0.0, 1.0], vec![0.0, 1.0])],
            SceneLayout::new(400.0, 400.0),
        )
        .expect("first plot");
    let updates = scene.surface().update_count;

    let mut bad = line("bad", vec![5.0], vec![5.0]);
    bad.marker_size = -1.0;
    let result = scene.plot(
        &[line("new", vec![2.0, 3.0], vec![2.0, 3.0]), bad],
        SceneLayout::new(400.0, 400.0),
    );

    assert!(matches!(result, Err(ChartError::InvalidData(_))));
    assert_eq!(scene.trace_uids(), vec!["old".to_owned()]);
    assert_eq!(scene.surface().live_object_count(), 1);
    assert!(scene.surface().released.is_empty());
    assert_eq!(scene.bounds(), Rect::new(0.0, 0.0, 1.0, 1.0));
    assert_eq!(scene.surface().update_count, updates);
}
