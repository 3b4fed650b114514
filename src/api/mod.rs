mod axis_services;
mod frame_driver;
mod hover;
mod pick_resolver;
mod scene;
mod scene_accessors;
mod scene_config;
mod scene_export;
mod scene_frame;
mod scene_init;
mod scene_layout;
mod scene_plot;
mod scene_snapshot;
mod tick_cache;
mod trace;
mod trace_factory;
mod trace_registry;

pub use axis_services::{
    AutorangeService, LinearTickService, PaddedAutorange, TickService,
};
pub use frame_driver::{
    FrameDriver, FrameDriverState, FrameOutcome, FrameReport, FrameScheduler, FrameToken,
    ManualFrameScheduler,
};
pub use hover::{HoverLabel, HoverSink, HoverTarget, NullHoverSink};
pub use pick_resolver::{PickOutcome, PickResolver};
pub use scene::{Scene, SceneCollaborators};
pub use scene_config::SceneOptions;
pub use scene_layout::SceneLayout;
pub use scene_snapshot::{SCENE_SNAPSHOT_JSON_SCHEMA_V1, SceneSnapshot, SceneSnapshotJsonContractV1};
pub use tick_cache::{TickCache, TickCacheStats, compute_ticks, ticks_changed};
pub use trace::{PickSelection, TextLabels, Trace, TraceDescriptor};
pub use trace_factory::{FactoryLookup, TraceFactory, TraceFactoryRegistry};
pub use trace_registry::{ReconcileReport, TraceRegistry};
