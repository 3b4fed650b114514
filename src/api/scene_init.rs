use tracing::debug;

use crate::core::{Rect, aggregate_bounds, canvas_pixel_size};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    ContextKind, RenderSurface, SelectBoxOverlay, SpikeOverlay, SurfaceConfig, SurfaceProvider,
    SurfaceRequest,
};

use super::{
    FrameDriver, HoverTarget, PickResolver, Scene, SceneCollaborators, SceneLayout, SceneOptions,
    TickCache, TraceRegistry,
};

impl<S: RenderSurface> Scene<S> {
    /// Acquires a surface and starts the frame loop.
    ///
    /// Context kinds are tried in `ContextKind::fallback_chain` order; the
    /// first one the provider supplies wins.
    pub fn new<P>(
        provider: &mut P,
        options: SceneOptions,
        layout: SceneLayout,
        collaborators: SceneCollaborators,
    ) -> ChartResult<Self>
    where
        P: SurfaceProvider<Surface = S>,
    {
        options.validate()?;
        layout.validate()?;

        let pixel_ratio = options.resolved_pixel_ratio();
        let canvas = canvas_pixel_size(layout.width, layout.height, pixel_ratio);
        let chain = ContextKind::fallback_chain();

        let mut acquired = None;
        for kind in chain.iter().copied() {
            let request = SurfaceRequest {
                kind,
                canvas,
                pixel_ratio,
                attributes: options.context_attributes,
            };
            if let Some(surface) = provider.acquire(&request) {
                debug!(kind = kind.as_str(), width = canvas.width, height = canvas.height, "surface acquired");
                acquired = Some(surface);
                break;
            }
            debug!(kind = kind.as_str(), "surface kind unavailable");
        }
        let Some(mut surface) = acquired else {
            let attempted = chain
                .iter()
                .map(|kind| kind.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ChartError::SurfaceUnavailable { attempted });
        };

        let mut config = SurfaceConfig::new(pixel_ratio);
        config.merge(&layout);
        config.data_box = layout.data_box();
        if let Err(err) = surface.update(&config) {
            surface.dispose();
            return Err(err);
        }

        let SceneCollaborators {
            camera,
            hover,
            scheduler,
            autorange,
            ticks,
            factories,
        } = collaborators;

        let mut driver = FrameDriver::new(scheduler);
        driver.start();

        Ok(Self {
            hover_target: HoverTarget::next(),
            pixel_ratio,
            canvas,
            select_box: SelectBoxOverlay::new(options.select_box),
            layout,
            options,
            surface,
            config,
            camera,
            traces: TraceRegistry::default(),
            factories,
            spikes: SpikeOverlay::default(),
            bounds: aggregate_bounds(Vec::<Rect>::new()),
            picker: PickResolver::default(),
            ticks: TickCache::default(),
            driver,
            autorange,
            tick_service: ticks,
            hover,
        })
    }
}
