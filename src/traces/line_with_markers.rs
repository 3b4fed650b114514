use crate::api::{PickSelection, Trace, TraceDescriptor, TraceFactory};
use crate::core::{DataPoint, Rect, point_bounds};
use crate::error::{ChartError, ChartResult};
use crate::render::{ObjectId, RenderSurface, SurfaceHit, TraceGeometry};

/// Trace-type string handled by [`LineWithMarkersFactory`].
pub const SCATTERGL_KIND: &str = "scattergl";

fn parse_mode(mode: Option<&str>) -> (bool, bool) {
    match mode {
        None => (true, true),
        Some(mode) => {
            let lines = mode.split('+').any(|part| part == "lines");
            let markers = mode.split('+').any(|part| part == "markers");
            (lines, markers)
        }
    }
}

fn validate_style(descriptor: &TraceDescriptor) -> ChartResult<()> {
    if !descriptor.line_width.is_finite() || descriptor.line_width < 0.0 {
        return Err(ChartError::InvalidData(format!(
            "trace `{}` line width must be finite and >= 0",
            descriptor.uid
        )));
    }
    if !descriptor.marker_size.is_finite() || descriptor.marker_size < 0.0 {
        return Err(ChartError::InvalidData(format!(
            "trace `{}` marker size must be finite and >= 0",
            descriptor.uid
        )));
    }
    if let Some(color) = descriptor.color {
        color.validate()?;
    }
    Ok(())
}

fn build_geometry(descriptor: &TraceDescriptor) -> TraceGeometry {
    let (draw_lines, draw_markers) = parse_mode(descriptor.mode.as_deref());
    let count = descriptor.point_count();
    TraceGeometry {
        positions: descriptor.x[..count]
            .iter()
            .zip(&descriptor.y[..count])
            .map(|(x, y)| DataPoint::new(*x, *y))
            .collect(),
        color: descriptor.color.unwrap_or_default(),
        line_width: descriptor.line_width,
        marker_size: descriptor.marker_size,
        draw_lines,
        draw_markers,
    }
}

/// Polyline with point markers, the `scattergl` trace kind.
pub struct LineWithMarkersTrace {
    descriptor: TraceDescriptor,
    geometry: TraceGeometry,
    bounds: Rect,
    object: ObjectId,
    disposed: bool,
}

impl LineWithMarkersTrace {
    pub fn new(surface: &mut dyn RenderSurface, descriptor: &TraceDescriptor) -> ChartResult<Self> {
        validate_style(descriptor)?;
        let geometry = build_geometry(descriptor);
        let object = surface.allocate_object(&geometry)?;
        let bounds = point_bounds(geometry.positions.iter().map(|p| (p.x, p.y)));
        Ok(Self {
            descriptor: descriptor.clone(),
            geometry,
            bounds,
            object,
            disposed: false,
        })
    }

    #[must_use]
    pub fn geometry(&self) -> &TraceGeometry {
        &self.geometry
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Trace for LineWithMarkersTrace {
    fn uid(&self) -> &str {
        &self.descriptor.uid
    }

    fn kind(&self) -> &str {
        SCATTERGL_KIND
    }

    fn object_id(&self) -> ObjectId {
        self.object
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn validate(&self, descriptor: &TraceDescriptor) -> ChartResult<()> {
        validate_style(descriptor)
    }

    fn update(&mut self, surface: &mut dyn RenderSurface, descriptor: &TraceDescriptor) -> ChartResult<()> {
        validate_style(descriptor)?;
        let geometry = build_geometry(descriptor);
        surface.update_object(self.object, &geometry)?;
        self.bounds = point_bounds(geometry.positions.iter().map(|p| (p.x, p.y)));
        self.geometry = geometry;
        self.descriptor = descriptor.clone();
        Ok(())
    }

    fn dispose(&mut self, surface: &mut dyn RenderSurface) {
        if self.disposed {
            return;
        }
        surface.release_object(self.object);
        self.disposed = true;
    }

    fn handle_pick(&self, hit: &SurfaceHit) -> Option<PickSelection> {
        if hit.object != self.object {
            return None;
        }
        let point = *self.geometry.positions.get(hit.point_index)?;
        Some(PickSelection {
            trace_uid: self.descriptor.uid.clone(),
            point_index: hit.point_index,
            data_coord: hit.data_coord,
            trace_coord: [point.x, point.y],
            screen_coord: None,
            text_label: self
                .descriptor
                .text
                .as_ref()
                .and_then(|text| text.label_for(hit.point_index))
                .map(str::to_owned),
            name: self.descriptor.name.clone(),
            color: self.geometry.color,
        })
    }
}

/// Factory registered for [`SCATTERGL_KIND`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LineWithMarkersFactory;

impl TraceFactory for LineWithMarkersFactory {
    fn validate(&self, descriptor: &TraceDescriptor) -> ChartResult<()> {
        validate_style(descriptor)
    }

    fn create(
        &self,
        surface: &mut dyn RenderSurface,
        descriptor: &TraceDescriptor,
    ) -> ChartResult<Option<Box<dyn Trace>>> {
        let trace = LineWithMarkersTrace::new(surface, descriptor)?;
        Ok(Some(Box::new(trace)))
    }
}
