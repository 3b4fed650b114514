use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{CanvasSize, Rect};
use crate::error::{ChartError, ChartResult};
use crate::render::RenderSurface;

use super::{FrameDriverState, Scene, SceneLayout, TickCacheStats};

pub const SCENE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub layout: SceneLayout,
    pub bounds: Rect,
    /// `uid -> kind` in z-order.
    pub traces: IndexMap<String, String>,
    pub tick_counts: [usize; 2],
    pub tick_stats: TickCacheStats,
    pub canvas: CanvasSize,
    pub pixel_ratio: f64,
    pub lifecycle: FrameDriverState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: SceneSnapshot,
}

impl SceneSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = SceneSnapshotJsonContractV1 {
            schema_version: SCENE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize scene snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<SceneSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: SceneSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse scene snapshot json payload: {e}"))
        })?;
        if payload.schema_version != SCENE_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported scene snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<S: RenderSurface> Scene<S> {
    #[must_use]
    pub fn snapshot(&self) -> SceneSnapshot {
        // Ticks are reported as counts; the layout copy carries none.
        let mut layout = self.layout.clone();
        layout.x_axis.ticks.clear();
        layout.y_axis.ticks.clear();
        layout.x_axis.min_pad.clear();
        layout.x_axis.max_pad.clear();
        layout.y_axis.min_pad.clear();
        layout.y_axis.max_pad.clear();

        SceneSnapshot {
            layout,
            bounds: self.bounds,
            traces: self
                .traces
                .iter()
                .map(|trace| (trace.uid().to_owned(), trace.kind().to_owned()))
                .collect(),
            tick_counts: [self.layout.x_axis.ticks.len(), self.layout.y_axis.ticks.len()],
            tick_stats: self.ticks.stats(),
            canvas: self.canvas,
            pixel_ratio: self.pixel_ratio,
            lifecycle: self.driver.state(),
        }
    }

    pub fn snapshot_json_contract_v1_pretty(&self) -> ChartResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}
