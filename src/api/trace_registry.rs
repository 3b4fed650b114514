use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Rect, aggregate_bounds};
use crate::error::ChartResult;
use crate::render::{ObjectId, RenderSurface};

use super::{FactoryLookup, Trace, TraceDescriptor, TraceFactoryRegistry};

/// What one `reconcile` pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub created: usize,
    pub updated: usize,
    pub removed: usize,
    /// Descriptors whose kind has no factory, or whose factory declined them.
    pub skipped: usize,
}

/// Live traces keyed by `uid`; insertion order is z-order.
#[derive(Default)]
pub struct TraceRegistry {
    traces: IndexMap<String, Box<dyn Trace>>,
}

impl TraceRegistry {
    /// Brings membership in line with `descriptors`.
    ///
    /// Every descriptor is validated before anything changes, so a rejected
    /// list leaves the registry untouched. Existing `uid`s are then updated in
    /// place, new ones are created through `factories` and appended, and only
    /// then are traces missing from `descriptors` disposed and removed. A
    /// `uid` repeated in the input updates the trace created by its first
    /// occurrence (last wins).
    ///
    /// A surface failure while applying still prunes stale traces before the
    /// error is returned.
    pub fn reconcile(
        &mut self,
        descriptors: &[TraceDescriptor],
        factories: &TraceFactoryRegistry,
        surface: &mut dyn RenderSurface,
    ) -> ChartResult<ReconcileReport> {
        self.validate(descriptors, factories)?;

        let mut report = ReconcileReport::default();
        let applied = self.apply(descriptors, factories, surface, &mut report);
        report.removed = self.prune(descriptors, surface);
        applied?;

        Ok(report)
    }

    fn validate(
        &self,
        descriptors: &[TraceDescriptor],
        factories: &TraceFactoryRegistry,
    ) -> ChartResult<()> {
        for descriptor in descriptors {
            if let Some(trace) = self.traces.get(&descriptor.uid) {
                trace.validate(descriptor)?;
            } else if let FactoryLookup::Found(factory) = factories.lookup(&descriptor.kind) {
                factory.validate(descriptor)?;
            }
        }
        Ok(())
    }

    fn apply(
        &mut self,
        descriptors: &[TraceDescriptor],
        factories: &TraceFactoryRegistry,
        surface: &mut dyn RenderSurface,
        report: &mut ReconcileReport,
    ) -> ChartResult<()> {
        for descriptor in descriptors {
            if let Some(trace) = self.traces.get_mut(&descriptor.uid) {
                trace.update(surface, descriptor)?;
                report.updated += 1;
                continue;
            }

            let factory = match factories.lookup(&descriptor.kind) {
                FactoryLookup::Found(factory) => factory,
                FactoryLookup::NoFactory => {
                    debug!(uid = %descriptor.uid, kind = %descriptor.kind, "no trace factory for kind; skipping");
                    report.skipped += 1;
                    continue;
                }
            };
            match factory.create(surface, descriptor)? {
                Some(trace) => {
                    self.traces.insert(descriptor.uid.clone(), trace);
                    report.created += 1;
                }
                None => report.skipped += 1,
            }
        }
        Ok(())
    }

    /// Disposes traces absent from `descriptors`, back to front.
    fn prune(&mut self, descriptors: &[TraceDescriptor], surface: &mut dyn RenderSurface) -> usize {
        let live: HashSet<&str> = descriptors.iter().map(|d| d.uid.as_str()).collect();
        let stale: Vec<String> = self
            .traces
            .keys()
            .rev()
            .filter(|uid| !live.contains(uid.as_str()))
            .cloned()
            .collect();
        let mut removed = 0;
        for uid in stale {
            if let Some(mut trace) = self.traces.shift_remove(&uid) {
                trace.dispose(surface);
                removed += 1;
            }
        }
        removed
    }

    /// Disposes every trace and empties the registry. Safe to call repeatedly.
    pub fn dispose(&mut self, surface: &mut dyn RenderSurface) {
        while let Some((_, mut trace)) = self.traces.pop() {
            trace.dispose(surface);
        }
    }

    #[must_use]
    pub fn get(&self, uid: &str) -> Option<&dyn Trace> {
        self.traces.get(uid).map(Box::as_ref)
    }

    #[must_use]
    pub fn find_by_object(&self, object: ObjectId) -> Option<&dyn Trace> {
        self.traces
            .values()
            .find(|trace| trace.object_id() == object)
            .map(Box::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Trace> {
        self.traces.values().map(Box::as_ref)
    }

    #[must_use]
    pub fn uids(&self) -> Vec<String> {
        self.traces.keys().cloned().collect()
    }

    #[must_use]
    pub fn contains(&self, uid: &str) -> bool {
        self.traces.contains_key(uid)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.traces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    /// Union of live trace bounds with the per-axis fallback applied.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        aggregate_bounds(self.traces.values().map(|trace| trace.bounds()))
    }
}
