use std::collections::HashMap;

use crate::error::{ChartError, ChartResult};
use crate::render::RenderSurface;
use crate::traces::{LineWithMarkersFactory, SCATTERGL_KIND};

use super::{Trace, TraceDescriptor};

/// Builds traces of one registered kind.
///
/// `Ok(None)` declines the descriptor; the scene then skips it silently.
pub trait TraceFactory {
    /// Rejects a descriptor `create` would fail on, without touching a surface.
    fn validate(&self, _descriptor: &TraceDescriptor) -> ChartResult<()> {
        Ok(())
    }

    fn create(
        &self,
        surface: &mut dyn RenderSurface,
        descriptor: &TraceDescriptor,
    ) -> ChartResult<Option<Box<dyn Trace>>>;
}

pub enum FactoryLookup<'a> {
    Found(&'a dyn TraceFactory),
    NoFactory,
}

/// Factories keyed by trace-type string, resolved once at scene construction.
#[derive(Default)]
pub struct TraceFactoryRegistry {
    factories: HashMap<String, Box<dyn TraceFactory>>,
}

impl TraceFactoryRegistry {
    /// Registry with no factories; every descriptor will be skipped.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with the built-in `scattergl` factory.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry
            .factories
            .insert(SCATTERGL_KIND.to_owned(), Box::new(LineWithMarkersFactory));
        registry
    }

    /// Registers a factory for `kind`; kinds are unique and non-empty.
    pub fn register(&mut self, kind: &str, factory: Box<dyn TraceFactory>) -> ChartResult<()> {
        if kind.is_empty() {
            return Err(ChartError::InvalidData(
                "trace kind must not be empty".to_owned(),
            ));
        }
        if self.factories.contains_key(kind) {
            return Err(ChartError::InvalidData(format!(
                "trace kind `{kind}` already has a factory"
            )));
        }
        self.factories.insert(kind.to_owned(), factory);
        Ok(())
    }

    #[must_use]
    pub fn lookup(&self, kind: &str) -> FactoryLookup<'_> {
        match self.factories.get(kind) {
            Some(factory) => FactoryLookup::Found(factory.as_ref()),
            None => FactoryLookup::NoFactory,
        }
    }

    #[must_use]
    pub fn has_kind(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
