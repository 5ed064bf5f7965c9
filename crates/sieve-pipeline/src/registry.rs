//! Named annotator factories

use crate::PipelineError;
use sieve_annotators::{AllVagueAnnotator, EventDctAnnotator, TimeTimeAnnotator};
use sieve_domain::Annotator;

type Factory = Box<dyn Fn() -> Box<dyn Annotator> + Send + Sync>;

/// Ordered registry mapping annotator names to constructors
///
/// Pipelines are assembled by name from a registry, so configuration files
/// only ever refer to annotators that were explicitly registered.
///
/// # Examples
///
/// ```
/// use sieve_pipeline::AnnotatorRegistry;
///
/// let registry = AnnotatorRegistry::with_defaults();
/// assert_eq!(registry.names(), vec!["time_time", "event_dct", "all_vague"]);
/// assert!(registry.create("event_dct").is_ok());
/// assert!(registry.create("oracle").is_err());
/// ```
#[derive(Default)]
pub struct AnnotatorRegistry {
    entries: Vec<(String, Factory)>,
}

impl AnnotatorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the reference annotators
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(TimeTimeAnnotator::NAME, || Box::new(TimeTimeAnnotator::new()));
        registry.register(EventDctAnnotator::NAME, || Box::new(EventDctAnnotator::new()));
        registry.register(AllVagueAnnotator::NAME, || Box::new(AllVagueAnnotator::new()));
        registry
    }

    /// Register a factory, replacing any earlier one with the same name
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Annotator> + Send + Sync + 'static,
    {
        let name = name.into();
        let factory: Factory = Box::new(factory);
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = factory,
            None => self.entries.push((name, factory)),
        }
    }

    /// Registered names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Number of registered annotators
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build one annotator
    pub fn create(&self, name: &str) -> Result<Box<dyn Annotator>, PipelineError> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, factory)| factory())
            .ok_or_else(|| PipelineError::UnknownAnnotator(name.to_string()))
    }

    /// Build annotators in the given order
    pub fn build<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Box<dyn Annotator>>, PipelineError> {
        names.iter().map(|n| self.create(n.as_ref())).collect()
    }
}

impl std::fmt::Debug for AnnotatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotatorRegistry")
            .field("names", &self.names())
            .finish()
    }
}
