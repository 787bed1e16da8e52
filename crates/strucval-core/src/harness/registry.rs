use super::case::ValidationCase;
use super::error::HarnessError;
use itertools::Itertools;
use tracing::debug;

/// Selection token standing for every registered provider.
pub const ALL: &str = "all";

/// A named group of validation cases.
pub trait TestProvider: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> Option<&str> {
        None
    }

    fn cases(&self) -> Vec<ValidationCase>;
}

/// Test providers by unique name, in registration order.
#[derive(Default)]
pub struct TestRegistry {
    providers: Vec<Box<dyn TestProvider>>,
}

impl TestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: Box<dyn TestProvider>) -> Result<(), HarnessError> {
        let name = provider.name();
        if name == ALL || self.get(name).is_some() {
            return Err(HarnessError::DuplicateProvider(name.to_string()));
        }
        debug!(provider = name, "Registered test provider.");
        self.providers.push(provider);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&dyn TestProvider> {
        self.providers
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn TestProvider> {
        self.providers.iter().map(|p| p.as_ref())
    }

    /// Resolves a selection of provider names.
    ///
    /// `all` anywhere in the selection, or an empty selection, yields every provider in
    /// registration order. Otherwise providers are returned in selection order, each once.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::UnknownProvider`] for the first name that is not registered.
    pub fn resolve<S: AsRef<str>>(
        &self,
        selection: &[S],
    ) -> Result<Vec<&dyn TestProvider>, HarnessError> {
        if selection.is_empty() || selection.iter().any(|name| name.as_ref() == ALL) {
            return Ok(self.iter().collect());
        }

        let mut resolved: Vec<&dyn TestProvider> = Vec::with_capacity(selection.len());
        for name in selection.iter().map(AsRef::as_ref).unique() {
            let provider = self
                .get(name)
                .ok_or_else(|| HarnessError::UnknownProvider {
                    name: name.to_string(),
                    available: std::iter::once(ALL).chain(self.names()).join(", "),
                })?;
            resolved.push(provider);
        }
        Ok(resolved)
    }
}
