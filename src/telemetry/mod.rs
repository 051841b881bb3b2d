//! Usage analytics dispatch.
//!
//! [`Telemetry`] is a plain value passed to whatever emits events. It fans
//! each action out to the active [`AnalyticsProvider`]s; with none active
//! (the default) nothing is tracked.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Session action names.
pub const SESSION_STARTED_ACTION: &str = "Started";
pub const SESSION_FINISHED_ACTION: &str = "Finished";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    Unassigned,
    Session,
    Action,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Unassigned => "Unassigned",
            Category::Session => "Session",
            Category::Action => "Action",
        };
        f.write_str(name)
    }
}

/// One tracked action, as handed to providers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionDescription {
    pub session_id: String,
    pub category: Category,
    pub action: String,
    pub params: BTreeMap<String, String>,
}

/// Failure reported by a provider. Never propagated past [`Telemetry`].
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ProviderError(pub String);

/// Backend that records actions.
pub trait AnalyticsProvider {
    fn track_action(&mut self, action: &ActionDescription) -> Result<(), ProviderError>;
}

/// Named constructor of providers.
pub trait AnalyticsProviderFactory {
    fn name(&self) -> &str;

    fn allocate_provider(&self) -> Box<dyn AnalyticsProvider>;
}

/// Analytics context.
pub struct Telemetry {
    session_id: String,
    factories: Vec<Box<dyn AnalyticsProviderFactory>>,
    providers: Vec<Box<dyn AnalyticsProvider>>,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Telemetry")
            .field("session_id", &self.session_id)
            .field("factories", &self.factories.len())
            .field("providers", &self.providers.len())
            .finish()
    }
}

impl Telemetry {
    /// A context with no providers; every track call returns `false`.
    pub fn noop() -> Self {
        Self {
            session_id: format!("AutoGeneratedSessionId:{}", Uuid::new_v4()),
            factories: Vec::new(),
            providers: Vec::new(),
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn active_providers(&self) -> usize {
        self.providers.len()
    }

    /// Register a factory and activate one provider from it.
    pub fn register_factory(&mut self, factory: Box<dyn AnalyticsProviderFactory>) {
        tracing::debug!("Registering analytics provider factory '{}'", factory.name());
        self.providers.push(factory.allocate_provider());
        self.factories.push(factory);
    }

    /// Activate a provider from the factory called `name` (case-insensitive).
    ///
    /// With `keep_only_one`, other active providers are dropped first; if no
    /// factory matches, all providers are dropped and tracking stops.
    pub fn select_provider(&mut self, name: &str, keep_only_one: bool) -> bool {
        let factory = self
            .factories
            .iter()
            .find(|factory| factory.name().eq_ignore_ascii_case(name));
        match factory {
            Some(factory) => {
                let provider = factory.allocate_provider();
                if keep_only_one {
                    self.providers.clear();
                }
                self.providers.push(provider);
                true
            }
            None => {
                if keep_only_one {
                    self.providers.clear();
                }
                false
            }
        }
    }

    pub fn track_action(&mut self, action: &str) -> bool {
        self.track(Category::Action, action, BTreeMap::new())
    }

    pub fn track_action_with(&mut self, action: &str, params: BTreeMap<String, String>) -> bool {
        self.track(Category::Action, action, params)
    }

    /// Track an action with a single parameter.
    pub fn track_action_param(&mut self, action: &str, name: &str, value: &str) -> bool {
        let params = BTreeMap::from([(name.to_string(), value.to_string())]);
        self.track(Category::Action, action, params)
    }

    pub fn track_startup_action(&mut self, action: &str) -> bool {
        self.track(Category::Session, action, BTreeMap::new())
    }

    pub fn start_session(&mut self) -> bool {
        self.track_startup_action(SESSION_STARTED_ACTION)
    }

    pub fn finish_session(&mut self) -> bool {
        self.track(Category::Session, SESSION_FINISHED_ACTION, BTreeMap::new())
    }

    fn track(&mut self, category: Category, action: &str, params: BTreeMap<String, String>) -> bool {
        if self.providers.is_empty() {
            return false;
        }
        let description = ActionDescription {
            session_id: self.session_id.clone(),
            category,
            action: action.to_string(),
            params,
        };
        for provider in &mut self.providers {
            if let Err(e) = provider.track_action(&description) {
                tracing::warn!("Analytics provider failed to track '{action}': {e}");
            }
        }
        true
    }
}
