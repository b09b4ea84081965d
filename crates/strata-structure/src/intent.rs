//! Intent handlers
//!
//! An intent is an external navigation request ("edit document X",
//! "create a movie"). Lists declare whether they can resolve an intent via
//! an [`IntentChecker`]: a predicate paired with an identity marker. The
//! marker is what lets the type-list builder distinguish the system
//! default handler from caller-supplied wiring when deciding whether a
//! child override should clear it.

use std::fmt;
use std::sync::Arc;

use strata_filter::FilterParams;

/// An external navigation intent with its parameters
#[derive(Debug, Clone, Default)]
pub struct IntentParams {
    /// Intent name (`edit`, `create`, ...)
    pub intent: String,
    /// Intent parameters (`type`, `id`, `template`, ...)
    pub params: FilterParams,
}

impl IntentParams {
    /// Create an intent with no parameters
    #[inline]
    #[must_use]
    pub fn new(intent: impl Into<String>) -> Self {
        Self {
            intent: intent.into(),
            params: FilterParams::new(),
        }
    }

    /// Add a string parameter
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params
            .insert(key.into(), serde_json::Value::String(value.into()));
        self
    }

    /// Look up a string parameter
    #[must_use]
    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(serde_json::Value::as_str)
    }
}

/// Whether a checker is the system default or caller-supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentHandlerIdentity {
    /// Installed by `documents_of_type`
    Default,
    /// Supplied by the application author
    Custom,
}

type IntentPredicate = dyn Fn(&IntentParams) -> bool + Send + Sync;

/// Predicate deciding whether a list can resolve an intent
#[derive(Clone)]
pub struct IntentChecker {
    identity: IntentHandlerIdentity,
    check: Arc<IntentPredicate>,
}

impl IntentChecker {
    /// Caller-supplied checker
    #[must_use]
    pub fn custom(check: impl Fn(&IntentParams) -> bool + Send + Sync + 'static) -> Self {
        Self {
            identity: IntentHandlerIdentity::Custom,
            check: Arc::new(check),
        }
    }

    /// The system default checker for a type-scoped list
    ///
    /// Accepts `edit` and `create` intents whose `type` parameter matches
    /// the list's bound schema type.
    #[must_use]
    pub fn default_for_type(type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        Self {
            identity: IntentHandlerIdentity::Default,
            check: Arc::new(move |intent: &IntentParams| {
                matches!(intent.intent.as_str(), "edit" | "create")
                    && intent.param_str("type") == Some(type_name.as_str())
            }),
        }
    }

    /// Identity marker
    #[inline]
    #[must_use]
    pub fn identity(&self) -> IntentHandlerIdentity {
        self.identity
    }

    /// Whether this is the system default handler
    #[inline]
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.identity == IntentHandlerIdentity::Default
    }

    /// Evaluate the predicate
    #[must_use]
    pub fn can_handle(&self, intent: &IntentParams) -> bool {
        (self.check)(intent)
    }
}

impl fmt::Debug for IntentChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntentChecker")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_checker_matches_type_param() {
        let checker = IntentChecker::default_for_type("movie");
        assert!(checker.is_default());

        let edit = IntentParams::new("edit").with_param("type", "movie");
        assert!(checker.can_handle(&edit));

        let create = IntentParams::new("create").with_param("type", "movie");
        assert!(checker.can_handle(&create));

        let other_type = IntentParams::new("edit").with_param("type", "book");
        assert!(!checker.can_handle(&other_type));

        let other_intent = IntentParams::new("browse").with_param("type", "movie");
        assert!(!checker.can_handle(&other_intent));
    }

    #[test]
    fn custom_checker_keeps_custom_identity() {
        let checker = IntentChecker::custom(|_| true);
        assert!(!checker.is_default());
        assert_eq!(checker.identity(), IntentHandlerIdentity::Custom);
        assert!(checker.can_handle(&IntentParams::new("anything")));
    }
}
