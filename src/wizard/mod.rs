//! Connection wizard: step planning, consent tracking, and the session
//! coordinator
//!
//! The wizard guides a user through connecting an external app:
//! authentication scopes, authorization summary, and (for new connections)
//! per-provider permissions. Step computation is pure - the rendering layer
//! only consumes the planned step list and the lock boundary.

mod consent;
mod fetch;
mod planner;
mod registry;
mod session;

pub use consent::{ConsentState, PermissionsByProviderKey};
pub use fetch::{HttpWizardDataFetcher, WizardDataFetcher};
pub use planner::{has_already_consented, lock_boundary, plan};
pub use registry::{PermissionFormProvider, PermissionFormRegistry, StaticPermissionFormRegistry};
pub use session::{ConnectionSubmission, WizardSession};

use serde::{Deserialize, Serialize};

/// Names of the wizard steps, in their fixed order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepName {
    Authentication,
    Authorizations,
    Permissions,
}

impl StepName {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepName::Authentication => "authentication",
            StepName::Authorizations => "authorizations",
            StepName::Permissions => "permissions",
        }
    }
}

/// One step of the connection wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub name: StepName,
    /// Whether the user must explicitly approve this step before moving on
    pub requires_explicit_approval: bool,
}

/// Human-readable summary of one authorization scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeMessage {
    /// Icon hint for the rendering layer
    pub icon: String,
    /// Scope category (e.g., "products", "catalog_structure")
    pub scope_type: String,
    /// Entities covered by the scope
    pub entities: String,
}

/// Snapshot of the wizard data fetched when the wizard opens.
///
/// The `old_*` fields are only present when the app was connected before;
/// their presence drives the already-connected and already-consented checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardData {
    /// App display name
    pub app_name: String,
    /// App logo URL
    pub app_logo: String,
    /// App website URL
    pub app_url: Option<String>,
    /// Authentication scopes the app requests (openid, email, profile)
    #[serde(default)]
    pub authentication_scopes: Vec<String>,
    /// Authentication scopes granted on a previous connection
    pub old_authentication_scopes: Option<Vec<String>>,
    /// Authorization scope summaries for this connection
    #[serde(default)]
    pub scope_messages: Vec<ScopeMessage>,
    /// Authorization summaries from a previous connection. Present iff the
    /// app is already connected.
    pub old_scope_messages: Option<Vec<ScopeMessage>>,
}

impl WizardData {
    /// Whether this app was already connected before this wizard run
    pub fn is_already_connected(&self) -> bool {
        self.old_scope_messages.is_some()
    }

    /// Whether the app requests any authentication scopes
    pub fn requires_authentication(&self) -> bool {
        !self.authentication_scopes.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn wizard_data(
    authentication_scopes: &[&str],
    old_authentication_scopes: Option<&[&str]>,
    already_connected: bool,
) -> WizardData {
    fn to_vec(scopes: &[&str]) -> Vec<String> {
        scopes.iter().map(|s| (*s).to_string()).collect()
    }
    WizardData {
        app_name: "Example App".to_string(),
        app_logo: "https://marketplace.test/logos/example.png".to_string(),
        app_url: Some("https://example.test".to_string()),
        authentication_scopes: to_vec(authentication_scopes),
        old_authentication_scopes: old_authentication_scopes.map(to_vec),
        scope_messages: vec![ScopeMessage {
            icon: "products".to_string(),
            scope_type: "edit".to_string(),
            entities: "products".to_string(),
        }],
        old_scope_messages: already_connected.then(Vec::new),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_name_serializes_lowercase() {
        let json = serde_json::to_string(&StepName::Authentication).unwrap();
        assert_eq!(json, r#""authentication""#);
        assert_eq!(StepName::Permissions.as_str(), "permissions");
    }

    #[test]
    fn test_already_connected_from_old_scope_messages() {
        assert!(wizard_data(&[], None, true).is_already_connected());
        assert!(!wizard_data(&[], None, false).is_already_connected());
    }

    #[test]
    fn test_requires_authentication() {
        assert!(wizard_data(&["openid"], None, false).requires_authentication());
        assert!(!wizard_data(&[], None, false).requires_authentication());
    }
}
