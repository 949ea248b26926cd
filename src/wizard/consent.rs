//! Consent state collected while the wizard is open

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Step, StepName, WizardData};

/// Per-provider permission payloads, keyed by provider key.
///
/// Payloads are opaque: each permission-form provider defines its own shape
/// and the wizard only routes by key.
pub type PermissionsByProviderKey = HashMap<String, serde_json::Value>;

/// Mutable state owned by one wizard run: authentication consent plus the
/// permission payloads collected from the permission forms.
///
/// Updates are pure - [`ConsentState::with_provider_permissions`] returns a
/// new state and leaves the input untouched, so a reader holding the prior
/// state never observes a change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsentState {
    /// Whether the user consented to the requested authentication scopes
    pub authentication_consent_given: bool,
    /// Collected permission payloads, one entry per provider
    #[serde(default)]
    pub permissions: PermissionsByProviderKey,
}

impl ConsentState {
    /// Initialize from freshly fetched wizard data. Consent is pre-seeded
    /// when a previous connection already granted authentication scopes.
    pub fn from_wizard_data(wizard_data: &WizardData) -> Self {
        Self {
            authentication_consent_given: super::has_already_consented(wizard_data),
            permissions: PermissionsByProviderKey::new(),
        }
    }

    /// Return a new state with the payload for `provider_key` replaced.
    /// Other keys are left untouched; the input state is not mutated.
    pub fn with_provider_permissions(
        &self,
        provider_key: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        let mut permissions = self.permissions.clone();
        permissions.insert(provider_key.into(), payload);
        Self {
            authentication_consent_given: self.authentication_consent_given,
            permissions,
        }
    }

    /// Return a new state with authentication consent set
    pub fn with_authentication_consent(&self, given: bool) -> Self {
        Self {
            authentication_consent_given: given,
            permissions: self.permissions.clone(),
        }
    }

    /// Permission payloads to submit for the given plan.
    ///
    /// When the plan has no permissions step, previously collected payloads
    /// must not leak into the submission: the result is empty.
    pub fn submission(&self, steps: &[Step]) -> PermissionsByProviderKey {
        let permissions_editable = steps.iter().any(|s| s.name == StepName::Permissions);
        if permissions_editable {
            self.permissions.clone()
        } else {
            PermissionsByProviderKey::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{plan, wizard_data};
    use serde_json::json;

    #[test]
    fn test_seeded_from_prior_consent() {
        let state = ConsentState::from_wizard_data(&wizard_data(
            &["openid"],
            Some(&["openid"]),
            true,
        ));
        assert!(state.authentication_consent_given);

        let state = ConsentState::from_wizard_data(&wizard_data(&["openid"], None, false));
        assert!(!state.authentication_consent_given);
    }

    #[test]
    fn test_with_provider_permissions_is_pure() {
        let original = ConsentState::default();
        let one = original.with_provider_permissions("k1", json!({"x": 1}));
        let two = one.with_provider_permissions("k2", json!({"y": 2}));
        let three = two.with_provider_permissions("k1", json!({"x": 3}));

        // Latest payload wins per key, other keys untouched
        assert_eq!(three.permissions.get("k1"), Some(&json!({"x": 3})));
        assert_eq!(three.permissions.get("k2"), Some(&json!({"y": 2})));

        // Earlier states are unchanged
        assert!(original.permissions.is_empty());
        assert_eq!(one.permissions.get("k1"), Some(&json!({"x": 1})));
        assert_eq!(one.permissions.len(), 1);
        assert_eq!(two.permissions.get("k1"), Some(&json!({"x": 1})));
    }

    #[test]
    fn test_submission_with_permissions_step() {
        let steps = plan(&wizard_data(&[], None, false), true);
        let state = ConsentState::default().with_provider_permissions("k1", json!({"x": 1}));

        let submission = state.submission(&steps);
        assert_eq!(submission.get("k1"), Some(&json!({"x": 1})));
    }

    #[test]
    fn test_submission_zeroed_without_permissions_step() {
        // Already connected: plan drops the permissions step
        let steps = plan(&wizard_data(&[], None, true), true);
        let state = ConsentState::default().with_provider_permissions("k1", json!({"x": 1}));

        assert!(state.submission(&steps).is_empty());
        // The collected state itself is untouched
        assert_eq!(state.permissions.len(), 1);
    }
}
