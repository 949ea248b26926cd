//! Wizard session coordinator
//!
//! Owns the state of one wizard open: the fetched data snapshot, the planned
//! steps, the available permission-form providers, and the consent collected
//! so far. All mutation goes through `&mut self` - the session is owned by a
//! single logical flow and never shared across tasks.

use serde::Serialize;
use tracing::{debug, info};

use super::{
    lock_boundary, plan, ConsentState, PermissionFormProvider, PermissionFormRegistry,
    PermissionsByProviderKey, Step, StepName, WizardData, WizardDataFetcher,
};
use crate::error::ApiError;
use crate::features::{FeatureFlags, CONNECT_APP_WITH_PERMISSIONS};

/// Payload handed to the connection backend when the user confirms the wizard
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionSubmission {
    /// OAuth client id of the app being connected
    pub client_id: String,
    /// Whether the user consented to the requested authentication scopes
    pub authentication_consent_given: bool,
    /// Collected permission payloads. Empty when the plan had no
    /// permissions step, regardless of what was collected earlier.
    pub permissions: PermissionsByProviderKey,
}

/// One open run of the connection wizard
pub struct WizardSession {
    client_id: String,
    wizard_data: WizardData,
    steps: Vec<Step>,
    providers: Vec<PermissionFormProvider>,
    consent: ConsentState,
    has_already_consented: bool,
    closed: bool,
}

impl WizardSession {
    /// Open a wizard for the given client id: fetch the data snapshot and
    /// the provider list, compute the step plan, and seed consent from any
    /// previous connection.
    pub async fn open(
        fetcher: &dyn WizardDataFetcher,
        registry: &dyn PermissionFormRegistry,
        feature_flags: &dyn FeatureFlags,
        client_id: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let client_id = client_id.into();
        let wizard_data = fetcher.fetch(&client_id).await?;
        let providers = registry.all().await?;

        let permissions_enabled = feature_flags.is_enabled(CONNECT_APP_WITH_PERMISSIONS);
        let steps = plan(&wizard_data, permissions_enabled);
        let has_already_consented = super::has_already_consented(&wizard_data);
        let consent = ConsentState::from_wizard_data(&wizard_data);

        info!(
            client_id = %client_id,
            app_name = %wizard_data.app_name,
            steps = steps.len(),
            already_connected = wizard_data.is_already_connected(),
            "opened connection wizard"
        );

        Ok(Self {
            client_id,
            wizard_data,
            steps,
            providers,
            consent,
            has_already_consented,
            closed: false,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn wizard_data(&self) -> &WizardData {
        &self.wizard_data
    }

    /// The planned step sequence, fixed for the lifetime of the session
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Providers whose permission forms are shown on the permissions step.
    /// Empty when the plan has no permissions step.
    pub fn providers(&self) -> &[PermissionFormProvider] {
        if self.permissions_editable() {
            &self.providers
        } else {
            &[]
        }
    }

    pub fn consent(&self) -> &ConsentState {
        &self.consent
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The step navigation must not move past, if any
    pub fn lock_boundary(&self) -> Option<StepName> {
        lock_boundary(
            &self.wizard_data,
            self.consent.authentication_consent_given,
            self.has_already_consented,
        )
    }

    fn permissions_editable(&self) -> bool {
        self.steps.iter().any(|s| s.name == StepName::Permissions)
    }

    fn ensure_open(&self) -> Result<(), ApiError> {
        if self.closed {
            Err(ApiError::stale_session(self.client_id.clone()))
        } else {
            Ok(())
        }
    }

    /// Record the user's consent to the authentication scopes
    pub fn give_authentication_consent(&mut self) -> Result<(), ApiError> {
        self.ensure_open()?;
        self.consent = self.consent.with_authentication_consent(true);
        debug!(client_id = %self.client_id, "authentication consent given");
        Ok(())
    }

    /// Withdraw consent given during this run; the lock boundary re-engages
    /// unless a previous connection already consented
    pub fn revoke_authentication_consent(&mut self) -> Result<(), ApiError> {
        self.ensure_open()?;
        self.consent = self.consent.with_authentication_consent(false);
        debug!(client_id = %self.client_id, "authentication consent revoked");
        Ok(())
    }

    /// Store the payload collected from one provider's permission form
    pub fn set_provider_permissions(
        &mut self,
        provider_key: &str,
        payload: serde_json::Value,
    ) -> Result<(), ApiError> {
        self.ensure_open()?;
        self.consent = self.consent.with_provider_permissions(provider_key, payload);
        debug!(
            client_id = %self.client_id,
            provider_key, "provider permissions updated"
        );
        Ok(())
    }

    /// Build the submission payload for the confirm action
    pub fn confirm(&self) -> Result<ConnectionSubmission, ApiError> {
        self.ensure_open()?;
        Ok(ConnectionSubmission {
            client_id: self.client_id.clone(),
            authentication_consent_given: self.consent.authentication_consent_given,
            permissions: self.consent.submission(&self.steps),
        })
    }

    /// Close the session (wizard dismissed or navigated away). Late results
    /// must not be applied: all mutators and `confirm` refuse afterwards.
    pub fn close(&mut self) {
        if !self.closed {
            info!(client_id = %self.client_id, "closed connection wizard");
            self.closed = true;
        }
    }
}
