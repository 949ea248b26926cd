//! Registry of pluggable permission-form providers
//!
//! Each provider contributes one permission form to the wizard's permissions
//! step. Providers are opaque to the planner beyond their key - payloads
//! collected from their forms are routed by key only.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Descriptor for one permission-form provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionFormProvider {
    /// Key the collected payload is routed by
    pub key: String,
    /// Display label for the form section
    pub label: String,
}

impl PermissionFormProvider {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Source of the permission-form providers available on this installation
#[async_trait]
pub trait PermissionFormRegistry: Send + Sync {
    /// All registered providers, in registration order
    async fn all(&self) -> Result<Vec<PermissionFormProvider>, ApiError>;
}

/// In-memory registry populated at composition time
#[derive(Debug, Clone, Default)]
pub struct StaticPermissionFormRegistry {
    providers: Vec<PermissionFormProvider>,
}

impl StaticPermissionFormRegistry {
    pub fn new(providers: Vec<PermissionFormProvider>) -> Self {
        Self { providers }
    }

    /// Add a provider to the registry
    pub fn register(&mut self, provider: PermissionFormProvider) {
        self.providers.push(provider);
    }

    /// Look up a provider by key
    pub fn get(&self, key: &str) -> Option<&PermissionFormProvider> {
        self.providers.iter().find(|p| p.key == key)
    }
}

#[async_trait]
impl PermissionFormRegistry for StaticPermissionFormRegistry {
    async fn all(&self) -> Result<Vec<PermissionFormProvider>, ApiError> {
        Ok(self.providers.clone())
    }
}
