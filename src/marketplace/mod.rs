//! Marketplace catalog model and the bounded pagination aggregator
//!
//! This module provides:
//! - The catalog app model and paged wire types
//! - Collaborator traits for the remote marketplace API and the locally-known
//!   connected app ids
//! - `GetAllAppsQuery`, which walks the paginated listing under a hard
//!   request cap

mod client;
mod query;

pub use client::WebMarketplaceClient;
pub use query::{GetAllAppsQuery, MAX_REQUESTS};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ApiError;

/// An app from the marketplace catalog, decorated with the local
/// connection status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct App {
    /// Unique identifier in the marketplace
    pub id: String,
    /// Display name
    pub name: String,
    /// Logo image URL
    pub logo: String,
    /// Author/vendor name
    pub author: String,
    /// Partner program name (if the vendor is a partner)
    pub partner: Option<String>,
    /// Short description
    pub description: Option<String>,
    /// Full URL to the app's marketplace page
    pub url: String,
    /// Category names
    #[serde(default)]
    pub categories: Vec<String>,
    /// Whether the app went through the certification program
    #[serde(default)]
    pub certified: bool,
    /// URL the user is sent to in order to activate the app
    pub activate_url: String,
    /// OAuth callback URL registered by the app
    pub callback_url: String,
    /// Whether this app is already connected locally. Derived from the
    /// connected-ids set, never taken from the wire.
    #[serde(default)]
    pub connected: bool,
}

/// App entry as returned by the marketplace listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireApp {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub author: String,
    pub partner: Option<String>,
    pub description: Option<String>,
    pub url: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub certified: bool,
    pub activate_url: String,
    pub callback_url: String,
}

impl WireApp {
    /// Decorate a wire entry with the local connection status
    pub fn into_app(self, connected: bool) -> App {
        App {
            id: self.id,
            name: self.name,
            logo: self.logo,
            author: self.author,
            partner: self.partner,
            description: self.description,
            url: self.url,
            categories: self.categories,
            certified: self.certified,
            activate_url: self.activate_url,
            callback_url: self.callback_url,
            connected,
        }
    }
}

/// One page of the marketplace listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppPage {
    /// Apps on this page
    pub items: Vec<WireApp>,
    /// Page size echoed by the marketplace. Authoritative for offset
    /// advancement - may differ from the requested limit.
    pub limit: usize,
    /// Total count reported by the marketplace. May exceed the items
    /// actually fetched and may drift between calls.
    pub total: usize,
}

/// Result of a full catalog aggregation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllApps {
    /// Total reported by the marketplace on the last page fetched.
    /// May exceed `apps.len()` when the request cap was hit.
    pub total: usize,
    /// Apps collected, in fetch order
    pub apps: Vec<App>,
}

/// Remote marketplace listing API
#[async_trait]
pub trait WebMarketplaceApi: Send + Sync {
    /// Fetch one page of the catalog listing
    async fn get_apps(&self, offset: usize, limit: usize) -> Result<AppPage, ApiError>;
}

/// Locally-known connected app identifiers
pub trait ConnectedApps: Send + Sync {
    /// Ids of apps already connected on this installation
    fn connected_app_ids(&self) -> HashSet<String>;
}

impl ConnectedApps for HashSet<String> {
    fn connected_app_ids(&self) -> HashSet<String> {
        self.clone()
    }
}

#[cfg(test)]
pub(crate) fn wire_app(id: &str) -> WireApp {
    WireApp {
        id: id.to_string(),
        name: format!("App {id}"),
        logo: format!("https://marketplace.test/logos/{id}.png"),
        author: "Test Vendor".to_string(),
        partner: None,
        description: None,
        url: format!("https://marketplace.test/apps/{id}"),
        categories: vec!["ecommerce".to_string()],
        certified: false,
        activate_url: format!("https://apps.test/{id}/activate"),
        callback_url: format!("https://apps.test/{id}/callback"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_app_sets_connected() {
        let app = wire_app("a1").into_app(true);
        assert!(app.connected);
        assert_eq!(app.id, "a1");

        let app = wire_app("a2").into_app(false);
        assert!(!app.connected);
    }

    #[test]
    fn test_connected_apps_for_hashset() {
        let ids: HashSet<String> = ["a1".to_string(), "a2".to_string()].into();
        assert_eq!(ids.connected_app_ids().len(), 2);
        assert!(ids.connected_app_ids().contains("a1"));
    }
}
