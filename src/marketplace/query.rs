//! Bounded pagination over the marketplace listing

use std::sync::Arc;
use tracing::{debug, warn};

use super::{AllApps, ConnectedApps, WebMarketplaceApi};
use crate::error::ApiError;

/// Hard cap on listing requests per aggregation run. A safety valve against
/// runaway pagination from a misbehaving or inconsistent marketplace.
pub const MAX_REQUESTS: usize = 10;

/// Fetches the whole marketplace catalog, page by page, decorating each app
/// with its local connection status.
///
/// The run stops as soon as any of these holds:
/// - the last page came back empty (no more data),
/// - the accumulated count reached the marketplace-reported total,
/// - [`MAX_REQUESTS`] pages were fetched.
///
/// Hitting the cap yields a silent partial result (`apps.len() < total`),
/// not an error. Fetch errors propagate unretried and yield no result.
pub struct GetAllAppsQuery {
    web_marketplace_api: Arc<dyn WebMarketplaceApi>,
    connected_apps: Arc<dyn ConnectedApps>,
    pagination: usize,
}

impl GetAllAppsQuery {
    /// Create a query over the given marketplace API, using `pagination` as
    /// the requested page size
    pub fn new(
        web_marketplace_api: Arc<dyn WebMarketplaceApi>,
        connected_apps: Arc<dyn ConnectedApps>,
        pagination: usize,
    ) -> Self {
        Self {
            web_marketplace_api,
            connected_apps,
            pagination,
        }
    }

    /// Run the aggregation
    pub async fn execute(&self) -> Result<AllApps, ApiError> {
        let mut apps = Vec::new();
        let mut requests = 0;
        let mut offset = 0;

        let connected_ids = self.connected_apps.connected_app_ids();

        loop {
            let page = self
                .web_marketplace_api
                .get_apps(offset, self.pagination)
                .await?;
            requests += 1;
            debug!(
                offset,
                requests,
                page_items = page.items.len(),
                total = page.total,
                "fetched marketplace page"
            );

            // The echoed limit is authoritative: a marketplace serving a
            // different page size than requested must still advance the
            // cursor by what it actually served.
            if page.limit == 0 && !page.items.is_empty() {
                warn!("marketplace echoed limit=0 on a non-empty page; offset will not advance");
            }
            offset += page.limit;

            let page_count = page.items.len();
            for item in page.items {
                let connected = connected_ids.contains(&item.id);
                apps.push(item.into_app(connected));
            }

            let more_data = page_count > 0 && apps.len() < page.total;
            if !more_data || requests >= MAX_REQUESTS {
                if requests >= MAX_REQUESTS && apps.len() < page.total {
                    warn!(
                        fetched = apps.len(),
                        total = page.total,
                        "request cap reached before total; returning partial catalog"
                    );
                }
                return Ok(AllApps {
                    total: page.total,
                    apps,
                });
            }
        }
    }
}
