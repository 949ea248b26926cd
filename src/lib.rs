//! appconnect - app-connection wizard core for a PIM platform
//!
//! Two loosely related components around the "external app connection"
//! domain:
//!
//! - [`marketplace`]: the catalog model and `GetAllAppsQuery`, which walks
//!   the remote marketplace's paginated listing under a hard request cap,
//!   decorating each app with its local connection status.
//! - [`wizard`]: the connection wizard core - a pure step planner, consent
//!   state with immutable updates, the permission-form registry, and the
//!   `WizardSession` coordinator consumed by a rendering layer.
//!
//! HTTP serving, persistence, and rendering are host-application concerns;
//! this crate only exposes collaborator traits for the remote calls it makes.

pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod marketplace;
pub mod wizard;

pub use error::ApiError;
