//! Bindings for the parts of the CrowdStrike Falcon API needed to look up hosts
//! and reveal sensor uninstall tokens.
//!
//! ```no_run
//! # async fn run() -> Result<(), falcon::Error> {
//! let client = falcon::Client::builder()
//!     .client_id("client-id")
//!     .client_secret("client-secret")
//!     .base_url(falcon::Cloud::Eu1.base_url())
//!     .build();
//!
//! let query = falcon::DeviceQuery::builder()
//!     .filter(falcon::fql::hostname_prefix("web-01"))
//!     .build();
//! let devices = client.query_devices_by_filter(&query).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod cloud;
mod error;
pub mod fql;
mod hosts;
mod response;
mod sensor_update_policy;

pub use client::{AccessToken, Client};
pub use cloud::{Cloud, UnknownCloud};
pub use error::Error;
pub use hosts::DeviceQuery;
pub use response::{ApiError, ApiResponse, Meta, Pagination, ResponseBody};
pub use sensor_update_policy::{RevealUninstallTokenRequest, UninstallTokenResource};
