//! Reveal the uninstall token of a CrowdStrike Falcon sensor by hostname.
//!
//! ```no_run
//! use uninstall_token::{Credentials, LookupRequest, TokenLookupService};
//!
//! # async fn run() -> Result<(), uninstall_token::LookupError> {
//! let service = TokenLookupService::new(falcon::Cloud::Us2.base_url());
//! let token = service
//!     .retrieve_uninstall_token(LookupRequest::new(
//!         Credentials::new("client-id", "client-secret"),
//!         "web-01",
//!         "CHG-1234 sensor reinstall",
//!     ))
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod lookup;

pub use error::LookupError;
pub use lookup::{Credentials, LookupRequest, TokenLookupService, UninstallToken};
