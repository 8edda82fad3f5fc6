use std::fmt;

use falcon::{DeviceQuery, RevealUninstallTokenRequest, fql};
use url::Url;

use crate::LookupError;

/// API client credentials. Only live for a single lookup.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new<S: Into<String>>(client_id: S, client_secret: S) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Everything the operator has to provide for one lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub credentials: Credentials,
    pub hostname: String,
    /// Stored in the Falcon audit log when the token is revealed
    pub audit_comment: String,
}

impl LookupRequest {
    pub fn new<S: Into<String>>(credentials: Credentials, hostname: S, audit_comment: S) -> Self {
        Self {
            credentials,
            hostname: hostname.into(),
            audit_comment: audit_comment.into(),
        }
    }

    /// Trim every field and reject the request if any of them ends up empty
    pub fn validate(self) -> Result<Self, LookupError> {
        let trimmed = Self {
            credentials: Credentials {
                client_id: self.credentials.client_id.trim().to_owned(),
                client_secret: self.credentials.client_secret.trim().to_owned(),
            },
            hostname: self.hostname.trim().to_owned(),
            audit_comment: self.audit_comment.trim().to_owned(),
        };

        let complete = [
            &trimmed.credentials.client_id,
            &trimmed.credentials.client_secret,
            &trimmed.hostname,
            &trimmed.audit_comment,
        ]
        .iter()
        .all(|field| !field.is_empty());

        if complete {
            Ok(trimmed)
        } else {
            Err(LookupError::Validation)
        }
    }
}

/// The revealed secret. `Debug` never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct UninstallToken(String);

impl UninstallToken {
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for UninstallToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UninstallToken(<redacted>)")
    }
}

/// Resolves a hostname to its device id and reveals the uninstall token of that device.
///
/// The service itself holds no credentials: every call authenticates with the
/// credentials of its request, so two identical calls behave identically.
#[derive(Debug, Clone)]
pub struct TokenLookupService {
    base_url: Url,
    member_cid: Option<String>,
    http: reqwest::Client,
}

impl TokenLookupService {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            member_cid: None,
            http: reqwest::Client::new(),
        }
    }

    #[must_use]
    pub fn with_member_cid(mut self, member_cid: Option<String>) -> Self {
        self.member_cid = member_cid;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Look up `hostname` and reveal the uninstall token of the first matching device.
    ///
    /// Nothing is sent unless every field of the request is filled in.
    /// Nothing is retried.
    pub async fn retrieve_uninstall_token(
        &self,
        request: LookupRequest,
    ) -> Result<UninstallToken, LookupError> {
        let LookupRequest {
            credentials,
            hostname,
            audit_comment,
        } = request.validate()?;

        let client = falcon::Client::builder()
            .client_id(credentials.client_id)
            .client_secret(credentials.client_secret)
            .base_url(self.base_url.clone())
            .maybe_member_cid(self.member_cid.clone())
            .http(self.http.clone())
            .build();

        let device_id = resolve_device_id(&client, &hostname).await?;
        log::info!("Resolved {hostname} to device {device_id}");

        let response = client
            .reveal_uninstall_token(&RevealUninstallTokenRequest {
                device_id: device_id.clone(),
                audit_message: audit_comment,
            })
            .await?;
        let status = response.status_code;

        let resource = response
            .into_result()
            .map_err(|errors| LookupError::Remote { status, errors })?
            .into_iter()
            .next()
            .ok_or_else(|| {
                LookupError::Transport(format!(
                    "The reveal response for device {device_id} did not contain an uninstall token"
                ))
            })?;

        log::info!("Revealed uninstall token for {hostname}");
        Ok(UninstallToken(resource.uninstall_token))
    }
}

async fn resolve_device_id(
    client: &falcon::Client,
    hostname: &str,
) -> Result<String, LookupError> {
    let query = DeviceQuery::builder()
        .filter(fql::hostname_prefix(hostname))
        .build();
    let response = client.query_devices_by_filter(&query).await?;
    let status = response.status_code;

    let devices = response
        .into_result()
        .map_err(|errors| LookupError::Remote { status, errors })?;

    if devices.len() > 1 {
        log::warn!(
            "{} devices match {hostname}, using the first one",
            devices.len()
        );
    }

    devices
        .into_iter()
        .next()
        .ok_or_else(|| LookupError::EmptyResult {
            hostname: hostname.to_owned(),
        })
}
