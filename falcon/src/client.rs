use std::fmt;

use reqwest::{RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tokio::sync::OnceCell;
use url::Url;

use crate::{
    Cloud, Error,
    response::{ApiError, ApiResponse, ResponseBody},
};

/// Authenticated access to one Falcon tenant.
///
/// The OAuth2 bearer token is requested lazily with the first API call and
/// reused for every following call of the same client.
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    client_id: String,
    client_secret: String,
    member_cid: Option<String>,
    token: OnceCell<AccessToken>,
}

#[derive(Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("client_id", &self.client_id)
            .field("member_cid", &self.member_cid)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct TokenForm<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    member_cid: Option<&'a str>,
}

#[bon::bon]
impl Client {
    #[builder]
    pub fn new(
        #[builder(into)] client_id: String,
        #[builder(into)] client_secret: String,
        // defaults to the US-1 cloud
        #[builder(default = Cloud::default().base_url())]
        base_url: Url,
        // child CID for multi-tenant API clients
        #[builder(into)]
        member_cid: Option<String>,
        http: Option<reqwest::Client>,
    ) -> Self {
        Self {
            http: http.unwrap_or_default(),
            base_url: with_trailing_slash(base_url),
            client_id,
            client_secret,
            member_cid,
            token: OnceCell::new(),
        }
    }
}

impl Client {
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Exchange the client credentials for a bearer token, once per client
    pub async fn authenticate(&self) -> Result<&AccessToken, Error> {
        self.token.get_or_try_init(|| self.request_token()).await
    }

    async fn request_token(&self) -> Result<AccessToken, Error> {
        let url = self.endpoint("oauth2/token")?;
        log::debug!("Requesting access token for client {}", self.client_id);

        let response = self
            .http
            .post(url.clone())
            .form(&TokenForm {
                client_id: &self.client_id,
                client_secret: &self.client_secret,
                member_cid: self.member_cid.as_deref(),
            })
            .send()
            .await
            .map_err(|source| Error::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|source| Error::Http {
            url: url.clone(),
            source,
        })?;
        log::debug!("POST {} -> {}", url.path(), status.as_u16());

        // The token endpoint answers `201 Created`
        if status.is_success() {
            serde_json::from_slice(&bytes).map_err(|source| Error::Decode { url, source })
        } else {
            Err(Error::TokenRequest {
                status: status.as_u16(),
                errors: failure_body::<()>(status, &bytes).errors,
            })
        }
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    pub(crate) async fn get<Q, T>(&self, path: &str, query: &Q) -> Result<ApiResponse<T>, Error>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let request = self.http.get(url.clone()).query(query);
        self.send(url, request).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let request = self.http.post(url.clone()).json(body);
        self.send(url, request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        url: Url,
        request: RequestBuilder,
    ) -> Result<ApiResponse<T>, Error> {
        let token = self.authenticate().await?;

        let response = request
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|source| Error::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|source| Error::Http {
            url: url.clone(),
            source,
        })?;
        log::debug!("{} -> {}", url.path(), status.as_u16());

        let body = if status == StatusCode::OK {
            serde_json::from_slice(&bytes).map_err(|source| Error::Decode { url, source })?
        } else {
            failure_body(status, &bytes)
        };

        Ok(ApiResponse {
            status_code: status.as_u16(),
            body,
        })
    }
}

/// Decode the error part of a failed call. Resources of failed calls are dropped.
/// The returned body always carries at least one error, even if the gateway
/// answered with an empty or non JSON body.
fn failure_body<T>(status: StatusCode, bytes: &[u8]) -> ResponseBody<T> {
    let mut body = serde_json::from_slice::<ResponseBody<serde_json::Value>>(bytes)
        .map(|body| ResponseBody {
            meta: body.meta,
            resources: Vec::new(),
            errors: body.errors,
        })
        .unwrap_or_default();

    if body.errors.is_empty() {
        let text = String::from_utf8_lossy(bytes);
        let message = if text.trim().is_empty() || text.trim_start().starts_with('{') {
            status
                .canonical_reason()
                .map_or_else(|| format!("Request failed with status {status}"), str::to_owned)
        } else {
            text.trim().to_owned()
        };
        body.errors.push(ApiError {
            code: Some(i64::from(status.as_u16())),
            message,
        });
    }
    body
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
