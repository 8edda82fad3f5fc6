use crate::response::ApiError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Request to {url} failed: {source}")]
    Http {
        url: url::Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("Could not decode the response of {url}: {source}")]
    Decode {
        url: url::Url,
        #[source]
        source: serde_json::Error,
    },
    #[error("Could not build the endpoint url: {0}")]
    Url(#[from] url::ParseError),
    /// The OAuth2 token endpoint answered with a non 2xx status, be it
    /// rejected credentials, rate limiting or a server fault
    #[error("The token endpoint answered with status {status}")]
    TokenRequest { status: u16, errors: Vec<ApiError> },
}
