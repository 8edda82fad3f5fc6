use std::fmt;

use serde::{Deserialize, Serialize};

/// Status code and decoded body of a Falcon API call.
/// Only `200` counts as success, everything else carries `body.errors`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub body: ResponseBody<T>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }

    /// Split the response into its resources or its errors
    pub fn into_result(self) -> Result<Vec<T>, Vec<ApiError>> {
        if self.is_success() {
            Ok(self.body.resources)
        } else {
            Err(self.body.errors)
        }
    }
}

/// The envelope every Falcon endpoint answers with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ResponseBody<T> {
    #[serde(default)]
    pub meta: Meta,
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub resources: Vec<T>,
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub errors: Vec<ApiError>,
}

impl<T> Default for ResponseBody<T> {
    fn default() -> Self {
        Self {
            meta: Meta::default(),
            resources: Vec::new(),
            errors: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub query_time: Option<f64>,
    #[serde(default)]
    pub powered_by: Option<String>,
    #[serde(default)]
    pub trace_id: Option<String>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// A single error entry as reported by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: Option<i64>,
    pub message: String,
}

impl ApiError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} ({code})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Falcon sends `"resources": null` on most failures
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
