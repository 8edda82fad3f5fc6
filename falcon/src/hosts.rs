use serde::Serialize;

use crate::{ApiResponse, Client, Error};

/// Query parameters of `QueryDevicesByFilter`
#[derive(Debug, Clone, Serialize, bon::Builder)]
pub struct DeviceQuery {
    /// FQL filter, see [`crate::fql`]
    #[builder(into)]
    pub filter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// e.g. `hostname.asc`
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub sort: Option<String>,
}

impl Client {
    /// Search for device ids matching the filter. Resources are agent ids (AIDs).
    pub async fn query_devices_by_filter(
        &self,
        query: &DeviceQuery,
    ) -> Result<ApiResponse<String>, Error> {
        log::debug!("Querying devices with filter {}", query.filter);
        self.get("devices/queries/devices/v1", query).await
    }
}
