use serde::{Deserialize, Serialize};

use crate::{ApiResponse, Client, Error};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevealUninstallTokenRequest {
    pub device_id: String,
    /// Recorded in the Falcon audit log together with the reveal
    pub audit_message: String,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UninstallTokenResource {
    /// Not every tenant echoes the device id back
    #[serde(default)]
    pub device_id: String,
    #[serde(default)]
    pub seed_id: Option<u64>,
    pub uninstall_token: String,
}

impl std::fmt::Debug for UninstallTokenResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UninstallTokenResource")
            .field("device_id", &self.device_id)
            .field("seed_id", &self.seed_id)
            .field("uninstall_token", &"<redacted>")
            .finish()
    }
}

impl Client {
    /// Reveal the uninstall token of a device. The reveal is audited server side
    /// with `audit_message`.
    pub async fn reveal_uninstall_token(
        &self,
        request: &RevealUninstallTokenRequest,
    ) -> Result<ApiResponse<UninstallTokenResource>, Error> {
        log::debug!("Revealing uninstall token for device {}", request.device_id);
        self.post("policy/combined/reveal-uninstall-token/v1", request)
            .await
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn only_the_token_is_required() {
        let resource: UninstallTokenResource =
            serde_json::from_str(r#"{"uninstall_token": "TOKEN-ABC"}"#).unwrap();
        assert_eq!(resource.uninstall_token, "TOKEN-ABC");
        assert_eq!(resource.device_id, "");
        assert_eq!(resource.seed_id, None);
    }

    #[test]
    fn token_is_not_debug_printed() {
        let resource = UninstallTokenResource {
            device_id: "abc".to_owned(),
            seed_id: Some(7),
            uninstall_token: "TOKEN-ABC".to_owned(),
        };
        assert!(!format!("{resource:?}").contains("TOKEN-ABC"));
    }
}
