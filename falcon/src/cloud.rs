use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use url::Url;

/// Falcon cloud region. Each region has its own API host.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, Default)]
pub enum Cloud {
    #[default]
    #[serde(rename = "us-1", alias = "us1")]
    Us1,
    #[serde(rename = "us-2", alias = "us2")]
    Us2,
    #[serde(rename = "eu-1", alias = "eu1")]
    Eu1,
    #[serde(rename = "us-gov-1", alias = "usgov1")]
    UsGov1,
    #[serde(rename = "us-gov-2", alias = "usgov2")]
    UsGov2,
}

#[derive(thiserror::Error, Debug)]
#[error("Unknown cloud `{0}`. Expected one of us-1, us-2, eu-1, us-gov-1, us-gov-2")]
pub struct UnknownCloud(String);

impl Cloud {
    pub fn host(self) -> &'static str {
        match self {
            Self::Us1 => "api.crowdstrike.com",
            Self::Us2 => "api.us-2.crowdstrike.com",
            Self::Eu1 => "api.eu-1.crowdstrike.com",
            Self::UsGov1 => "api.laggar.gcw.crowdstrike.com",
            Self::UsGov2 => "api.us-gov-2.crowdstrike.mil",
        }
    }

    pub fn base_url(self) -> Url {
        Url::parse(&format!("https://{}/", self.host())).expect("valid cloud host")
    }
}

impl fmt::Display for Cloud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Us1 => "us-1",
            Self::Us2 => "us-2",
            Self::Eu1 => "eu-1",
            Self::UsGov1 => "us-gov-1",
            Self::UsGov2 => "us-gov-2",
        })
    }
}

impl FromStr for Cloud {
    type Err = UnknownCloud;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], "");
        match normalized.as_str() {
            "us1" => Ok(Self::Us1),
            "us2" => Ok(Self::Us2),
            "eu1" => Ok(Self::Eu1),
            "usgov1" => Ok(Self::UsGov1),
            "usgov2" => Ok(Self::UsGov2),
            _ => Err(UnknownCloud(s.to_owned())),
        }
    }
}
