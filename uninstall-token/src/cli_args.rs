use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use falcon::Cloud;
use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Parser)]
#[command(version, about = "Reveal CrowdStrike Falcon sensor uninstall tokens")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub config: Config,

    /// Config file. Defaults to `$XDG_CONFIG_HOME/uninstall-token/config.toml`
    #[arg(long = "config", global = true, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// More output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up a host and reveal its uninstall token
    Retrieve(RetrieveArgs),
    /// Show the effective configuration
    Config,
}

#[derive(Args)]
pub struct RetrieveArgs {
    /// Hostname (or hostname prefix) of the device
    #[arg(long)]
    pub hostname: Option<String>,
    /// Justification recorded in the Falcon audit log
    #[arg(long)]
    pub comment: Option<String>,
    /// API client secret
    #[arg(long, env = "FALCON_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,
    /// Only print the token, e.g. to pipe it into a clipboard tool
    #[arg(long)]
    pub raw: bool,
}

/// Settings that may come from the config file, `FALCON_*` variables or flags.
/// The client secret is never part of it.
#[derive(Args, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Falcon cloud region: us-1, us-2, eu-1, us-gov-1, us-gov-2
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud: Option<Cloud>,

    /// API base url, overrides `--cloud`
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<Url>,

    /// API client id
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// Child CID for multi-tenant API clients
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_cid: Option<String>,
}

impl Config {
    /// Merge config file, environment and the flags in `self`, in that order
    pub fn load(self, file: Option<&Path>) -> Result<Self, figment::Error> {
        let file = file.map(Path::to_path_buf).or_else(default_config_file);

        let mut figment = Figment::new();
        if let Some(file) = file {
            log::debug!("Reading config from {}", file.display());
            figment = figment.merge(Toml::file(file));
        }

        figment
            .merge(Env::prefixed("FALCON_").only(&["cloud", "base_url", "client_id", "member_cid"]))
            .merge(Serialized::defaults(self))
            .extract()
    }
}

fn default_config_file() -> Option<PathBuf> {
    xdg::BaseDirectories::with_prefix("uninstall-token").find_config_file("config.toml")
}

#[cfg(test)]
mod test {
    use figment::Jail;

    use super::*;

    #[test]
    fn flags_override_env_override_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                    cloud = "us-2"
                    client_id = "from-file"
                    member_cid = "child"
                "#,
            )?;
            jail.set_env("FALCON_CLIENT_ID", "from-env");

            let flags = Config {
                cloud: Some(Cloud::Eu1),
                ..Config::default()
            };
            let config = flags.load(Some(Path::new("config.toml")))?;

            assert_eq!(
                config,
                Config {
                    cloud: Some(Cloud::Eu1),
                    base_url: None,
                    client_id: Some("from-env".to_owned()),
                    member_cid: Some("child".to_owned()),
                }
            );
            Ok(())
        });
    }

    #[test]
    fn secret_is_not_read_into_config() {
        Jail::expect_with(|jail| {
            jail.set_env("FALCON_CLIENT_SECRET", "super-secret");
            jail.set_env("FALCON_BASE_URL", "http://localhost:4000/");

            let config = Config::default().load(Some(Path::new("missing.toml")))?;

            assert_eq!(
                config.base_url.as_ref().map(Url::as_str),
                Some("http://localhost:4000/")
            );
            assert!(!format!("{config:?}").contains("super-secret"));
            Ok(())
        });
    }
}
