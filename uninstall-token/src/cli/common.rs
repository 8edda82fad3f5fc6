use url::Url;

use crate::cli_args::Config;

/// An explicit base url wins over the cloud region
pub fn get_base_url(config: &Config) -> Url {
    if let Some(url) = &config.base_url {
        return url.clone();
    }
    let cloud = config.cloud.unwrap_or_default();
    log::debug!("Using Falcon cloud {cloud}");
    cloud.base_url()
}

/// Use `value` if given, otherwise ask the operator
pub fn value_or_prompt(value: Option<String>, prompt: &str) -> Result<String, rootcause::Report> {
    if let Some(value) = value {
        Ok(value)
    } else {
        Ok(inquire::Text::new(prompt).prompt()?)
    }
}
