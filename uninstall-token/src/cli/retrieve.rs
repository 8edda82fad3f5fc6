use console::style;
use log::{error, info};
use rootcause::{Report, bail};
use uninstall_token::{
    Credentials, LookupError, LookupRequest, TokenLookupService, UninstallToken,
};

use crate::{
    cli::common,
    cli_args::{Config, RetrieveArgs},
};

pub async fn retrieve(config: &Config, args: RetrieveArgs) -> Result<(), Report> {
    let service = TokenLookupService::new(common::get_base_url(config))
        .with_member_cid(config.member_cid.clone());

    let client_id = common::value_or_prompt(config.client_id.clone(), "API Client:")?;

    let client_secret = if let Some(secret) = args.client_secret {
        secret
    } else {
        inquire::Password::new("API Secret:")
            .without_confirmation()
            .prompt()?
    };

    let hostname = common::value_or_prompt(args.hostname, "Hostname:")?;
    let comment = common::value_or_prompt(args.comment, "Audit Comment:")?;

    info!(
        "Retrieving uninstall token for {} from {}...",
        hostname.trim(),
        service.base_url()
    );

    let request = LookupRequest::new(Credentials::new(client_id, client_secret), hostname, comment);

    match service.retrieve_uninstall_token(request).await {
        Ok(token) => {
            print_token(&token, args.raw);
            Ok(())
        }
        Err(err) => {
            for message in err.messages() {
                error!("{message}");
            }
            bail!("{}", failure_summary(&err))
        }
    }
}

/// Every message of a failed lookup, independent of the log filter
fn failure_summary(err: &LookupError) -> String {
    format!(
        "Could not retrieve the uninstall token: {}",
        err.messages().join("; ")
    )
}

#[expect(clippy::print_stdout, reason = "the token is the output of the command")]
fn print_token(token: &UninstallToken, raw: bool) {
    if raw {
        println!("{}", token.expose());
    } else {
        println!(
            "{} {}",
            style("Uninstall Token:").bold(),
            style(token.expose()).green()
        );
    }
}

#[cfg(test)]
mod test {
    use falcon::ApiError;

    use super::*;

    #[test]
    fn summary_carries_every_remote_message() {
        let err = LookupError::Remote {
            status: 403,
            errors: vec![ApiError::new("access denied"), ApiError::new("missing scope")],
        };
        assert_eq!(
            failure_summary(&err),
            "Could not retrieve the uninstall token: access denied; missing scope"
        );
    }

    #[test]
    fn summary_names_the_missing_host() {
        let err = LookupError::EmptyResult {
            hostname: "web-01".to_owned(),
        };
        assert_eq!(
            failure_summary(&err),
            "Could not retrieve the uninstall token: No matching host for `web-01`"
        );
    }
}
