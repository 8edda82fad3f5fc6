use console::style;

use crate::{cli::common, cli_args::Config};

#[expect(clippy::print_stdout, reason = "printing the config is the command")]
pub fn show(config: &Config) {
    let unset = style("<unset>").dim().to_string();
    let cloud = config
        .cloud
        .map_or_else(|| format!("{} (default)", falcon::Cloud::default()), |c| c.to_string());

    println!("{}", style("Configuration:").underlined());
    println!("  cloud:      {cloud}");
    println!("  base_url:   {}", common::get_base_url(config));
    println!(
        "  client_id:  {}",
        config.client_id.as_deref().unwrap_or(&unset)
    );
    println!(
        "  member_cid: {}",
        config.member_cid.as_deref().unwrap_or(&unset)
    );
}
