//! Mazer - a content manager for Ansible collections
//!
//! Entry point: parse the command line, set up logging, run the action and map
//! the result to an exit code.

use colored::Colorize;
use mazer::cli::{Cli, Outcome, unknown_action};
use mazer::core::{as_domain_error, user_friendly_error};
use mazer::utils::init_logging;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => match unknown_action(&e) {
            Some(unknown) => {
                user_friendly_error(unknown.into()).display();
                return ExitCode::from(2);
            }
            None => e.exit(),
        },
    };

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    init_logging(cli.log_level());

    match cli.execute().await {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::PartialSuccess {
            failed,
        }) => {
            println!(
                "{}",
                format!("Finished with {} failed content item(s): {}", failed.len(), failed.join(", "))
                    .yellow()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            if as_domain_error(&e).is_none() {
                tracing::debug!("{e:?}");
            }
            user_friendly_error(e).display();
            ExitCode::FAILURE
        }
    }
}
