//! Test email subcommand.

use crate::app::AppContext;
use crate::config::Settings;
use crate::error::{CliError, CliResult};
use crate::notifier::Delivery;
use crate::output;
use crate::types::EmailAddress;
use clap::Parser;

/// Send a sample digest to an address.
#[derive(Parser, Debug)]
pub struct TestEmailCommand {
    /// Recipient address
    #[arg(value_name = "EMAIL")]
    pub to: String,
}

impl TestEmailCommand {
    /// Execute the test-email command.
    pub async fn execute(&self, settings: Settings, quiet: bool) -> CliResult<()> {
        let to = EmailAddress::parse(&self.to).map_err(|e| CliError::Other(e.to_string()))?;

        let ctx = AppContext::from_settings(settings)?;
        let delivery = ctx.notifier.send_test_email(&to).await?;

        if !quiet {
            match delivery {
                Delivery::Sent => output::print_success(&format!("Test email sent to {to}")),
                Delivery::Skipped => output::print_info(&format!(
                    "Email delivery is not configured, the message to {to} was only logged"
                )),
            }
        }
        Ok(())
    }
}
