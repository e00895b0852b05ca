//! Serve subcommand implementation.

use crate::app::AppContext;
use crate::config::Settings;
use crate::error::CliResult;
use crate::output;
use crate::server;
use clap::Parser;
use tracing::info;

/// Run the HTTP service.
#[derive(Parser, Debug)]
pub struct ServeCommand {
    /// Address to listen on (overrides settings and TOOLWATCH_BIND)
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<String>,
}

impl ServeCommand {
    /// Execute the serve command.
    pub async fn execute(&self, mut settings: Settings, quiet: bool) -> CliResult<()> {
        if let Some(bind) = &self.bind {
            settings.bind_address = bind.clone();
        }
        if !quiet {
            if settings.cron_secret.is_none() {
                output::print_warning(
                    "CRON_SECRET not set, /api/cron accepts unauthenticated calls",
                );
            }
            if !settings.email_delivery_configured() {
                output::print_warning("Email delivery is not configured, digests are only logged");
            }
            output::print_info(&format!("Serving on http://{}", settings.bind_address));
        }

        let addr = settings.bind_address.clone();
        let ctx = AppContext::from_settings(settings)?;
        info!(mailer = ctx.notifier.mailer_name(), "Service ready");

        server::run_server(ctx.server_state(), &addr).await?;
        Ok(())
    }
}
