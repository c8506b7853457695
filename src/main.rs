use clap::Parser;
use miette::{IntoDiagnostic, Result};
use webhook_solver::application::workflow::WebhookWorkflow;
use webhook_solver::config::{Cli, WorkflowConfig};
use webhook_solver::infrastructure::http::HttpWebhookClient;
use webhook_solver::telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(&cli.log_level);

    let config = WorkflowConfig::try_from(cli).into_diagnostic()?;
    let client =
        HttpWebhookClient::new(config.base_url.clone(), config.timeout).into_diagnostic()?;

    // The same client serves both ports.
    let workflow = WebhookWorkflow::new(
        Box::new(client.clone()),
        Box::new(client),
        config.registrant,
    )
    .with_token_retry(config.token_retry)
    .with_submission_retry(config.submission_retry);

    let report = workflow.run().await.into_diagnostic()?;
    println!("{}", report.outcome);

    Ok(())
}
