use clap::Parser;
use jobdesk_cli::commands::JobdeskCli;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();

    let cli = JobdeskCli::parse();
    jobdesk_cli::commands::run(cli)
}
