use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trellis::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trellis=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init { path, name }) => {
            trellis::cli::init::run(path, name).await?;
        }
        Some(Commands::Serve { host, port }) => {
            trellis::cli::serve::run(&cli.config, host, port).await?;
        }
        Some(Commands::Migrate) => {
            trellis::cli::migrate::run(&cli.config).await?;
        }
        Some(Commands::User { command }) => {
            trellis::cli::user::run(&cli.config, command).await?;
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
