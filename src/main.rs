use clap::Parser;
use truthio::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Verify(args) => cli::verify::run(args).await,
        Command::Serve => cli::serve::run().await,
    }
}
