use clap::Parser;
use dotenv::dotenv;
use relay_scripts::{cli::Cli, errors::ScriptError};
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    // Load .env file
    dotenv().ok();

    let Cli {
        priv_key,
        rpc_url,
        artifacts,
        output,
        command,
    } = Cli::parse();

    // Logs go to stderr, stdout only carries the addresses to copy
    tracing_subscriber::fmt()
        .pretty()
        .with_writer(std::io::stderr)
        .init();

    command
        .run(&rpc_url, priv_key.as_deref(), &artifacts, &output)
        .await
        .inspect_err(|e| error!("{e}"))
}
