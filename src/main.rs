use clap::Parser;
use little_r_processor::cli::{run, Cli};
use little_r_processor::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
