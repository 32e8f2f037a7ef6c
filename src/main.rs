use clap::Parser;

use keyview::commands::Cli;
use keyview::logging;

#[tokio::main]
async fn main() -> miette::Result<()> {
    miette::set_panic_hook();

    let cli = Cli::parse();

    // Handle --no-color flag
    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    logging::init(&cli).map_err(miette::Report::new)?;

    cli.run().await.map_err(miette::Report::new)
}
