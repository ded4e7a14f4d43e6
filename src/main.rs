use clap::Parser;
use relgraph::app::{handle_fatal_error, init_logging, AppConfig};
use relgraph::cli::{execute_command, Cli};

fn main() {
    let cli = Cli::parse();

    let app_config = AppConfig::new(cli.verbose);
    init_logging(&app_config);

    if let Err(e) = execute_command(cli.command, cli.config.as_deref()) {
        handle_fatal_error(e, cli.verbose);
    }
}
