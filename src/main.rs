use clap::Parser;
use odsgrid::cli::commands::Cli;
use odsgrid::cli::handlers::{self, Context};
use odsgrid::io::config_io;
use odsgrid::logging;

fn main() {
    let cli = Cli::parse();
    if cli.command.is_none() {
        logging::init_tui(&config_io::state_dir());
    } else {
        logging::init_cli();
    }

    let ctx = match Context::from_cli(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        None => {
            // No subcommand → launch TUI
            let config_dir = ctx.config_dir();
            if let Err(e) = odsgrid::tui::run(ctx.config, config_dir) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(cmd) => {
            if let Err(e) = handlers::dispatch(&ctx, cmd) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
