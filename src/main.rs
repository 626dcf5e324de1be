use clap::Parser;
use ptail::cli::Cli;
use ptail::config::build_config;
use ptail::tui;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = build_config(&cli);

    if config.verbose {
        eprintln!("ptail: effective config: {:?}", config);
    }

    if let Err(e) = tui::run_tui(config) {
        eprintln!("ptail: TUI error: {}", e);
        std::process::exit(1);
    }
}
