use clap::Parser;
use pagesplit_server::cli::output::Styled;
use pagesplit_server::cli::{self, Cli, Command};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.quiet {
        std::env::set_var("PAGESPLIT_QUIET", "1");
    }
    if cli.no_color {
        std::env::set_var("PAGESPLIT_NO_COLOR", "1");
    }
    init_tracing(&cli);

    if let Err(e) = cli::run(cli).await {
        eprintln!("  {} {e:#}", Styled::new().fail_sym());
        std::process::exit(1);
    }
}

fn init_tracing(cli: &Cli) {
    // The server logs requests; one-shot commands stay quiet unless asked.
    let default = match cli.command {
        Command::Serve => "pagesplit=info,pagesplit_server=info",
        _ => "pagesplit=warn,pagesplit_server=warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}
