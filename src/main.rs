use clap::Parser;
use log::{debug, LevelFilter};

mod args;
mod tally;

use crate::args::{Args, Command};
use crate::tally::config_reader::load_settings;
use crate::tally::TallyResult;

async fn run(args: Args) -> TallyResult<()> {
    let settings = load_settings(args.config.as_deref())?;
    match args.command {
        Command::Serve { bind } => {
            let config = settings.service_config(bind.as_deref());
            tally::server::serve(&config).await
        }
        Command::Count {
            input,
            input_type,
            out,
            reference,
        } => tally::run_count(
            &input,
            input_type.as_deref(),
            out.as_deref(),
            reference.as_deref(),
        )
        .map(|_| ()),
        Command::Report {
            input,
            input_type,
            sample_size,
            seed,
            chatbot,
        } => {
            let config = settings.report_config(sample_size, seed);
            tally::report::run_report(&input, input_type.as_deref(), &config, chatbot)
                .await
                .map(|_| ())
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let dotenv = dotenvy::dotenv();

    if args.verbose {
        env_logger::Builder::new()
            .filter_level(LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    if let Err(e) = dotenv {
        debug!("No .env file loaded: {}", e);
    }

    if let Err(e) = run(args).await {
        eprintln!("An error occured: {}", e.user_message());
        std::process::exit(1);
    }
}
