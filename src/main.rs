use clap::Parser;
use cms_cli::cli::dispatcher::Dispatcher;
use cms_cli::cli::main_types::Cli;
use cms_cli::error::CustomError;
use cms_cli::storage::config::Config;
use cms_cli::storage::credentials;
use cms_cli::utils::logging;
use std::path::PathBuf;

fn report(err: &CustomError) {
    eprintln!("{} {}", err.severity().emoji(), err.display_friendly());
    for message in err.messages().iter().skip(1) {
        eprintln!("  {}", message);
    }
    for (field, messages) in err.field_errors() {
        let field = if field.is_empty() { "(input)" } else { &field };
        for message in messages {
            eprintln!("  {}: {}", field, message);
        }
    }
    if let Some(hint) = err.troubleshooting_hint() {
        eprintln!("Hint: {}", hint);
    }
    log::debug!("{}", err.to_wire());
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = logging::init(cli.verbose) {
        logging::log_warning(&format!("Logger already installed: {}", err));
    }

    let config_path = cli
        .config_dir
        .as_ref()
        .map(|dir| Config::config_file_in(&PathBuf::from(dir)));

    let config = match Config::load(config_path.clone()) {
        Ok(config) => config,
        Err(err) => {
            logging::log_error(&format!("Error loading config: {}", err));
            std::process::exit(1);
        }
    };

    let profile_name = config.resolve_profile_name(cli.profile.as_deref());
    let api_key = credentials::resolve_api_key(cli.api_key);

    log::debug!("Using profile: {}", profile_name);
    if let Some(config_dir) = &cli.config_dir {
        log::debug!("Using config directory: {}", config_dir);
    }
    if api_key.is_some() {
        log::debug!("Using API key provided via env or command line");
    }

    let dispatcher = Dispatcher::new(
        config,
        config_path,
        profile_name,
        api_key,
        cli.verbose,
        cli.retry,
    );

    if let Err(err) = dispatcher.dispatch(cli.command).await {
        report(&err);
        std::process::exit(1);
    }
}
