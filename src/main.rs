use clap::Parser;
use gym_cli::cli::dispatcher::Dispatcher;
use gym_cli::cli::main_types::Cli;
use gym_cli::storage::config::{Config, Profile};
use gym_cli::utils::logging::{log_error, log_warning, print_verbose};
use std::path::PathBuf;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config_path = cli
        .config_dir
        .as_ref()
        .map(|dir| PathBuf::from(dir).join("config.toml"));

    let mut config = match Config::load(config_path.clone()) {
        Ok(config) => config,
        Err(err) => {
            log_error(&format!("loading config: {}", err));
            std::process::exit(1);
        }
    };

    // Determine the profile to use
    let profile_name = cli
        .profile
        .or(config.default_profile.clone())
        .unwrap_or_else(|| "default".to_string());

    // Create a default profile if it doesn't exist
    if config.get_profile(&profile_name).is_none() {
        print_verbose(
            cli.verbose,
            &format!("Creating default profile: {}", profile_name),
        );

        config.set_profile(profile_name.clone(), Profile::default());

        if config.default_profile.is_none() {
            config.default_profile = Some(profile_name.clone());
        }

        if let Err(err) = config.save(config_path.clone()) {
            log_warning(&format!("Failed to save config: {}", err));
        }
    }

    let mut dispatcher = match Dispatcher::new(config, config_path, profile_name, cli.verbose) {
        Ok(dispatcher) => dispatcher,
        Err(err) => {
            log_error(&err.display_friendly());
            std::process::exit(1);
        }
    };

    if let Err(e) = dispatcher.dispatch(cli.command).await {
        log_error(&e.display_friendly());
        if let Some(hint) = e.troubleshooting_hint() {
            eprintln!("Hint: {}", hint);
        }
        std::process::exit(1);
    }
}
