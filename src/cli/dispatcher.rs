use crate::api::client::{GymClient, Navigator, Notifier, Route};
use crate::cli::command_handlers::{
    AuthHandler, BranchHandler, ConfigHandler, DashboardHandler, UserHandler, WorkoutHandler,
};
use crate::cli::main_types::Commands;
use crate::core::services::auth_service::AuthService;
use crate::display::notify::{ConsoleNavigator, ConsoleNotifier};
use crate::error::{AppError, AuthError, CliError};
use crate::storage::config::{Config, Profile};
use crate::storage::credentials::{KeyringSessionStore, SessionStore};
use crate::utils::logging::print_verbose;
use crate::utils::validation::validate_url;
use std::path::PathBuf;
use std::sync::Arc;

pub struct Dispatcher {
    config: Config,
    config_path: Option<PathBuf>,
    profile_name: String,
    profile: Profile,
    verbose: bool,
    client: Arc<GymClient>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl Dispatcher {
    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        profile_name: String,
        verbose: bool,
    ) -> Result<Self, AppError> {
        let profile = config.get_profile(&profile_name).cloned().ok_or_else(|| {
            AppError::Cli(CliError::InvalidArguments(format!(
                "Profile '{}' not found. Please configure a profile first.",
                profile_name
            )))
        })?;
        validate_url(&profile.server_url)?;

        print_verbose(verbose, &format!("Using profile: {}", profile_name));

        let session: Arc<dyn SessionStore> = Arc::new(KeyringSessionStore::new(&profile_name));
        let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
        let navigator: Arc<dyn Navigator> = Arc::new(ConsoleNavigator);
        let client = Arc::new(GymClient::new(
            profile.server_url.clone(),
            session,
            Arc::clone(&notifier),
            Arc::clone(&navigator),
        )?);

        Ok(Self {
            config,
            config_path,
            profile_name,
            profile,
            verbose,
            client,
            notifier,
            navigator,
        })
    }

    pub async fn dispatch(&mut self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Auth { command } => {
                let service = self.auth_service();
                AuthHandler::new()
                    .handle(command, &service, &self.profile, self.verbose)
                    .await
            }
            Commands::Config { command } => {
                let config_path = self.config_path.clone();
                let profile_name = self.profile_name.clone();
                ConfigHandler::new()
                    .handle(
                        command,
                        &mut self.config,
                        config_path,
                        &profile_name,
                        self.verbose,
                    )
                    .await
            }
            Commands::Dashboard => {
                self.require_session()?;
                DashboardHandler::new()
                    .handle(&self.client, self.verbose)
                    .await
            }
            Commands::Branch { command } => {
                self.require_session()?;
                BranchHandler::new(
                    Arc::clone(&self.client),
                    Arc::clone(&self.notifier),
                    self.verbose,
                )
                .handle(command)
                .await
            }
            Commands::User { command } => {
                self.require_session()?;
                UserHandler::new(
                    Arc::clone(&self.client),
                    Arc::clone(&self.notifier),
                    self.verbose,
                )
                .handle(command)
                .await
            }
            Commands::Workout { command } => {
                self.require_session()?;
                WorkoutHandler::new(
                    Arc::clone(&self.client),
                    Arc::clone(&self.notifier),
                    self.verbose,
                )
                .handle(command)
                .await
            }
        }
    }

    fn auth_service(&self) -> AuthService {
        AuthService::new(
            Arc::clone(&self.client),
            Arc::clone(&self.notifier),
            Arc::clone(&self.navigator),
            self.profile_name.clone(),
        )
    }

    /// Gate for commands that need an open session, the command-line twin of
    /// a protected route: without a token, point at login and refuse.
    fn require_session(&self) -> Result<(), AppError> {
        if !self.client.is_authenticated() {
            self.navigator.goto(Route::Login);
            return Err(AuthError::SessionInvalid.into());
        }
        Ok(())
    }
}
