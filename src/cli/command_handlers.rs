use crate::api::client::{GymClient, Notifier, RequestSpec};
use crate::api::models::{
    Branch, BranchInput, DashboardStats, RegisterUser, User, UserInput, Workout, WorkoutInput,
};
use crate::cli::main_types::{
    AuthCommands, BranchCommands, ConfigCommands, UserCommands, WorkoutCommands,
};
use crate::core::auth::{LoginInput, prompt_password};
use crate::core::fetcher::Fetcher;
use crate::core::services::auth_service::AuthService;
use crate::core::services::branch_service::BranchService;
use crate::core::services::traits::{CreateService, DeleteService, GetService, UpdateService};
use crate::core::services::types::ServiceError;
use crate::core::services::user_service::UserService;
use crate::core::services::workout_service::WorkoutService;
use crate::display::table::{Column, DataTable, render_list_header};
use crate::error::{ApiError, AppError, CliError, ConfigError};
use crate::storage::config::{Config, Profile};
use crate::utils::input::confirm;
use crate::utils::logging::print_verbose;
use crate::utils::retry::with_retry;
use crate::utils::validation::{validate_email, validate_url};
use comfy_table::{Cell, Color};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Default)]
pub struct AuthHandler;

impl AuthHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: AuthCommands,
        auth_service: &AuthService,
        profile: &Profile,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            AuthCommands::Login { email, password } => {
                print_verbose(verbose, "Attempting auth login command");

                let input = LoginInput::from_args(email, password, profile.email.as_deref())?;
                let email = input.email.clone();

                match auth_service.login(input).await {
                    Ok(()) => {
                        println!("Connected to {} as {}", profile.server_url, email);
                        Ok(())
                    }
                    Err(e) => {
                        println!("❌ Login failed: {}", e.display_friendly());
                        Err(e)
                    }
                }
            }
            AuthCommands::Register {
                branch_name,
                branch_email,
                branch_location,
                email,
                password,
                role,
            } => {
                print_verbose(verbose, "Attempting auth register command");

                let password = match password {
                    Some(password) => password,
                    None => prompt_password()?,
                };
                if password.trim().is_empty() {
                    return Err(AppError::Cli(CliError::InvalidArguments(
                        "Password cannot be empty".to_string(),
                    )));
                }
                validate_email(&email)?;
                validate_email(&branch_email)?;

                let branch = BranchInput {
                    name: branch_name,
                    email: branch_email,
                    location: branch_location,
                };
                let user = RegisterUser {
                    email,
                    password: password.trim().to_string(),
                    role,
                };

                auth_service.register(branch, user).await
            }
            AuthCommands::Logout => {
                print_verbose(verbose, "Attempting auth logout command");
                auth_service.logout();
                Ok(())
            }
            AuthCommands::Status => {
                print_verbose(verbose, "Attempting auth status command");

                let status = auth_service.status();

                println!("Authentication Status:");
                println!("=====================");
                println!("Profile: {}", status.profile_name);
                println!("Server:  {}", status.server_url);
                if status.is_authenticated {
                    println!("Session: ✅ Active session found");
                } else {
                    println!("Session: ❌ No active session (use 'auth login' to authenticate)");
                }

                Ok(())
            }
        }
    }
}

#[derive(Default)]
pub struct ConfigHandler;

impl ConfigHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: ConfigCommands,
        config: &mut Config,
        config_path: Option<PathBuf>,
        profile_name: &str,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                print_verbose(verbose, "Attempting config show command");

                println!("Current Configuration:");
                println!("=====================");

                if let Some(default_profile) = &config.default_profile {
                    println!("Default Profile: {}", default_profile);
                } else {
                    println!("Default Profile: (not set)");
                }

                println!("\nProfiles:");
                if config.profiles.is_empty() {
                    println!("  No profiles configured");
                } else {
                    for (name, profile) in &config.profiles {
                        println!("  [{}]", name);
                        println!("    Server URL: {}", profile.server_url);
                        if let Some(email) = &profile.email {
                            println!("    Email: {}", email);
                        }
                    }
                }

                Ok(())
            }
            ConfigCommands::Set { key, value } => {
                print_verbose(
                    verbose,
                    &format!("Attempting config set - key: {}, value: {}", key, value),
                );

                match key.as_str() {
                    "server_url" => {
                        validate_url(&value)?;
                        let profile = Self::profile_mut(config, profile_name)?;
                        profile.server_url = value;
                    }
                    "email" => {
                        validate_email(&value)?;
                        let profile = Self::profile_mut(config, profile_name)?;
                        profile.email = Some(value);
                    }
                    "default_profile" => {
                        if config.get_profile(&value).is_none() {
                            return Err(ConfigError::InvalidValue {
                                field: "default_profile".to_string(),
                                value,
                                reason: "profile does not exist".to_string(),
                            }
                            .into());
                        }
                        config.default_profile = Some(value);
                    }
                    _ => {
                        return Err(ConfigError::UnknownKey { key: key.clone() }.into());
                    }
                }

                config.save(config_path)?;
                println!("✅ Configuration updated");
                Ok(())
            }
        }
    }

    fn profile_mut<'a>(
        config: &'a mut Config,
        profile_name: &str,
    ) -> Result<&'a mut Profile, AppError> {
        config.get_profile_mut(profile_name).ok_or_else(|| {
            AppError::Cli(CliError::InvalidArguments(format!(
                "Profile '{}' not found. Please configure a profile first.",
                profile_name
            )))
        })
    }
}

#[derive(Default)]
pub struct DashboardHandler;

impl DashboardHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(&self, client: &Arc<GymClient>, verbose: bool) -> Result<(), AppError> {
        print_verbose(verbose, "Fetching dashboard stats");

        let mut fetcher: Fetcher<DashboardStats> =
            Fetcher::new(Arc::clone(client), RequestSpec::get("/dashboard"));
        fetcher.mount().await?;

        let stats = fetcher.data().cloned().unwrap_or(DashboardStats {
            branches: 0,
            users: 0,
            workouts: 0,
        });

        println!("Dashboard");
        println!("=========");
        println!("🏢 Branches: {}", stats.branches);
        println!("👤 Users:    {}", stats.users);
        println!("🏋 Workouts: {}", stats.workouts);
        println!();
        println!(
            "Quick actions: 'gym-cli branch list' | 'gym-cli user list' | 'gym-cli workout list'"
        );

        Ok(())
    }
}

pub struct BranchHandler {
    client: Arc<GymClient>,
    notifier: Arc<dyn Notifier>,
    service: BranchService,
    verbose: bool,
}

impl BranchHandler {
    pub fn new(client: Arc<GymClient>, notifier: Arc<dyn Notifier>, verbose: bool) -> Self {
        let service = BranchService::new(Arc::clone(&client));
        Self {
            client,
            notifier,
            service,
            verbose,
        }
    }

    pub async fn handle(&self, command: BranchCommands) -> Result<(), AppError> {
        match command {
            BranchCommands::List { search } => self.list(search).await,
            BranchCommands::Show { id } => self.show(id).await,
            BranchCommands::Update {
                id,
                name,
                email,
                location,
            } => {
                self.update(
                    id,
                    BranchInput {
                        name,
                        email,
                        location,
                    },
                )
                .await
            }
            BranchCommands::Delete { id, yes } => self.delete(id, yes).await,
        }
    }

    async fn list(&self, search: Option<String>) -> Result<(), AppError> {
        print_verbose(self.verbose, "Fetching branch list");

        let mut fetcher: Fetcher<Vec<Branch>> =
            Fetcher::new(Arc::clone(&self.client), RequestSpec::get("/branches"));
        fetcher.mount().await?;

        self.render(&fetcher, search)
    }

    fn render(&self, fetcher: &Fetcher<Vec<Branch>>, search: Option<String>) -> Result<(), AppError> {
        let mut table = DataTable::new(branch_columns());
        if let Some(term) = search {
            table.set_search_term(term);
        }

        let rows = fetcher.data().map(Vec::as_slice).unwrap_or(&[]);
        println!(
            "{}",
            render_list_header("Branches", rows.len(), table.is_filtered())
        );
        println!("{}", table.render(rows, fetcher.is_loading()));
        Ok(())
    }

    /// Explicit re-fetch after a mutation: the branch collection is replaced
    /// wholesale, never patched in place.
    async fn refresh(&self) -> Result<(), AppError> {
        let mut fetcher: Fetcher<Vec<Branch>> = Fetcher::with_immediate(
            Arc::clone(&self.client),
            RequestSpec::get("/branches"),
            false,
        );
        fetcher.execute().await?;
        self.render(&fetcher, None)
    }

    async fn show(&self, id: u32) -> Result<(), AppError> {
        let branch = self.service.get(id).await?;
        let table = DataTable::new(branch_columns());
        println!("{}", table.render(std::slice::from_ref(&branch), false));
        Ok(())
    }

    async fn update(&self, id: u32, input: BranchInput) -> Result<(), AppError> {
        self.service.update(id, input).await?;
        self.notifier.success("Branch updated successfully!");
        self.refresh().await
    }

    async fn delete(&self, id: u32, yes: bool) -> Result<(), AppError> {
        if !yes && !confirm("This will permanently delete the branch. Continue?")? {
            self.notifier.info("Delete cancelled");
            return Ok(());
        }

        match self.service.delete(id).await {
            Ok(()) => {
                self.notifier.success("Branch deleted successfully!");
                self.refresh().await
            }
            Err(error) => {
                // Deleting a branch that still has users answers 409 with the
                // reason in the x-error-message header; surface it verbatim.
                // The listing is left as it was.
                if let ServiceError::Api(ApiError::Http {
                    status: 409,
                    header_message: Some(message),
                    ..
                }) = &error
                {
                    self.notifier.error(message);
                }
                Err(error.into())
            }
        }
    }
}

pub struct UserHandler {
    client: Arc<GymClient>,
    notifier: Arc<dyn Notifier>,
    service: UserService,
    verbose: bool,
}

impl UserHandler {
    pub fn new(client: Arc<GymClient>, notifier: Arc<dyn Notifier>, verbose: bool) -> Self {
        let service = UserService::new(Arc::clone(&client));
        Self {
            client,
            notifier,
            service,
            verbose,
        }
    }

    pub async fn handle(&self, command: UserCommands) -> Result<(), AppError> {
        match command {
            UserCommands::List { search } => self.list(search).await,
            UserCommands::Show { id } => self.show(id).await,
            UserCommands::Profile => self.profile().await,
            UserCommands::Update {
                id,
                email,
                role,
                branch_id,
            } => {
                self.update(
                    id,
                    UserInput {
                        email,
                        role,
                        branch_id,
                    },
                )
                .await
            }
            UserCommands::Delete { id, yes } => self.delete(id, yes).await,
        }
    }

    async fn list(&self, search: Option<String>) -> Result<(), AppError> {
        print_verbose(self.verbose, "Fetching users and branches");

        let mut users_fetcher: Fetcher<Vec<User>> =
            Fetcher::new(Arc::clone(&self.client), RequestSpec::get("/users"));
        let mut branches_fetcher: Fetcher<Vec<Branch>> =
            Fetcher::new(Arc::clone(&self.client), RequestSpec::get("/branches"));

        futures::try_join!(users_fetcher.mount(), branches_fetcher.mount())?;

        let branch_count = branches_fetcher.data().map(Vec::len).unwrap_or(0);
        self.render(&users_fetcher, search, branch_count)
    }

    fn render(
        &self,
        fetcher: &Fetcher<Vec<User>>,
        search: Option<String>,
        branch_count: usize,
    ) -> Result<(), AppError> {
        let mut table = DataTable::new(user_columns());
        if let Some(term) = search {
            table.set_search_term(term);
        }

        let rows = fetcher.data().map(Vec::as_slice).unwrap_or(&[]);
        println!(
            "{}",
            render_list_header("Users", rows.len(), table.is_filtered())
        );
        println!("{}", table.render(rows, fetcher.is_loading()));
        println!("{} users across {} branches", rows.len(), branch_count);
        Ok(())
    }

    async fn refresh(&self) -> Result<(), AppError> {
        let mut fetcher: Fetcher<Vec<User>> = Fetcher::with_immediate(
            Arc::clone(&self.client),
            RequestSpec::get("/users"),
            false,
        );
        fetcher.execute().await?;
        let branch_count = self.client.get_branches().await.map(|b| b.len()).unwrap_or(0);
        self.render(&fetcher, None, branch_count)
    }

    async fn show(&self, id: u32) -> Result<(), AppError> {
        let user = self.service.get(id).await?;
        let table = DataTable::new(user_columns());
        println!("{}", table.render(std::slice::from_ref(&user), false));
        Ok(())
    }

    async fn profile(&self) -> Result<(), AppError> {
        print_verbose(self.verbose, "Fetching profile");
        let profile = with_retry(|| self.service.profile()).await?;
        println!("Signed in as: {}", profile);
        Ok(())
    }

    async fn update(&self, id: u32, input: UserInput) -> Result<(), AppError> {
        // The branch assignment must point at an existing branch, the same
        // constraint the edit form's branch selector enforces.
        if let Some(branch_id) = input.branch_id {
            let branches = self.client.get_branches().await?;
            if !branches.iter().any(|branch| branch.id == branch_id) {
                return Err(ServiceError::Validation {
                    field: "branch_id".to_string(),
                    message: format!("Branch {} does not exist", branch_id),
                }
                .into());
            }
        }

        self.service.update(id, input).await?;
        self.notifier.success("User updated successfully!");
        self.refresh().await
    }

    async fn delete(&self, id: u32, yes: bool) -> Result<(), AppError> {
        if !yes && !confirm("This will permanently delete the user. Continue?")? {
            self.notifier.info("Delete cancelled");
            return Ok(());
        }

        self.service.delete(id).await?;
        self.notifier.success("User deleted successfully!");
        self.refresh().await
    }
}

pub struct WorkoutHandler {
    client: Arc<GymClient>,
    notifier: Arc<dyn Notifier>,
    service: WorkoutService,
    verbose: bool,
}

impl WorkoutHandler {
    pub fn new(client: Arc<GymClient>, notifier: Arc<dyn Notifier>, verbose: bool) -> Self {
        let service = WorkoutService::new(Arc::clone(&client));
        Self {
            client,
            notifier,
            service,
            verbose,
        }
    }

    pub async fn handle(&self, command: WorkoutCommands) -> Result<(), AppError> {
        match command {
            WorkoutCommands::List { search } => self.list(search).await,
            WorkoutCommands::Show { id } => self.show(id).await,
            WorkoutCommands::Add {
                workout_type,
                duration,
            } => {
                self.add(WorkoutInput {
                    workout_type,
                    duration,
                })
                .await
            }
            WorkoutCommands::Update {
                id,
                workout_type,
                duration,
            } => {
                self.update(
                    id,
                    WorkoutInput {
                        workout_type,
                        duration,
                    },
                )
                .await
            }
            WorkoutCommands::Delete { id, yes } => self.delete(id, yes).await,
        }
    }

    async fn list(&self, search: Option<String>) -> Result<(), AppError> {
        print_verbose(self.verbose, "Fetching workout list");

        let mut fetcher: Fetcher<Vec<Workout>> =
            Fetcher::new(Arc::clone(&self.client), RequestSpec::get("/workouts"));
        fetcher.mount().await?;

        self.render(&fetcher, search)
    }

    fn render(
        &self,
        fetcher: &Fetcher<Vec<Workout>>,
        search: Option<String>,
    ) -> Result<(), AppError> {
        let mut table = DataTable::new(workout_columns());
        if let Some(term) = search {
            table.set_search_term(term);
        }

        let rows = fetcher.data().map(Vec::as_slice).unwrap_or(&[]);
        println!(
            "{}",
            render_list_header("Workouts", rows.len(), table.is_filtered())
        );
        println!("{}", table.render(rows, fetcher.is_loading()));
        Ok(())
    }

    async fn refresh(&self) -> Result<(), AppError> {
        let mut fetcher: Fetcher<Vec<Workout>> = Fetcher::with_immediate(
            Arc::clone(&self.client),
            RequestSpec::get("/workouts"),
            false,
        );
        fetcher.execute().await?;
        self.render(&fetcher, None)
    }

    async fn show(&self, id: u32) -> Result<(), AppError> {
        let workout = self.service.get(id).await?;
        let table = DataTable::new(workout_columns());
        println!("{}", table.render(std::slice::from_ref(&workout), false));
        Ok(())
    }

    async fn add(&self, input: WorkoutInput) -> Result<(), AppError> {
        self.service.create(input).await?;
        self.notifier.success("Workout added successfully!");
        self.refresh().await
    }

    async fn update(&self, id: u32, input: WorkoutInput) -> Result<(), AppError> {
        self.service.update(id, input).await?;
        self.notifier.success("Workout updated successfully!");
        self.refresh().await
    }

    async fn delete(&self, id: u32, yes: bool) -> Result<(), AppError> {
        if !yes && !confirm("This will permanently delete the workout. Continue?")? {
            self.notifier.info("Delete cancelled");
            return Ok(());
        }

        self.service.delete(id).await?;
        self.notifier.success("Workout deleted successfully!");
        self.refresh().await
    }
}

fn branch_columns() -> Vec<Column<Branch>> {
    vec![
        Column::field("ID", "id"),
        Column::field("Name", "name"),
        Column::field("Email", "email"),
        Column::field("Location", "location"),
    ]
}

fn user_columns() -> Vec<Column<User>> {
    vec![
        Column::field("ID", "id"),
        Column::field("Email", "email"),
        Column::derived("Role", |user: &User| user.role.clone()).with_cell(role_badge),
        Column::derived("Branch", |user: &User| {
            user.branch
                .as_ref()
                .map(|branch| branch.name.clone())
                .unwrap_or_else(|| "N/A".to_string())
        }),
    ]
}

fn role_badge(user: &User) -> Cell {
    let cell = Cell::new(&user.role);
    match user.role.to_uppercase().as_str() {
        "ADMIN" => cell.fg(Color::Red),
        "MANAGER" => cell.fg(Color::Blue),
        "TRAINER" => cell.fg(Color::Green),
        _ => cell,
    }
}

fn workout_columns() -> Vec<Column<Workout>> {
    vec![
        Column::field("ID", "id"),
        Column::field("Type", "type"),
        Column::derived("Duration (minutes)", |workout: &Workout| {
            format!("{} mins", workout.duration)
        }),
    ]
}
