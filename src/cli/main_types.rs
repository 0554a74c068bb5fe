use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gym-cli")]
#[command(about = "Command line interface for gym chain administration")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authentication commands
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Chain-wide statistics
    Dashboard,
    /// Branch management
    Branch {
        #[command(subcommand)]
        command: BranchCommands,
    },
    /// User management
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Workout log management
    Workout {
        #[command(subcommand)]
        command: WorkoutCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Login and store a session token
    Login {
        /// Account email (falls back to the profile email, then a prompt)
        #[arg(long)]
        email: Option<String>,
        /// Account password (prompted when absent)
        #[arg(long, env = "GYM_PASSWORD")]
        password: Option<String>,
    },
    /// Register a new branch together with its first user
    Register {
        #[arg(long)]
        branch_name: String,
        #[arg(long)]
        branch_email: String,
        #[arg(long)]
        branch_location: String,
        /// Email of the new user
        #[arg(long)]
        email: String,
        /// Password of the new user (prompted when absent)
        #[arg(long, env = "GYM_PASSWORD")]
        password: Option<String>,
        #[arg(long, default_value = "ADMIN")]
        role: String,
    },
    /// Logout and clear the session
    Logout,
    /// Show authentication status
    Status,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key (server_url, email, default_profile)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum BranchCommands {
    /// List branches
    List {
        /// Search term applied to all visible fields
        #[arg(long)]
        search: Option<String>,
    },
    /// Show a single branch
    Show { id: u32 },
    /// Update a branch
    Update {
        id: u32,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        location: String,
    },
    /// Delete a branch
    Delete {
        id: u32,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List users
    List {
        /// Search term applied to all visible fields
        #[arg(long)]
        search: Option<String>,
    },
    /// Show a single user
    Show { id: u32 },
    /// Show the signed-in user's profile
    Profile,
    /// Update a user
    Update {
        id: u32,
        #[arg(long)]
        email: String,
        #[arg(long)]
        role: String,
        #[arg(long)]
        branch_id: Option<u32>,
    },
    /// Delete a user
    Delete {
        id: u32,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum WorkoutCommands {
    /// List workout logs
    List {
        /// Search term applied to all visible fields
        #[arg(long)]
        search: Option<String>,
    },
    /// Show a single workout log
    Show { id: u32 },
    /// Add a workout log
    Add {
        #[arg(long = "type")]
        workout_type: String,
        /// Duration in minutes
        #[arg(long)]
        duration: u32,
    },
    /// Update a workout log
    Update {
        id: u32,
        #[arg(long = "type")]
        workout_type: String,
        /// Duration in minutes
        #[arg(long)]
        duration: u32,
    },
    /// Delete a workout log
    Delete {
        id: u32,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}
