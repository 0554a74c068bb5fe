use crate::error::{AppError, CliError};
use crate::utils::validation::validate_email;
use rpassword::read_password;
use std::io::{self, Write};

/// User login credentials input handler
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl LoginInput {
    /// Build login input from command-line flags, falling back to the
    /// profile email and interactive prompts for whatever is missing.
    pub fn from_args(
        email: Option<String>,
        password: Option<String>,
        profile_email: Option<&str>,
    ) -> Result<Self, AppError> {
        let email = match email {
            Some(email) => email,
            None => Self::collect_email(profile_email)?,
        };
        let password = match password {
            Some(password) => password,
            None => prompt_password()?,
        };

        Ok(Self {
            email,
            password: password.trim().to_string(),
        })
    }

    fn collect_email(profile_email: Option<&str>) -> Result<String, AppError> {
        if let Some(email) = profile_email {
            // Use email from profile
            println!("Using email from profile: {}", email);
            return Ok(email.to_string());
        }

        print!("Email: ");
        io::stdout().flush().map_err(|e| {
            AppError::Cli(CliError::InvalidArguments(format!(
                "Failed to flush stdout: {}",
                e
            )))
        })?;

        let mut email = String::new();
        io::stdin().read_line(&mut email).map_err(|e| {
            AppError::Cli(CliError::InvalidArguments(format!(
                "Failed to read email: {}",
                e
            )))
        })?;
        Ok(email.trim().to_string())
    }

    /// Validate that credentials are usable before any network call.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(AppError::Cli(CliError::InvalidArguments(
                "Password cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

/// Prompt for a password without echoing it.
pub fn prompt_password() -> Result<String, AppError> {
    print!("Password: ");
    io::stdout().flush().map_err(|e| {
        AppError::Cli(CliError::InvalidArguments(format!(
            "Failed to flush stdout: {}",
            e
        )))
    })?;

    read_password().map_err(|e| {
        AppError::Cli(CliError::InvalidArguments(format!(
            "Failed to read password: {}",
            e
        )))
    })
}
