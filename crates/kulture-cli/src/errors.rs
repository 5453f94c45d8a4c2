use console::style;
use kulture_core::KultureError;
use std::fmt;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Create error for an unknown state name
pub fn region_not_found(name: &str) -> CliError {
    CliError::new(format!("No state named \"{}\"", name))
        .with_context("State names are matched exactly, ignoring case.")
        .with_suggestion("List the available states: kulture regions")
        .with_suggestion("Quote names with spaces: kulture map \"Tamil Nadu\"")
        .with_help("Run: kulture regions")
}

/// Create error for database connection failure
pub fn database_connection_failed(error: &str) -> CliError {
    CliError::new("Cannot connect to PostgreSQL")
        .with_context(format!("The postgres backend could not be reached.\n\nError: {}", error))
        .with_suggestion("Check that PostgreSQL is running and DATABASE_URL is correct")
        .with_suggestion("Or use the built-in data: kulture --backend static <command>")
        .with_help("Run: kulture config")
}

/// Create error for a missing database URL
pub fn database_url_missing() -> CliError {
    CliError::new("No database URL configured")
        .with_context("The postgres backend needs a connection string.")
        .with_suggestion("Set DATABASE_URL: export DATABASE_URL=\"postgresql://localhost/kulture\"")
        .with_suggestion("Or pass --database-url, or add database_url to kulture.toml")
        .with_help("Run: kulture config")
}

/// Create error for invalid configuration
pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check kulture.toml and the KULTURE_* environment variables")
        .with_help("Run: kulture config")
}

/// Map a domain error to a CLI error with suggestions
pub fn from_kulture(error: KultureError) -> CliError {
    match &error {
        KultureError::NotFound { name } => region_not_found(name),
        KultureError::SourceUnavailable { reason } => database_connection_failed(reason),
        KultureError::ConfigMissing { key } if key == "database_url" => database_url_missing(),
        KultureError::ConfigInvalid { key, reason } => invalid_config(key, reason),
        KultureError::InvalidDateRange { .. } => CliError::new(error.user_message())
            .with_suggestion("Pass --start on or before --end")
            .with_help("Run: kulture events --help"),
        _ => CliError::new(error.user_message()).with_context(error.to_string()),
    }
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    let error = match error.downcast::<KultureError>() {
        Ok(kulture) => return from_kulture(kulture),
        Err(other) => other,
    };
    let message = error.to_string();

    if message.contains("No such file or directory") {
        CliError::new("File not found")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check the file path and try again")
    } else if message.contains("Connection refused") || message.contains("could not connect") {
        database_connection_failed(&message)
    } else {
        CliError::new(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_suggests_listing_regions() {
        let err = from_kulture(KultureError::not_found("Atlantis"));
        assert!(err.message.contains("Atlantis"));
        assert!(err.suggestions.iter().any(|s| s.contains("kulture regions")));
    }

    #[test]
    fn test_source_unavailable_suggests_static_backend() {
        let err = from_anyhow(anyhow::Error::new(KultureError::source_unavailable("timeout")));
        assert_eq!(err.message, "Cannot connect to PostgreSQL");
    }

    #[test]
    fn test_missing_database_url() {
        let err = from_kulture(KultureError::ConfigMissing {
            key: "database_url".to_string(),
        });
        assert_eq!(err.message, "No database URL configured");
    }

    #[test]
    fn test_plain_errors_pass_through() {
        let err = from_anyhow(anyhow::anyhow!("something odd"));
        assert_eq!(err.message, "something odd");
        assert!(err.suggestions.is_empty());
    }
}
