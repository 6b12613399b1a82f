use console::style;
use geoproc_core::GeoprocError;
use std::fmt;

/// Error with context and suggestions for the terminal
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

pub fn input_not_found(path: &str) -> CliError {
    CliError::new("Input file not found")
        .with_context(format!("The specified GeoJSON file does not exist.\n\nPath: {}", path))
        .with_suggestion("Check the file path and try again")
        .with_suggestion("Or pipe the document through stdin: cat input.geojson | geoproc process <OPERATION>")
        .with_help("Run: geoproc process --help")
}

pub fn invalid_json(what: &str, error: &serde_json::Error) -> CliError {
    CliError::new(format!("Cannot parse {} as JSON", what))
        .with_context(format!("Error: {}", error))
        .with_help("Run: geoproc process --help")
}

/// Attach suggestions to a processing error
pub fn from_geoproc(error: GeoprocError) -> CliError {
    let message = error.to_string();
    match error {
        GeoprocError::UnknownOperation { .. } => CliError::new(message)
            .with_suggestion("List the registered operations: geoproc operations")
            .with_help("Run: geoproc process --help"),
        GeoprocError::InvalidParameter { .. } => CliError::new(message)
            .with_suggestion("Pass numbers, e.g. --params '{\"offsetDistance\": 2.0}'")
            .with_suggestion("Or use --offset-distance / --extrude-height"),
        GeoprocError::InvalidGeometry { .. } => CliError::new(message)
            .with_context("The engine refused the input before running the operation.")
            .with_suggestion("Look for self-intersections, unclosed rings or rings with fewer than 4 points"),
        GeoprocError::EmptyFeatureCollection
        | GeoprocError::FeatureWithoutGeometry
        | GeoprocError::NoGeometry => CliError::new(message)
            .with_suggestion("Provide at least one Feature with a non-null geometry"),
        GeoprocError::EngineUnavailable { .. } => {
            CliError::new(message).with_help("Run: geoproc doctor")
        }
        GeoprocError::ConfigInvalid { .. } => {
            CliError::new(message)
                .with_suggestion("Check geoproc.toml and GEOPROC_* environment variables")
                .with_help("Run: geoproc doctor --verbose")
        }
        _ => CliError::new(message),
    }
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    let error = match error.downcast::<CliError>() {
        Ok(cli_error) => return cli_error,
        Err(error) => error,
    };
    let error = match error.downcast::<GeoprocError>() {
        Ok(geoproc_error) => return from_geoproc(geoproc_error),
        Err(error) => error,
    };

    let message = format!("{:#}", error);
    if message.contains("permission denied") || message.contains("Permission denied") {
        CliError::new("Permission denied")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check file permissions")
    } else {
        CliError::new(message)
    }
}
