//! Parameter definition file (`config.params.json`).
//!
//! The definition file declares the namespace prefix shared by every managed
//! parameter, the parameters an infrastructure deployment reads, and the
//! boolean options exposed on the command line. It is read once at startup
//! and never written by this tool.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Reserved value meaning "no value has ever been stored".
pub const NOT_DEFINED: &str = "not-defined";

/// The only option action currently understood.
const STORE_TRUE: &str = "store_true";

/// A parameter the deployment expects to find in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Description")]
    pub description: String,

    /// Long flag form, without the leading `--`
    #[serde(rename = "CLIFormat")]
    pub cli_format: String,
}

/// A boolean command-line option (e.g. `--interactive`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDefinition {
    #[serde(rename = "CLIFormat")]
    pub cli_format: String,

    #[serde(rename = "ShortCLIFormat")]
    pub short_cli_format: String,

    #[serde(rename = "Action", default = "default_action")]
    pub action: String,

    #[serde(rename = "Help", default)]
    pub help: String,
}

fn default_action() -> String {
    STORE_TRUE.to_string()
}

impl OptionDefinition {
    /// The single-character short flag.
    pub fn short(&self) -> Option<char> {
        let mut chars = self.short_cli_format.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

/// Parsed contents of the definition file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamsConfig {
    #[serde(rename = "Namespace")]
    pub namespace: String,

    #[serde(rename = "Parameters", default)]
    pub parameters: Vec<ParameterDefinition>,

    #[serde(rename = "DefaultOptions", default)]
    pub options: Vec<OptionDefinition>,
}

impl ParamsConfig {
    /// Load and validate the definition file.
    pub fn load(path: &Path) -> AppResult<Self> {
        tracing::debug!("Loading parameter definitions from: {:?}", path);

        if !path.exists() {
            return Err(AppError::Config(format!(
                "Parameter definition file not found: {:?}",
                path
            )));
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read definition file {:?}: {}", path, e))
        })?;

        let config = Self::from_json(&contents).map_err(|e| match e {
            AppError::Serialization(msg) => AppError::Config(format!(
                "Failed to parse definition file {:?}: {}",
                path, msg
            )),
            other => other,
        })?;

        tracing::info!(
            "Loaded {} parameter definitions under namespace '{}'",
            config.parameters.len(),
            config.namespace
        );

        Ok(config)
    }

    /// Parse and validate definition JSON.
    pub fn from_json(contents: &str) -> AppResult<Self> {
        let config: ParamsConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Namespace-qualified store name for a definition name.
    pub fn qualified_name(&self, name: &str) -> String {
        format!("{}{}", self.namespace, name)
    }

    /// Every namespace-qualified name, in definition order.
    pub fn qualified_names(&self) -> Vec<String> {
        self.parameters
            .iter()
            .map(|p| self.qualified_name(&p.name))
            .collect()
    }

    /// Application name used by the stack definitions: the namespace with
    /// every `/` removed.
    pub fn app_name(&self) -> String {
        self.namespace.replace('/', "")
    }

    /// Description written alongside a stored value.
    pub fn stored_description(&self, definition: &ParameterDefinition) -> String {
        format!("{} under {}", definition.description, self.namespace)
    }

    /// Whether an option with the given long form is declared.
    pub fn has_option(&self, cli_format: &str) -> bool {
        self.options.iter().any(|o| o.cli_format == cli_format)
    }

    /// Validate the definition file.
    pub fn validate(&self) -> AppResult<()> {
        if self.namespace.is_empty() {
            return Err(AppError::Config("Namespace cannot be empty".to_string()));
        }

        let mut names = HashSet::new();
        let mut flags = HashSet::new();

        for param in &self.parameters {
            if param.name.is_empty() {
                return Err(AppError::Config(
                    "Parameter name cannot be empty".to_string(),
                ));
            }
            if param.cli_format.is_empty() {
                return Err(AppError::Config(format!(
                    "Parameter '{}' has an empty CLIFormat",
                    param.name
                )));
            }
            if !names.insert(param.name.as_str()) {
                return Err(AppError::Config(format!(
                    "Duplicate parameter name: {}",
                    param.name
                )));
            }
            if !flags.insert(param.cli_format.as_str()) {
                return Err(AppError::Config(format!(
                    "Duplicate flag: --{}",
                    param.cli_format
                )));
            }
        }

        let mut shorts = HashSet::new();
        for option in &self.options {
            if option.action != STORE_TRUE {
                return Err(AppError::Config(format!(
                    "Unsupported action '{}' for option --{}. Supported: {}",
                    option.action, option.cli_format, STORE_TRUE
                )));
            }
            if option.cli_format.is_empty() {
                return Err(AppError::Config("Option CLIFormat cannot be empty".to_string()));
            }
            if !flags.insert(option.cli_format.as_str()) {
                return Err(AppError::Config(format!(
                    "Duplicate flag: --{}",
                    option.cli_format
                )));
            }
            let short = option.short().ok_or_else(|| {
                AppError::Config(format!(
                    "ShortCLIFormat for option --{} must be a single character, got '{}'",
                    option.cli_format, option.short_cli_format
                ))
            })?;
            if !shorts.insert(short) {
                return Err(AppError::Config(format!("Duplicate short flag: -{}", short)));
            }
        }

        Ok(())
    }
}
