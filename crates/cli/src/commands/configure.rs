//! Configure command handler.
//!
//! Builds the per-definition flags and turns parsed matches into a [`Mode`].

use clap::{Arg, ArgAction, ArgMatches, Command};
use paramconf_configurator::{Configurator, Mode};
use paramconf_core::{AppError, AppResult, ParamsConfig};
use std::collections::HashSet;

/// Option that deletes every managed parameter.
pub const DELETE_OPTION: &str = "delete";

/// Option that writes the cache without touching the store.
pub const TEST_OPTION: &str = "test";

/// Option that prompts for each value.
pub const INTERACTIVE_OPTION: &str = "interactive";

fn param_id(cli_format: &str) -> String {
    format!("param:{}", cli_format)
}

fn option_id(cli_format: &str) -> String {
    format!("option:{}", cli_format)
}

/// Attach one flag per parameter and option definition to `base`.
///
/// # Errors
/// Returns `AppError::Config` when a definition reuses a flag already taken
/// by `base` or by clap's `--help`/`--version`.
pub fn build_command(base: Command, params: &ParamsConfig) -> AppResult<Command> {
    let mut longs: HashSet<String> = ["help", "version"].iter().map(|s| s.to_string()).collect();
    let mut shorts: HashSet<char> = ['h', 'V'].into_iter().collect();

    for arg in base.get_arguments() {
        if let Some(long) = arg.get_long() {
            longs.insert(long.to_string());
        }
        if let Some(short) = arg.get_short() {
            shorts.insert(short);
        }
    }

    let mut command = base;

    for option in &params.options {
        if longs.contains(&option.cli_format) {
            return Err(AppError::Config(format!(
                "Option --{} collides with a built-in flag",
                option.cli_format
            )));
        }

        let short = option.short().ok_or_else(|| {
            AppError::Config(format!(
                "Option --{} needs a single-character short form",
                option.cli_format
            ))
        })?;
        if shorts.contains(&short) {
            return Err(AppError::Config(format!(
                "Option -{} collides with a built-in flag",
                short
            )));
        }

        command = command.arg(
            Arg::new(option_id(&option.cli_format))
                .short(short)
                .long(option.cli_format.clone())
                .action(ArgAction::SetTrue)
                .help(option.help.clone()),
        );
    }

    for param in &params.parameters {
        if longs.contains(&param.cli_format) {
            return Err(AppError::Config(format!(
                "Parameter flag --{} collides with a built-in flag",
                param.cli_format
            )));
        }

        command = command.arg(
            Arg::new(param_id(&param.cli_format))
                .long(param.cli_format.clone())
                .value_name("VALUE")
                .action(ArgAction::Set)
                .help(param.description.clone()),
        );
    }

    Ok(command)
}

/// Whether a declared option was passed; undeclared options are off.
fn option_set(matches: &ArgMatches, params: &ParamsConfig, cli_format: &str) -> bool {
    params.has_option(cli_format) && matches.get_flag(&option_id(cli_format))
}

/// Resolve the invocation mode from parsed matches.
pub fn select_mode(matches: &ArgMatches, configurator: &Configurator) -> Mode {
    let params = configurator.params();

    let provided = configurator.provided_values(|definition| {
        matches
            .get_one::<String>(&param_id(&definition.cli_format))
            .cloned()
    });

    Mode::select(
        option_set(matches, params, DELETE_OPTION),
        option_set(matches, params, TEST_OPTION),
        option_set(matches, params, INTERACTIVE_OPTION),
        provided,
    )
}
