//! Interactive elicitation of parameter values.

use crate::types::{is_storable, CacheEntry, ProvidedValue};
use paramconf_core::{AppResult, ParamsConfig, NOT_DEFINED};
use std::io::{BufRead, Write};

/// Prompt once per parameter definition and collect the entered values.
///
/// Each prompt shows the namespace-qualified name, followed by the cached
/// value in parentheses when one is known. An empty line keeps the cached
/// value. Parameters left without a value are omitted from the result, so
/// an empty result means nothing was supplied.
///
/// # Arguments
/// * `params` - Parameter definitions to prompt for, in order
/// * `cached` - Cache contents; names missing from it count as undefined
/// * `input` - Line source (stdin in the CLI)
/// * `output` - Prompt sink (stdout in the CLI)
pub fn elicit_values<R: BufRead, W: Write>(
    params: &ParamsConfig,
    cached: &[CacheEntry],
    input: &mut R,
    output: &mut W,
) -> AppResult<Vec<ProvidedValue>> {
    writeln!(output, "Please provide values for each parameters.")?;

    let mut values = Vec::new();

    for definition in &params.parameters {
        let name = params.qualified_name(&definition.name);
        let cached_value = cached
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value.as_str())
            .unwrap_or(NOT_DEFINED);

        if cached_value == NOT_DEFINED {
            write!(output, "{}: ", name)?;
        } else {
            write!(output, "{} ({}): ", name, cached_value)?;
        }
        output.flush()?;

        let mut line = String::new();
        input.read_line(&mut line)?;
        let mut value = line.trim_end_matches(['\r', '\n']).to_string();

        if value.is_empty() && cached_value != NOT_DEFINED {
            value = cached_value.to_string();
        }

        if is_storable(&name, &value) {
            tracing::debug!("Elicited value for {}", name);
            values.push(ProvidedValue {
                name,
                value,
                description: definition.description.clone(),
            });
        }
    }

    Ok(values)
}
