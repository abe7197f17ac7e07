//! Store, load, delete and trial operations over the namespaced store.
//!
//! Store and load touch parameters one at a time in definition order. A
//! failure on one parameter is reported and the loop moves on; nothing is
//! rolled back.

use crate::cache::CacheFile;
use crate::elicit::elicit_values;
use crate::mode::{Mode, Outcome, Source};
use crate::types::{is_storable, CacheEntry, DeleteReport, ProvidedValue, StoreReport};
use paramconf_core::{AppResult, ParameterDefinition, ParamsConfig};
use paramconf_store::{Lookup, ParameterStore};
use std::io::{BufRead, Write};
use std::sync::Arc;

const NO_VALUES_INTERACTIVE: &str =
    "At least one parameter needs to be provided if there is no cache available.";
const NO_VALUES_ARGUMENTS: &str =
    "At least one parameter needs to be provided for non-interactive mode.";

/// Reconciles supplied values with the store and the local cache.
pub struct Configurator {
    params: ParamsConfig,
    store: Arc<dyn ParameterStore>,
    cache: CacheFile,
}

impl Configurator {
    pub fn new(params: ParamsConfig, store: Arc<dyn ParameterStore>, cache: CacheFile) -> Self {
        Self {
            params,
            store,
            cache,
        }
    }

    pub fn params(&self) -> &ParamsConfig {
        &self.params
    }

    pub fn cache(&self) -> &CacheFile {
        &self.cache
    }

    /// Collect command-line values, one lookup per definition.
    ///
    /// `lookup` returns the raw flag value for a definition, if given.
    pub fn provided_values<F>(&self, mut lookup: F) -> Vec<ProvidedValue>
    where
        F: FnMut(&ParameterDefinition) -> Option<String>,
    {
        self.params
            .parameters
            .iter()
            .filter_map(|definition| {
                let name = self.params.qualified_name(&definition.name);
                let value = lookup(definition)?;
                is_storable(&name, &value).then(|| ProvidedValue {
                    name,
                    value,
                    description: definition.description.clone(),
                })
            })
            .collect()
    }

    /// Run one invocation.
    pub async fn run<R: BufRead, W: Write>(
        &self,
        mode: Mode,
        input: &mut R,
        output: &mut W,
    ) -> AppResult<Outcome> {
        tracing::info!("Running in {} mode", mode.name());

        match mode {
            Mode::Delete => Ok(Outcome::Deleted(self.delete_parameters(output).await?)),
            Mode::Trial(source) => {
                let values = match self.collect(source, input, output)? {
                    Ok(values) => values,
                    Err(message) => return abort(message, output),
                };

                let entries = self.trial_entries(&values);
                self.write_cache(&entries, output)?;
                Ok(Outcome::Trialed(entries))
            }
            Mode::Apply(source) => {
                let values = match self.collect(source, input, output)? {
                    Ok(values) => values,
                    Err(message) => return abort(message, output),
                };

                let report = self.store_parameters(&values, output).await?;
                let loaded = self.load_parameters(output).await?;
                self.write_cache(&loaded, output)?;
                Ok(Outcome::Applied { report, loaded })
            }
        }
    }

    /// Gather values from the source, or the abort message if none were given.
    fn collect<R: BufRead, W: Write>(
        &self,
        source: Source,
        input: &mut R,
        output: &mut W,
    ) -> AppResult<Result<Vec<ProvidedValue>, &'static str>> {
        let (values, message) = match source {
            Source::Interactive => {
                let cached = self.cache.load()?;
                let values = elicit_values(&self.params, &cached, input, output)?;
                (values, NO_VALUES_INTERACTIVE)
            }
            Source::Arguments(values) => (values, NO_VALUES_ARGUMENTS),
        };

        if values.is_empty() {
            Ok(Err(message))
        } else {
            Ok(Ok(values))
        }
    }

    /// Upsert every supplied value.
    pub async fn store_parameters<W: Write>(
        &self,
        values: &[ProvidedValue],
        output: &mut W,
    ) -> AppResult<StoreReport> {
        writeln!(
            output,
            "Storing parameters to the {} parameter store.",
            self.store.store_name()
        )?;

        let mut report = StoreReport::default();

        for value in values {
            let description = format!("{} under {}", value.description, self.params.namespace);

            match self.store.put(&value.name, &value.value, &description).await {
                Ok(()) => {
                    writeln!(
                        output,
                        "The parameter \"{}\" has been stored in the parameter store.",
                        value.name
                    )?;
                    report.stored.push(value.name.clone());
                }
                Err(e) => {
                    tracing::error!("Failed to store {}: {}", value.name, e);
                    writeln!(output, "{}", e)?;
                    report.failed.push((value.name.clone(), e.to_string()));
                }
            }
        }

        tracing::info!(
            "Stored {} parameters, {} failed",
            report.stored.len(),
            report.failed.len()
        );

        Ok(report)
    }

    /// Fetch the current value of every definition.
    ///
    /// Exactly one entry per definition is returned; anything that could not
    /// be read is recorded as undefined.
    pub async fn load_parameters<W: Write>(&self, output: &mut W) -> AppResult<Vec<CacheEntry>> {
        let mut entries = Vec::with_capacity(self.params.parameters.len());

        for definition in &self.params.parameters {
            let name = self.params.qualified_name(&definition.name);

            let entry = match self.store.get(&name).await {
                Ok(Lookup::Found(value)) => CacheEntry::new(name, value),
                Ok(Lookup::NotFound) => {
                    writeln!(
                        output,
                        "Parameter \"{}\" has not been stored in the parameter store.",
                        definition.name
                    )?;
                    CacheEntry::undefined(name)
                }
                Err(e) => {
                    tracing::error!("Failed to load {}: {}", name, e);
                    writeln!(output, "{}", e)?;
                    CacheEntry::undefined(name)
                }
            };

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Delete every managed parameter in one request, then drop the cache.
    pub async fn delete_parameters<W: Write>(&self, output: &mut W) -> AppResult<DeleteReport> {
        writeln!(
            output,
            "Deleting all parameters starting with \"{}\" from the {} parameter store.",
            self.params.namespace,
            self.store.store_name()
        )?;

        let names = self.params.qualified_names();
        let mut report = DeleteReport::default();

        if names.is_empty() {
            tracing::debug!("No parameter definitions; skipping delete request");
        } else {
            match self.store.delete(&names).await {
                Ok(deleted) => {
                    if deleted.is_empty() {
                        writeln!(
                            output,
                            "No parameter stored with the namespace of \"{}\".",
                            self.params.namespace
                        )?;
                    } else {
                        writeln!(output, "Deleted parameters: {}", deleted.join(", "))?;
                    }
                    report.deleted = deleted;
                }
                Err(e) => {
                    tracing::error!("Bulk delete failed: {}", e);
                    writeln!(output, "{}", e)?;
                    report.error = Some(e.to_string());
                }
            }
        }

        report.cache_removed = self.cache.remove()?;
        if report.cache_removed {
            tracing::info!("Removed cache file {:?}", self.cache.path());
        }

        Ok(report)
    }

    /// The cache as it would look after storing `values`.
    pub fn trial_entries(&self, values: &[ProvidedValue]) -> Vec<CacheEntry> {
        self.params
            .parameters
            .iter()
            .map(|definition| {
                let name = self.params.qualified_name(&definition.name);
                match values.iter().find(|v| v.name == name) {
                    Some(value) => CacheEntry::new(name, value.value.clone()),
                    None => CacheEntry::undefined(name),
                }
            })
            .collect()
    }

    /// Replace the cache file with `entries`.
    pub fn write_cache<W: Write>(&self, entries: &[CacheEntry], output: &mut W) -> AppResult<()> {
        writeln!(output, "Writing parameters to {} .", self.cache.path().display())?;
        self.cache.write(entries)
    }
}

fn abort<W: Write>(message: &str, output: &mut W) -> AppResult<Outcome> {
    tracing::info!("Nothing to do: {}", message);
    writeln!(output, "{}", message)?;
    Ok(Outcome::Aborted(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use paramconf_core::{AppError, NOT_DEFINED};
    use paramconf_store::MemoryStore;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    /// Memory store that fails chosen names and counts every call.
    #[derive(Default)]
    struct ScriptedStore {
        inner: MemoryStore,
        failing: Vec<String>,
        fail_delete: bool,
        calls: AtomicUsize,
    }

    impl ScriptedStore {
        fn failing(names: &[&str]) -> Self {
            Self {
                failing: names.iter().map(|n| n.to_string()).collect(),
                ..Default::default()
            }
        }

        fn check(&self, name: &str) -> AppResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.iter().any(|n| n == name) {
                return Err(AppError::Store(format!("access denied for {}", name)));
            }
            Ok(())
        }
    }

    #[async_trait::async_trait]
    impl ParameterStore for ScriptedStore {
        fn store_name(&self) -> &str {
            "scripted"
        }

        async fn put(&self, name: &str, value: &str, description: &str) -> AppResult<()> {
            self.check(name)?;
            self.inner.put(name, value, description).await
        }

        async fn get(&self, name: &str) -> AppResult<Lookup> {
            self.check(name)?;
            self.inner.get(name).await
        }

        async fn delete(&self, names: &[String]) -> AppResult<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_delete {
                return Err(AppError::Store("throttled".to_string()));
            }
            self.inner.delete(names).await
        }
    }

    fn params() -> ParamsConfig {
        ParamsConfig::from_json(
            r#"{
  "Namespace": "ns/",
  "Parameters": [
    {"Name": "DbHost", "Description": "Database host", "CLIFormat": "db-host"},
    {"Name": "DbPort", "Description": "Database port", "CLIFormat": "db-port"}
  ]
}"#,
        )
        .unwrap()
    }

    fn setup<S: ParameterStore + 'static>(store: Arc<S>) -> (TempDir, Configurator) {
        let temp = TempDir::new().unwrap();
        let cache = CacheFile::new(temp.path().join("config.cache.json"));
        let configurator = Configurator::new(params(), store, cache);
        (temp, configurator)
    }

    fn from_args(configurator: &Configurator, args: &[(&str, &str)]) -> Vec<ProvidedValue> {
        configurator.provided_values(|definition| {
            args.iter()
                .find(|(flag, _)| *flag == definition.cli_format)
                .map(|(_, value)| value.to_string())
        })
    }

    async fn run(configurator: &Configurator, mode: Mode, input: &str) -> (Outcome, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut output = Vec::new();
        let outcome = configurator.run(mode, &mut reader, &mut output).await.unwrap();
        (outcome, String::from_utf8(output).unwrap())
    }

    #[tokio::test]
    async fn test_store_one_of_two_parameters() {
        let store = Arc::new(MemoryStore::new());
        let (_temp, configurator) = setup(store.clone());

        let values = from_args(&configurator, &[("db-host", "localhost")]);
        let (outcome, output) = run(&configurator, Mode::select(false, false, false, values), "").await;

        let entries = store.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries["ns/DbHost"].value, "localhost");
        assert_eq!(entries["ns/DbHost"].description, "Database host under ns/");
        assert!(output.contains("Parameter \"DbPort\" has not been stored"));

        let expected = vec![
            CacheEntry::new("ns/DbHost", "localhost"),
            CacheEntry::undefined("ns/DbPort"),
        ];
        match outcome {
            Outcome::Applied { report, loaded } => {
                assert_eq!(report.stored, vec!["ns/DbHost".to_string()]);
                assert!(report.is_complete());
                assert_eq!(loaded, expected);
            }
            other => panic!("Expected applied outcome, got {:?}", other),
        }
        assert_eq!(configurator.cache().load().unwrap(), expected);
    }

    #[tokio::test]
    async fn test_store_then_load_round_trip() {
        let store = Arc::new(MemoryStore::new());
        let (_temp, configurator) = setup(store);
        let mut output = Vec::new();

        let values = from_args(&configurator, &[("db-host", "h"), ("db-port", "5432")]);
        configurator.store_parameters(&values, &mut output).await.unwrap();
        let loaded = configurator.load_parameters(&mut output).await.unwrap();

        assert_eq!(
            loaded,
            vec![CacheEntry::new("ns/DbHost", "h"), CacheEntry::new("ns/DbPort", "5432")]
        );
    }

    #[tokio::test]
    async fn test_store_failure_does_not_abort_siblings() {
        let store = Arc::new(ScriptedStore::failing(&["ns/DbHost"]));
        let (_temp, configurator) = setup(store.clone());

        let values = from_args(&configurator, &[("db-host", "h"), ("db-port", "5432")]);
        let (outcome, output) = run(&configurator, Mode::select(false, false, false, values), "").await;

        assert!(output.contains("access denied for ns/DbHost"));
        assert_eq!(store.inner.get("ns/DbPort").await.unwrap().value(), Some("5432"));

        match outcome {
            Outcome::Applied { report, loaded } => {
                assert_eq!(report.stored, vec!["ns/DbPort".to_string()]);
                assert_eq!(report.failed.len(), 1);
                assert_eq!(report.failed[0].0, "ns/DbHost");
                // The unreadable parameter is still represented once
                assert_eq!(loaded.len(), 2);
                assert_eq!(loaded[0], CacheEntry::undefined("ns/DbHost"));
            }
            other => panic!("Expected applied outcome, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_arguments_aborts_without_contacting_store() {
        let store = Arc::new(ScriptedStore::default());
        let (_temp, configurator) = setup(store.clone());

        let values = from_args(&configurator, &[]);
        let (outcome, output) = run(&configurator, Mode::select(false, false, false, values), "").await;

        assert_eq!(outcome, Outcome::Aborted(NO_VALUES_ARGUMENTS.to_string()));
        assert!(output.contains("non-interactive mode"));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
        assert!(!configurator.cache().exists());
    }

    #[tokio::test]
    async fn test_interactive_without_values_aborts() {
        let store = Arc::new(ScriptedStore::default());
        let (_temp, configurator) = setup(store.clone());

        let (outcome, _) = run(&configurator, Mode::select(false, false, true, vec![]), "\n\n").await;

        assert_eq!(outcome, Outcome::Aborted(NO_VALUES_INTERACTIVE.to_string()));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_interactive_reuses_cache() {
        let store = Arc::new(MemoryStore::new());
        let (_temp, configurator) = setup(store.clone());
        configurator
            .cache()
            .write(&[
                CacheEntry::new("ns/DbHost", "cached-host"),
                CacheEntry::undefined("ns/DbPort"),
            ])
            .unwrap();

        let (_, output) = run(&configurator, Mode::select(false, false, true, vec![]), "\n\n").await;

        assert!(output.contains("ns/DbHost (cached-host): "));
        assert_eq!(store.entries()["ns/DbHost"].value, "cached-host");
        assert!(!store.entries().contains_key("ns/DbPort"));
    }

    #[tokio::test]
    async fn test_trial_writes_cache_only() {
        let store = Arc::new(ScriptedStore::default());
        let (_temp, configurator) = setup(store.clone());

        let values = from_args(&configurator, &[("db-port", "5432")]);
        let (outcome, _) = run(&configurator, Mode::select(false, true, false, values), "").await;

        let expected = vec![
            CacheEntry::undefined("ns/DbHost"),
            CacheEntry::new("ns/DbPort", "5432"),
        ];
        assert_eq!(outcome, Outcome::Trialed(expected.clone()));
        assert_eq!(configurator.cache().load().unwrap(), expected);
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_trial_without_values_leaves_cache_alone() {
        let store = Arc::new(MemoryStore::new());
        let (_temp, configurator) = setup(store);

        let (outcome, _) = run(&configurator, Mode::select(false, true, false, vec![]), "").await;

        assert!(matches!(outcome, Outcome::Aborted(_)));
        assert!(!configurator.cache().exists());
    }

    #[tokio::test]
    async fn test_delete_then_load_yields_sentinels() {
        let store = Arc::new(MemoryStore::new());
        let (_temp, configurator) = setup(store.clone());

        let values = from_args(&configurator, &[("db-host", "h"), ("db-port", "1")]);
        run(&configurator, Mode::select(false, false, false, values), "").await;
        assert!(configurator.cache().exists());

        let (outcome, output) = run(&configurator, Mode::Delete, "").await;
        match outcome {
            Outcome::Deleted(report) => {
                assert_eq!(report.deleted, vec!["ns/DbHost".to_string(), "ns/DbPort".to_string()]);
                assert!(report.error.is_none());
                assert!(report.cache_removed);
            }
            other => panic!("Expected deleted outcome, got {:?}", other),
        }
        assert!(output.contains("Deleted parameters: ns/DbHost, ns/DbPort"));
        assert!(!configurator.cache().exists());

        let loaded = configurator.load_parameters(&mut Vec::<u8>::new()).await.unwrap();
        assert!(loaded.iter().all(|entry| entry.value == NOT_DEFINED));
        assert_eq!(loaded.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_with_nothing_stored() {
        let store = Arc::new(MemoryStore::new());
        let (_temp, configurator) = setup(store);

        let (outcome, output) = run(&configurator, Mode::Delete, "").await;

        assert!(output.contains("No parameter stored with the namespace of \"ns/\"."));
        match outcome {
            Outcome::Deleted(report) => {
                assert!(report.deleted.is_empty());
                assert!(!report.cache_removed);
            }
            other => panic!("Expected deleted outcome, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_failure_still_removes_cache() {
        let store = Arc::new(ScriptedStore {
            fail_delete: true,
            ..Default::default()
        });
        let (_temp, configurator) = setup(store);
        configurator.cache().write(&[]).unwrap();

        let (outcome, output) = run(&configurator, Mode::Delete, "").await;

        assert!(output.contains("throttled"));
        match outcome {
            Outcome::Deleted(report) => {
                assert!(report.error.is_some());
                assert!(report.cache_removed);
            }
            other => panic!("Expected deleted outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_sentinel_argument_is_not_provided() {
        let (_temp, configurator) = setup(Arc::new(MemoryStore::new()));
        let values = from_args(&configurator, &[("db-host", "not-defined"), ("db-port", "")]);
        assert!(values.is_empty());
    }

    #[test]
    fn test_trial_entries_cover_every_definition() {
        let (_temp, configurator) = setup(Arc::new(MemoryStore::new()));
        let entries = configurator.trial_entries(&[]);

        assert_eq!(
            entries,
            vec![CacheEntry::undefined("ns/DbHost"), CacheEntry::undefined("ns/DbPort")]
        );
    }
}
