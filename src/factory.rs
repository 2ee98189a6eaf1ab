//! Public entry point assembling composite assets from descriptors and filter names.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use log::debug;
use serde::Deserialize;

use crate::asset::AssetCollection;
use crate::config::FactoryConfig;
use crate::error::{FactoryError, FactoryResult};
use crate::filter::attach_filters;
use crate::naming::generate_name;
use crate::paths::{WILDCARD, trim_root};
use crate::registry::{FilterLookup, ReferenceLookup};
use crate::resolver::{ResolveContext, resolve};
use crate::worker::Worker;

/// One descriptor or an ordered list of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptors(Vec<String>);

impl Descriptors {
  /// Descriptors in caller order.
  pub fn as_slice(&self) -> &[String] {
    &self.0
  }

  /// Whether the list holds no descriptor.
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl From<&str> for Descriptors {
  fn from(value: &str) -> Self {
    Self(vec![value.to_string()])
  }
}

impl From<String> for Descriptors {
  fn from(value: String) -> Self {
    Self(vec![value])
  }
}

impl<S: Into<String>> From<Vec<S>> for Descriptors {
  fn from(values: Vec<S>) -> Self {
    Self(values.into_iter().map(Into::into).collect())
  }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Descriptors {
  fn from(values: [S; N]) -> Self {
    Self(values.into_iter().map(Into::into).collect())
  }
}

impl<S: AsRef<str>> From<&[S]> for Descriptors {
  fn from(values: &[S]) -> Self {
    Self(values.iter().map(|value| value.as_ref().to_string()).collect())
  }
}

/// Per-call overrides. Absent values fall back to the factory configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssetOptions {
  /// Output template; every `*` is replaced by the asset name.
  pub output: Option<String>,
  /// Asset name; generated from the inputs and filters when absent.
  pub name: Option<String>,
  /// Debug flag overriding the factory's for this call.
  pub debug: Option<bool>,
  /// Extra roots absolute descriptors may live under, searched before the factory root.
  pub roots: Vec<String>,
  /// Output variables; each missing `{var}` placeholder is appended after the `*`.
  pub vars: Vec<String>,
}

impl AssetOptions {
  /// Set the output template.
  pub fn with_output(mut self, output: impl Into<String>) -> Self {
    self.output = Some(output.into());
    self
  }

  /// Set the asset name.
  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }

  /// Override the debug flag.
  pub fn with_debug(mut self, debug: bool) -> Self {
    self.debug = Some(debug);
    self
  }

  /// Add a candidate root for absolute descriptors.
  pub fn with_root(mut self, root: impl Into<String>) -> Self {
    self.roots.push(root.into());
    self
  }

  /// Add an output variable.
  pub fn with_var(mut self, var: impl Into<String>) -> Self {
    self.vars.push(var.into());
    self
  }
}

/// Options after merging the call overrides with the factory defaults.
#[derive(Debug)]
struct EffectiveOptions {
  output: String,
  name: String,
  debug: bool,
  roots: Vec<String>,
  vars: Vec<String>,
}

/// Builds composite assets.
///
/// `create_asset` only needs `&self` and keeps no per-call state, so concurrent calls do not
/// interfere. The setters need `&mut self`; sharing a factory that is still being
/// reconfigured is the caller's synchronization problem.
pub struct AssetFactory {
  root: String,
  debug: bool,
  default_output: String,
  workers: Vec<Box<dyn Worker>>,
  asset_manager: Option<Arc<dyn ReferenceLookup>>,
  filter_manager: Option<Arc<dyn FilterLookup>>,
}

impl AssetFactory {
  /// Factory rooted at `root`, with debug off and the default output template.
  pub fn new(root: &str) -> Self {
    Self::from_config(&FactoryConfig {
      root: root.to_string(),
      ..FactoryConfig::default()
    })
  }

  /// Factory configured from a loaded [`FactoryConfig`].
  ///
  /// A root that is still relative is anchored at the working directory.
  pub fn from_config(config: &FactoryConfig) -> Self {
    let FactoryConfig {
      root,
      debug,
      default_output,
    } = config.clone().anchored_at(Path::new("."));

    Self {
      root: trim_root(&root).to_string(),
      debug,
      default_output,
      workers: Vec::new(),
      asset_manager: None,
      filter_manager: None,
    }
  }

  /// Root directory, without trailing separators.
  pub fn root(&self) -> &str {
    &self.root
  }

  /// Whether `?`-prefixed filters are skipped by default.
  pub fn is_debug(&self) -> bool {
    self.debug
  }

  /// Toggle the default debug flag.
  pub fn set_debug(&mut self, debug: bool) {
    self.debug = debug;
  }

  /// Template used when a call supplies no output.
  pub fn default_output(&self) -> &str {
    &self.default_output
  }

  /// Replace the default output template.
  pub fn set_default_output(&mut self, output: impl Into<String>) {
    self.default_output = output.into();
  }

  /// Append a worker; workers run in registration order.
  pub fn add_worker(&mut self, worker: impl Worker + 'static) {
    self.workers.push(Box::new(worker));
  }

  /// Number of registered workers.
  pub fn worker_count(&self) -> usize {
    self.workers.len()
  }

  /// Registry `@name` descriptors resolve through.
  pub fn asset_manager(&self) -> Option<&Arc<dyn ReferenceLookup>> {
    self.asset_manager.as_ref()
  }

  /// Install or replace the asset registry.
  pub fn set_asset_manager(&mut self, manager: Arc<dyn ReferenceLookup>) {
    self.asset_manager = Some(manager);
  }

  /// Registry filter names resolve through.
  pub fn filter_manager(&self) -> Option<&Arc<dyn FilterLookup>> {
    self.filter_manager.as_ref()
  }

  /// Install or replace the filter registry.
  pub fn set_filter_manager(&mut self, manager: Arc<dyn FilterLookup>) {
    self.filter_manager = Some(manager);
  }

  /// Builder-style [`AssetFactory::set_asset_manager`].
  pub fn with_asset_manager(mut self, manager: Arc<dyn ReferenceLookup>) -> Self {
    self.set_asset_manager(manager);
    self
  }

  /// Builder-style [`AssetFactory::set_filter_manager`].
  pub fn with_filter_manager(mut self, manager: Arc<dyn FilterLookup>) -> Self {
    self.set_filter_manager(manager);
    self
  }

  /// Builder-style [`AssetFactory::add_worker`].
  pub fn with_worker(mut self, worker: impl Worker + 'static) -> Self {
    self.add_worker(worker);
    self
  }

  /// Assemble a composite asset.
  ///
  /// Inputs become children in the given order, filters are attached in the given order
  /// (skipping `?`-prefixed ones in debug mode), the output template is bound to the name
  /// and the workers run last. Any failure aborts the call; a worker failure leaves the
  /// earlier workers' changes on a collection that is then dropped.
  pub fn create_asset(
    &self,
    inputs: impl Into<Descriptors>,
    filters: impl Into<Descriptors>,
    options: AssetOptions,
  ) -> FactoryResult<AssetCollection> {
    let inputs = inputs.into();
    let filters = filters.into();
    let options = self.effective_options(&inputs, &filters, options)?;

    let mut collection = AssetCollection::new();
    collection.set_vars(options.vars.clone());

    let context = ResolveContext {
      root: &self.root,
      roots: &options.roots,
      references: self.asset_manager.as_deref(),
      vars: &options.vars,
    };
    for input in inputs.as_slice() {
      collection.add(resolve(input, &context)?);
    }

    attach_filters(
      &mut collection,
      filters.as_slice(),
      options.debug,
      self.filter_manager.as_deref(),
    )?;

    let target_path = options.output.replace(WILDCARD, &options.name);
    debug!(
      "assembled asset \"{}\" with {} inputs targeting {target_path}",
      options.name,
      collection.len()
    );
    collection.set_target_path(target_path);

    for (index, worker) in self.workers.iter().enumerate() {
      worker
        .process(&mut collection)
        .map_err(|error| FactoryError::Worker { index, error })?;
    }

    Ok(collection)
  }

  fn effective_options(
    &self,
    inputs: &Descriptors,
    filters: &Descriptors,
    options: AssetOptions,
  ) -> FactoryResult<EffectiveOptions> {
    let AssetOptions {
      output,
      name,
      debug,
      roots,
      vars,
    } = options;

    if let Some(name) = name.as_deref().filter(|name| name.contains(WILDCARD)) {
      return Err(FactoryError::InvalidInput(format!(
        "asset name \"{name}\" contains the output wildcard"
      )));
    }

    let output = output.unwrap_or_else(|| self.default_output.clone());
    let mut roots: Vec<String> = roots
      .iter()
      .map(|root| trim_root(root).to_string())
      .collect();
    roots.push(self.root.clone());

    Ok(EffectiveOptions {
      output: append_missing_vars(&output, &vars),
      name: name.unwrap_or_else(|| generate_name(inputs.as_slice(), filters.as_slice())),
      debug: debug.unwrap_or(self.debug),
      roots,
      vars,
    })
  }
}

impl fmt::Debug for AssetFactory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AssetFactory")
      .field("root", &self.root)
      .field("debug", &self.debug)
      .field("default_output", &self.default_output)
      .field("workers", &self.workers.len())
      .field("asset_manager", &self.asset_manager.is_some())
      .field("filter_manager", &self.filter_manager.is_some())
      .finish()
  }
}

/// Rewrite `*` to `*.{var}` for every variable the template does not mention yet.
fn append_missing_vars(output: &str, vars: &[String]) -> String {
  let missing: Vec<String> = vars
    .iter()
    .map(|var| format!("{{{var}}}"))
    .filter(|placeholder| !output.contains(placeholder.as_str()))
    .collect();

  if missing.is_empty() {
    return output.to_string();
  }
  output.replace(WILDCARD, &format!("{WILDCARD}.{}", missing.join(".")))
}
