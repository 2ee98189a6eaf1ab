//! Prints the asset graph a set of descriptors resolves to, as JSON.
//!
//! Filters named on the command line are registered as pass-through filters, so the plan
//! shows ordering and debug suppression without running any transformation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use asset_factory::asset::FileAsset;
use asset_factory::filter::DEBUG_SENTINEL;
use asset_factory::{
  Asset, AssetCollection, AssetFactory, AssetManager, AssetOptions, AssetSummary, FactoryConfig,
  Filter, FilterManager,
};
use clap::Parser;
use log::{Level, info};

#[derive(Debug, Parser)]
#[command(name = "assetgraph", version, about = "Plan a composite asset from descriptors")]
struct Args {
  /// Configuration file (JSON or YAML); `assets.config.*` in the working directory otherwise.
  #[arg(long)]
  config: Option<PathBuf>,
  /// Root directory for relative descriptors, overriding the configuration.
  #[arg(long)]
  root: Option<String>,
  /// Skip `?`-prefixed filters.
  #[arg(long)]
  debug: bool,
  /// Output template; `*` is replaced by the asset name.
  #[arg(long)]
  output: Option<String>,
  /// Asset name; derived from inputs and filters when omitted.
  #[arg(long)]
  name: Option<String>,
  /// Filter name to attach, in order. Prefix with `?` to skip it in debug mode.
  #[arg(long = "filter", value_name = "NAME")]
  filters: Vec<String>,
  /// Register an asset for `@NAME` descriptors.
  #[arg(long = "reference", value_name = "NAME=INPUT", value_parser = parse_reference)]
  references: Vec<(String, String)>,
  /// Extra root absolute descriptors may live under.
  #[arg(long = "extra-root", value_name = "DIR")]
  roots: Vec<String>,
  /// Output variable appended to the template.
  #[arg(long = "var", value_name = "VAR")]
  vars: Vec<String>,
  /// List the files each glob currently matches.
  #[arg(long)]
  expand_globs: bool,
  /// Log every resolution step.
  #[arg(short, long)]
  verbose: bool,
  /// Input descriptors: paths, globs, URLs or `@references`.
  #[arg(required = true)]
  inputs: Vec<String>,
}

fn main() -> Result<()> {
  let args = Args::parse();
  let level = if args.verbose { Level::Debug } else { Level::Info };
  simple_logger::init_with_level(level)?;

  let mut config = load_config(args.config.as_deref())?;
  if let Some(root) = &args.root {
    config.root = root.clone();
  }
  if args.debug {
    config.debug = true;
  }

  let mut factory = AssetFactory::from_config(&config);
  factory.set_filter_manager(Arc::new(passthrough_filters(&args.filters)?));
  factory.set_asset_manager(Arc::new(register_references(&factory, &args.references)?));

  let mut options = AssetOptions {
    output: args.output,
    name: args.name,
    roots: args.roots,
    vars: args.vars,
    ..AssetOptions::default()
  };
  if args.debug {
    options = options.with_debug(true);
  }

  let asset = factory
    .create_asset(args.inputs, args.filters, options)
    .context("failed to assemble asset")?;
  info!(
    "resolved {} inputs into {}",
    asset.len(),
    asset.target_path().unwrap_or_default()
  );

  let summary = summarize(&asset, args.expand_globs)?;
  println!("{}", serde_json::to_string_pretty(&summary)?);
  Ok(())
}

fn load_config(path: Option<&Path>) -> Result<FactoryConfig> {
  match path {
    Some(path) => FactoryConfig::from_path(path)
      .with_context(|| format!("failed to load configuration from {}", path.display())),
    None => {
      let cwd = std::env::current_dir().context("failed to read the working directory")?;
      Ok(FactoryConfig::discover(&cwd))
    }
  }
}

fn passthrough_filters(names: &[String]) -> Result<FilterManager> {
  let passthrough: Arc<dyn Filter> =
    Arc::new(|content: &str| -> anyhow::Result<String> { Ok(content.to_string()) });

  let mut manager = FilterManager::new();
  for name in names {
    let name = name.trim_start_matches(DEBUG_SENTINEL);
    if name.is_empty() || manager.has(name) {
      continue;
    }
    manager
      .set(name, Arc::clone(&passthrough))
      .with_context(|| format!("cannot register filter \"{name}\""))?;
  }
  Ok(manager)
}

fn register_references(
  factory: &AssetFactory,
  references: &[(String, String)],
) -> Result<AssetManager> {
  let mut manager = AssetManager::new();
  for (name, input) in references {
    let asset = factory
      .create_asset(
        input.as_str(),
        Vec::<String>::new(),
        AssetOptions::default().with_name(name.as_str()),
      )
      .with_context(|| format!("failed to resolve reference \"{name}\""))?;
    manager
      .set(name, asset)
      .with_context(|| format!("cannot register reference \"{name}\""))?;
  }
  Ok(manager)
}

fn parse_reference(value: &str) -> Result<(String, String)> {
  let (name, input) = value
    .split_once('=')
    .ok_or_else(|| anyhow!("expected NAME=INPUT, got \"{value}\""))?;
  Ok((name.to_string(), input.to_string()))
}

fn summarize(asset: &AssetCollection, expand_globs: bool) -> Result<AssetSummary> {
  let mut summary = asset.summary();
  if !expand_globs {
    return Ok(summary);
  }

  for (child, node) in asset.children().iter().zip(summary.children.iter_mut()) {
    if let Asset::Glob(glob) = child {
      node.children = glob
        .expand()
        .with_context(|| format!("failed to expand {}", glob.pattern()))?
        .into_iter()
        .map(|file: FileAsset| Asset::from(file).summary())
        .collect();
    }
  }
  Ok(summary)
}
