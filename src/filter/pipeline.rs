use log::trace;

use crate::asset::AssetCollection;
use crate::error::{FactoryError, FactoryResult};
use crate::registry::FilterLookup;

/// Leading character marking a filter that is skipped in debug mode.
pub const DEBUG_SENTINEL: char = '?';

/// Resolve `names` through `registry` and ensure-attach them to `asset` in order.
///
/// `?name` entries are attached only when `debug` is off; suppressed entries never reach
/// the registry, so a debug build with only optional filters needs no registry at all.
pub fn attach_filters<S: AsRef<str>>(
  asset: &mut AssetCollection,
  names: &[S],
  debug: bool,
  registry: Option<&dyn FilterLookup>,
) -> FactoryResult<()> {
  for raw in names {
    let raw = raw.as_ref();
    let (name, optional) = match raw.strip_prefix(DEBUG_SENTINEL) {
      Some(name) => (name, true),
      None => (raw, false),
    };

    if name.is_empty() {
      return Err(FactoryError::InvalidInput(format!(
        "empty filter name \"{raw}\""
      )));
    }

    if optional && debug {
      trace!("skipping filter \"{name}\" in debug mode");
      continue;
    }

    let registry = registry.ok_or(FactoryError::ConfigurationMissing("filter manager"))?;
    let filter = registry
      .get(name)
      .ok_or_else(|| FactoryError::LookupFailed {
        kind: "filter",
        name: name.to_string(),
      })?;

    if asset.ensure_filter(filter) {
      trace!("attached filter \"{name}\"");
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use super::*;
  use crate::registry::FilterManager;

  fn registry(names: &[&str]) -> FilterManager {
    let mut manager = FilterManager::new();
    for name in names {
      manager
        .set(
          name,
          Arc::new(|content: &str| -> anyhow::Result<String> { Ok(content.to_string()) }),
        )
        .unwrap();
    }
    manager
  }

  #[test]
  fn suppresses_optional_filters_in_debug_mode() {
    let manager = registry(&["a", "b"]);

    let mut debug = AssetCollection::new();
    attach_filters(&mut debug, &["a", "?b"], true, Some(&manager)).unwrap();
    assert_eq!(debug.filters().names(), vec!["a"]);

    let mut release = AssetCollection::new();
    attach_filters(&mut release, &["a", "?b"], false, Some(&manager)).unwrap();
    assert_eq!(release.filters().names(), vec!["a", "b"]);
  }

  #[test]
  fn repeated_names_attach_once() {
    let manager = registry(&["less", "cssmin"]);
    let mut asset = AssetCollection::new();
    attach_filters(&mut asset, &["less", "cssmin", "?less"], false, Some(&manager)).unwrap();
    assert_eq!(asset.filters().names(), vec!["less", "cssmin"]);
  }

  #[test]
  fn requires_a_registry_for_active_filters() {
    let mut asset = AssetCollection::new();
    let err = attach_filters(&mut asset, &["minify"], false, None).unwrap_err();
    assert!(matches!(err, FactoryError::ConfigurationMissing("filter manager")));
  }

  #[test]
  fn suppressed_filters_do_not_need_a_registry() {
    let mut asset = AssetCollection::new();
    attach_filters(&mut asset, &["?minify"], true, None).unwrap();
    assert!(asset.filters().is_empty());
  }

  #[test]
  fn unknown_filters_fail() {
    let manager = registry(&["less"]);
    let mut asset = AssetCollection::new();
    let err = attach_filters(&mut asset, &["less", "sass"], false, Some(&manager)).unwrap_err();
    assert!(matches!(
      err,
      FactoryError::LookupFailed { kind: "filter", ref name } if name == "sass"
    ));
  }

  #[test]
  fn empty_names_are_invalid() {
    let manager = registry(&["less"]);
    for names in [[""], ["?"]] {
      let mut asset = AssetCollection::new();
      let err = attach_filters(&mut asset, &names, true, Some(&manager)).unwrap_err();
      assert!(matches!(err, FactoryError::InvalidInput(_)));
    }
  }
}
