//! Named lookups the factory resolves references and filters through.

mod assets;
mod filters;

pub use assets::{AssetManager, ReferenceLookup};
pub use filters::{FilterLookup, FilterManager};

use regex::Regex;

use crate::error::{FactoryError, FactoryResult};

fn registry_name_pattern() -> &'static Regex {
  use std::sync::OnceLock;

  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("invalid registry name regex"))
}

/// Reject names that could not be written as an `@name` reference or a filter name.
fn validate_name(kind: &'static str, name: &str) -> FactoryResult<()> {
  if registry_name_pattern().is_match(name) {
    Ok(())
  } else {
    Err(FactoryError::InvalidName {
      kind,
      name: name.to_string(),
    })
  }
}
