//! Error types shared by the resolver, the filter pipeline and the factory.

use thiserror::Error;

/// Result alias used by every asset construction operation.
pub type FactoryResult<T> = Result<T, FactoryError>;

/// Failures raised while assembling a composite asset.
///
/// Every variant aborts the whole `create_asset` call; no partially built collection is
/// ever handed back to the caller.
#[derive(Debug, Error)]
pub enum FactoryError {
  /// A reference or filter name was used but the matching collaborator was never injected.
  #[error("there is no {0} configured")]
  ConfigurationMissing(&'static str),

  /// The collaborator is configured but does not know the requested name.
  #[error("there is no {kind} named \"{name}\"")]
  LookupFailed {
    /// What was being looked up (`asset` or `filter`).
    kind: &'static str,
    /// Name that failed to resolve.
    name: String,
  },

  /// A descriptor or filter name that cannot describe anything (empty strings and the like).
  #[error("invalid input: {0}")]
  InvalidInput(String),

  /// A registry refused a name that does not match `^[a-zA-Z0-9_]+$`.
  #[error("invalid {kind} name \"{name}\"")]
  InvalidName {
    /// Registry kind (`asset` or `filter`).
    kind: &'static str,
    /// Rejected name.
    name: String,
  },

  /// A post-processing worker failed; the remaining workers were skipped.
  #[error("worker #{index} failed: {error:#}")]
  Worker {
    /// Registration index of the failing worker.
    index: usize,
    /// Error reported by the worker.
    error: anyhow::Error,
  },

  /// A glob asset carries a pattern the glob engine cannot parse.
  #[error("invalid glob pattern")]
  Glob(#[from] glob::PatternError),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lookup_failures_name_the_missing_entry() {
    let err = FactoryError::LookupFailed {
      kind: "filter",
      name: "minify".into(),
    };
    assert_eq!(err.to_string(), "there is no filter named \"minify\"");
  }

  #[test]
  fn worker_errors_include_the_source_chain() {
    let error = anyhow::anyhow!("disk full").context("failed to stamp asset");
    let err = FactoryError::Worker { index: 2, error };
    assert_eq!(
      err.to_string(),
      "worker #2 failed: failed to stamp asset: disk full"
    );
  }
}
