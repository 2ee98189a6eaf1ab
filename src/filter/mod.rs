//! Filter capabilities and the ordered, duplicate-free chains assets carry.

mod pipeline;

use std::fmt;
use std::sync::Arc;

pub use pipeline::{DEBUG_SENTINEL, attach_filters};

/// A content transformation. The crate only orders filters; implementations do the work.
pub trait Filter: Send + Sync {
  /// Transform the given content.
  fn apply(&self, content: &str) -> anyhow::Result<String>;
}

impl<F> Filter for F
where
  F: Fn(&str) -> anyhow::Result<String> + Send + Sync,
{
  fn apply(&self, content: &str) -> anyhow::Result<String> {
    self(content)
  }
}

/// A filter together with the name it was registered under.
#[derive(Clone)]
pub struct FilterHandle {
  name: String,
  filter: Arc<dyn Filter>,
}

impl FilterHandle {
  /// Wrap a filter under the given registry name.
  pub fn new(name: impl Into<String>, filter: Arc<dyn Filter>) -> Self {
    Self {
      name: name.into(),
      filter,
    }
  }

  /// Name the filter was registered under.
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Shared filter object.
  pub fn filter(&self) -> &Arc<dyn Filter> {
    &self.filter
  }

  /// Two handles are the same filter when they share a name or the same filter object.
  pub fn is_same_filter(&self, other: &FilterHandle) -> bool {
    self.name == other.name || Arc::ptr_eq(&self.filter, &other.filter)
  }
}

impl fmt::Debug for FilterHandle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("FilterHandle").field(&self.name).finish()
  }
}

/// Ordered filters attached to an asset.
#[derive(Debug, Clone, Default)]
pub struct FilterChain {
  filters: Vec<FilterHandle>,
}

impl FilterChain {
  /// Append `filter` unless the chain already holds it. Returns whether it was added.
  pub fn ensure(&mut self, filter: FilterHandle) -> bool {
    if self.contains(&filter) {
      return false;
    }
    self.filters.push(filter);
    true
  }

  /// Whether an equivalent filter is already attached.
  pub fn contains(&self, filter: &FilterHandle) -> bool {
    self
      .filters
      .iter()
      .any(|existing| existing.is_same_filter(filter))
  }

  /// Registered names of the attached filters, in attachment order.
  pub fn names(&self) -> Vec<&str> {
    self.filters.iter().map(FilterHandle::name).collect()
  }

  /// Iterate over the attached filters in order.
  pub fn iter(&self) -> impl Iterator<Item = &FilterHandle> {
    self.filters.iter()
  }

  /// Number of attached filters.
  pub fn len(&self) -> usize {
    self.filters.len()
  }

  /// Whether no filter is attached.
  pub fn is_empty(&self) -> bool {
    self.filters.is_empty()
  }

  /// Run `content` through every filter in attachment order.
  pub fn apply(&self, content: &str) -> anyhow::Result<String> {
    self
      .filters
      .iter()
      .try_fold(content.to_string(), |current, handle| {
        handle.filter.apply(&current)
      })
  }
}
