use serde::{Deserialize, Serialize};

use super::{Asset, AssetCollection, AssetState};

/// Serializable snapshot of an asset graph node.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSummary {
  /// Variant label (`file`, `glob`, `http`, `reference`, `collection`).
  pub kind: String,
  /// File path, glob pattern, URL or reference name.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub source: Option<String>,
  /// Root directory the source was resolved against.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub root: Option<String>,
  /// Bound output path.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub target_path: Option<String>,
  /// Names of the attached filters in order.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub filters: Vec<String>,
  /// Output variables.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub vars: Vec<String>,
  /// Children of a collection, or the referenced asset of a reference.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub children: Vec<AssetSummary>,
}

impl AssetSummary {
  pub(super) fn of(asset: &Asset) -> Self {
    let children = match asset {
      Asset::Collection(collection) => return Self::of_collection(collection),
      Asset::Reference(reference) => vec![Self::of(reference.asset())],
      Asset::File(_) | Asset::Glob(_) | Asset::Http(_) => Vec::new(),
    };

    Self::from_state(
      asset.kind(),
      asset.source_path(),
      asset.source_root(),
      asset.state(),
      children,
    )
  }

  pub(super) fn of_collection(collection: &AssetCollection) -> Self {
    Self::from_state(
      "collection",
      None,
      None,
      &collection.state,
      collection.children().iter().map(Self::of).collect(),
    )
  }

  fn from_state(
    kind: &str,
    source: Option<&str>,
    root: Option<&str>,
    state: &AssetState,
    children: Vec<AssetSummary>,
  ) -> Self {
    Self {
      kind: kind.to_string(),
      source: source.map(str::to_string),
      root: root.map(str::to_string),
      target_path: state.target_path().map(str::to_string),
      filters: state.filters().names().into_iter().map(str::to_string).collect(),
      vars: state.vars().to_vec(),
      children,
    }
  }
}
