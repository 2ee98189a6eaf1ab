use std::path::Path;
use std::sync::Arc;

use super::{Asset, AssetState};
use crate::error::FactoryResult;
use crate::paths::relative_to;

/// A single file identified by its full path.
#[derive(Debug, Clone)]
pub struct FileAsset {
  source_path: String,
  source_root: Option<String>,
  relative_path: Option<String>,
  pub(super) state: AssetState,
}

impl FileAsset {
  /// Describe a file. Root and relative path are unknown for files outside every root.
  pub fn new(
    source_path: impl Into<String>,
    source_root: Option<String>,
    relative_path: Option<String>,
  ) -> Self {
    Self {
      source_path: source_path.into(),
      source_root,
      relative_path,
      state: AssetState::default(),
    }
  }

  /// Full path of the file.
  pub fn source_path(&self) -> &str {
    &self.source_path
  }

  /// Root directory owning the file.
  pub fn source_root(&self) -> Option<&str> {
    self.source_root.as_deref()
  }

  /// Path of the file below its root.
  pub fn relative_path(&self) -> Option<&str> {
    self.relative_path.as_deref()
  }
}

/// Files matching a wildcard pattern. Matches are enumerated lazily by [`GlobAsset::expand`].
#[derive(Debug, Clone)]
pub struct GlobAsset {
  pattern: String,
  base_dir: Option<String>,
  pub(super) state: AssetState,
}

impl GlobAsset {
  /// Describe a glob over `pattern`, with `base_dir` stripped from each match.
  pub fn new(pattern: impl Into<String>, base_dir: Option<String>) -> Self {
    Self {
      pattern: pattern.into(),
      base_dir,
      state: AssetState::default(),
    }
  }

  /// Full wildcard pattern.
  pub fn pattern(&self) -> &str {
    &self.pattern
  }

  /// Directory relative paths of the matches are computed from.
  pub fn base_dir(&self) -> Option<&str> {
    self.base_dir.as_deref()
  }

  /// Enumerate the files currently matching the pattern, in lexical order.
  ///
  /// Directories and entries that cannot be read are skipped. Each file inherits the glob's
  /// output variables; filters stay on the glob itself. Matches the base directory does not
  /// own get neither a root nor a relative path.
  pub fn expand(&self) -> FactoryResult<Vec<FileAsset>> {
    let mut files = Vec::new();
    for entry in glob::glob(&self.pattern)?.flatten() {
      if !entry.is_file() {
        continue;
      }

      let source_path = path_to_string(&entry);
      let relative_path = self
        .base_dir
        .as_deref()
        .and_then(|base| relative_to(&source_path, base));
      let source_root = relative_path.as_ref().and(self.base_dir.clone());
      let mut file = FileAsset::new(source_path, source_root, relative_path);
      file.state.set_vars(self.state.vars().to_vec());
      files.push(file);
    }

    Ok(files)
  }
}

/// A resource fetched over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAsset {
  url: String,
  pub(super) state: AssetState,
}

impl HttpAsset {
  /// Describe the resource at `url` (absolute or protocol relative).
  pub fn new(url: impl Into<String>) -> Self {
    Self {
      url: url.into(),
      state: AssetState::default(),
    }
  }

  /// Source URL.
  pub fn url(&self) -> &str {
    &self.url
  }
}

/// An asset registered under a name with an asset manager.
#[derive(Debug, Clone)]
pub struct AssetReference {
  name: String,
  asset: Arc<Asset>,
  pub(super) state: AssetState,
}

impl AssetReference {
  /// Reference the registered `asset` by its `name`.
  pub fn new(name: impl Into<String>, asset: Arc<Asset>) -> Self {
    Self {
      name: name.into(),
      asset,
      state: AssetState::default(),
    }
  }

  /// Name the asset was registered under.
  pub fn name(&self) -> &str {
    &self.name
  }

  /// The registered asset.
  pub fn asset(&self) -> &Arc<Asset> {
    &self.asset
  }
}

fn path_to_string(path: &Path) -> String {
  path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;
  use tempfile::tempdir;

  #[test]
  fn expands_glob_matches_relative_to_base_dir() {
    let temp = tempdir().unwrap();
    let root = path_to_string(temp.path());
    fs::create_dir_all(temp.path().join("css/nested.css")).unwrap();
    fs::write(temp.path().join("css/b.css"), "b").unwrap();
    fs::write(temp.path().join("css/a.css"), "a").unwrap();
    fs::write(temp.path().join("css/readme.txt"), "skip").unwrap();

    let mut glob = GlobAsset::new(format!("{root}/css/*.css"), Some(root.clone()));
    glob.state.set_vars(vec!["locale".into()]);
    let files = glob.expand().unwrap();

    let relatives: Vec<_> = files.iter().map(|file| file.relative_path()).collect();
    assert_eq!(relatives, vec![Some("css/a.css"), Some("css/b.css")]);
    assert_eq!(files[0].source_path(), format!("{root}/css/a.css"));
    assert_eq!(files[0].source_root(), Some(root.as_str()));
    assert_eq!(files[1].state.vars(), ["locale".to_string()]);
  }

  #[test]
  fn expands_relative_patterns_against_a_relative_base() {
    // unit tests run from the package directory
    let glob = GlobAsset::new("./src/paths/*.rs", Some(".".into()));
    let files = glob.expand().unwrap();

    let relatives: Vec<_> = files.iter().map(|file| file.relative_path()).collect();
    assert_eq!(
      relatives,
      vec![
        Some("src/paths/classify.rs"),
        Some("src/paths/mod.rs"),
        Some("src/paths/roots.rs"),
      ]
    );
    assert_eq!(files[0].source_root(), Some("."));

    let nested = GlobAsset::new("./src/paths/*.rs", Some("./src".into()));
    let files = nested.expand().unwrap();
    assert_eq!(files[2].relative_path(), Some("paths/roots.rs"));
  }

  #[test]
  fn leaves_matches_outside_the_base_unrooted() {
    let temp = tempdir().unwrap();
    let root = path_to_string(temp.path());
    fs::create_dir_all(temp.path().join("vendor")).unwrap();
    fs::write(temp.path().join("vendor/x.js"), "x").unwrap();

    let glob = GlobAsset::new(format!("{root}/vendor/*.js"), Some(format!("{root}/site")));
    let files = glob.expand().unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].source_path(), format!("{root}/vendor/x.js"));
    assert_eq!(files[0].source_root(), None);
    assert_eq!(files[0].relative_path(), None);
  }

  #[test]
  fn expands_to_nothing_when_no_file_matches() {
    let temp = tempdir().unwrap();
    let root = path_to_string(temp.path());
    let glob = GlobAsset::new(format!("{root}/*.js"), None);
    assert!(glob.expand().unwrap().is_empty());
  }

  #[test]
  fn rejects_malformed_patterns() {
    let glob = GlobAsset::new("/site/***.css", None);
    assert!(glob.expand().is_err());
  }
}
