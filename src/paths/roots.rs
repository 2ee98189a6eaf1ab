use std::path::{Component, Path, PathBuf};

use super::is_absolute_path;

const SEPARATORS: [char; 2] = ['/', '\\'];

/// Remove trailing `/` and `\` separators from a root directory.
pub fn trim_root(root: &str) -> &str {
  root.trim_end_matches(SEPARATORS)
}

/// Join a relative descriptor onto a root directory with a forward slash.
pub fn join_root(root: &str, relative: &str) -> String {
  format!("{}/{}", trim_root(root), relative)
}

/// Anchor a relative root directory at `base`, which should itself be absolute.
///
/// Absolute roots are only trimmed. `.` segments are dropped, so `.` anchored at `/srv`
/// becomes `/srv` and `./public` becomes `/srv/public`.
pub fn anchor_root(root: &str, base: &Path) -> String {
  if is_absolute_path(root) {
    return trim_root(root).to_string();
  }

  let anchored: PathBuf = base
    .join(root)
    .components()
    .filter(|component| !matches!(component, Component::CurDir))
    .collect();
  trim_root(&anchored.to_string_lossy()).to_string()
}

/// Path of `path` relative to `base`, or `None` when `base` does not own it.
///
/// Leading `./` segments are ignored on both sides, and a `.` base owns every relative
/// path. This matches what `glob` reports for patterns such as `./css/*.css`.
pub fn relative_to(path: &str, base: &str) -> Option<String> {
  let path = strip_current_dir(path);
  let base = strip_current_dir(trim_root(base));
  if base == "." {
    return (!is_absolute_path(path)).then(|| path.to_string());
  }

  find_root_dir(path, &[base]).map(|root| strip_root(path, root).to_string())
}

/// Find the first candidate root that owns `path`.
///
/// Both sides are compared with `\` treated as `/` and the candidate's trailing separators
/// trimmed. A root owns a path when the path equals it or continues with a separator right
/// after it, so `/site` owns `/site/a.css` but not `/site-old/a.css`. An empty root owns
/// every path that starts with a separator.
pub fn find_root_dir<'r, S: AsRef<str>>(path: &str, roots: &'r [S]) -> Option<&'r str> {
  roots
    .iter()
    .map(|root| root.as_ref())
    .find(|root| owns(root, path))
}

/// Strip an owning root from `path` and trim the separators left at the front.
///
/// Callers are expected to have checked ownership with [`find_root_dir`] first; a root
/// longer than the path yields an empty relative path.
pub fn strip_root<'p>(path: &'p str, root: &str) -> &'p str {
  path
    .get(trim_root(root).len()..)
    .unwrap_or_default()
    .trim_start_matches(SEPARATORS)
}

fn strip_current_dir(path: &str) -> &str {
  let mut path = path;
  while let Some(rest) = path
    .strip_prefix("./")
    .or_else(|| path.strip_prefix(".\\"))
  {
    path = rest.trim_start_matches(SEPARATORS);
  }
  path
}

fn owns(root: &str, path: &str) -> bool {
  let root = trim_root(root).as_bytes();
  let path = path.as_bytes();
  if path.len() < root.len() {
    return false;
  }

  let prefix_matches = root
    .iter()
    .zip(path)
    .all(|(left, right)| normalise(*left) == normalise(*right));

  prefix_matches
    && path
      .get(root.len())
      .is_none_or(|next| normalise(*next) == b'/')
}

fn normalise(byte: u8) -> u8 {
  if byte == b'\\' { b'/' } else { byte }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn trims_trailing_separators() {
    assert_eq!(trim_root("/site///"), "/site");
    assert_eq!(trim_root("C:\\site\\"), "C:\\site");
    assert_eq!(trim_root("/"), "");
  }

  #[test]
  fn joins_relative_descriptors() {
    assert_eq!(join_root("/site/", "css/a.css"), "/site/css/a.css");
  }

  #[test]
  fn finds_first_owning_root() {
    let roots = vec!["/vendor".to_string(), "/site".to_string(), "/site/css".to_string()];
    assert_eq!(find_root_dir("/site/css/a.css", &roots), Some("/site"));
    assert_eq!(find_root_dir("/vendor/x.js", &roots), Some("/vendor"));
    assert_eq!(find_root_dir("/elsewhere/x.js", &roots), None);
  }

  #[test]
  fn requires_a_separator_boundary() {
    let roots = ["/site"];
    assert_eq!(find_root_dir("/site-old/a.css", &roots), None);
    assert_eq!(find_root_dir("/site", &roots), Some("/site"));
  }

  #[test]
  fn compares_separators_loosely() {
    let roots = ["C:/web/"];
    assert_eq!(find_root_dir("C:\\web\\app.css", &roots), Some("C:/web/"));
    assert_eq!(strip_root("C:\\web\\app.css", "C:/web/"), "app.css");
  }

  #[test]
  fn empty_root_owns_every_rooted_path() {
    let roots = ["/"];
    assert_eq!(find_root_dir("/a/b.css", &roots), Some("/"));
    assert_eq!(strip_root("/a/b.css", "/"), "a/b.css");
  }

  #[test]
  fn anchors_relative_roots() {
    let base = Path::new("/srv/app");
    assert_eq!(anchor_root(".", base), "/srv/app");
    assert_eq!(anchor_root("./public/", base), "/srv/app/public");
    assert_eq!(anchor_root("/site/", base), "/site");
    assert_eq!(anchor_root("C:\\web\\", base), "C:\\web");
  }

  #[test]
  fn computes_paths_relative_to_dot_bases() {
    assert_eq!(relative_to("css/a.css", "."), Some("css/a.css".into()));
    assert_eq!(relative_to("./css/a.css", "./"), Some("css/a.css".into()));
    assert_eq!(relative_to("site/css/a.css", "./site"), Some("css/a.css".into()));
    assert_eq!(relative_to("/abs/a.css", "."), None);
  }

  #[test]
  fn refuses_paths_outside_the_base() {
    assert_eq!(relative_to("/site/css/a.css", "/site"), Some("css/a.css".into()));
    assert_eq!(relative_to("/other/a.css", "/site"), None);
    assert_eq!(relative_to("site-old/a.css", "site"), None);
  }

  #[test]
  fn strips_root_and_leading_separators() {
    assert_eq!(strip_root("/site//css/a.css", "/site"), "css/a.css");
    assert_eq!(strip_root("/site", "/site"), "");
    assert_eq!(strip_root("/a", "/much/longer"), "");
  }
}
