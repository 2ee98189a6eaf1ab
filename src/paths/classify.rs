/// Leading character marking a descriptor as a reference to a registered asset.
pub const REFERENCE_SENTINEL: char = '@';

/// Wildcard marker used both in glob descriptors and in output templates.
pub const WILDCARD: char = '*';

/// The resolution strategy a descriptor maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind<'a> {
  /// `@name`; holds the name without the sentinel.
  Reference(&'a str),
  /// Absolute (`scheme://`) or protocol-relative (`//host`) URL.
  Remote(&'a str),
  /// Filesystem path rooted at `/`, `\` or a drive letter.
  AbsolutePath(&'a str),
  /// Anything else, resolved against the factory root.
  RelativePath(&'a str),
}

impl InputKind<'_> {
  /// Short label used in logs and summaries.
  pub fn label(&self) -> &'static str {
    match self {
      Self::Reference(_) => "reference",
      Self::Remote(_) => "remote",
      Self::AbsolutePath(_) => "absolute path",
      Self::RelativePath(_) => "relative path",
    }
  }
}

/// Classify a descriptor. References win over URLs, URLs win over filesystem paths.
///
/// The function is total: the empty string is a relative path with an empty segment.
pub fn classify(input: &str) -> InputKind<'_> {
  if let Some(name) = input.strip_prefix(REFERENCE_SENTINEL) {
    return InputKind::Reference(name);
  }

  if input.contains("://") || input.starts_with("//") {
    return InputKind::Remote(input);
  }

  if is_absolute_path(input) {
    InputKind::AbsolutePath(input)
  } else {
    InputKind::RelativePath(input)
  }
}

/// Character-level absolute path test.
///
/// A path is absolute when it starts with `/` or `\`, or when it carries a drive prefix
/// such as `C:\` or `c:/` followed by at least one more character.
pub fn is_absolute_path(path: &str) -> bool {
  let bytes = path.as_bytes();
  match bytes.first() {
    Some(b'/' | b'\\') => true,
    Some(first) => {
      bytes.len() > 3
        && first.is_ascii_alphabetic()
        && bytes[1] == b':'
        && matches!(bytes[2], b'/' | b'\\')
    }
    None => false,
  }
}
