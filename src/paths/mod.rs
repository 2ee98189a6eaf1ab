//! Classification of raw input descriptors and root directory handling.
//!
//! Descriptors arrive as untyped strings. They are classified exactly once into an
//! [`InputKind`] so the resolver can match on the variant instead of re-inspecting
//! characters, and every test here is character based so results do not depend on the
//! host platform's notion of an absolute path.

mod classify;
mod roots;

pub use classify::{InputKind, REFERENCE_SENTINEL, WILDCARD, classify, is_absolute_path};
pub use roots::{anchor_root, find_root_dir, join_root, relative_to, strip_root, trim_root};
