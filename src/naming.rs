//! Deterministic asset naming used to fill output templates.

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest.
pub const NAME_LENGTH: usize = 7;

/// Derive a short identifier from the ordered inputs and filters of an asset.
///
/// The ordered pair `[inputs, filters]` is serialized as JSON and hashed with SHA-256, so
/// the result depends on nothing but the two sequences and their order. Truncation makes
/// collisions possible; the name is meant for cache busting, not for security.
pub fn generate_name<I, F>(inputs: &[I], filters: &[F]) -> String
where
  I: AsRef<str>,
  F: AsRef<str>,
{
  let inputs: Vec<&str> = inputs.iter().map(|input| input.as_ref()).collect();
  let filters: Vec<&str> = filters.iter().map(|filter| filter.as_ref()).collect();
  // Serializing plain string slices cannot fail.
  let serialized = serde_json::to_string(&(inputs, filters)).unwrap_or_default();

  let mut hasher = Sha256::new();
  hasher.update(serialized.as_bytes());
  format!("{:x}", hasher.finalize())[..NAME_LENGTH].to_string()
}
