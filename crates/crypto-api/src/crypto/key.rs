//! [`KeyMaterial`]: the configured secret, redacted in `Debug` and zeroed on drop.

use serde::{Deserialize, Deserializer};

/// Raw key bytes shared by the field cipher and the signer.
///
/// Built once from configuration and never mutated. The bytes are the UTF-8
/// encoding of the configured key string, used verbatim (no derivation).
#[derive(Clone)]
pub struct KeyMaterial(Box<[u8]>);

impl KeyMaterial {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into().into_boxed_slice())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        // Zero the key material on drop.
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material, not even in debug builds.
        f.write_str("KeyMaterial([REDACTED])")
    }
}

impl<'de> Deserialize<'de> for KeyMaterial {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(|s| Self::new(s.into_bytes()))
    }
}
