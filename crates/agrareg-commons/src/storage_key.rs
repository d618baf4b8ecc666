//! Storage key trait for typed identifiers.
//!
//! Every entity in agrareg is keyed by a single UUID string, so the storage
//! encoding is simply the UTF-8 bytes of the identifier. The trait exists as
//! an explicit contract between typed ids and the storage layer: `AsRef<[u8]>`
//! alone does not say "this is the bytes the store keys on".

/// Contract for types usable as storage keys.
pub trait StorageKey {
    /// Serializes the key to the byte form used by the storage backend.
    fn storage_key(&self) -> Vec<u8>;

    /// Reconstructs the key from its storage byte form.
    fn from_storage_key(bytes: &[u8]) -> std::result::Result<Self, String>
    where
        Self: Sized;
}
