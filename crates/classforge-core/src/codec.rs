//! Reading and writing class trees.
//!
//! Parsing the binary class-file format is the job of an external reader.
//! The pipeline only needs a way to turn bytes into a [`ClassNode`] and back,
//! expressed by [`ClassCodec`]. [`BincodeCodec`] is the built-in
//! implementation for trees exchanged in serialized form.

use anyhow::{Context, Result};
use classforge_types::ClassNode;

/// Byte-level boundary of the pipeline.
pub trait ClassCodec: Send + Sync {
    fn read(&self, bytes: &[u8]) -> Result<ClassNode>;

    fn write(&self, class: &ClassNode) -> Result<Vec<u8>>;
}

/// Class trees serialized with `bincode`.
///
/// Encoding is deterministic: reading then writing an unmodified tree
/// reproduces the input bytes exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl ClassCodec for BincodeCodec {
    fn read(&self, bytes: &[u8]) -> Result<ClassNode> {
        bincode::deserialize(bytes).context("Failed to deserialize class tree")
    }

    fn write(&self, class: &ClassNode) -> Result<Vec<u8>> {
        bincode::serialize(class).context("Failed to serialize class tree")
    }
}
