//! Classforge
//!
//! Tools for transforming class trees between an external reader and writer:
//!
//! - **Renaming**: Rewrite every symbolic reference through a symbol table
//! - **Access widening**: Apply merged access requests to classes and members
//! - **Hierarchy flattening**: Resolve inherited members during renaming
//! - **Traits**: Prioritized, targeted modifications of classes and resources
//!
//! See [`TransformRun`] for the usual entry point.

pub use classforge_core as transform;
pub use classforge_remap as remap;
pub use classforge_types as types;

pub use classforge_core::{ClassModifier, TransformConfig, TransformError, TransformRun};
pub use classforge_remap::Remapper;
pub use classforge_types::{ClassNode, ClassVisitor, MappingTable};
