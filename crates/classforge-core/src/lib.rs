//! Classforge Core
//!
//! Transformation passes over class trees.
//!
//! # Features
//!
//! - **Access widening**: register access requests, merge them, apply each at most once
//! - **Hierarchy flattening**: propagate inherited members so renaming sees them
//! - **Traits**: prioritized, targeted modifications of classes and resources
//! - **Stage chains**: compose traversal stages with renaming always last
//!
//! # Core Modules
//!
//! - [`access`]: AccessResolver and the access stage
//! - [`hierarchy`]: HierarchyStore and the hierarchy stage
//! - [`traits`]: Trait model, sequences and pipeline entry points
//! - [`chain`]: stage composition and [`ClassModifier`]
//! - [`run`]: [`TransformRun`], the per-run owner of all of the above
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use classforge_core::access::Access;
//! use classforge_core::{TransformConfig, TransformRun};
//! use classforge_types::access_flags::*;
//! use classforge_types::{ClassMapping, ClassNode, FieldNode, MappingTable};
//!
//! let table = MappingTable::new().with_class("a/A", ClassMapping::new("net/Alpha"));
//! let run = TransformRun::new(TransformConfig::default()).with_symbol_table(Arc::new(table));
//! run.access().register_field("a/A", "x", "I", Access::public());
//!
//! let class = ClassNode::new("a/A", Some("java/lang/Object"))
//!     .with_field(FieldNode::new(ACC_PRIVATE, "x", "I"));
//! let out = run.transform_class(&class)?;
//!
//! assert_eq!(out.name(), "net/Alpha");
//! assert_eq!(out.field("x").unwrap().access, ACC_PUBLIC);
//! # Ok::<(), classforge_core::TransformError>(())
//! ```

pub mod access;
pub mod chain;
pub mod codec;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod run;
pub mod traits;

// Re-export main types at crate root for convenience
pub use access::{Access, AccessResolver, AccessVisitor, ClassAccess, Visibility};
pub use chain::{compose, ChainedVisitor, ClassModifier, Stage};
pub use codec::{BincodeCodec, ClassCodec};
pub use config::TransformConfig;
pub use error::{Result, TransformError};
pub use hierarchy::{HierarchyEntry, HierarchyStore, HierarchyVisitor};
pub use run::TransformRun;
pub use traits::{
    apply_class_traits, apply_file_traits, ImmutableTraitSequence, MutableTraitSequence, Target,
    TargetScope, Trait, TraitSequence,
};
