//! Traits: pluggable, prioritized modifications.
//!
//! A [`Trait`] transforms one payload (a parsed [`ClassNode`] or the raw
//! bytes of a resource) and carries a [`Target`]: a priority and a scope.
//! A [`TraitSequence`] hands traits out highest priority first; the
//! functions in [`apply`] run them over one object, skipping traits scoped
//! to a different object.
//!
//! # Example
//!
//! ```
//! use classforge_core::traits::{apply_file_traits, file_trait, MutableTraitSequence, Target};
//! use classforge_remap::Remapper;
//!
//! let sequence = MutableTraitSequence::new();
//! sequence.add(file_trait(Target::direct("README", 10), |bytes, _| {
//!     Ok(bytes.to_ascii_uppercase())
//! }));
//!
//! let out = apply_file_traits("README", b"hi".to_vec(), &Remapper::identity(), &sequence)?;
//! assert_eq!(out, b"HI");
//! # Ok::<(), classforge_core::TransformError>(())
//! ```
//!
//! [`ClassNode`]: classforge_types::ClassNode

pub mod apply;
mod model;
mod sequence;
mod target;

pub use apply::{apply_class_traits, apply_class_traits_to_bytes, apply_file_traits, apply_traits};
pub use model::{class_trait, file_trait, ClassTrait, FileTrait, FnTrait, SharedTrait, Trait};
pub use sequence::{
    sort_traits_by_priority, ImmutableTraitSequence, MutableTraitSequence, TraitSequence,
};
pub use target::{Target, TargetScope};
