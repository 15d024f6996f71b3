//! classforge renaming
//!
//! Applies a symbol table to class trees.
//!
//! This crate provides:
//! - [`names`]: internal name normalization (array owners, inner class names)
//! - [`remapper`]: [`Remapper`], the query side: "what is this symbol called now?"
//! - [`visitor`]: [`RemappingVisitor`], the traversal stage that rewrites a class
//!
//! # Renaming model
//!
//! The symbol table is keyed by the *original* internal class name. Member
//! entries are keyed by `(original member name, renamed descriptor)`, which
//! keeps overloads apart even when their parameter types are renamed too.
//! Anything the table does not mention keeps its name.

pub mod names;
pub mod remapper;
pub mod visitor;

pub use remapper::Remapper;
pub use visitor::RemappingVisitor;
