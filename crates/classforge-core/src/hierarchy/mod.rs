//! Hierarchy collection and flattening.
//!
//! A symbol table only lists the members a class declares. References such
//! as `invokevirtual C.m()V` where `m` is inherited from `A` still need the
//! renamed name of `A.m`. The hierarchy pass records every class once
//! ([`HierarchyVisitor`]), then [`HierarchyStore::flatten`] copies inherited,
//! non-private members into each subclass entry. The flattened store is
//! exposed as a symbol table layered over the supplied one.

mod store;
mod visitor;

pub use store::{HierarchyEntry, HierarchyStore};
pub use visitor::HierarchyVisitor;
