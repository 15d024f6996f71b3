//! Shared types for the classforge workspace.
//!
//! This crate holds everything the transformation crates agree on and nothing
//! that transforms:
//!
//! - [`class`]: the in-memory class tree handed over by an external reader
//! - [`visitor`]: the four-callback traversal interface ([`ClassVisitor`])
//! - [`access_flags`] / [`opcodes`]: class-file constants
//! - [`descriptor`]: descriptor and generic signature string transforms
//! - [`symbols`]: the symbol-table interface and in-memory tables
//! - [`env_utils`]: environment variable helpers for configuration layers

pub mod access_flags;
pub mod class;
pub mod descriptor;
pub mod env_utils;
pub mod opcodes;
pub mod symbols;
pub mod visitor;

pub use class::{
    Annotation, ClassHeader, ClassNode, Constant, FieldNode, FrameEntry, FrameKind, Handle,
    InnerClass, Insn, Label, LocalVariable, MethodNode, OuterClass, RecordComponent,
    TryCatchBlock,
};
pub use symbols::{
    ChainedTable, ClassMapping, MappingTable, MemberKey, MemberMap, SharedSymbolTable,
    SymbolTable,
};
pub use visitor::ClassVisitor;
