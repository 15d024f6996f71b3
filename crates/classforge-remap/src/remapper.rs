//! The renaming translator.
//!
//! A [`Remapper`] answers "what is this called after renaming?" for every
//! symbolic form found in a class: internal names, descriptors, generic
//! signatures, member names, loadable constants and stack-map frame entries.
//!
//! Unmapped input is returned unchanged; nothing here fails. Malformed
//! descriptors and signatures are logged and passed through verbatim.
//!
//! Member lookups follow the symbol table convention: the descriptor part of
//! a member key is the *renamed* descriptor, so [`Remapper::map_field_name`]
//! and [`Remapper::map_method_name`] take the original descriptor and
//! translate it before the lookup.

use std::sync::Arc;

use classforge_types::descriptor::{
    is_method_descriptor, map_field_descriptor, map_method_descriptor, map_signature,
    object_descriptor, object_internal_name,
};
use classforge_types::{
    ClassMapping, Constant, FrameEntry, Handle, MappingTable, SharedSymbolTable,
};
use tracing::{trace, warn};

use crate::names::member_owner;

/// Cheap to clone; clones share the same symbol table.
#[derive(Clone)]
pub struct Remapper {
    table: SharedSymbolTable,
}

impl Remapper {
    pub fn new(table: SharedSymbolTable) -> Self {
        Self { table }
    }

    /// A remapper over an empty table: every query returns its input.
    pub fn identity() -> Self {
        Self::new(Arc::new(MappingTable::new()))
    }

    pub fn table(&self) -> &SharedSymbolTable {
        &self.table
    }

    fn class_info(&self, internal_name: &str) -> Option<&ClassMapping> {
        self.table.class_info(internal_name)
    }

    // =========================================================================
    // Types
    // =========================================================================

    /// Rename a plain internal class name.
    pub fn map_class_name(&self, internal_name: &str) -> String {
        match self.class_info(internal_name) {
            Some(mapping) if mapping.renamed_name != internal_name => {
                trace!(from = internal_name, to = %mapping.renamed_name, "class renamed");
                mapping.renamed_name.clone()
            }
            _ => internal_name.to_string(),
        }
    }

    /// Rename a type operand: an internal name, an `L...;` object descriptor
    /// or an array descriptor. The input shape is preserved.
    pub fn map_type(&self, name: &str) -> String {
        if name.starts_with('[') {
            return self.map_desc(name);
        }
        match object_internal_name(name) {
            Some(internal) => object_descriptor(&self.map_class_name(internal)),
            None => self.map_class_name(name),
        }
    }

    pub fn map_types(&self, names: &[String]) -> Vec<String> {
        names.iter().map(|name| self.map_type(name)).collect()
    }

    /// Rename a field descriptor, or a method descriptor if it has a
    /// parameter list.
    pub fn map_desc(&self, desc: &str) -> String {
        if is_method_descriptor(desc) {
            return self.map_method_desc(desc);
        }
        match map_field_descriptor(desc, &mut |name: &str| self.map_class_name(name)) {
            Some(mapped) => mapped,
            None => {
                warn!(descriptor = desc, "malformed field descriptor left unchanged");
                desc.to_string()
            }
        }
    }

    pub fn map_method_desc(&self, desc: &str) -> String {
        match map_method_descriptor(desc, &mut |name: &str| self.map_class_name(name)) {
            Some(mapped) => mapped,
            None => {
                warn!(descriptor = desc, "malformed method descriptor left unchanged");
                desc.to_string()
            }
        }
    }

    /// Rename every class in a class, method or field generic signature.
    pub fn map_signature(&self, signature: &str) -> String {
        match map_signature(signature, &mut |name: &str| self.map_class_name(name)) {
            Some(mapped) => mapped,
            None => {
                warn!(signature, "malformed generic signature left unchanged");
                signature.to_string()
            }
        }
    }

    // =========================================================================
    // Members
    // =========================================================================

    /// Rename a field of `owner`; `desc` is the field's original descriptor.
    pub fn map_field_name(&self, owner: &str, name: &str, desc: &str) -> String {
        let renamed_desc = self.map_desc(desc);
        let mapped = member_owner(owner)
            .and_then(|class| self.class_info(class))
            .and_then(|mapping| mapping.field(name, &renamed_desc));
        self.member_result(owner, name, mapped)
    }

    /// Rename a method of `owner`; `desc` is the method's original descriptor.
    pub fn map_method_name(&self, owner: &str, name: &str, desc: &str) -> String {
        let renamed_desc = self.map_method_desc(desc);
        let mapped = member_owner(owner)
            .and_then(|class| self.class_info(class))
            .and_then(|mapping| mapping.method(name, &renamed_desc));
        self.member_result(owner, name, mapped)
    }

    fn member_result(&self, owner: &str, name: &str, mapped: Option<&str>) -> String {
        match mapped {
            Some(renamed) => {
                if renamed != name {
                    trace!(owner, from = name, to = renamed, "member renamed");
                }
                renamed.to_string()
            }
            None => name.to_string(),
        }
    }

    // =========================================================================
    // Operands
    // =========================================================================

    /// Rename a loadable constant. Only type and method-handle constants
    /// carry symbols; every other value is returned as is.
    pub fn map_value(&self, value: Constant) -> Constant {
        match value {
            Constant::Type(desc) => Constant::Type(self.map_desc(&desc)),
            Constant::Handle(handle) => Constant::Handle(self.map_handle(&handle)),
            other @ (Constant::Integer(_)
            | Constant::Long(_)
            | Constant::Float(_)
            | Constant::Double(_)
            | Constant::String(_)) => other,
        }
    }

    /// Rename a method handle. Owner, name and descriptor are renamed
    /// independently; the name is resolved as a method name when the
    /// descriptor has a parameter list and as a field name otherwise.
    pub fn map_handle(&self, handle: &Handle) -> Handle {
        let name = if handle.is_method() {
            self.map_method_name(&handle.owner, &handle.name, &handle.descriptor)
        } else {
            self.map_field_name(&handle.owner, &handle.name, &handle.descriptor)
        };
        Handle {
            tag: handle.tag,
            owner: self.map_type(&handle.owner),
            name,
            descriptor: self.map_desc(&handle.descriptor),
            is_interface: handle.is_interface,
        }
    }

    /// Rename a stack-map frame entry. Class entries are renamed as types
    /// (array descriptors included); the other markers are untouched.
    pub fn map_frame_entry(&self, entry: FrameEntry) -> FrameEntry {
        match entry {
            FrameEntry::Object(name) => FrameEntry::Object(self.map_type(&name)),
            other => other,
        }
    }
}

impl std::fmt::Debug for Remapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Remapper").finish_non_exhaustive()
    }
}
