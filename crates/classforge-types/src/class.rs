//! In-memory class tree.
//!
//! This is the shape an external class-file reader hands to the transformation
//! pipeline, and the shape a writer serializes afterwards. It mirrors the
//! structural events of a traversal: one [`ClassHeader`], any number of
//! [`FieldNode`]s and [`MethodNode`]s, then the end of the class.
//!
//! Everything here is plain data. Collections are `Vec`s so a serialized tree
//! is byte-for-byte reproducible.

use serde::{Deserialize, Serialize};

// =============================================================================
// Constants and handles
// =============================================================================

/// A method handle constant (`CONSTANT_MethodHandle`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Handle {
    /// Reference kind, one of the `H_*` constants in [`crate::access_flags`].
    pub tag: u8,
    /// Internal name of the class owning the referenced member.
    pub owner: String,
    pub name: String,
    /// Field descriptor for field handles, method descriptor otherwise.
    pub descriptor: String,
    pub is_interface: bool,
}

impl Handle {
    pub fn new(
        tag: u8,
        owner: impl Into<String>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
        is_interface: bool,
    ) -> Self {
        Self {
            tag,
            owner: owner.into(),
            name: name.into(),
            descriptor: descriptor.into(),
            is_interface,
        }
    }

    /// True if the handle refers to a method (its descriptor has a parameter list).
    pub fn is_method(&self) -> bool {
        self.descriptor.contains('(')
    }
}

/// A loadable constant: `ldc` operands, field constant values and
/// bootstrap-method arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Constant {
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    /// A type constant, stored as a field descriptor (`Lpkg/Name;`, `[I`) or a
    /// method descriptor (`(I)V`) for method types.
    Type(String),
    Handle(Handle),
}

// =============================================================================
// Class-level metadata
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub descriptor: String,
    pub visible: bool,
}

impl Annotation {
    pub fn new(descriptor: impl Into<String>, visible: bool) -> Self {
        Self {
            descriptor: descriptor.into(),
            visible,
        }
    }
}

/// The `EnclosingMethod` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OuterClass {
    pub owner: String,
    pub name: Option<String>,
    pub descriptor: Option<String>,
}

/// One entry of the `InnerClasses` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnerClass {
    pub name: String,
    pub outer_name: Option<String>,
    pub inner_name: Option<String>,
    pub access: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordComponent {
    pub name: String,
    pub descriptor: String,
    pub signature: Option<String>,
    pub annotations: Vec<Annotation>,
}

/// Everything a traversal reports when it enters a class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassHeader {
    pub version: u32,
    pub access: u32,
    /// Internal (slash-separated) class name.
    pub name: String,
    pub signature: Option<String>,
    /// `None` only for `java/lang/Object` and module-info.
    pub super_name: Option<String>,
    pub interfaces: Vec<String>,
    pub source_file: Option<String>,
    pub outer_class: Option<OuterClass>,
    pub nest_host: Option<String>,
    pub nest_members: Vec<String>,
    pub permitted_subclasses: Vec<String>,
    pub inner_classes: Vec<InnerClass>,
    pub annotations: Vec<Annotation>,
    pub record_components: Vec<RecordComponent>,
}

impl ClassHeader {
    /// Superclass followed by interfaces, in declaration order.
    pub fn dependencies(&self) -> Vec<String> {
        self.super_name
            .iter()
            .chain(self.interfaces.iter())
            .cloned()
            .collect()
    }
}

// =============================================================================
// Members
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldNode {
    pub access: u32,
    pub name: String,
    pub descriptor: String,
    pub signature: Option<String>,
    pub value: Option<Constant>,
    pub annotations: Vec<Annotation>,
}

impl FieldNode {
    pub fn new(access: u32, name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            access,
            name: name.into(),
            descriptor: descriptor.into(),
            signature: None,
            value: None,
            annotations: Vec::new(),
        }
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    pub fn with_value(mut self, value: Constant) -> Self {
        self.value = Some(value);
        self
    }
}

/// Position marker inside a method body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label(pub u32);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TryCatchBlock {
    pub start: Label,
    pub end: Label,
    pub handler: Label,
    /// `None` for `finally` handlers.
    pub catch_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalVariable {
    pub name: String,
    pub descriptor: String,
    pub signature: Option<String>,
    pub start: Label,
    pub end: Label,
    pub index: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameKind {
    Full,
    Append,
    Chop,
    Same,
    Same1,
}

/// One verification type in a stack-map frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameEntry {
    Top,
    Integer,
    Float,
    Long,
    Double,
    Null,
    UninitializedThis,
    /// Internal name of a class, or a descriptor for array types.
    Object(String),
    /// Value produced by the `new` instruction at the label.
    Uninitialized(Label),
}

/// A single bytecode instruction or pseudo-instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Insn {
    Plain {
        opcode: u8,
    },
    Int {
        opcode: u8,
        operand: i32,
    },
    Var {
        opcode: u8,
        var: u16,
    },
    /// `new`, `anewarray`, `checkcast`, `instanceof`. The operand is an
    /// internal name or an array descriptor.
    Type {
        opcode: u8,
        type_name: String,
    },
    Field {
        opcode: u8,
        owner: String,
        name: String,
        descriptor: String,
    },
    Method {
        opcode: u8,
        /// Internal name, or an array descriptor for calls such as `[I.clone()`.
        owner: String,
        name: String,
        descriptor: String,
        is_interface: bool,
    },
    InvokeDynamic {
        name: String,
        descriptor: String,
        bootstrap: Handle,
        arguments: Vec<Constant>,
    },
    Jump {
        opcode: u8,
        target: Label,
    },
    Label(Label),
    Ldc(Constant),
    Iinc {
        var: u16,
        increment: i16,
    },
    TableSwitch {
        min: i32,
        max: i32,
        default: Label,
        labels: Vec<Label>,
    },
    LookupSwitch {
        default: Label,
        keys: Vec<i32>,
        labels: Vec<Label>,
    },
    MultiANewArray {
        descriptor: String,
        dimensions: u8,
    },
    Frame {
        kind: FrameKind,
        locals: Vec<FrameEntry>,
        stack: Vec<FrameEntry>,
    },
    LineNumber {
        line: u16,
        start: Label,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodNode {
    pub access: u32,
    pub name: String,
    pub descriptor: String,
    pub signature: Option<String>,
    pub exceptions: Vec<String>,
    pub annotations: Vec<Annotation>,
    pub parameter_annotations: Vec<Vec<Annotation>>,
    pub instructions: Vec<Insn>,
    pub try_catch_blocks: Vec<TryCatchBlock>,
    pub local_variables: Vec<LocalVariable>,
    pub max_stack: u16,
    pub max_locals: u16,
}

impl MethodNode {
    pub fn new(access: u32, name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            access,
            name: name.into(),
            descriptor: descriptor.into(),
            signature: None,
            exceptions: Vec::new(),
            annotations: Vec::new(),
            parameter_annotations: Vec::new(),
            instructions: Vec::new(),
            try_catch_blocks: Vec::new(),
            local_variables: Vec::new(),
            max_stack: 0,
            max_locals: 0,
        }
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    pub fn with_instructions(mut self, instructions: Vec<Insn>) -> Self {
        self.instructions = instructions;
        self
    }
}

// =============================================================================
// Class tree
// =============================================================================

/// A complete class: header plus members, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassNode {
    pub header: ClassHeader,
    pub fields: Vec<FieldNode>,
    pub methods: Vec<MethodNode>,
}

impl ClassNode {
    /// A public class version 52 (Java 8) with the given super class.
    pub fn new(name: impl Into<String>, super_name: Option<&str>) -> Self {
        Self {
            header: ClassHeader {
                version: 52,
                access: crate::access_flags::ACC_PUBLIC | crate::access_flags::ACC_SUPER,
                name: name.into(),
                super_name: super_name.map(str::to_string),
                ..ClassHeader::default()
            },
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Internal name of the class.
    pub fn name(&self) -> &str {
        &self.header.name
    }

    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.header.interfaces.push(interface.into());
        self
    }

    pub fn with_field(mut self, field: FieldNode) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MethodNode) -> Self {
        self.methods.push(method);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldNode> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn method(&self, name: &str, descriptor: &str) -> Option<&MethodNode> {
        self.methods
            .iter()
            .find(|m| m.name == name && m.descriptor == descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access_flags::*;

    #[test]
    fn test_header_dependencies_order() {
        let class = ClassNode::new("a/B", Some("a/A"))
            .with_interface("a/I")
            .with_interface("a/J");
        assert_eq!(class.header.dependencies(), vec!["a/A", "a/I", "a/J"]);
    }

    #[test]
    fn test_dependencies_without_super() {
        let class = ClassNode::new("java/lang/Object", None);
        assert!(class.header.dependencies().is_empty());
    }

    #[test]
    fn test_member_lookup() {
        let class = ClassNode::new("a/B", Some("java/lang/Object"))
            .with_field(FieldNode::new(ACC_PRIVATE, "x", "I"))
            .with_method(MethodNode::new(ACC_PUBLIC, "run", "()V"))
            .with_method(MethodNode::new(ACC_PUBLIC, "run", "(I)V"));

        assert_eq!(class.field("x").map(|f| f.access), Some(ACC_PRIVATE));
        assert!(class.method("run", "(I)V").is_some());
        assert!(class.method("run", "(J)V").is_none());
    }

    #[test]
    fn test_handle_kind() {
        let method = Handle::new(H_INVOKESTATIC, "a/B", "m", "(I)V", false);
        let field = Handle::new(H_GETFIELD, "a/B", "f", "I", false);
        assert!(method.is_method());
        assert!(!field.is_method());
    }
}
