//! Sample class trees and symbol tables.
//!
//! The hierarchy is `zoo/Dog extends zoo/Mammal extends zoo/Animal`, plus a
//! `zoo/Shelter` class that only references `zoo/Dog`.

use std::sync::Arc;

use classforge_core::traits::{class_trait, file_trait, SharedTrait, Target};
use classforge_types::access_flags::*;
use classforge_types::opcodes::*;
use classforge_types::{
    ClassMapping, ClassNode, FieldNode, Insn, MappingTable, MethodNode, SharedSymbolTable,
};

/// `Animal` declares public `speak()V` and private `breathe()V`, `Mammal`
/// adds a protected `fur` field, `Dog` declares nothing of its own.
#[allow(dead_code)]
pub fn animal_hierarchy() -> Vec<ClassNode> {
    let animal = ClassNode::new("zoo/Animal", Some("java/lang/Object"))
        .with_method(MethodNode::new(ACC_PUBLIC, "speak", "()V"))
        .with_method(MethodNode::new(ACC_PRIVATE, "breathe", "()V"));
    let mammal = ClassNode::new("zoo/Mammal", Some("zoo/Animal"))
        .with_field(FieldNode::new(ACC_PROTECTED, "fur", "Ljava/lang/String;"));
    let dog = ClassNode::new("zoo/Dog", Some("zoo/Mammal"));
    vec![animal, mammal, dog]
}

/// Calls `speak` and reads `fur` through a `zoo/Dog` reference.
#[allow(dead_code)]
pub fn shelter_class() -> ClassNode {
    ClassNode::new("zoo/Shelter", Some("java/lang/Object"))
        .with_field(FieldNode::new(ACC_PRIVATE, "resident", "Lzoo/Dog;"))
        .with_method(
            MethodNode::new(ACC_PUBLIC, "visit", "()V").with_instructions(vec![
                Insn::Var { opcode: ALOAD, var: 0 },
                Insn::Field {
                    opcode: GETFIELD,
                    owner: "zoo/Shelter".into(),
                    name: "resident".into(),
                    descriptor: "Lzoo/Dog;".into(),
                },
                Insn::Method {
                    opcode: INVOKEVIRTUAL,
                    owner: "zoo/Dog".into(),
                    name: "speak".into(),
                    descriptor: "()V".into(),
                    is_interface: false,
                },
                Insn::Var { opcode: ALOAD, var: 0 },
                Insn::Field {
                    opcode: GETFIELD,
                    owner: "zoo/Shelter".into(),
                    name: "resident".into(),
                    descriptor: "Lzoo/Dog;".into(),
                },
                Insn::Field {
                    opcode: GETFIELD,
                    owner: "zoo/Dog".into(),
                    name: "fur".into(),
                    descriptor: "Ljava/lang/String;".into(),
                },
                Insn::Plain { opcode: RETURN },
            ]),
        )
}

/// Renames the `zoo` package to `farm`, `speak` to `bark` and `fur` to `coat`.
/// Members are keyed by their renamed descriptors.
#[allow(dead_code)]
pub fn animal_table() -> SharedSymbolTable {
    let table = MappingTable::new()
        .with_class(
            "zoo/Animal",
            ClassMapping::new("farm/Animal").with_method("speak", "()V", "bark"),
        )
        .with_class(
            "zoo/Mammal",
            ClassMapping::new("farm/Mammal").with_field("fur", "Ljava/lang/String;", "coat"),
        )
        .with_class("zoo/Dog", ClassMapping::new("farm/Dog"))
        .with_class("zoo/Shelter", ClassMapping::new("farm/Shelter"));
    Arc::new(table)
}

#[allow(dead_code)]
pub fn identity_class_trait(target: Target) -> SharedTrait<ClassNode> {
    class_trait(target, |class, _| Ok(class))
}

#[allow(dead_code)]
pub fn identity_file_trait(target: Target) -> SharedTrait<Vec<u8>> {
    file_trait(target, |bytes, _| Ok(bytes))
}
