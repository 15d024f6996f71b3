//! The renaming traversal stage.
//!
//! [`RemappingVisitor`] rewrites every symbolic reference in the events it
//! receives and forwards the result to the next stage it owns. Member names
//! are resolved against the class being visited using the *original* class
//! name and descriptors, so the stage must see events before anything else
//! renames them.

use classforge_types::{
    Annotation, ClassHeader, ClassVisitor, FieldNode, InnerClass, Insn, LocalVariable,
    MethodNode, OuterClass, RecordComponent, TryCatchBlock,
};
use tracing::trace;

use crate::names::inner_simple_name;
use crate::remapper::Remapper;

pub struct RemappingVisitor<'a> {
    remapper: Remapper,
    next: Option<Box<dyn ClassVisitor + 'a>>,
    /// Original internal name of the class being visited.
    class_name: String,
}

impl<'a> RemappingVisitor<'a> {
    /// A stage with no successor yet; events are dropped until
    /// [`RemappingVisitor::set_next`] is called.
    pub fn new(remapper: Remapper) -> Self {
        Self {
            remapper,
            next: None,
            class_name: String::new(),
        }
    }

    pub fn with_next(remapper: Remapper, next: Box<dyn ClassVisitor + 'a>) -> Self {
        Self {
            next: Some(next),
            ..Self::new(remapper)
        }
    }

    pub fn set_next(&mut self, next: Box<dyn ClassVisitor + 'a>) {
        self.next = Some(next);
    }

    pub fn remapper(&self) -> &Remapper {
        &self.remapper
    }

    // =========================================================================
    // Header
    // =========================================================================

    fn map_header(&self, header: &ClassHeader) -> ClassHeader {
        let r = &self.remapper;
        let original = header.name.as_str();
        ClassHeader {
            version: header.version,
            access: header.access,
            name: r.map_type(original),
            signature: header.signature.as_deref().map(|s| r.map_signature(s)),
            super_name: header.super_name.as_deref().map(|s| r.map_type(s)),
            interfaces: r.map_types(&header.interfaces),
            source_file: header.source_file.clone(),
            outer_class: header.outer_class.as_ref().map(|o| self.map_outer_class(o)),
            nest_host: header.nest_host.as_deref().map(|s| r.map_type(s)),
            nest_members: r.map_types(&header.nest_members),
            permitted_subclasses: r.map_types(&header.permitted_subclasses),
            inner_classes: header
                .inner_classes
                .iter()
                .map(|ic| self.map_inner_class(ic))
                .collect(),
            annotations: self.map_annotations(&header.annotations),
            record_components: header
                .record_components
                .iter()
                .map(|rc| self.map_record_component(original, rc))
                .collect(),
        }
    }

    fn map_outer_class(&self, outer: &OuterClass) -> OuterClass {
        let r = &self.remapper;
        let name = match (&outer.name, &outer.descriptor) {
            (Some(name), Some(desc)) => Some(r.map_method_name(&outer.owner, name, desc)),
            (name, _) => name.clone(),
        };
        OuterClass {
            owner: r.map_type(&outer.owner),
            name,
            descriptor: outer.descriptor.as_deref().map(|d| r.map_method_desc(d)),
        }
    }

    fn map_inner_class(&self, inner: &InnerClass) -> InnerClass {
        let r = &self.remapper;
        let renamed = r.map_type(&inner.name);
        InnerClass {
            inner_name: inner
                .inner_name
                .as_deref()
                .map(|simple| inner_simple_name(&inner.name, &renamed, simple)),
            name: renamed,
            outer_name: inner.outer_name.as_deref().map(|o| r.map_type(o)),
            access: inner.access,
        }
    }

    fn map_record_component(&self, owner: &str, component: &RecordComponent) -> RecordComponent {
        let r = &self.remapper;
        RecordComponent {
            name: r.map_field_name(owner, &component.name, &component.descriptor),
            descriptor: r.map_desc(&component.descriptor),
            signature: component.signature.as_deref().map(|s| r.map_signature(s)),
            annotations: self.map_annotations(&component.annotations),
        }
    }

    fn map_annotations(&self, annotations: &[Annotation]) -> Vec<Annotation> {
        annotations
            .iter()
            .map(|a| Annotation::new(self.remapper.map_desc(&a.descriptor), a.visible))
            .collect()
    }

    // =========================================================================
    // Members
    // =========================================================================

    fn map_field(&self, field: FieldNode) -> FieldNode {
        let r = &self.remapper;
        FieldNode {
            access: field.access,
            name: r.map_field_name(&self.class_name, &field.name, &field.descriptor),
            descriptor: r.map_desc(&field.descriptor),
            signature: field.signature.as_deref().map(|s| r.map_signature(s)),
            value: field.value.map(|v| r.map_value(v)),
            annotations: self.map_annotations(&field.annotations),
        }
    }

    fn map_method(&self, method: MethodNode) -> MethodNode {
        let r = &self.remapper;
        MethodNode {
            access: method.access,
            name: r.map_method_name(&self.class_name, &method.name, &method.descriptor),
            descriptor: r.map_method_desc(&method.descriptor),
            signature: method.signature.as_deref().map(|s| r.map_signature(s)),
            exceptions: r.map_types(&method.exceptions),
            annotations: self.map_annotations(&method.annotations),
            parameter_annotations: method
                .parameter_annotations
                .iter()
                .map(|param| self.map_annotations(param))
                .collect(),
            instructions: method
                .instructions
                .into_iter()
                .map(|insn| self.map_insn(insn))
                .collect(),
            try_catch_blocks: method
                .try_catch_blocks
                .into_iter()
                .map(|block| TryCatchBlock {
                    catch_type: block.catch_type.as_deref().map(|t| r.map_type(t)),
                    ..block
                })
                .collect(),
            local_variables: method
                .local_variables
                .into_iter()
                .map(|local| LocalVariable {
                    descriptor: r.map_desc(&local.descriptor),
                    signature: local.signature.as_deref().map(|s| r.map_signature(s)),
                    ..local
                })
                .collect(),
            max_stack: method.max_stack,
            max_locals: method.max_locals,
        }
    }

    fn map_insn(&self, insn: Insn) -> Insn {
        let r = &self.remapper;
        match insn {
            Insn::Type { opcode, type_name } => Insn::Type {
                opcode,
                type_name: r.map_type(&type_name),
            },
            Insn::Field {
                opcode,
                owner,
                name,
                descriptor,
            } => Insn::Field {
                opcode,
                name: r.map_field_name(&owner, &name, &descriptor),
                owner: r.map_type(&owner),
                descriptor: r.map_desc(&descriptor),
            },
            Insn::Method {
                opcode,
                owner,
                name,
                descriptor,
                is_interface,
            } => Insn::Method {
                opcode,
                name: r.map_method_name(&owner, &name, &descriptor),
                owner: r.map_type(&owner),
                descriptor: r.map_method_desc(&descriptor),
                is_interface,
            },
            Insn::InvokeDynamic {
                name,
                descriptor,
                bootstrap,
                arguments,
            } => Insn::InvokeDynamic {
                name,
                descriptor: r.map_method_desc(&descriptor),
                bootstrap: r.map_handle(&bootstrap),
                arguments: arguments.into_iter().map(|arg| r.map_value(arg)).collect(),
            },
            Insn::Ldc(value) => Insn::Ldc(r.map_value(value)),
            Insn::MultiANewArray {
                descriptor,
                dimensions,
            } => Insn::MultiANewArray {
                descriptor: r.map_desc(&descriptor),
                dimensions,
            },
            Insn::Frame {
                kind,
                locals,
                stack,
            } => Insn::Frame {
                kind,
                locals: locals.into_iter().map(|e| r.map_frame_entry(e)).collect(),
                stack: stack.into_iter().map(|e| r.map_frame_entry(e)).collect(),
            },
            other => other,
        }
    }
}

impl ClassVisitor for RemappingVisitor<'_> {
    fn visit(&mut self, header: ClassHeader) {
        let mapped = self.map_header(&header);
        if mapped.name != header.name {
            trace!(from = %header.name, to = %mapped.name, "renaming class");
        }
        self.class_name = header.name;
        if let Some(next) = self.next.as_mut() {
            next.visit(mapped);
        }
    }

    fn visit_field(&mut self, field: FieldNode) {
        let mapped = self.map_field(field);
        if let Some(next) = self.next.as_mut() {
            next.visit_field(mapped);
        }
    }

    fn visit_method(&mut self, method: MethodNode) {
        let mapped = self.map_method(method);
        if let Some(next) = self.next.as_mut() {
            next.visit_method(mapped);
        }
    }

    fn visit_end(&mut self) {
        if let Some(next) = self.next.as_mut() {
            next.visit_end();
        }
    }
}
