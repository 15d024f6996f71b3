use classforge_remap::Remapper;
use classforge_types::access_flags::is_private;
use classforge_types::{ClassHeader, ClassVisitor, FieldNode, MemberKey, MethodNode};

use super::store::{HierarchyEntry, HierarchyStore};
use crate::chain::ChainedVisitor;

/// Traversal stage recording a [`HierarchyEntry`] for each class it sees.
///
/// Names are resolved through the remapper as the class is declared; the
/// entry is stored when the class ends. Events are forwarded unchanged.
pub struct HierarchyVisitor<'a> {
    store: &'a HierarchyStore,
    remapper: Remapper,
    next: Option<Box<dyn ClassVisitor + 'a>>,
    class_name: String,
    entry: Option<HierarchyEntry>,
}

impl<'a> HierarchyVisitor<'a> {
    pub fn new(store: &'a HierarchyStore, remapper: Remapper) -> Self {
        Self {
            store,
            remapper,
            next: None,
            class_name: String::new(),
            entry: None,
        }
    }
}

impl ClassVisitor for HierarchyVisitor<'_> {
    fn visit(&mut self, header: ClassHeader) {
        self.class_name = header.name.clone();
        self.entry = Some(HierarchyEntry::new(
            self.remapper.map_type(&header.name),
            header.dependencies(),
        ));
        if let Some(next) = self.next.as_mut() {
            next.visit(header);
        }
    }

    fn visit_field(&mut self, field: FieldNode) {
        if let Some(entry) = self.entry.as_mut() {
            let renamed_desc = self.remapper.map_desc(&field.descriptor);
            let renamed =
                self.remapper
                    .map_field_name(&self.class_name, &field.name, &field.descriptor);
            entry.add_field(
                MemberKey::new(field.name.clone(), renamed_desc),
                renamed,
                is_private(field.access),
            );
        }
        if let Some(next) = self.next.as_mut() {
            next.visit_field(field);
        }
    }

    fn visit_method(&mut self, method: MethodNode) {
        if let Some(entry) = self.entry.as_mut() {
            let renamed_desc = self.remapper.map_method_desc(&method.descriptor);
            let renamed =
                self.remapper
                    .map_method_name(&self.class_name, &method.name, &method.descriptor);
            entry.add_method(
                MemberKey::new(method.name.clone(), renamed_desc),
                renamed,
                is_private(method.access),
            );
        }
        if let Some(next) = self.next.as_mut() {
            next.visit_method(method);
        }
    }

    fn visit_end(&mut self) {
        if let Some(entry) = self.entry.take() {
            self.store.record_class(&self.class_name, entry);
        }
        if let Some(next) = self.next.as_mut() {
            next.visit_end();
        }
    }
}

impl<'a> ChainedVisitor<'a> for HierarchyVisitor<'a> {
    fn set_next(&mut self, next: Box<dyn ClassVisitor + 'a>) {
        self.next = Some(next);
    }
}
