use classforge_types::{ClassHeader, ClassVisitor, FieldNode, MethodNode};
use tracing::debug;

use super::record::ClassAccess;
use super::resolver::AccessResolver;
use crate::chain::ChainedVisitor;

/// Traversal stage applying pending access overrides.
///
/// The class's record is taken from the resolver, and the class retired,
/// when the class is entered. Requested access flags replace the declared
/// ones for the class and for each listed member; everything else passes
/// through untouched. Requests registered while the class is being visited
/// are rejected.
pub struct AccessVisitor<'a> {
    resolver: &'a AccessResolver,
    next: Option<Box<dyn ClassVisitor + 'a>>,
    record: Option<ClassAccess>,
}

impl<'a> AccessVisitor<'a> {
    pub fn new(resolver: &'a AccessResolver) -> Self {
        Self {
            resolver,
            next: None,
            record: None,
        }
    }

    pub fn with_next(resolver: &'a AccessResolver, next: Box<dyn ClassVisitor + 'a>) -> Self {
        let mut visitor = Self::new(resolver);
        visitor.next = Some(next);
        visitor
    }
}

impl ClassVisitor for AccessVisitor<'_> {
    fn visit(&mut self, mut header: ClassHeader) {
        self.record = self.resolver.take(&header.name);
        if self.record.is_some() {
            debug!(class = %header.name, "access record taken");
        }
        if let Some(access) = self.record.as_ref().and_then(|r| r.access) {
            let flags = access.to_flags();
            debug!(class = %header.name, from = header.access, to = flags, "applying class access");
            header.access = flags;
        }
        if let Some(next) = self.next.as_mut() {
            next.visit(header);
        }
    }

    fn visit_field(&mut self, mut field: FieldNode) {
        if let Some(access) = self
            .record
            .as_ref()
            .and_then(|r| r.field(&field.name, &field.descriptor))
        {
            debug!(field = %field.name, to = access.to_flags(), "applying field access");
            field.access = access.to_flags();
        }
        if let Some(next) = self.next.as_mut() {
            next.visit_field(field);
        }
    }

    fn visit_method(&mut self, mut method: MethodNode) {
        if let Some(access) = self
            .record
            .as_ref()
            .and_then(|r| r.method(&method.name, &method.descriptor))
        {
            debug!(method = %method.name, to = access.to_flags(), "applying method access");
            method.access = access.to_flags();
        }
        if let Some(next) = self.next.as_mut() {
            next.visit_method(method);
        }
    }

    fn visit_end(&mut self) {
        self.record = None;
        if let Some(next) = self.next.as_mut() {
            next.visit_end();
        }
    }
}

impl<'a> ChainedVisitor<'a> for AccessVisitor<'a> {
    fn set_next(&mut self, next: Box<dyn ClassVisitor + 'a>) {
        self.next = Some(next);
    }
}
