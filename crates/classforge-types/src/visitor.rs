//! The structural traversal interface.
//!
//! A traversal reports a class as a fixed sequence of events:
//!
//! 1. [`ClassVisitor::visit`] once, with the class header
//! 2. [`ClassVisitor::visit_field`] / [`ClassVisitor::visit_method`] per member
//! 3. [`ClassVisitor::visit_end`] once
//!
//! Transformation stages implement this trait and forward (possibly rewritten)
//! events to the next stage they own. [`ClassNode`] is both a source of events
//! ([`ClassNode::accept`]) and the usual terminal sink.

use crate::class::{ClassHeader, ClassNode, FieldNode, MethodNode};

pub trait ClassVisitor {
    fn visit(&mut self, header: ClassHeader);

    fn visit_field(&mut self, field: FieldNode);

    fn visit_method(&mut self, method: MethodNode);

    fn visit_end(&mut self);
}

impl<V: ClassVisitor + ?Sized> ClassVisitor for &mut V {
    fn visit(&mut self, header: ClassHeader) {
        (**self).visit(header)
    }

    fn visit_field(&mut self, field: FieldNode) {
        (**self).visit_field(field)
    }

    fn visit_method(&mut self, method: MethodNode) {
        (**self).visit_method(method)
    }

    fn visit_end(&mut self) {
        (**self).visit_end()
    }
}

impl<V: ClassVisitor + ?Sized> ClassVisitor for Box<V> {
    fn visit(&mut self, header: ClassHeader) {
        (**self).visit(header)
    }

    fn visit_field(&mut self, field: FieldNode) {
        (**self).visit_field(field)
    }

    fn visit_method(&mut self, method: MethodNode) {
        (**self).visit_method(method)
    }

    fn visit_end(&mut self) {
        (**self).visit_end()
    }
}

/// Collecting sink: rebuilds a tree from the events it receives.
///
/// A new `visit` resets the node, so one sink can be reused across classes.
impl ClassVisitor for ClassNode {
    fn visit(&mut self, header: ClassHeader) {
        self.header = header;
        self.fields.clear();
        self.methods.clear();
    }

    fn visit_field(&mut self, field: FieldNode) {
        self.fields.push(field);
    }

    fn visit_method(&mut self, method: MethodNode) {
        self.methods.push(method);
    }

    fn visit_end(&mut self) {}
}

impl ClassNode {
    /// Replay this tree into `visitor`, fields before methods.
    pub fn accept<V: ClassVisitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit(self.header.clone());
        for field in &self.fields {
            visitor.visit_field(field.clone());
        }
        for method in &self.methods {
            visitor.visit_method(method.clone());
        }
        visitor.visit_end();
    }

    /// Like [`ClassNode::accept`] but moves the members instead of cloning them.
    pub fn accept_owned<V: ClassVisitor + ?Sized>(self, visitor: &mut V) {
        visitor.visit(self.header);
        for field in self.fields {
            visitor.visit_field(field);
        }
        for method in self.methods {
            visitor.visit_method(method);
        }
        visitor.visit_end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access_flags::*;

    #[derive(Default)]
    struct EventLog(Vec<String>);

    impl ClassVisitor for EventLog {
        fn visit(&mut self, header: ClassHeader) {
            self.0.push(format!("class {}", header.name));
        }

        fn visit_field(&mut self, field: FieldNode) {
            self.0.push(format!("field {}", field.name));
        }

        fn visit_method(&mut self, method: MethodNode) {
            self.0.push(format!("method {}{}", method.name, method.descriptor));
        }

        fn visit_end(&mut self) {
            self.0.push("end".to_string());
        }
    }

    fn sample() -> ClassNode {
        ClassNode::new("a/B", Some("java/lang/Object"))
            .with_method(MethodNode::new(ACC_PUBLIC, "<init>", "()V"))
            .with_field(FieldNode::new(ACC_PRIVATE, "count", "I"))
    }

    #[test]
    fn test_accept_event_order() {
        let mut log = EventLog::default();
        sample().accept(&mut log);
        assert_eq!(
            log.0,
            vec!["class a/B", "field count", "method <init>()V", "end"]
        );
    }

    #[test]
    fn test_class_node_sink_round_trip() {
        let original = sample();
        let mut copy = ClassNode::default();
        original.accept(&mut copy);
        assert_eq!(copy, original);
    }

    #[test]
    fn test_sink_resets_between_classes() {
        let mut sink = ClassNode::default();
        sample().accept_owned(&mut sink);
        ClassNode::new("a/C", None).accept_owned(&mut sink);
        assert_eq!(sink.name(), "a/C");
        assert!(sink.fields.is_empty());
        assert!(sink.methods.is_empty());
    }

    #[test]
    fn test_boxed_and_borrowed_visitors_forward() {
        let mut log = EventLog::default();
        {
            let mut boxed: Box<dyn ClassVisitor + '_> = Box::new(&mut log);
            sample().accept(&mut boxed);
        }
        assert_eq!(log.0.len(), 4);
    }
}
