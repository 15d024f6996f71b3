//! Composing traversal stages into one chain.
//!
//! Stages are registered in order and composed back to front: stage *i*
//! forwards to stage *i + 1* and the last stage forwards to a sink. The
//! first registered stage therefore sees every event first.
//!
//! Two kinds of stage exist:
//! - **links** ([`ChainedVisitor`]) own their successor and decide what to
//!   forward, e.g. the access, hierarchy and renaming stages;
//! - **observers** are plain [`ClassVisitor`]s. They are wrapped so they see
//!   every event and the event is forwarded unchanged.
//!
//! [`ClassModifier`] is the front end most callers use.

use std::cell::RefCell;
use std::rc::Rc;

use classforge_remap::{Remapper, RemappingVisitor};
use classforge_types::{
    ClassHeader, ClassNode, ClassVisitor, FieldNode, MethodNode, SharedSymbolTable,
};
use tracing::debug;

use crate::error::{Result, TransformError};

/// A stage that owns (and forwards to) the next stage of a chain.
pub trait ChainedVisitor<'a>: ClassVisitor {
    fn set_next(&mut self, next: Box<dyn ClassVisitor + 'a>);
}

impl<'a> ChainedVisitor<'a> for RemappingVisitor<'a> {
    fn set_next(&mut self, next: Box<dyn ClassVisitor + 'a>) {
        RemappingVisitor::set_next(self, next);
    }
}

/// One entry of a chain.
pub enum Stage<'a> {
    Link(Box<dyn ChainedVisitor<'a> + 'a>),
    Observer(Box<dyn ClassVisitor + 'a>),
}

impl<'a> Stage<'a> {
    pub fn link(stage: impl ChainedVisitor<'a> + 'a) -> Self {
        Self::Link(Box::new(stage))
    }

    pub fn observer(visitor: impl ClassVisitor + 'a) -> Self {
        Self::Observer(Box::new(visitor))
    }
}

/// Shows each event to an observer, then forwards it.
struct Tee<'a> {
    observer: Box<dyn ClassVisitor + 'a>,
    next: Box<dyn ClassVisitor + 'a>,
}

impl ClassVisitor for Tee<'_> {
    fn visit(&mut self, header: ClassHeader) {
        self.observer.visit(header.clone());
        self.next.visit(header);
    }

    fn visit_field(&mut self, field: FieldNode) {
        self.observer.visit_field(field.clone());
        self.next.visit_field(field);
    }

    fn visit_method(&mut self, method: MethodNode) {
        self.observer.visit_method(method.clone());
        self.next.visit_method(method);
    }

    fn visit_end(&mut self) {
        self.observer.visit_end();
        self.next.visit_end();
    }
}

/// Thread `stages` into one visitor ending in `sink`.
pub fn compose<'a>(
    stages: Vec<Stage<'a>>,
    sink: Box<dyn ClassVisitor + 'a>,
) -> Box<dyn ClassVisitor + 'a> {
    let mut next = sink;
    for stage in stages.into_iter().rev() {
        next = match stage {
            Stage::Link(mut link) => {
                link.set_next(next);
                Box::new(link)
            }
            Stage::Observer(observer) => Box::new(Tee { observer, next }),
        };
    }
    next
}

/// Terminal sink the modifier can read back once the chain is dropped.
#[derive(Clone, Default)]
struct SharedSink(Rc<RefCell<ClassNode>>);

impl ClassVisitor for SharedSink {
    fn visit(&mut self, header: ClassHeader) {
        self.0.borrow_mut().visit(header);
    }

    fn visit_field(&mut self, field: FieldNode) {
        self.0.borrow_mut().visit_field(field);
    }

    fn visit_method(&mut self, method: MethodNode) {
        self.0.borrow_mut().visit_method(method);
    }

    fn visit_end(&mut self) {}
}

// =============================================================================
// Class modifier
// =============================================================================

/// Builds and runs a chain over one class.
///
/// ```
/// use std::sync::Arc;
/// use classforge_core::ClassModifier;
/// use classforge_types::{ClassMapping, ClassNode, MappingTable};
///
/// let table = MappingTable::new().with_class("a/A", ClassMapping::new("net/Alpha"));
///
/// let mut modifier = ClassModifier::new();
/// modifier.set_symbol_table(Arc::new(table));
/// modifier.add_mapping_visitor()?;
///
/// let out = modifier.modify(&ClassNode::new("a/A", Some("java/lang/Object")))?;
/// assert_eq!(out.name(), "net/Alpha");
/// # Ok::<(), classforge_core::TransformError>(())
/// ```
pub struct ClassModifier<'a> {
    stages: Vec<Stage<'a>>,
    remapper: Option<Remapper>,
    mapping_requested: bool,
}

impl Default for ClassModifier<'_> {
    fn default() -> Self {
        Self {
            stages: Vec::new(),
            remapper: None,
            mapping_requested: false,
        }
    }
}

impl<'a> ClassModifier<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_symbol_table(&mut self, table: SharedSymbolTable) -> &mut Self {
        self.remapper = Some(Remapper::new(table));
        self
    }

    pub fn set_remapper(&mut self, remapper: Remapper) -> &mut Self {
        self.remapper = Some(remapper);
        self
    }

    /// Append a plain visitor; it observes events without altering them.
    pub fn add_visitor(&mut self, visitor: impl ClassVisitor + 'a) -> &mut Self {
        self.stages.push(Stage::observer(visitor));
        self
    }

    /// Append a chainable stage.
    pub fn add_stage(&mut self, stage: impl ChainedVisitor<'a> + 'a) -> &mut Self {
        self.stages.push(Stage::link(stage));
        self
    }

    /// Request renaming. The renaming stage always runs last, after every
    /// other stage, regardless of when this is called.
    pub fn add_mapping_visitor(&mut self) -> Result<&mut Self> {
        if self.remapper.is_none() {
            return Err(TransformError::MissingSymbolTable);
        }
        self.mapping_requested = true;
        Ok(self)
    }

    pub fn is_ready(&self) -> bool {
        !self.stages.is_empty() || self.mapping_requested
    }

    /// Run the chain over `class` and return the rebuilt tree.
    pub fn modify(self, class: &ClassNode) -> Result<ClassNode> {
        self.run(|visitor| class.accept(visitor))
    }

    /// Like [`ClassModifier::modify`] without cloning the input members.
    pub fn modify_owned(self, class: ClassNode) -> Result<ClassNode> {
        self.run(|visitor| class.accept_owned(visitor))
    }

    fn run<F>(mut self, replay: F) -> Result<ClassNode>
    where
        F: FnOnce(&mut dyn ClassVisitor),
    {
        if !self.is_ready() {
            return Err(TransformError::EmptyPipeline);
        }
        if self.mapping_requested {
            let remapper = self.remapper.take().ok_or(TransformError::MissingSymbolTable)?;
            self.stages.push(Stage::link(RemappingVisitor::new(remapper)));
        }

        debug!(stages = self.stages.len(), "composing class chain");
        let sink = SharedSink::default();
        let mut chain = compose(self.stages, Box::new(sink.clone()));
        replay(chain.as_mut());
        drop(chain);
        Ok(sink.0.take())
    }
}
