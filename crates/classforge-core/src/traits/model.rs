use std::marker::PhantomData;
use std::sync::Arc;

use anyhow::Result;
use classforge_remap::Remapper;
use classforge_types::ClassNode;

use super::target::Target;

/// A pluggable modification of one payload type.
///
/// `modify` must hand back a payload on success; returning the input
/// untouched is the no-op. An error aborts the remaining traits for that
/// object only.
pub trait Trait<T>: Send + Sync {
    fn modify(&self, payload: T, remapper: &Remapper) -> Result<T>;

    fn target(&self) -> Target {
        Target::default()
    }
}

/// Traits are shared between sequences and worker threads.
pub type SharedTrait<T> = Arc<dyn Trait<T>>;

/// Trait over a parsed class.
pub type ClassTrait = dyn Trait<ClassNode>;

/// Trait over the raw bytes of a resource.
pub type FileTrait = dyn Trait<Vec<u8>>;

/// A trait backed by a closure.
pub struct FnTrait<T, F> {
    modify: F,
    target: Target,
    _payload: PhantomData<fn(T) -> T>,
}

impl<T, F> FnTrait<T, F>
where
    F: Fn(T, &Remapper) -> Result<T> + Send + Sync,
{
    pub fn new(modify: F) -> Self {
        Self {
            modify,
            target: Target::default(),
            _payload: PhantomData,
        }
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }
}

impl<T, F> Trait<T> for FnTrait<T, F>
where
    F: Fn(T, &Remapper) -> Result<T> + Send + Sync,
{
    fn modify(&self, payload: T, remapper: &Remapper) -> Result<T> {
        (self.modify)(payload, remapper)
    }

    fn target(&self) -> Target {
        self.target.clone()
    }
}

/// Shared class trait from a closure.
pub fn class_trait<F>(target: Target, modify: F) -> SharedTrait<ClassNode>
where
    F: Fn(ClassNode, &Remapper) -> Result<ClassNode> + Send + Sync + 'static,
{
    Arc::new(FnTrait::<ClassNode, F>::new(modify).with_target(target))
}

/// Shared file trait from a closure.
pub fn file_trait<F>(target: Target, modify: F) -> SharedTrait<Vec<u8>>
where
    F: Fn(Vec<u8>, &Remapper) -> Result<Vec<u8>> + Send + Sync + 'static,
{
    Arc::new(FnTrait::<Vec<u8>, F>::new(modify).with_target(target))
}
