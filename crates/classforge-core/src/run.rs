//! Per-run orchestration.
//!
//! A [`TransformRun`] owns the state shared by every class of one run: the
//! access resolver, the hierarchy store, the symbol table and the codec.
//! Nothing here is global; two runs never see each other's registrations.

use std::sync::Arc;

use classforge_remap::Remapper;
use classforge_types::{ChainedTable, ClassNode, MappingTable, SharedSymbolTable};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::access::{AccessResolver, AccessVisitor};
use crate::chain::ClassModifier;
use crate::codec::{BincodeCodec, ClassCodec};
use crate::config::TransformConfig;
use crate::error::{Result, TransformError};
use crate::hierarchy::{HierarchyStore, HierarchyVisitor};
use crate::traits::{apply_traits, TraitSequence};

pub struct TransformRun {
    config: TransformConfig,
    access: AccessResolver,
    hierarchy: HierarchyStore,
    supplied: Option<SharedSymbolTable>,
    flattened: Option<SharedSymbolTable>,
    codec: Box<dyn ClassCodec>,
}

impl TransformRun {
    /// A run without a symbol table, using [`BincodeCodec`].
    pub fn new(config: TransformConfig) -> Self {
        Self {
            config,
            access: AccessResolver::new(),
            hierarchy: HierarchyStore::new(),
            supplied: None,
            flattened: None,
            codec: Box::new(BincodeCodec),
        }
    }

    /// Like [`TransformRun::new`], loading the table named by
    /// [`TransformConfig::mappings`].
    pub fn from_config(config: TransformConfig) -> Result<Self> {
        let table = config.load_mappings()?;
        let mut run = Self::new(config);
        if let Some(table) = table {
            info!(classes = table.len(), "symbol table loaded");
            run.supplied = Some(Arc::new(table));
        }
        Ok(run)
    }

    pub fn with_symbol_table(mut self, table: SharedSymbolTable) -> Self {
        self.supplied = Some(table);
        self
    }

    pub fn with_codec(mut self, codec: impl ClassCodec + 'static) -> Self {
        self.codec = Box::new(codec);
        self
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Register access overrides here before transforming.
    pub fn access(&self) -> &AccessResolver {
        &self.access
    }

    pub fn hierarchy(&self) -> &HierarchyStore {
        &self.hierarchy
    }

    /// The remapper classes are renamed with, if renaming applies.
    ///
    /// Once the hierarchy has been collected its table is consulted before
    /// the supplied one, so members inherited from other classes of the run
    /// resolve through the subclass.
    pub fn remapper(&self) -> Option<Remapper> {
        if !self.config.remap {
            return None;
        }
        match (&self.flattened, &self.supplied) {
            (Some(flattened), Some(supplied)) => Some(Remapper::new(Arc::new(ChainedTable::new(
                flattened.clone(),
                supplied.clone(),
            )))),
            (Some(flattened), None) => Some(Remapper::new(flattened.clone())),
            (None, Some(supplied)) => Some(Remapper::new(supplied.clone())),
            (None, None) => None,
        }
    }

    fn base_remapper(&self) -> Remapper {
        match &self.supplied {
            Some(table) => Remapper::new(table.clone()),
            None => Remapper::identity(),
        }
    }

    /// Record every class in the hierarchy store and flatten it. Returns the
    /// number of classes in the flattened store.
    pub fn collect_hierarchy(&mut self, classes: &[ClassNode]) -> usize {
        let remapper = self.base_remapper();
        for class in classes {
            let mut visitor = HierarchyVisitor::new(&self.hierarchy, remapper.clone());
            class.accept(&mut visitor);
        }
        let count = self.hierarchy.flatten();
        self.flattened = Some(Arc::new(self.hierarchy.to_mapping_table()));
        count
    }

    /// Apply the access stage and the renaming stage to one class.
    ///
    /// With neither stage configured the class is returned unchanged.
    pub fn transform_class(&self, class: &ClassNode) -> Result<ClassNode> {
        let mut modifier = ClassModifier::new();
        if self.config.apply_access {
            modifier.add_stage(AccessVisitor::new(&self.access));
        }
        if let Some(remapper) = self.remapper() {
            modifier.set_remapper(remapper);
            modifier.add_mapping_visitor()?;
        }
        if !modifier.is_ready() {
            debug!(class = class.name(), "no stages configured, class left unchanged");
            return Ok(class.clone());
        }
        modifier.modify(class)
    }

    /// Transform a batch. A failing class does not stop the others; results
    /// are returned in input order.
    ///
    /// When [`TransformConfig::flatten_hierarchy`] is set and the hierarchy
    /// has not been collected yet, the batch is collected first.
    pub fn transform_all(&mut self, classes: &[ClassNode]) -> Vec<Result<ClassNode>> {
        if self.config.flatten_hierarchy && self.flattened.is_none() {
            self.collect_hierarchy(classes);
        }

        let this = &*self;
        let results: Vec<Result<ClassNode>> = if this.config.parallel {
            classes.par_iter().map(|c| this.transform_class(c)).collect()
        } else {
            classes.iter().map(|c| this.transform_class(c)).collect()
        };

        let mut failed = 0usize;
        for (class, result) in classes.iter().zip(&results) {
            if let Err(e) = result {
                failed += 1;
                warn!(class = class.name(), error = %e, "class transform failed");
            }
        }
        info!(
            classes = classes.len(),
            failed,
            parallel = this.config.parallel,
            "batch transformed"
        );
        results
    }

    /// Read a class, transform it, apply class traits and write it back.
    pub fn process_class_bytes<S>(
        &self,
        class_name: &str,
        bytes: &[u8],
        traits: &S,
    ) -> Result<Vec<u8>>
    where
        S: TraitSequence<ClassNode> + ?Sized,
    {
        let class = self.codec.read(bytes).map_err(|source| TransformError::Read {
            name: class_name.to_string(),
            source,
        })?;
        let class = self.transform_class(&class)?;
        let remapper = self.remapper().unwrap_or_else(|| self.base_remapper());
        let class = apply_traits(class_name, class, &remapper, traits)?;
        self.codec.write(&class).map_err(|source| TransformError::Write {
            name: class_name.to_string(),
            source,
        })
    }

    /// Apply file traits to a resource.
    pub fn process_resource<S>(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        traits: &S,
    ) -> Result<Vec<u8>>
    where
        S: TraitSequence<Vec<u8>> + ?Sized,
    {
        let remapper = self.remapper().unwrap_or_else(|| self.base_remapper());
        apply_traits(file_name, bytes, &remapper, traits)
    }

    /// The flattened hierarchy as a symbol table, empty before
    /// [`TransformRun::collect_hierarchy`].
    pub fn hierarchy_table(&self) -> MappingTable {
        self.hierarchy.to_mapping_table()
    }
}

impl std::fmt::Debug for TransformRun {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformRun")
            .field("config", &self.config)
            .field("pending_access", &self.access.pending())
            .field("hierarchy", &self.hierarchy.len())
            .field("has_table", &self.supplied.is_some())
            .finish_non_exhaustive()
    }
}
