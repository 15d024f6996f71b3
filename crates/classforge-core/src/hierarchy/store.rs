//! Hierarchy entries and the flattening pass.

use std::collections::{HashMap, HashSet, VecDeque};

use classforge_types::{ClassMapping, MappingTable, MemberKey, MemberMap};
use parking_lot::RwLock;
use rayon::prelude::*;
use tracing::{debug, info};

/// Member information collected for one class.
///
/// Member maps are keyed by `(original name, renamed descriptor)` and hold
/// the renamed member name, the same convention as symbol tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HierarchyEntry {
    pub renamed_name: String,
    pub declared_fields: MemberMap,
    pub private_fields: MemberMap,
    pub declared_methods: MemberMap,
    pub private_methods: MemberMap,
    /// Super class then interfaces, as declared.
    pub dependencies: Vec<String>,
}

impl HierarchyEntry {
    pub fn new(renamed_name: impl Into<String>, dependencies: Vec<String>) -> Self {
        Self {
            renamed_name: renamed_name.into(),
            dependencies,
            ..Self::default()
        }
    }

    pub fn add_field(&mut self, key: MemberKey, renamed: String, is_private: bool) {
        let map = if is_private {
            &mut self.private_fields
        } else {
            &mut self.declared_fields
        };
        map.insert(key, renamed);
    }

    pub fn add_method(&mut self, key: MemberKey, renamed: String, is_private: bool) {
        let map = if is_private {
            &mut self.private_methods
        } else {
            &mut self.declared_methods
        };
        map.insert(key, renamed);
    }

    /// Merge a supertype's non-private members into this entry.
    ///
    /// A renamed inherited member replaces this entry's mapping, so an
    /// override is renamed together with the member it overrides. A member
    /// the supertype does not rename only fills gaps, leaving any rename of
    /// this class in place.
    fn inherit(&mut self, parent: &HierarchyEntry) {
        inherit_members(&mut self.declared_fields, &parent.declared_fields);
        inherit_members(&mut self.declared_methods, &parent.declared_methods);
    }

    /// Symbol-table view: every member this class declares or inherits.
    pub fn to_class_mapping(&self) -> ClassMapping {
        let mut mapping = ClassMapping::new(self.renamed_name.clone());
        mapping.fields.extend(
            self.declared_fields
                .iter()
                .chain(&self.private_fields)
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        mapping.methods.extend(
            self.declared_methods
                .iter()
                .chain(&self.private_methods)
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        mapping
    }
}

fn inherit_members(own: &mut MemberMap, inherited: &MemberMap) {
    for (key, renamed) in inherited {
        if *renamed != key.name {
            own.insert(key.clone(), renamed.clone());
        } else {
            own.entry(key.clone()).or_insert_with(|| renamed.clone());
        }
    }
}

/// Registry of hierarchy entries for one run.
///
/// Filled while classes are visited, then [`HierarchyStore::flatten`]ed once
/// every class has been seen.
#[derive(Debug, Default)]
pub struct HierarchyStore {
    entries: RwLock<HashMap<String, HierarchyEntry>>,
}

impl HierarchyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store (or replace) the entry for `internal_name`.
    pub fn record_class(&self, internal_name: &str, entry: HierarchyEntry) {
        assert!(!internal_name.is_empty(), "class name must not be empty");
        debug!(
            class = internal_name,
            fields = entry.declared_fields.len() + entry.private_fields.len(),
            methods = entry.declared_methods.len() + entry.private_methods.len(),
            "hierarchy entry recorded"
        );
        self.entries.write().insert(internal_name.to_string(), entry);
    }

    pub fn get(&self, internal_name: &str) -> Option<HierarchyEntry> {
        self.entries.read().get(internal_name).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Propagate inherited members down the hierarchy.
    ///
    /// Each entry receives the non-private fields and methods of every class
    /// reachable through its dependencies, breadth-first. Renamed inherited
    /// members replace the entry's own mapping for the same member, farther
    /// ancestors applied after nearer ones.
    /// Dependencies without an entry are skipped, cycles are visited once.
    /// The store's contents are replaced in one step.
    pub fn flatten(&self) -> usize {
        let mut entries = self.entries.write();
        let snapshot = &*entries;

        let flattened: HashMap<String, HierarchyEntry> = snapshot
            .par_iter()
            .map(|(name, entry)| {
                let mut merged = entry.clone();
                let mut visited: HashSet<&str> = HashSet::from([name.as_str()]);
                let mut queue: VecDeque<&str> =
                    entry.dependencies.iter().map(String::as_str).collect();

                while let Some(dependency) = queue.pop_front() {
                    if !visited.insert(dependency) {
                        continue;
                    }
                    let Some(parent) = snapshot.get(dependency) else {
                        continue;
                    };
                    merged.inherit(parent);
                    queue.extend(parent.dependencies.iter().map(String::as_str));
                }
                (name.clone(), merged)
            })
            .collect();

        let count = flattened.len();
        *entries = flattened;
        info!(classes = count, "hierarchy flattened");
        count
    }

    /// Symbol-table view of the store.
    pub fn to_mapping_table(&self) -> MappingTable {
        self.entries
            .read()
            .iter()
            .map(|(name, entry)| (name.clone(), entry.to_class_mapping()))
            .collect()
    }
}
