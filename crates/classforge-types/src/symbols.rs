//! Symbol tables: original name -> renamed name associations.
//!
//! The pipeline only ever *consumes* a symbol table through [`SymbolTable`].
//! Member keys carry the descriptor in the **renamed** namespace, because
//! overloads are disambiguated by descriptor and the descriptor is translated
//! before the member name is resolved.
//!
//! [`MappingTable`] is the in-memory implementation, loadable from JSON:
//!
//! ```json
//! {
//!   "classes": {
//!     "a/A": {
//!       "renamed_name": "net/Alpha",
//!       "fields": [{ "name": "a", "descriptor": "I", "renamed": "count" }],
//!       "methods": [{ "name": "b", "descriptor": "()Lnet/Alpha;", "renamed": "copy" }]
//!     }
//!   }
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::descriptor::{is_method_descriptor, map_field_descriptor, map_method_descriptor};

/// `(member name, descriptor)` identifying a field or method within a class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberKey {
    pub name: String,
    pub descriptor: String,
}

impl MemberKey {
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }
}

/// Member key -> renamed member name.
pub type MemberMap = HashMap<MemberKey, String>;

/// Everything a symbol table knows about one class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassMapping {
    pub renamed_name: String,
    #[serde(default, with = "member_entries")]
    pub fields: MemberMap,
    #[serde(default, with = "member_entries")]
    pub methods: MemberMap,
}

impl ClassMapping {
    pub fn new(renamed_name: impl Into<String>) -> Self {
        Self {
            renamed_name: renamed_name.into(),
            ..Self::default()
        }
    }

    pub fn with_field(
        mut self,
        name: impl Into<String>,
        descriptor: impl Into<String>,
        renamed: impl Into<String>,
    ) -> Self {
        self.fields
            .insert(MemberKey::new(name, descriptor), renamed.into());
        self
    }

    pub fn with_method(
        mut self,
        name: impl Into<String>,
        descriptor: impl Into<String>,
        renamed: impl Into<String>,
    ) -> Self {
        self.methods
            .insert(MemberKey::new(name, descriptor), renamed.into());
        self
    }

    /// Renamed field name for `(name, renamed descriptor)`.
    pub fn field(&self, name: &str, descriptor: &str) -> Option<&str> {
        self.fields
            .get(&MemberKey::new(name, descriptor))
            .map(String::as_str)
    }

    /// Renamed method name for `(name, renamed descriptor)`.
    pub fn method(&self, name: &str, descriptor: &str) -> Option<&str> {
        self.methods
            .get(&MemberKey::new(name, descriptor))
            .map(String::as_str)
    }
}

/// Read-only lookup of class mappings by original internal name.
///
/// Implementations must be pure: the same name always yields the same answer
/// for the lifetime of a transformation run.
pub trait SymbolTable {
    fn class_info(&self, internal_name: &str) -> Option<&ClassMapping>;
}

/// Symbol table handle shared across stages and worker threads.
pub type SharedSymbolTable = Arc<dyn SymbolTable + Send + Sync>;

// =============================================================================
// In-memory table
// =============================================================================

/// In-memory symbol table keyed by original internal class name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingTable {
    #[serde(default)]
    classes: BTreeMap<String, ClassMapping>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, original: impl Into<String>, mapping: ClassMapping) {
        self.classes.insert(original.into(), mapping);
    }

    /// Builder form of [`MappingTable::insert`].
    pub fn with_class(mut self, original: impl Into<String>, mapping: ClassMapping) -> Self {
        self.insert(original, mapping);
        self
    }

    pub fn get(&self, original: &str) -> Option<&ClassMapping> {
        self.classes.get(original)
    }

    /// Mapping for `original`, created as an identity mapping if missing.
    pub fn class_mut(&mut self, original: &str) -> &mut ClassMapping {
        self.classes
            .entry(original.to_string())
            .or_insert_with(|| ClassMapping::new(original))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ClassMapping)> {
        self.classes.iter()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Layer `other` on top of this table: classes present in `other` win.
    pub fn extend(&mut self, other: MappingTable) {
        self.classes.extend(other.classes);
    }

    /// Table mapping renamed names back to the originals.
    ///
    /// Member descriptors are re-keyed into the original namespace so the
    /// result obeys the same "descriptor already renamed" convention.
    pub fn reversed(&self) -> MappingTable {
        let back: HashMap<&str, &str> = self
            .classes
            .iter()
            .map(|(original, mapping)| (mapping.renamed_name.as_str(), original.as_str()))
            .collect();
        let mut to_original =
            |name: &str| back.get(name).map_or_else(|| name.to_string(), |s| s.to_string());

        let mut reversed = MappingTable::new();
        for (original, mapping) in &self.classes {
            let mut entry = ClassMapping::new(original.clone());
            for (key, renamed) in &mapping.fields {
                let desc = map_field_descriptor(&key.descriptor, &mut to_original)
                    .unwrap_or_else(|| key.descriptor.clone());
                entry.fields.insert(MemberKey::new(renamed.clone(), desc), key.name.clone());
            }
            for (key, renamed) in &mapping.methods {
                let desc = if is_method_descriptor(&key.descriptor) {
                    map_method_descriptor(&key.descriptor, &mut to_original)
                } else {
                    None
                }
                .unwrap_or_else(|| key.descriptor.clone());
                entry.methods.insert(MemberKey::new(renamed.clone(), desc), key.name.clone());
            }
            reversed.insert(mapping.renamed_name.clone(), entry);
        }
        reversed
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse mapping table JSON")
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read mapping table {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Invalid mapping table {}", path.display()))
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize mapping table")
    }
}

impl SymbolTable for MappingTable {
    fn class_info(&self, internal_name: &str) -> Option<&ClassMapping> {
        self.classes.get(internal_name)
    }
}

impl FromIterator<(String, ClassMapping)> for MappingTable {
    fn from_iter<I: IntoIterator<Item = (String, ClassMapping)>>(iter: I) -> Self {
        Self {
            classes: iter.into_iter().collect(),
        }
    }
}

/// A primary table consulted before a fallback.
///
/// Used to put a flattened hierarchy table (which knows inherited members) in
/// front of the externally supplied table (which knows every class).
#[derive(Clone)]
pub struct ChainedTable {
    primary: SharedSymbolTable,
    fallback: SharedSymbolTable,
}

impl ChainedTable {
    pub fn new(primary: SharedSymbolTable, fallback: SharedSymbolTable) -> Self {
        Self { primary, fallback }
    }
}

impl SymbolTable for ChainedTable {
    fn class_info(&self, internal_name: &str) -> Option<&ClassMapping> {
        self.primary
            .class_info(internal_name)
            .or_else(|| self.fallback.class_info(internal_name))
    }
}

impl std::fmt::Debug for ChainedTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainedTable").finish_non_exhaustive()
    }
}

/// Serialize member maps as sorted `{name, descriptor, renamed}` lists so JSON
/// keys stay strings and output is stable.
mod member_entries {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{MemberKey, MemberMap};

    #[derive(Serialize, Deserialize)]
    struct Entry {
        name: String,
        descriptor: String,
        renamed: String,
    }

    pub fn serialize<S: Serializer>(map: &MemberMap, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<Entry> = map
            .iter()
            .map(|(key, renamed)| Entry {
                name: key.name.clone(),
                descriptor: key.descriptor.clone(),
                renamed: renamed.clone(),
            })
            .collect();
        entries.sort_by(|a, b| (&a.name, &a.descriptor).cmp(&(&b.name, &b.descriptor)));
        entries.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<MemberMap, D::Error> {
        let entries = Vec::<Entry>::deserialize(deserializer)?;
        Ok(entries
            .into_iter()
            .map(|e| (MemberKey::new(e.name, e.descriptor), e.renamed))
            .collect())
    }
}
