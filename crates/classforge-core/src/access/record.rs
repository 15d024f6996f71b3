//! Access records and the "most permissive wins" merge.

use std::collections::HashMap;

use classforge_types::access_flags::{
    ACC_FINAL, ACC_PRIVATE, ACC_PROTECTED, ACC_PUBLIC, VISIBILITY_MASK,
};
use classforge_types::MemberKey;
use serde::{Deserialize, Serialize};

/// Declared visibility. `Unset` is the absence of any visibility flag
/// (package access), which is more open than `Private`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Unset,
    Private,
    Protected,
    Public,
}

impl Visibility {
    pub fn from_flags(flags: u32) -> Self {
        if flags & ACC_PUBLIC != 0 {
            Self::Public
        } else if flags & ACC_PROTECTED != 0 {
            Self::Protected
        } else if flags & ACC_PRIVATE != 0 {
            Self::Private
        } else {
            Self::Unset
        }
    }

    pub fn flags(self) -> u32 {
        match self {
            Self::Unset => 0,
            Self::Private => ACC_PRIVATE,
            Self::Protected => ACC_PROTECTED,
            Self::Public => ACC_PUBLIC,
        }
    }

    /// Public beats protected; past that, unset on either side stays unset
    /// and only private meeting private stays private.
    pub fn merge(self, other: Self) -> Self {
        use Visibility::*;
        match (self, other) {
            (Public, _) | (_, Public) => Public,
            (Protected, _) | (_, Protected) => Protected,
            (Unset, _) | (_, Unset) => Unset,
            (Private, Private) => Private,
        }
    }
}

/// One access request: visibility, the remaining modifier bits and finality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Access {
    pub visibility: Visibility,
    /// Modifier bits other than visibility and `ACC_FINAL`.
    pub flags: u32,
    pub is_final: bool,
}

impl Access {
    pub fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            flags: 0,
            is_final: false,
        }
    }

    pub fn public() -> Self {
        Self::new(Visibility::Public)
    }

    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags |= flags & !(VISIBILITY_MASK | ACC_FINAL);
        self
    }

    pub fn with_final(mut self, is_final: bool) -> Self {
        self.is_final = is_final;
        self
    }

    /// Split raw access flags into a record.
    pub fn from_flags(flags: u32) -> Self {
        Self {
            visibility: Visibility::from_flags(flags),
            flags: flags & !(VISIBILITY_MASK | ACC_FINAL),
            is_final: flags & ACC_FINAL != 0,
        }
    }

    pub fn to_flags(self) -> u32 {
        let mut flags = self.visibility.flags() | self.flags;
        if self.is_final {
            flags |= ACC_FINAL;
        }
        flags
    }

    /// Combine two requests for the same symbol.
    ///
    /// Visibility merges per [`Visibility::merge`], other bits are OR-ed and
    /// the result is final only if both requests are.
    pub fn merge(self, other: Self) -> Self {
        Self {
            visibility: self.visibility.merge(other.visibility),
            flags: self.flags | other.flags,
            is_final: self.is_final && other.is_final,
        }
    }
}

fn merge_into(slot: &mut Option<Access>, incoming: Option<Access>) {
    *slot = match (*slot, incoming) {
        (Some(current), Some(incoming)) => Some(current.merge(incoming)),
        (current, incoming) => current.or(incoming),
    };
}

fn merge_members(into: &mut HashMap<MemberKey, Access>, from: HashMap<MemberKey, Access>) {
    for (key, access) in from {
        into.entry(key)
            .and_modify(|current| *current = current.merge(access))
            .or_insert(access);
    }
}

/// Access overrides for one class and its members.
///
/// `access: None` means nothing was requested for the class itself; member
/// overrides still apply. Member keys use the descriptors as declared in the
/// class being visited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassAccess {
    pub access: Option<Access>,
    pub fields: HashMap<MemberKey, Access>,
    pub methods: HashMap<MemberKey, Access>,
}

impl ClassAccess {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_access(mut self, access: Access) -> Self {
        self.access = Some(access);
        self
    }

    pub fn with_field(
        mut self,
        name: impl Into<String>,
        descriptor: impl Into<String>,
        access: Access,
    ) -> Self {
        self.fields.insert(MemberKey::new(name, descriptor), access);
        self
    }

    pub fn with_method(
        mut self,
        name: impl Into<String>,
        descriptor: impl Into<String>,
        access: Access,
    ) -> Self {
        self.methods.insert(MemberKey::new(name, descriptor), access);
        self
    }

    pub fn field(&self, name: &str, descriptor: &str) -> Option<Access> {
        self.fields.get(&MemberKey::new(name, descriptor)).copied()
    }

    pub fn method(&self, name: &str, descriptor: &str) -> Option<Access> {
        self.methods.get(&MemberKey::new(name, descriptor)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.access.is_none() && self.fields.is_empty() && self.methods.is_empty()
    }

    /// Fold another request for the same class into this one.
    pub fn merge(&mut self, other: ClassAccess) {
        merge_into(&mut self.access, other.access);
        merge_members(&mut self.fields, other.fields);
        merge_members(&mut self.methods, other.methods);
    }
}
