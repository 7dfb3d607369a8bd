//! The in-memory hierarchy table.
//!
//! The table is read-only during a generation run; it answers supertype,
//! property and typedef queries for the generator. Its absence is a valid
//! configuration handled one level up, in `bindery-gen`.

use bindery_decl::{Indirection, TypeDesc, Value};
use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};

/// Aliases resolve transitively up to this depth; past it the chain is
/// treated as circular and left as-is.
const MAX_TYPEDEF_DEPTH: usize = 16;

/// What a typedef alias stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedefTarget {
    pub ty: TypeDesc,
    /// Class name of the underlying type; empty for primitives.
    pub class_name: String,
}

/// Everything the table records about one class.
#[derive(Debug, Clone, Default)]
pub struct HierarchyEntry {
    pub name: String,
    /// Direct superclasses, declaration order.
    pub superclasses: Vec<String>,
    /// Named properties; flag-like properties store an empty value.
    pub properties: FxHashMap<String, String>,
    /// Typedef aliases declared in this class's scope.
    pub typedefs: FxHashMap<String, TypedefTarget>,
}

impl HierarchyEntry {
    pub fn new(name: &str) -> Self {
        HierarchyEntry {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Look up a property on this entry. Flag properties answer `Some("")`.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

/// The class-hierarchy table, insertion-ordered for deterministic dumps.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    entries: IndexMap<String, HierarchyEntry, FxBuildHasher>,
}

impl Hierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: HierarchyEntry) {
        self.entries.insert(entry.name.clone(), entry);
    }

    pub fn find(&self, name: &str) -> Option<&HierarchyEntry> {
        self.entries.get(name)
    }

    pub fn entries(&self) -> impl Iterator<Item = &HierarchyEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if `superclass` is reachable from `entry` through the supertype
    /// chain, the entry's own name included. Cycle-safe.
    pub fn is_type_of(&self, entry: &HierarchyEntry, superclass: &str) -> bool {
        if entry.name == superclass {
            return true;
        }

        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut pending: Vec<&str> = entry.superclasses.iter().map(String::as_str).collect();

        while let Some(name) = pending.pop() {
            if name == superclass {
                return true;
            }
            if !seen.insert(name) {
                continue;
            }
            if let Some(parent) = self.find(name) {
                pending.extend(parent.superclasses.iter().map(String::as_str));
            }
        }

        false
    }

    /// Property lookup by class name.
    pub fn class_property(&self, class: &str, key: &str) -> Option<&str> {
        self.find(class)?.property(key)
    }

    /// Resolve a typedef alias in the scope of `owning_class`: the class's
    /// own aliases first, then each ancestor's, nearest first.
    pub fn resolve_typedef(&self, owning_class: &str, alias: &str) -> Option<&TypedefTarget> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut pending: Vec<&str> = vec![owning_class];

        while let Some(name) = pending.pop() {
            if !seen.insert(name) {
                continue;
            }
            if let Some(entry) = self.find(name) {
                if let Some(target) = entry.typedefs.get(alias) {
                    return Some(target);
                }
                pending.extend(entry.superclasses.iter().map(String::as_str));
            }
        }

        None
    }

    /// Rewrite `value` in place, resolving its class name through the alias
    /// tables visible from `owning_class`. Aliases of aliases resolve
    /// transitively; running the expansion twice changes nothing.
    pub fn expand_typedefs(&self, value: &mut Value, owning_class: &str) {
        for _ in 0..MAX_TYPEDEF_DEPTH {
            if value.class_name.is_empty() {
                return;
            }
            let Some(target) = self.resolve_typedef(owning_class, &value.class_name) else {
                return;
            };

            let combined = combine_indirection(value.ty.indirection(), target.ty.indirection());
            let mut ty = TypeDesc::of(target.ty.base());
            ty = match combined {
                Indirection::None => ty,
                Indirection::Pointer => ty.pointer(),
                Indirection::Array => ty.array(),
            };
            if value.ty.is_const() || target.ty.is_const() {
                ty = ty.constant();
            }
            if value.ty.is_ref() || target.ty.is_ref() {
                ty = ty.reference();
            }

            value.ty = ty;
            value.class_name = target.class_name.clone();
        }
    }
}

/// A scalar side adopts the other side's shape; stacking two levels of
/// indirection saturates to the array storage form.
fn combine_indirection(outer: Indirection, inner: Indirection) -> Indirection {
    match (outer, inner) {
        (Indirection::None, inner) => inner,
        (outer, Indirection::None) => outer,
        _ => Indirection::Array,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bindery_decl::BaseType;

    fn table() -> Hierarchy {
        let mut h = Hierarchy::new();

        let mut base = HierarchyEntry::new("helioObjectBase");
        base.typedefs.insert(
            "SizeType".to_string(),
            TypedefTarget {
                ty: TypeDesc::of(BaseType::IdType),
                class_name: "helioIdType".to_string(),
            },
        );
        h.insert(base);

        let mut obj = HierarchyEntry::new("helioObject");
        obj.superclasses.push("helioObjectBase".to_string());
        h.insert(obj);

        let mut arr = HierarchyEntry::new("helioDataArray");
        arr.superclasses.push("helioObject".to_string());
        arr.typedefs.insert(
            "ValueType".to_string(),
            TypedefTarget {
                ty: TypeDesc::of(BaseType::Double),
                class_name: String::new(),
            },
        );
        h.insert(arr);

        let mut farr = HierarchyEntry::new("helioFloatArray");
        farr.superclasses.push("helioDataArray".to_string());
        h.insert(farr);

        h
    }

    #[test]
    fn test_is_type_of_walks_the_chain() {
        let h = table();
        let entry = h.find("helioFloatArray").unwrap();

        assert!(h.is_type_of(entry, "helioFloatArray"));
        assert!(h.is_type_of(entry, "helioDataArray"));
        assert!(h.is_type_of(entry, "helioObjectBase"));
        assert!(!h.is_type_of(entry, "helioCamera"));
    }

    #[test]
    fn test_is_type_of_survives_cycles() {
        let mut h = Hierarchy::new();
        let mut a = HierarchyEntry::new("helioA");
        a.superclasses.push("helioB".to_string());
        h.insert(a);
        let mut b = HierarchyEntry::new("helioB");
        b.superclasses.push("helioA".to_string());
        h.insert(b);

        let entry = h.find("helioA").unwrap();
        assert!(!h.is_type_of(entry, "helioC"));
        assert!(h.is_type_of(entry, "helioB"));
    }

    #[test]
    fn test_typedef_resolution_is_scoped() {
        let h = table();

        // Visible on the declaring class and below.
        assert!(h.resolve_typedef("helioDataArray", "ValueType").is_some());
        assert!(h.resolve_typedef("helioFloatArray", "ValueType").is_some());
        // Inherited from the root.
        assert!(h.resolve_typedef("helioFloatArray", "SizeType").is_some());
        // Not visible from an unrelated scope.
        assert!(h.resolve_typedef("helioObject", "ValueType").is_none());
    }

    #[test]
    fn test_expand_typedefs_rewrites_in_place() {
        let h = table();

        let mut v = Value::new(TypeDesc::of(BaseType::Unknown)).with_class("ValueType");
        h.expand_typedefs(&mut v, "helioFloatArray");
        assert_eq!(v.ty.base(), BaseType::Double);
        assert_eq!(v.class_name, "");

        // The value's own indirection survives expansion to a scalar alias.
        let mut v = Value::new(TypeDesc::of(BaseType::Unknown).pointer()).with_class("SizeType");
        h.expand_typedefs(&mut v, "helioFloatArray");
        assert_eq!(v.ty.base(), BaseType::IdType);
        assert_eq!(v.ty.indirection(), Indirection::Pointer);
        assert_eq!(v.class_name, "helioIdType");
    }

    #[test]
    fn test_expand_typedefs_is_idempotent() {
        let h = table();

        let mut once = Value::new(TypeDesc::of(BaseType::Unknown)).with_class("SizeType");
        h.expand_typedefs(&mut once, "helioObject");
        let mut twice = once.clone();
        h.expand_typedefs(&mut twice, "helioObject");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_expand_typedefs_ignores_unrecorded_names() {
        let h = table();
        let mut v = Value::new(TypeDesc::of(BaseType::Object).pointer()).with_class("helioActor");
        let before = v.clone();
        h.expand_typedefs(&mut v, "helioFloatArray");
        assert_eq!(v, before);
    }

    #[test]
    fn test_transitive_alias_chain() {
        let mut h = table();
        let mut chained = HierarchyEntry::new("helioChained");
        chained.superclasses.push("helioObjectBase".to_string());
        chained.typedefs.insert(
            "IndexType".to_string(),
            TypedefTarget {
                ty: TypeDesc::of(BaseType::Unknown),
                class_name: "SizeType".to_string(),
            },
        );
        h.insert(chained);

        let mut v = Value::new(TypeDesc::of(BaseType::Unknown)).with_class("IndexType");
        h.expand_typedefs(&mut v, "helioChained");
        assert_eq!(v.ty.base(), BaseType::IdType);
        assert_eq!(v.class_name, "helioIdType");
    }
}
