//! Hierarchy-aware resolution.
//!
//! A [`Resolver`] answers the inheritance-sensitive questions the generator
//! needs. The hierarchy table is an explicit, possibly-absent dependency:
//! without one, every query degrades to the documented name-prefix
//! heuristics instead of failing. When a table is present it is
//! authoritative; the heuristics never override it.

use bindery_decl::conventions;
use bindery_hierarchy::Hierarchy;

/// Answer to "is this class a special value type".
///
/// Without a hierarchy table there is no hard answer for toolkit classes,
/// only a presumption; callers must keep [`SpecialStatus::Presumed`]
/// distinct from a confirmed yes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialStatus {
    /// The table marks the class with the special property.
    Special,
    /// The table answers no, or the name rules the class out.
    NotSpecial,
    /// No table; the name carries the toolkit prefix, so the class may
    /// well be special.
    Presumed,
}

impl SpecialStatus {
    /// Whether a caller that needs a working assumption should treat the
    /// class as special.
    pub fn assume_special(self) -> bool {
        matches!(self, SpecialStatus::Special | SpecialStatus::Presumed)
    }
}

/// Inheritance and wrap-eligibility queries over an optional table.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    hierarchy: Option<&'a Hierarchy>,
}

impl<'a> Resolver<'a> {
    pub fn new(hierarchy: Option<&'a Hierarchy>) -> Self {
        Resolver { hierarchy }
    }

    pub fn hierarchy(&self) -> Option<&'a Hierarchy> {
        self.hierarchy
    }

    /// True if `class` is `superclass` or inherits from it.
    ///
    /// Without a table the only relationship we are willing to presume is
    /// membership in the toolkit's object root, based on the name prefix.
    pub fn is_subtype_of(&self, class: &str, superclass: &str) -> bool {
        if class == superclass {
            return true;
        }

        match self.hierarchy {
            Some(h) => h
                .find(class)
                .is_some_and(|entry| h.is_type_of(entry, superclass)),
            None => {
                superclass == conventions::HOST_OBJECT_ROOT && conventions::is_host_name(class)
            }
        }
    }

    /// True if `class` belongs to the reference-counted object hierarchy.
    pub fn is_object_base_type(&self, class: &str) -> bool {
        self.is_subtype_of(class, conventions::HOST_OBJECT_ROOT)
    }

    /// True if bindings should be generated for `class`: no exclusion
    /// property, or an exclusion overridden by the special property.
    pub fn is_wrappable(&self, class: &str) -> bool {
        match self.hierarchy {
            Some(h) => h.find(class).is_some_and(|entry| {
                entry.property(conventions::PROP_WRAP_EXCLUDE).is_none()
                    || entry.property(conventions::PROP_WRAP_SPECIAL).is_some()
            }),
            None => conventions::is_host_name(class),
        }
    }

    /// Tri-state special-value-type query; see [`SpecialStatus`].
    pub fn special_status(&self, class: &str) -> SpecialStatus {
        match self.hierarchy {
            Some(h) => {
                if h.class_property(class, conventions::PROP_WRAP_SPECIAL).is_some() {
                    SpecialStatus::Special
                } else {
                    SpecialStatus::NotSpecial
                }
            }
            None => {
                if conventions::is_host_name(class) {
                    SpecialStatus::Presumed
                } else {
                    SpecialStatus::NotSpecial
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bindery_hierarchy::parse;

    const FIXTURE: &str = "\
helioObjectBase
helioObject : helioObjectBase
helioDataArray : helioObject
helioFloatArray : helioDataArray
helioCollection : helioObject ; WRAP_EXCLUDE
helioVector3 : ; WRAP_SPECIAL
helioHidden : helioObject ; WRAP_EXCLUDE, WRAP_SPECIAL
";

    #[test]
    fn test_subtype_with_table() {
        let h = parse(FIXTURE).unwrap();
        let r = Resolver::new(Some(&h));

        assert!(r.is_subtype_of("helioFloatArray", "helioDataArray"));
        assert!(r.is_subtype_of("helioFloatArray", "helioObjectBase"));
        assert!(r.is_subtype_of("helioDataArray", "helioDataArray"));
        assert!(r.is_object_base_type("helioFloatArray"));
        assert!(!r.is_subtype_of("helioVector3", "helioObjectBase"));
        assert!(!r.is_object_base_type("helioVector3"));

        // The table is authoritative: an unlisted class gets no
        // prefix-based benefit of the doubt.
        assert!(!r.is_subtype_of("helioUnlisted", "helioObjectBase"));
    }

    #[test]
    fn test_subtype_without_table() {
        let r = Resolver::new(None);

        // Only the object-root relationship is presumed, only by prefix.
        assert!(r.is_subtype_of("helioActor", "helioObjectBase"));
        assert!(!r.is_subtype_of("QWidget", "helioObjectBase"));
        assert!(!r.is_subtype_of("helioFloatArray", "helioDataArray"));
        // Name equality always holds.
        assert!(r.is_subtype_of("helioDataArray", "helioDataArray"));
    }

    #[test]
    fn test_wrappable_with_table() {
        let h = parse(FIXTURE).unwrap();
        let r = Resolver::new(Some(&h));

        assert!(r.is_wrappable("helioObject"));
        assert!(!r.is_wrappable("helioCollection"));
        // The special property overrides an exclusion.
        assert!(r.is_wrappable("helioHidden"));
        assert!(!r.is_wrappable("helioUnlisted"));
    }

    #[test]
    fn test_wrappable_without_table() {
        let r = Resolver::new(None);
        assert!(r.is_wrappable("helioActor"));
        assert!(!r.is_wrappable("QWidget"));
    }

    #[test]
    fn test_special_status_tri_state() {
        let h = parse(FIXTURE).unwrap();
        let with_table = Resolver::new(Some(&h));

        assert_eq!(with_table.special_status("helioVector3"), SpecialStatus::Special);
        assert_eq!(with_table.special_status("helioObject"), SpecialStatus::NotSpecial);

        let without = Resolver::new(None);
        assert_eq!(without.special_status("helioVector3"), SpecialStatus::Presumed);
        assert_eq!(without.special_status("QWidget"), SpecialStatus::NotSpecial);

        // Presumed behaves like yes for callers that must assume, but
        // never compares equal to a confirmed yes.
        assert!(SpecialStatus::Presumed.assume_special());
        assert_ne!(SpecialStatus::Presumed, SpecialStatus::Special);
    }
}
