//! Naming conventions of the wrapped Helio toolkit.
//!
//! Everything name-based the generator relies on lives here: the reserved
//! class prefix, the canonical root classes, the accessor-macro prefixes,
//! and the foreign-framework (Qt) conventions.

/// Reserved prefix carried by every class of the wrapped toolkit.
pub const HOST_PREFIX: &str = "helio";

/// Root of the reference-counted object hierarchy.
pub const HOST_OBJECT_ROOT: &str = "helioObjectBase";

/// Root of the typed-array container hierarchy; its subclasses get
/// tuple-accessor count hints.
pub const DATA_ARRAY_ROOT: &str = "helioDataArray";

/// Spelled name of the platform-width index integer.
pub const ID_TYPE_NAME: &str = "helioIdType";

/// Spelled name of the wide string class.
pub const UNICODE_STRING_NAME: &str = "helioUnicodeString";

/// Macro prefix for generated vector setters (`helioSetVector3` etc).
pub const SET_VECTOR_MACRO_PREFIX: &str = "helioSetVector";

/// Macro prefix for generated vector getters.
pub const GET_VECTOR_MACRO_PREFIX: &str = "helioGetVector";

/// Sibling accessor whose return value supplies the tuple size of a
/// typed-array class at runtime.
pub const COMPONENT_COUNT_METHOD: &str = "GetNumberOfComponents()";

/// Hierarchy property marking a class as excluded from wrapping.
pub const PROP_WRAP_EXCLUDE: &str = "WRAP_EXCLUDE";

/// Hierarchy property marking a class as a special value type; overrides
/// an exclusion.
pub const PROP_WRAP_SPECIAL: &str = "WRAP_SPECIAL";

/// True if the class name carries the toolkit prefix.
pub fn is_host_name(name: &str) -> bool {
    name.starts_with(HOST_PREFIX)
}

/// True if the class name follows the foreign-framework convention:
/// a `Q` followed by an uppercase letter.
pub fn is_foreign_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next() == Some('Q') && chars.next().is_some_and(|c| c.is_ascii_uppercase())
}

/// True if the name is a foreign namespaced enum (`Qt::` scope).
pub fn is_foreign_enum_name(name: &str) -> bool {
    name.starts_with("Qt::")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreign_name_convention() {
        assert!(is_foreign_name("QWidget"));
        assert!(is_foreign_name("QString"));
        assert!(!is_foreign_name("Qwidget"));
        assert!(!is_foreign_name("Q"));
        assert!(!is_foreign_name("helioActor"));

        assert!(is_foreign_enum_name("Qt::Alignment"));
        assert!(!is_foreign_enum_name("QWidget"));
    }
}
