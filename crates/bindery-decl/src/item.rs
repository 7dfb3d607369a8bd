//! Function and class declaration records.

use serde::{Deserialize, Serialize};

use crate::conventions;
use crate::value::Value;

/// Member access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    #[default]
    Public,
    Protected,
    Private,
}

/// The accessor-macro family a function was generated by, when the parser
/// recorded one. Matching is by declared origin, not by method name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorMacro {
    SetVector,
    GetVector,
}

/// One member function as recorded by the header parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,

    /// Verbatim signature text; only consulted for the destructor sigil.
    #[serde(default)]
    pub signature: String,

    #[serde(default)]
    pub access: Access,

    /// Name of the macro that generated this declaration, if any.
    #[serde(rename = "macro", default)]
    pub macro_origin: Option<String>,

    #[serde(default)]
    pub params: Vec<Value>,

    /// Return value; absent for constructors and true void returns.
    #[serde(default)]
    pub ret: Option<Value>,
}

impl Function {
    /// A function is a destructor iff the destructor sigil `~` appears in
    /// its signature before the parameter list opens.
    pub fn is_destructor(&self) -> bool {
        self.signature
            .chars()
            .take_while(|&c| c != '(')
            .any(|c| c == '~')
    }

    /// A function is a constructor iff it carries its class's name and is
    /// not a destructor.
    pub fn is_constructor(&self, class_name: &str) -> bool {
        !self.is_destructor() && self.name == class_name
    }

    /// Classify the originating macro into the closed accessor-macro set.
    pub fn macro_kind(&self) -> Option<AccessorMacro> {
        let origin = self.macro_origin.as_deref()?;
        if origin.starts_with(conventions::SET_VECTOR_MACRO_PREFIX) {
            Some(AccessorMacro::SetVector)
        } else if origin.starts_with(conventions::GET_VECTOR_MACRO_PREFIX) {
            Some(AccessorMacro::GetVector)
        } else {
            None
        }
    }

    pub fn is_vector_set(&self) -> bool {
        self.macro_kind() == Some(AccessorMacro::SetVector)
    }

    pub fn is_vector_get(&self) -> bool {
        self.macro_kind() == Some(AccessorMacro::GetVector)
    }
}

/// One class and its member functions, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub name: String,
    #[serde(default)]
    pub functions: Vec<Function>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str, signature: &str) -> Function {
        Function {
            name: name.to_string(),
            signature: signature.to_string(),
            access: Access::Public,
            macro_origin: None,
            params: Vec::new(),
            ret: None,
        }
    }

    #[test]
    fn test_destructor_sigil_before_paren() {
        assert!(named("~helioActor", "~helioActor()").is_destructor());
        assert!(named("~helioActor", "virtual ~helioActor()").is_destructor());
        // A '~' inside the parameter list is not a destructor marker.
        assert!(!named("Invert", "Invert(int mask = ~0)").is_destructor());
    }

    #[test]
    fn test_constructor_matches_class_name() {
        let ctor = named("helioActor", "helioActor()");
        assert!(ctor.is_constructor("helioActor"));
        assert!(!ctor.is_constructor("helioCamera"));

        let dtor = named("~helioActor", "~helioActor()");
        assert!(!dtor.is_constructor("helioActor"));
    }

    #[test]
    fn test_macro_kind_closed_set() {
        let mut f = named("SetColor", "void SetColor(double, double, double)");
        f.macro_origin = Some("helioSetVector3Macro".to_string());
        assert!(f.is_vector_set());
        assert!(!f.is_vector_get());

        f.macro_origin = Some("helioGetVector3Macro".to_string());
        assert!(f.is_vector_get());

        f.macro_origin = Some("helioBooleanMacro".to_string());
        assert_eq!(f.macro_kind(), None);

        f.macro_origin = None;
        assert_eq!(f.macro_kind(), None);
    }
}
