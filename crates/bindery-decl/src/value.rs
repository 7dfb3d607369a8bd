//! Value descriptors and their classification predicates.
//!
//! One [`Value`] describes one argument or return value. The predicates
//! here are the single source of truth for the generator's type taxonomy:
//! the base-type group and the indirection group are each mutually
//! exclusive, the qualifier checks are independent of both.

use serde::{Deserialize, Serialize};

use crate::conventions;
use crate::types::{BaseType, Indirection, TypeDesc};

/// One declared argument or return value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Value {
    /// Decoded type descriptor (packed `u32` on the wire).
    #[serde(rename = "type")]
    pub ty: TypeDesc,

    /// Class name for object, foreign, string and unknown categories;
    /// empty otherwise.
    #[serde(rename = "class", default)]
    pub class_name: String,

    /// Default-value literal, verbatim from the header.
    #[serde(default)]
    pub default: Option<String>,

    /// Explicit element count for fixed-size array arguments; 0 if none.
    #[serde(default)]
    pub count: u32,

    /// Name of the sibling method whose return value supplies the count at
    /// runtime. Filled in by hint propagation, never by the parser.
    #[serde(default)]
    pub count_hint: Option<String>,

    /// Size expressions for multi-dimensional arrays, outermost first.
    #[serde(default)]
    pub dimensions: Vec<String>,
}

impl Value {
    /// An unnamed value of the given type with no default, count or hint.
    pub fn new(ty: TypeDesc) -> Self {
        Value {
            ty,
            class_name: String::new(),
            default: None,
            count: 0,
            count_hint: None,
            dimensions: Vec::new(),
        }
    }

    /// Same value with a class name attached.
    pub fn with_class(mut self, name: &str) -> Self {
        self.class_name = name.to_string();
        self
    }

    /// Same value with a default literal attached.
    pub fn with_default(mut self, literal: &str) -> Self {
        self.default = Some(literal.to_string());
        self
    }

    /// Same value with an explicit element count (and matching dimension).
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self.dimensions = vec![count.to_string()];
        self
    }

    /// Same value with the given dimension expressions.
    pub fn with_dimensions(mut self, dims: &[&str]) -> Self {
        self.dimensions = dims.iter().map(|d| d.to_string()).collect();
        self
    }

    // --- base-type group: exactly one of these holds -------------------

    /// Bare `void`. A missing value also counts, see [`is_void`].
    pub fn is_void(&self) -> bool {
        self.ty.base() == BaseType::Void
            && self.ty.indirection() == Indirection::None
            && !self.ty.is_ref()
    }

    /// Object category, host or foreign.
    pub fn is_object(&self) -> bool {
        matches!(
            self.ty.base(),
            BaseType::Object | BaseType::ForeignObject
        )
    }

    /// Callback parameter.
    pub fn is_function(&self) -> bool {
        self.ty.base() == BaseType::Function
    }

    /// Input or output stream.
    pub fn is_stream(&self) -> bool {
        matches!(self.ty.base(), BaseType::IStream | BaseType::OStream)
    }

    /// Integer, real, char or bool.
    pub fn is_numeric(&self) -> bool {
        let t = self.ty.base().strip_unsigned();
        t.is_integer_like() || t.is_real() || matches!(t, BaseType::Char | BaseType::Bool)
    }

    /// Either of the toolkit string classes.
    pub fn is_string(&self) -> bool {
        matches!(
            self.ty.base(),
            BaseType::String | BaseType::UnicodeString
        )
    }

    // --- numeric subgroup ----------------------------------------------

    pub fn is_bool(&self) -> bool {
        self.ty.base() == BaseType::Bool
    }

    pub fn is_char(&self) -> bool {
        self.ty.base() == BaseType::Char
    }

    /// Integer widths, sign-agnostic; excludes plain char and bool.
    pub fn is_integer(&self) -> bool {
        self.ty.base().is_integer_like()
    }

    /// `float` or `double`.
    pub fn is_real(&self) -> bool {
        self.ty.base().is_real()
    }

    // --- indirection group: exactly one of these holds -----------------

    /// No indirection at all.
    pub fn is_scalar(&self) -> bool {
        self.ty.indirection() == Indirection::None
    }

    /// A plain pointer: single indirection, no count, no hint, at most one
    /// declared dimension. Callback values are never pointers.
    pub fn is_pointer(&self) -> bool {
        self.ty.indirection() == Indirection::Pointer
            && self.ty.base() != BaseType::Function
            && self.count == 0
            && self.count_hint.is_none()
            && self.dimensions.len() <= 1
    }

    /// A sized one-dimensional array: single indirection with an explicit
    /// count or a runtime count hint.
    pub fn is_array(&self) -> bool {
        self.ty.indirection() == Indirection::Pointer
            && self.dimensions.len() <= 1
            && (self.count != 0 || self.count_hint.is_some())
    }

    /// A multi-dimensional array with every dimension given as a non-empty
    /// size expression.
    pub fn is_multi_array(&self) -> bool {
        self.ty.indirection() == Indirection::Array
            && self.dimensions.len() > 1
            && self.dimensions.iter().all(|d| !d.is_empty())
    }

    // --- qualifiers: independent of the groups above -------------------

    pub fn is_const(&self) -> bool {
        self.ty.is_const()
    }

    pub fn is_ref(&self) -> bool {
        self.ty.is_ref()
    }

    pub fn is_const_ref(&self) -> bool {
        self.ty.is_ref() && self.ty.is_const()
    }

    pub fn is_nonconst_ref(&self) -> bool {
        self.ty.is_ref() && !self.ty.is_const()
    }

    // --- shape and convention checks -----------------------------------

    /// `void *`, classified as a plain pointer.
    pub fn is_void_pointer(&self) -> bool {
        self.ty.base() == BaseType::Void && self.is_pointer()
    }

    /// `char *`, classified as a plain pointer.
    pub fn is_char_pointer(&self) -> bool {
        self.ty.base() == BaseType::Char && self.is_pointer()
    }

    /// Pointer to a class of the wrapped toolkit.
    pub fn is_host_object(&self) -> bool {
        self.ty.is_object_ptr() && conventions::is_host_name(&self.class_name)
    }

    /// Toolkit class passed by value or by reference; candidates for the
    /// special value-type treatment.
    pub fn is_special_object(&self) -> bool {
        self.ty.base() == BaseType::Object
            && self.ty.indirection() == Indirection::None
            && conventions::is_host_name(&self.class_name)
    }

    /// Foreign-framework object, recognized by name convention.
    pub fn is_foreign_object(&self) -> bool {
        self.ty.base() == BaseType::ForeignObject
            && conventions::is_foreign_name(&self.class_name)
    }

    /// Foreign namespaced enum value.
    pub fn is_foreign_enum(&self) -> bool {
        self.ty.base() == BaseType::ForeignObject
            && self.ty.indirection() == Indirection::None
            && conventions::is_foreign_enum_name(&self.class_name)
    }
}

/// Classify a possibly-missing value. An absent return slot counts as void;
/// nothing here ever panics on missing data.
pub fn is_void(val: Option<&Value>) -> bool {
    val.map_or(true, Value::is_void)
}
