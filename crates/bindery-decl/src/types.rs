//! Type descriptors for declared values.
//!
//! The upstream header parser hands every argument and return type to us as
//! a packed `u32` word. The bit layout only matters at that boundary:
//! [`TypeDesc::from_raw`] and [`TypeDesc::to_raw`] are the sole places that
//! mask bits, everything else works with the decoded enums.

use serde::{Deserialize, Serialize};

/// Base-type tag of a declared value.
///
/// Exactly one of these applies to any value; the unsigned integer widths
/// are separate variants rather than a flag so that matches stay exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Void,
    Bool,
    Char,
    SignedChar,
    UnsignedChar,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    Long,
    UnsignedLong,
    LongLong,
    UnsignedLongLong,
    Int64,
    UnsignedInt64,
    /// The toolkit's platform-width index integer (`helioIdType`).
    IdType,
    SSizeT,
    SizeT,
    Float,
    Double,
    /// The toolkit's std::string-compatible string class.
    String,
    /// The toolkit's wide string class (`helioUnicodeString`).
    UnicodeString,
    /// A class from the wrapped toolkit or an unrecognized library.
    Object,
    /// A class from a foreign framework wrapped by convention (Qt).
    ForeignObject,
    IStream,
    OStream,
    /// A callback parameter; categorized by itself, never as a pointer.
    Function,
    /// Anything the parser could not place (enums, unseen classes).
    Unknown,
}

impl BaseType {
    /// Map an unsigned integer variant to its signed partner.
    ///
    /// Used by the numeric classifiers, which are sign-agnostic.
    pub fn strip_unsigned(self) -> BaseType {
        match self {
            BaseType::UnsignedChar => BaseType::Char,
            BaseType::UnsignedShort => BaseType::Short,
            BaseType::UnsignedInt => BaseType::Int,
            BaseType::UnsignedLong => BaseType::Long,
            BaseType::UnsignedLongLong => BaseType::LongLong,
            BaseType::UnsignedInt64 => BaseType::Int64,
            BaseType::SizeT => BaseType::SSizeT,
            other => other,
        }
    }

    /// True for the integer widths (not `char`, not `bool`).
    pub fn is_integer_like(self) -> bool {
        matches!(
            self.strip_unsigned(),
            BaseType::Short
                | BaseType::Int
                | BaseType::Long
                | BaseType::IdType
                | BaseType::LongLong
                | BaseType::Int64
                | BaseType::SignedChar
                | BaseType::SSizeT
        )
    }

    /// True for the floating-point types.
    pub fn is_real(self) -> bool {
        matches!(self, BaseType::Float | BaseType::Double)
    }
}

/// Indirection form recorded by the parser.
///
/// `Array` is the storage form for declarations with more than one
/// dimension; single pointers and one-dimensional arrays both arrive as
/// `Pointer` and are told apart by count and hint (see `Value`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Indirection {
    #[default]
    None,
    Pointer,
    Array,
}

/// Raw bit layout of the packed type word.
///
/// Base tag in bits 0-7 with the unsigned flag at bit 4, indirection in
/// bits 8-9, reference at bit 10, const at bit 11. The ranges are disjoint
/// so each field decodes independently.
mod raw {
    pub const BASE_MASK: u32 = 0x00ff;
    pub const UNSIGNED: u32 = 0x0010;

    pub const CHAR: u32 = 0x01;
    pub const SHORT: u32 = 0x02;
    pub const INT: u32 = 0x03;
    pub const LONG: u32 = 0x04;
    pub const LONG_LONG: u32 = 0x05;
    pub const INT64: u32 = 0x06;
    pub const ID_TYPE: u32 = 0x07;
    pub const SSIZE_T: u32 = 0x08;
    pub const SIGNED_CHAR: u32 = 0x09;

    pub const VOID: u32 = 0x20;
    pub const BOOL: u32 = 0x21;
    pub const FLOAT: u32 = 0x22;
    pub const DOUBLE: u32 = 0x23;
    pub const STRING: u32 = 0x24;
    pub const UNICODE_STRING: u32 = 0x25;
    pub const OBJECT: u32 = 0x26;
    pub const FOREIGN_OBJECT: u32 = 0x27;
    pub const ISTREAM: u32 = 0x28;
    pub const OSTREAM: u32 = 0x29;
    pub const FUNCTION: u32 = 0x2a;
    pub const UNKNOWN: u32 = 0x2b;

    pub const INDIRECT_MASK: u32 = 0x0300;
    pub const POINTER: u32 = 0x0100;
    pub const ARRAY: u32 = 0x0200;

    pub const REF: u32 = 0x0400;
    pub const CONST: u32 = 0x0800;
}

/// Decoded type descriptor: base tag, indirection, const and reference
/// qualifiers. Immutable once built; the enrichment passes replace whole
/// descriptors rather than flipping fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct TypeDesc {
    base: BaseType,
    indirection: Indirection,
    is_const: bool,
    is_ref: bool,
}

impl TypeDesc {
    /// A scalar, unqualified descriptor for the given base type.
    pub fn of(base: BaseType) -> Self {
        TypeDesc {
            base,
            indirection: Indirection::None,
            is_const: false,
            is_ref: false,
        }
    }

    /// Copy of this descriptor with pointer indirection.
    pub fn pointer(self) -> Self {
        TypeDesc {
            indirection: Indirection::Pointer,
            ..self
        }
    }

    /// Copy of this descriptor with the multi-dimensional array form.
    pub fn array(self) -> Self {
        TypeDesc {
            indirection: Indirection::Array,
            ..self
        }
    }

    /// Copy of this descriptor with the reference qualifier set.
    pub fn reference(self) -> Self {
        TypeDesc {
            is_ref: true,
            ..self
        }
    }

    /// Copy of this descriptor with the const qualifier set.
    pub fn constant(self) -> Self {
        TypeDesc {
            is_const: true,
            ..self
        }
    }

    pub fn base(self) -> BaseType {
        self.base
    }

    pub fn indirection(self) -> Indirection {
        self.indirection
    }

    pub fn is_const(self) -> bool {
        self.is_const
    }

    pub fn is_ref(self) -> bool {
        self.is_ref
    }

    /// Decode a packed type word. Total: unrecognized base tags become
    /// [`BaseType::Unknown`], unrecognized indirection bits saturate to the
    /// array form.
    pub fn from_raw(word: u32) -> Self {
        let unsigned = word & raw::UNSIGNED != 0;
        let base = match word & raw::BASE_MASK & !raw::UNSIGNED {
            raw::CHAR if unsigned => BaseType::UnsignedChar,
            raw::CHAR => BaseType::Char,
            raw::SHORT if unsigned => BaseType::UnsignedShort,
            raw::SHORT => BaseType::Short,
            raw::INT if unsigned => BaseType::UnsignedInt,
            raw::INT => BaseType::Int,
            raw::LONG if unsigned => BaseType::UnsignedLong,
            raw::LONG => BaseType::Long,
            raw::LONG_LONG if unsigned => BaseType::UnsignedLongLong,
            raw::LONG_LONG => BaseType::LongLong,
            raw::INT64 if unsigned => BaseType::UnsignedInt64,
            raw::INT64 => BaseType::Int64,
            raw::SSIZE_T if unsigned => BaseType::SizeT,
            raw::SSIZE_T => BaseType::SSizeT,
            raw::ID_TYPE => BaseType::IdType,
            raw::SIGNED_CHAR => BaseType::SignedChar,
            raw::VOID => BaseType::Void,
            raw::BOOL => BaseType::Bool,
            raw::FLOAT => BaseType::Float,
            raw::DOUBLE => BaseType::Double,
            raw::STRING => BaseType::String,
            raw::UNICODE_STRING => BaseType::UnicodeString,
            raw::OBJECT => BaseType::Object,
            raw::FOREIGN_OBJECT => BaseType::ForeignObject,
            raw::ISTREAM => BaseType::IStream,
            raw::OSTREAM => BaseType::OStream,
            raw::FUNCTION => BaseType::Function,
            _ => BaseType::Unknown,
        };

        let indirection = match word & raw::INDIRECT_MASK {
            0 => Indirection::None,
            raw::POINTER => Indirection::Pointer,
            _ => Indirection::Array,
        };

        TypeDesc {
            base,
            indirection,
            is_const: word & raw::CONST != 0,
            is_ref: word & raw::REF != 0,
        }
    }

    /// Re-encode into the packed form. `from_raw(to_raw(t)) == t` for every
    /// descriptor this crate can represent.
    pub fn to_raw(self) -> u32 {
        let base = match self.base {
            BaseType::Char => raw::CHAR,
            BaseType::UnsignedChar => raw::CHAR | raw::UNSIGNED,
            BaseType::Short => raw::SHORT,
            BaseType::UnsignedShort => raw::SHORT | raw::UNSIGNED,
            BaseType::Int => raw::INT,
            BaseType::UnsignedInt => raw::INT | raw::UNSIGNED,
            BaseType::Long => raw::LONG,
            BaseType::UnsignedLong => raw::LONG | raw::UNSIGNED,
            BaseType::LongLong => raw::LONG_LONG,
            BaseType::UnsignedLongLong => raw::LONG_LONG | raw::UNSIGNED,
            BaseType::Int64 => raw::INT64,
            BaseType::UnsignedInt64 => raw::INT64 | raw::UNSIGNED,
            BaseType::SSizeT => raw::SSIZE_T,
            BaseType::SizeT => raw::SSIZE_T | raw::UNSIGNED,
            BaseType::IdType => raw::ID_TYPE,
            BaseType::SignedChar => raw::SIGNED_CHAR,
            BaseType::Void => raw::VOID,
            BaseType::Bool => raw::BOOL,
            BaseType::Float => raw::FLOAT,
            BaseType::Double => raw::DOUBLE,
            BaseType::String => raw::STRING,
            BaseType::UnicodeString => raw::UNICODE_STRING,
            BaseType::Object => raw::OBJECT,
            BaseType::ForeignObject => raw::FOREIGN_OBJECT,
            BaseType::IStream => raw::ISTREAM,
            BaseType::OStream => raw::OSTREAM,
            BaseType::Function => raw::FUNCTION,
            BaseType::Unknown => raw::UNKNOWN,
        };

        let indirection = match self.indirection {
            Indirection::None => 0,
            Indirection::Pointer => raw::POINTER,
            Indirection::Array => raw::ARRAY,
        };

        base | indirection
            | if self.is_ref { raw::REF } else { 0 }
            | if self.is_const { raw::CONST } else { 0 }
    }

    /// Pointer-to-char shape (`char *`), ignoring constness.
    pub fn is_char_ptr(self) -> bool {
        self.base == BaseType::Char && self.indirection == Indirection::Pointer && !self.is_ref
    }

    /// Pointer-to-void shape (`void *`), ignoring constness.
    pub fn is_void_ptr(self) -> bool {
        self.base == BaseType::Void && self.indirection == Indirection::Pointer && !self.is_ref
    }

    /// Pointer-to-object shape (`T *` for a class type).
    pub fn is_object_ptr(self) -> bool {
        self.base == BaseType::Object && self.indirection == Indirection::Pointer && !self.is_ref
    }

    /// Reference-to-object shape (`T &`).
    pub fn is_object_ref(self) -> bool {
        self.base == BaseType::Object && self.indirection == Indirection::None && self.is_ref
    }

    /// Object passed by value.
    pub fn is_bare_object(self) -> bool {
        self.base == BaseType::Object && self.indirection == Indirection::None && !self.is_ref
    }
}

impl From<u32> for TypeDesc {
    fn from(word: u32) -> Self {
        TypeDesc::from_raw(word)
    }
}

impl From<TypeDesc> for u32 {
    fn from(ty: TypeDesc) -> u32 {
        ty.to_raw()
    }
}
