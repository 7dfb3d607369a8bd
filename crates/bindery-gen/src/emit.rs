//! Declaration emission.
//!
//! Renders a value descriptor into the C variable declaration the wrapper
//! glue needs, plus the paired size binding for array-shaped values. The
//! textual details are part of the output contract: two-space indent,
//! trailing semicolon, one newline per line; the downstream writer
//! concatenates these lines verbatim.

use bindery_decl::{conventions, BaseType, Indirection, Value};

/// Where a declaration will be used; return values and arguments follow
/// different qualification and indirection rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclContext {
    Argument,
    Return,
}

/// Spelled-out name for a value's base type.
///
/// Categories outside the fixed table (objects, strings, streams, unknown
/// tags) answer with the recorded class name verbatim, so an unrecognized
/// type still renders as something the C compiler can look up.
pub fn type_name(val: &Value) -> &str {
    match val.ty.base() {
        BaseType::Float => "float",
        BaseType::Double => "double",
        BaseType::Int => "int",
        BaseType::Short => "short",
        BaseType::Long => "long",
        BaseType::Void => "void",
        BaseType::Char => "char",
        BaseType::UnsignedInt => "unsigned int",
        BaseType::UnsignedShort => "unsigned short",
        BaseType::UnsignedLong => "unsigned long",
        BaseType::UnsignedChar => "unsigned char",
        BaseType::IdType => conventions::ID_TYPE_NAME,
        BaseType::LongLong => "long long",
        BaseType::Int64 => "__int64",
        BaseType::UnsignedLongLong => "unsigned long long",
        BaseType::UnsignedInt64 => "unsigned __int64",
        BaseType::SignedChar => "signed char",
        BaseType::Bool => "bool",
        BaseType::UnicodeString => conventions::UNICODE_STRING_NAME,
        BaseType::SSizeT => "ssize_t",
        BaseType::SizeT => "size_t",
        BaseType::String
        | BaseType::Object
        | BaseType::ForeignObject
        | BaseType::IStream
        | BaseType::OStream
        | BaseType::Function
        | BaseType::Unknown => &val.class_name,
    }
}

/// Shapes that are always passed through a pointer in argument context,
/// whatever indirection the header declared.
fn passes_as_pointer(val: &Value) -> bool {
    val.ty.is_char_ptr()
        || val.ty.is_void_ptr()
        || val.ty.is_object_ptr()
        || val.ty.is_object_ref()
        || val.ty.is_bare_object()
        || val.is_foreign_object()
}

/// Render one variable declaration line into `out`.
///
/// Missing, void and callback values render nothing. Positional values
/// (`index` present) get the zero-based index appended to `name`.
pub fn declare_variable(
    out: &mut String,
    val: Option<&Value>,
    name: &str,
    index: Option<usize>,
    context: DeclContext,
) {
    let Some(val) = val else { return };

    if val.is_void() || val.ty.base() == BaseType::Function {
        return;
    }

    out.push_str("  ");

    // Leading const. Returned pointers keep their constness; for arguments
    // only a string-literal default forces it, so that plain pointer
    // arguments stay assignable.
    match context {
        DeclContext::Return => {
            if val.ty.is_const()
                && (val.ty.indirection() != Indirection::None || val.ty.is_ref())
            {
                out.push_str("const ");
            }
        }
        DeclContext::Argument => {
            if val.ty.is_const()
                && val.ty.is_char_ptr()
                && val
                    .default
                    .as_deref()
                    .is_some_and(|d| d != "0" && d != "NULL")
            {
                out.push_str("const ");
            }
        }
    }

    out.push_str(type_name(val));
    out.push(' ');

    match context {
        DeclContext::Return => {
            // Pointer and reference returns are both stored as pointers.
            let ind = val.ty.indirection();
            if (ind == Indirection::Pointer && !val.ty.is_ref())
                || (ind == Indirection::None && val.ty.is_ref())
            {
                out.push('*');
            }
        }
        DeclContext::Argument => {
            if passes_as_pointer(val) {
                out.push('*');
            } else if val.count_hint.is_some() {
                // Arrays of unknown size are handled via pointers.
                out.push('*');
            }
        }
    }

    out.push_str(name);
    if let Some(i) = index {
        out.push_str(&i.to_string());
    }

    if context == DeclContext::Argument {
        if val.ty.indirection() != Indirection::None
            && !val.ty.is_char_ptr()
            && !val.ty.is_void_ptr()
            && !val.ty.is_object_ptr()
            && !val.is_foreign_object()
            && val.count_hint.is_none()
        {
            if val.dimensions.len() == 1 && val.count > 0 {
                out.push_str(&format!("[{}]", val.count));
            } else {
                for dim in &val.dimensions {
                    out.push_str(&format!("[{dim}]"));
                }
            }
        } else if let Some(default) = &val.default {
            out.push_str(&format!(" = {default}"));
        } else if passes_as_pointer(val) {
            out.push_str(" = NULL");
        } else if val.count_hint.is_some() {
            out.push_str(" = NULL");
        } else if val.ty.base() == BaseType::Bool {
            out.push_str(" = false");
        }
    }

    out.push_str(";\n");
}

/// Render the size binding paired with an array-shaped declaration.
///
/// Multi-dimensional values get a static dimension table; counted or
/// hinted values get a single integer binding. The binding is mutable
/// exactly when only a hint is known, since the real count is then filled
/// in at runtime.
pub fn declare_variable_size(out: &mut String, val: &Value, name: &str, index: Option<usize>) {
    debug_assert!(
        val.count == 0 || val.dimensions.len() <= 1,
        "explicit count on a multi-dimensional value: {val:?}"
    );

    let idx = index.map(|i| i.to_string()).unwrap_or_default();

    if val.dimensions.len() > 1 {
        out.push_str(&format!(
            "  static int {}{}[{}] = ",
            name,
            idx,
            val.dimensions.len()
        ));
        for (j, dim) in val.dimensions.iter().enumerate() {
            out.push_str(&format!("{} {}", if j == 0 { '{' } else { ',' }, dim));
        }
        out.push_str(" };\n");
    } else if val.count != 0 || val.count_hint.is_some() {
        out.push_str(&format!(
            "  {}int {}{} = {};\n",
            if val.count_hint.is_some() { "" } else { "const " },
            name,
            idx,
            if val.count_hint.is_some() { 0 } else { val.count }
        ));
    } else if val.dimensions.len() == 1 {
        out.push_str(&format!("  const int {}{} = {};\n", name, idx, val.dimensions[0]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bindery_decl::TypeDesc;

    fn render(val: &Value, name: &str, index: Option<usize>, context: DeclContext) -> String {
        let mut out = String::new();
        declare_variable(&mut out, Some(val), name, index, context);
        out
    }

    #[test]
    fn test_void_and_callback_render_nothing() {
        let mut out = String::new();
        declare_variable(&mut out, None, "temp", None, DeclContext::Return);
        assert_eq!(out, "");

        let void = Value::new(TypeDesc::of(BaseType::Void));
        assert_eq!(render(&void, "temp", None, DeclContext::Return), "");

        let callback = Value::new(TypeDesc::of(BaseType::Function));
        assert_eq!(render(&callback, "temp", Some(0), DeclContext::Argument), "");
    }

    #[test]
    fn test_scalar_argument_with_default() {
        let v = Value::new(TypeDesc::of(BaseType::Int)).with_default("5");
        assert_eq!(render(&v, "n", Some(2), DeclContext::Argument), "  int n2 = 5;\n");
    }

    #[test]
    fn test_char_pointer_return() {
        let v = Value::new(TypeDesc::of(BaseType::Char).pointer());
        assert_eq!(render(&v, "temp", None, DeclContext::Return), "  char *temp;\n");

        let v = Value::new(TypeDesc::of(BaseType::Char).pointer().constant());
        assert_eq!(
            render(&v, "temp", None, DeclContext::Return),
            "  const char *temp;\n"
        );
    }

    #[test]
    fn test_reference_return_is_stored_as_pointer() {
        let v = Value::new(TypeDesc::of(BaseType::Double).reference());
        assert_eq!(render(&v, "temp", None, DeclContext::Return), "  double *temp;\n");

        // Scalar const returns carry no qualifier.
        let v = Value::new(TypeDesc::of(BaseType::Double).constant());
        assert_eq!(render(&v, "temp", None, DeclContext::Return), "  double temp;\n");
    }

    #[test]
    fn test_string_literal_default_keeps_const() {
        let v = Value::new(TypeDesc::of(BaseType::Char).pointer().constant())
            .with_default("\"none\"");
        assert_eq!(
            render(&v, "label", Some(0), DeclContext::Argument),
            "  const char *label0 = \"none\";\n"
        );

        // A null default does not earn the qualifier.
        let v = Value::new(TypeDesc::of(BaseType::Char).pointer().constant()).with_default("NULL");
        assert_eq!(
            render(&v, "label", Some(0), DeclContext::Argument),
            "  char *label0 = NULL;\n"
        );
    }

    #[test]
    fn test_object_arguments_always_pass_as_pointers() {
        let ptr = Value::new(TypeDesc::of(BaseType::Object).pointer()).with_class("helioActor");
        assert_eq!(
            render(&ptr, "obj", Some(0), DeclContext::Argument),
            "  helioActor *obj0 = NULL;\n"
        );

        let by_ref =
            Value::new(TypeDesc::of(BaseType::Object).reference()).with_class("helioVector3");
        assert_eq!(
            render(&by_ref, "vec", Some(1), DeclContext::Argument),
            "  helioVector3 *vec1 = NULL;\n"
        );

        // By-value objects too, despite the declared lack of indirection.
        let by_value = Value::new(TypeDesc::of(BaseType::Object)).with_class("helioVector3");
        assert_eq!(
            render(&by_value, "vec", None, DeclContext::Argument),
            "  helioVector3 *vec = NULL;\n"
        );

        let foreign =
            Value::new(TypeDesc::of(BaseType::ForeignObject).pointer()).with_class("QWidget");
        assert_eq!(
            render(&foreign, "widget", Some(0), DeclContext::Argument),
            "  QWidget *widget0 = NULL;\n"
        );

        // Foreign objects by value get the same treatment.
        let foreign_by_value =
            Value::new(TypeDesc::of(BaseType::ForeignObject)).with_class("QColor");
        assert_eq!(
            render(&foreign_by_value, "color", Some(2), DeclContext::Argument),
            "  QColor *color2 = NULL;\n"
        );
    }

    #[test]
    fn test_counted_array_argument_gets_brackets() {
        let v = Value::new(TypeDesc::of(BaseType::Double).pointer()).with_count(3);
        assert_eq!(
            render(&v, "rgb", Some(0), DeclContext::Argument),
            "  double rgb0[3];\n"
        );
    }

    #[test]
    fn test_multi_dimensional_argument_gets_one_bracket_per_dimension() {
        let v = Value::new(TypeDesc::of(BaseType::Double).array()).with_dimensions(&["3", "4"]);
        assert_eq!(
            render(&v, "mat", Some(0), DeclContext::Argument),
            "  double mat0[3][4];\n"
        );
    }

    #[test]
    fn test_hinted_argument_is_a_null_pointer() {
        let mut v = Value::new(TypeDesc::of(BaseType::Double).pointer());
        v.count_hint = Some("GetNumberOfComponents()".to_string());
        assert_eq!(
            render(&v, "tuple", Some(1), DeclContext::Argument),
            "  double *tuple1 = NULL;\n"
        );
    }

    #[test]
    fn test_bool_argument_defaults_to_false() {
        let v = Value::new(TypeDesc::of(BaseType::Bool));
        assert_eq!(
            render(&v, "flag", Some(3), DeclContext::Argument),
            "  bool flag3 = false;\n"
        );
    }

    #[test]
    fn test_unknown_base_renders_class_name() {
        let v = Value::new(TypeDesc::of(BaseType::Unknown)).with_class("PixelFormat");
        assert_eq!(
            render(&v, "fmt", Some(0), DeclContext::Argument),
            "  PixelFormat fmt0;\n"
        );
    }

    #[test]
    fn test_size_binding_multi_dimensional() {
        let v = Value::new(TypeDesc::of(BaseType::Double).array()).with_dimensions(&["3", "4"]);
        let mut out = String::new();
        declare_variable_size(&mut out, &v, "size", Some(0));
        assert_eq!(out, "  static int size0[2] = { 3, 4 };\n");
    }

    #[test]
    fn test_size_binding_counted_and_hinted() {
        let v = Value::new(TypeDesc::of(BaseType::Double).pointer()).with_count(3);
        let mut out = String::new();
        declare_variable_size(&mut out, &v, "size", Some(0));
        assert_eq!(out, "  const int size0 = 3;\n");

        let mut v = Value::new(TypeDesc::of(BaseType::Double).pointer());
        v.count_hint = Some("GetNumberOfComponents()".to_string());
        let mut out = String::new();
        declare_variable_size(&mut out, &v, "size", None);
        // Mutable placeholder: the runtime count is filled in later.
        assert_eq!(out, "  int size = 0;\n");
    }

    #[test]
    fn test_size_binding_single_dimension_expression() {
        let v = Value::new(TypeDesc::of(BaseType::Double).pointer()).with_dimensions(&["N"]);
        let mut out = String::new();
        declare_variable_size(&mut out, &v, "size", Some(2));
        assert_eq!(out, "  const int size2 = N;\n");

        // No count, no hint, no dimensions: nothing to bind.
        let v = Value::new(TypeDesc::of(BaseType::Double).pointer());
        let mut out = String::new();
        declare_variable_size(&mut out, &v, "size", None);
        assert_eq!(out, "");
    }
}
