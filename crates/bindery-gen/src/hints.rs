//! Enrichment passes over a class: typedef expansion and count-hint
//! propagation. Both are additive, single-sweep and idempotent; records
//! that match no pattern are left exactly as they were.

use bindery_decl::{conventions, Access, BaseType, Class, Function, TypeDesc, Value};
use bindery_hierarchy::Hierarchy;

use crate::resolve::Resolver;

/// Expand typedef aliases in every publicly visible argument and return
/// value of `class`. Non-public members are deliberately left untouched.
/// No-op without a table.
pub fn expand_typedefs(class: &mut Class, hierarchy: Option<&Hierarchy>) {
    let Some(h) = hierarchy else { return };

    let owner = class.name.clone();
    for func in &mut class.functions {
        if func.access != Access::Public {
            continue;
        }
        for param in &mut func.params {
            h.expand_typedefs(param, &owner);
        }
        if let Some(ret) = &mut func.ret {
            h.expand_typedefs(ret, &owner);
        }
    }
}

/// Link the tuple-accessor family of typed-array classes to their implicit
/// size source.
///
/// For subclasses of the typed-array container root, the tuple read/write
/// methods take or return a component tuple whose length is only known at
/// runtime, via the component-count accessor. This pass records that
/// relationship as a count hint on the tuple-carrying value; the hint is a
/// note for the emitter, never resolved to a number here.
pub fn find_count_hints(class: &mut Class, resolver: &Resolver) {
    if !resolver.is_subtype_of(&class.name, conventions::DATA_ARRAY_ROOT) {
        return;
    }

    for func in &mut class.functions {
        if func.access != Access::Public {
            continue;
        }
        annotate_tuple_accessor(func);
    }
}

/// The index argument of a tuple accessor: a bare, unqualified toolkit
/// index integer.
fn is_bare_index(value: &Value) -> bool {
    value.ty == TypeDesc::of(BaseType::IdType)
}

fn attach_hint(value: &mut Value) {
    if value.count == 0 && value.count_hint.is_none() {
        value.count_hint = Some(conventions::COMPONENT_COUNT_METHOD.to_string());
    }
}

fn annotate_tuple_accessor(func: &mut Function) {
    let reads_tuple = matches!(func.name.as_str(), "GetTuple" | "GetTupleValue");
    let takes_tuple = matches!(
        func.name.as_str(),
        "SetTuple" | "SetTupleValue" | "GetTuple" | "GetTupleValue" | "InsertTuple"
            | "InsertTupleValue"
    );
    let appends_tuple = matches!(func.name.as_str(), "InsertNextTuple" | "InsertNextTupleValue");

    if reads_tuple
        && func.params.len() == 1
        && is_bare_index(&func.params[0])
        && func.ret.as_ref().is_some_and(|r| r.count == 0)
    {
        if let Some(ret) = &mut func.ret {
            attach_hint(ret);
        }
    } else if takes_tuple
        && func.params.len() == 2
        && is_bare_index(&func.params[0])
        && func.params[1].count == 0
    {
        attach_hint(&mut func.params[1]);
    } else if appends_tuple && func.params.len() == 1 && func.params[0].count == 0 {
        attach_hint(&mut func.params[0]);
    }
}
