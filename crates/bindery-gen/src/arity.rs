//! Argument-arity analysis for irregular signatures.

use bindery_decl::{BaseType, Function};

/// Number of arguments the wrapper actually exposes.
///
/// Two signature shapes collapse: a leading callback argument swallows the
/// rest of the list (trailing arguments are bound data for the callback),
/// and a single bare `void` means an explicitly empty parameter list.
pub fn wrapped_arg_count(f: &Function) -> usize {
    let total = f.params.len();

    if total > 0 && f.params[0].ty.base() == BaseType::Function {
        1
    } else if total == 1 && f.params[0].is_void() {
        0
    } else {
        total
    }
}

/// Length of the shortest argument prefix the wrapper must require.
///
/// An argument counts as required if it has no default, or if it is array
/// shaped: partial array initialization is not representable as a scalar
/// default, so an array forces everything up to and including itself.
pub fn required_arg_count(f: &Function) -> usize {
    let total = wrapped_arg_count(f);
    let mut required = 0;

    for (i, param) in f.params.iter().take(total).enumerate() {
        if param.default.is_none() || param.is_array() || param.is_multi_array() {
            required = i + 1;
        }
    }

    required
}
