//! The generation engine: hierarchy-aware resolution, argument-arity
//! analysis, count-hint propagation and declaration emission.
//!
//! Everything here is a pure, synchronous transformation over the
//! declaration records from `bindery-decl`; the optional hierarchy table
//! from `bindery-hierarchy` is the only external collaborator.

mod arity;
mod emit;
mod hints;
mod resolve;

pub use arity::{required_arg_count, wrapped_arg_count};
pub use emit::{declare_variable, declare_variable_size, type_name, DeclContext};
pub use hints::{expand_typedefs, find_count_hints};
pub use resolve::{Resolver, SpecialStatus};
