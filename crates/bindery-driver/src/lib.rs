//! Driver that turns declaration records into the declaration stream.
//!
//! The driver owns the optional hierarchy table, runs the two enrichment
//! passes over every class, and renders the per-method declaration blocks
//! the downstream wrapper writer consumes.

use std::path::Path;

use bindery_decl::{Access, Class};
use bindery_gen::{
    declare_variable, declare_variable_size, expand_typedefs, find_count_hints,
    wrapped_arg_count, DeclContext, Resolver,
};
use bindery_hierarchy::Hierarchy;
use miette::Result;

/// Base name for declared wrapper variables; positional arguments get
/// their index appended.
const VAR_NAME: &str = "temp";

/// Base name for the paired size bindings.
const SIZE_NAME: &str = "size";

/// Generation driver.
pub struct Driver {
    hierarchy: Option<Hierarchy>,
}

impl Driver {
    /// A driver with no hierarchy table; every hierarchy-sensitive
    /// decision falls back to the name-prefix heuristics.
    pub fn new() -> Self {
        Driver { hierarchy: None }
    }

    /// A driver backed by a loaded hierarchy table.
    pub fn with_hierarchy(hierarchy: Hierarchy) -> Self {
        Driver {
            hierarchy: Some(hierarchy),
        }
    }

    /// Read declaration records from a JSON file.
    pub fn parse_records(&self, path: impl AsRef<Path>) -> Result<Vec<Class>> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| miette::miette!("Failed to read {}: {}", path.display(), e))?;
        self.parse_records_str(&content)
    }

    /// Parse declaration records from JSON text.
    pub fn parse_records_str(&self, json: &str) -> Result<Vec<Class>> {
        serde_json::from_str(json)
            .map_err(|e| miette::miette!("Failed to parse declaration records: {}", e))
    }

    /// Run the enrichment passes in place: typedef expansion first, then
    /// count-hint propagation. Both are idempotent, so re-running on an
    /// already-enriched tree is harmless.
    pub fn enrich(&self, classes: &mut [Class]) {
        let resolver = Resolver::new(self.hierarchy.as_ref());

        for class in classes.iter_mut() {
            let _span = tracing::debug_span!("enrich", class = %class.name).entered();
            expand_typedefs(class, self.hierarchy.as_ref());
            find_count_hints(class, &resolver);
        }
    }

    /// Enrich the records and render the declaration stream.
    pub fn render(&self, classes: &mut [Class]) -> String {
        self.enrich(classes);

        let resolver = Resolver::new(self.hierarchy.as_ref());
        let mut out = String::new();

        for class in classes.iter() {
            if !resolver.is_wrappable(&class.name) {
                tracing::debug!(
                    class = %class.name,
                    status = ?resolver.special_status(&class.name),
                    "class is not wrappable, skipping"
                );
                continue;
            }
            write_class(class, &mut out);
        }

        out
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the declaration block for every public non-destructor method.
fn write_class(class: &Class, out: &mut String) {
    for func in &class.functions {
        if func.access != Access::Public || func.is_destructor() {
            continue;
        }

        out.push_str(&format!("/* {}::{} */\n", class.name, func.name));

        let wrapped = wrapped_arg_count(func);
        for (i, param) in func.params.iter().take(wrapped).enumerate() {
            declare_variable(out, Some(param), VAR_NAME, Some(i), DeclContext::Argument);
            declare_variable_size(out, param, SIZE_NAME, Some(i));
        }

        declare_variable(out, func.ret.as_ref(), VAR_NAME, None, DeclContext::Return);
        if let Some(ret) = &func.ret {
            declare_variable_size(out, ret, SIZE_NAME, None);
        }

        out.push('\n');
    }
}
