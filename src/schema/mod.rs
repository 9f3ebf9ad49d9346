//! Static language tables.
//!
//! CSS properties and Sass functions ship as embedded YAML and are parsed
//! once on first use. A table that fails to parse is logged and treated as
//! empty so completion keeps working with the remaining sources.

mod at_rules;
mod comments;
mod pseudo;
mod units;

pub use at_rules::at_rule_completions;
pub use comments::comment_completions;
pub use pseudo::pseudo_completions;
pub use units::unit_completions;

use serde::Deserialize;
use std::sync::LazyLock;

use crate::candidate::{Candidate, CompletionKind};

const CSS_YAML: &str = include_str!("css.yaml");
const FUNCTIONS_YAML: &str = include_str!("functions.yaml");

/// Keywords every property accepts.
const GLOBAL_VALUES: &[&str] = &["inherit", "initial", "unset", "revert"];

/// A CSS property and the keyword values it accepts.
#[derive(Debug, Clone, Deserialize)]
pub struct CssProperty {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CssSchema {
    properties: Vec<CssProperty>,
}

/// A Sass built-in function with its call snippet.
#[derive(Debug, Clone, Deserialize)]
pub struct SassFunction {
    pub name: String,
    pub snippet: String,
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
struct FunctionSchema {
    functions: Vec<SassFunction>,
}

static CSS_SCHEMA: LazyLock<CssSchema> = LazyLock::new(|| {
    let mut schema: CssSchema = load_table("css", CSS_YAML);
    for property in &mut schema.properties {
        property
            .values
            .extend(GLOBAL_VALUES.iter().map(|v| v.to_string()));
    }
    schema
});

static FUNCTION_SCHEMA: LazyLock<FunctionSchema> =
    LazyLock::new(|| load_table("functions", FUNCTIONS_YAML));

fn load_table<T: for<'de> Deserialize<'de> + Default>(name: &str, yaml: &str) -> T {
    match serde_yaml::from_str(yaml) {
        Ok(table) => table,
        Err(e) => {
            tracing::error!("Failed to load {} schema table: {}", name, e);
            T::default()
        }
    }
}

/// All known CSS properties.
pub fn properties() -> &'static [CssProperty] {
    &CSS_SCHEMA.properties
}

/// Look up a CSS property by exact name.
pub fn property(name: &str) -> Option<&'static CssProperty> {
    CSS_SCHEMA.properties.iter().find(|p| p.name == name)
}

/// Property-name candidates starting with `prefix` (all when empty).
pub fn property_completions(prefix: &str) -> Vec<Candidate> {
    properties()
        .iter()
        .filter(|p| p.name.starts_with(prefix))
        .map(|p| {
            Candidate::plain(p.name.clone(), CompletionKind::Property)
                .with_insert(format!("{}: ", p.name))
                .with_detail(p.description.clone())
        })
        .collect()
}

/// Value candidates for a property, filtered by the partially typed value.
pub fn value_completions(property: &CssProperty, prefix: &str) -> Vec<Candidate> {
    property
        .values
        .iter()
        .filter(|v| v.starts_with(prefix))
        .map(|v| {
            Candidate::plain(v.clone(), CompletionKind::Value).with_detail(property.name.clone())
        })
        .collect()
}

/// Sass built-in function snippets.
pub fn function_completions() -> Vec<Candidate> {
    FUNCTION_SCHEMA
        .functions
        .iter()
        .map(|f| {
            Candidate::snippet(f.name.clone(), f.snippet.clone(), CompletionKind::Function)
                .with_detail(f.description.clone())
        })
        .collect()
}
