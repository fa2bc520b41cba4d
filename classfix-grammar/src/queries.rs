//! Query sources.
//!
//! Queries ship as `.scm` templates. A template's `@NAME@` placeholder is
//! replaced with the quoted names from [`ClassNames`]; a template whose list is
//! empty is left out, since `#any-of?` needs at least one value.

use classfix_types::ClassNames;

const EMBEDDED_TEMPLATE: &str = include_str!("../queries/embedded_template.scm");
const HTML_CLASS_ATTRIBUTE: &str = include_str!("../queries/html/class_attribute.scm");
const RUBY_CLASS_PAIR: &str = include_str!("../queries/ruby/class_pair.scm");
const RUBY_CLASS_CALL: &str = include_str!("../queries/ruby/class_call.scm");
const RUBY_CLASS_ASSIGNMENT: &str = include_str!("../queries/ruby/class_assignment.scm");
const RUBY_STRING_CONTENT: &str = include_str!("../queries/ruby/string_content.scm");

/// Capture names shared by queries and locators.
pub mod capture {
    pub const LITERAL: &str = "literal";
    pub const DIRECTIVE: &str = "directive";
    pub const CLASS_VALUE: &str = "class_value";
    pub const STRING: &str = "string";
    pub const STRING_CONTENT: &str = "string_content";
}

/// Query sources rendered for one [`ClassNames`] configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySources {
    pub directive: String,
    /// `None` when no markup attribute is configured.
    pub markup: Option<String>,
    pub script: String,
}

impl QuerySources {
    pub fn render(names: &ClassNames) -> Self {
        let markup = render(HTML_CLASS_ATTRIBUTE, &[("ATTRIBUTES", &names.attributes)]);

        let symbol_keys: Vec<String> = names.keys.iter().map(|k| format!(":{k}")).collect();
        let instance_variables: Vec<String> = names
            .variables
            .iter()
            .flat_map(|v| [v.clone(), format!("@{v}")])
            .collect();

        let script = [
            render(
                RUBY_CLASS_PAIR,
                &[("KEYS", &names.keys), ("SYMBOL_KEYS", &symbol_keys)],
            ),
            render(RUBY_CLASS_CALL, &[("METHODS", &names.methods)]),
            render(RUBY_CLASS_ASSIGNMENT, &[("VARIABLES", &instance_variables)]),
            Some(RUBY_STRING_CONTENT.to_string()),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join("\n");

        Self {
            directive: EMBEDDED_TEMPLATE.to_string(),
            markup,
            script,
        }
    }
}

fn render(template: &str, lists: &[(&str, &[String])]) -> Option<String> {
    let mut out = template.to_string();
    for (placeholder, names) in lists {
        if names.is_empty() {
            return None;
        }
        let quoted = names
            .iter()
            .map(|n| quote(n))
            .collect::<Vec<_>>()
            .join(" ");
        out = out.replace(&format!("@{placeholder}@"), &quoted);
    }
    Some(out)
}

fn quote(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
