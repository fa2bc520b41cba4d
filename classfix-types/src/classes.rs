use serde::{Deserialize, Serialize};

/// Names that mark a class list in markup and in script code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassNames {
    /// Markup attribute names, e.g. `class`.
    pub attributes: Vec<String>,

    /// Hash keys whose string value is a class list, e.g. `class: "..."`.
    pub keys: Vec<String>,

    /// Methods whose string arguments are class lists.
    pub methods: Vec<String>,

    /// Variables whose assigned string is a class list.
    pub variables: Vec<String>,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            attributes: vec!["class".to_string()],
            keys: vec!["class".to_string()],
            methods: vec!["class_names".to_string(), "token_list".to_string()],
            variables: Vec::new(),
        }
    }
}

impl ClassNames {
    /// Appends names from `other` that are not already present.
    pub fn extend(&mut self, other: &ClassNames) {
        extend_unique(&mut self.attributes, &other.attributes);
        extend_unique(&mut self.keys, &other.keys);
        extend_unique(&mut self.methods, &other.methods);
        extend_unique(&mut self.variables, &other.variables);
    }
}

fn extend_unique(into: &mut Vec<String>, from: &[String]) {
    for name in from {
        if !into.contains(name) {
            into.push(name.clone());
        }
    }
}
