//! Environment placeholder expansion for env values

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::context::Context;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\$|\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)").unwrap()
});

/// Replace `$NAME` and `${NAME}` with `lookup(NAME)`, unset meaning empty.
///
/// `$$` yields a literal `$`; a `$` not followed by a name is kept as is.
pub fn expand_placeholders(value: &str, lookup: &dyn Fn(&str) -> Option<String>) -> String {
    PLACEHOLDER
        .replace_all(value, |caps: &Captures<'_>| {
            match caps.get(1).or_else(|| caps.get(2)) {
                Some(name) => lookup(name.as_str()).unwrap_or_default(),
                None => "$".to_string(),
            }
        })
        .into_owned()
}

/// Expand env values throughout a tree, including every layer selection.
pub fn expand_env(mut context: Context, lookup: &dyn Fn(&str) -> Option<String>) -> Context {
    expand_in_place(&mut context, lookup);
    context
}

fn expand_in_place(context: &mut Context, lookup: &dyn Fn(&str) -> Option<String>) {
    for value in context.env.values_mut() {
        *value = expand_placeholders(value, lookup);
    }
    for layer in context.layers.iter_mut() {
        for child in layer.contexts.values_mut() {
            expand_in_place(child, lookup);
        }
    }
}
