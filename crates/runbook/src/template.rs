// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `{var}` expansion for step fields

use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

// Constant pattern, valid by construction. The optional `$` captures shell
// references like `${f}` so they can be passed through untouched.
#[allow(clippy::expect_used)]
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\$?)\{([a-zA-Z_][a-zA-Z0-9_]*)\}").expect("constant regex pattern is valid")
});

/// Expand a template.
///
/// `{name}` is replaced from `vars`. Unknown names and `${...}` references
/// are kept verbatim.
pub fn interpolate(template: &str, vars: &HashMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures| {
            if !caps[1].is_empty() {
                return caps[0].to_string();
            }
            match vars.get(&caps[2]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Names of the `{name}` placeholders in a template, sorted
pub fn placeholders(template: &str) -> BTreeSet<String> {
    PLACEHOLDER
        .captures_iter(template)
        .filter(|caps| caps[1].is_empty())
        .map(|caps| caps[2].to_string())
        .collect()
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
