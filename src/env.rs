use tracing::trace;

use crate::types::Attr;

/// Derive an interactive default for `attr` from environment variables.
///
/// `env_var` is consulted first, then each of `env_vars` in order. The first
/// non-empty value wins; if none is found the default is `""`.
///
/// Takes a lookup function so tests can pass synthetic data instead of
/// reading the process environment.
pub fn default_from_env<F>(attr: &Attr, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let candidates = attr.env_var.iter().chain(attr.env_vars.iter());
    for name in candidates {
        if let Some(value) = lookup(name.as_str()).filter(|v| !v.is_empty()) {
            trace!(env_var = %name, "default taken from environment");
            return value;
        }
    }
    String::new()
}

/// Look a variable up in the process environment.
///
/// Unset and non-unicode variables both read as `None`.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
