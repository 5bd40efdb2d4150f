//! Helpers for dotted declaration identifiers
//!
//! Identifiers look like `aws_instance.web`, `module.net`,
//! `data.aws_ami.latest` or `output.ip`. Declarations found inside a module
//! are namespaced as `module.net/aws_subnet.s`.

use crate::constants::identifiers::{
    LOCAL_PREFIX, MODULE_PREFIX, NAMESPACE_SEPARATOR, VARIABLE_PREFIX,
};

/// Whether the identifier addresses a module call (`module.<name>[.<attr>...]`)
pub fn is_module_reference(id: &str) -> bool {
    id.starts_with(MODULE_PREFIX) && id.len() > MODULE_PREFIX.len()
}

/// Trim a module reference down to its call identifier:
/// `module.net.vpc_id` becomes `module.net`
pub fn module_call_id(id: &str) -> Option<&str> {
    if !is_module_reference(id) {
        return None;
    }
    match id[MODULE_PREFIX.len()..].find('.') {
        Some(end) => Some(&id[..MODULE_PREFIX.len() + end]),
        None => Some(id),
    }
}

/// Label of the module block a module reference points at
pub fn module_name(id: &str) -> Option<&str> {
    module_call_id(id).map(|call| &call[MODULE_PREFIX.len()..])
}

/// Input variables and local values never become graph nodes
pub fn is_terminal(id: &str) -> bool {
    id.starts_with(VARIABLE_PREFIX) || id.starts_with(LOCAL_PREFIX)
}

/// Qualify an identifier with the namespace of the module it lives in
pub fn qualify(namespace: Option<&str>, id: &str) -> String {
    match namespace {
        Some(namespace) => format!("{namespace}{NAMESPACE_SEPARATOR}{id}"),
        None => id.to_string(),
    }
}
