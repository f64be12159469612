//! Template inheritance for move selector trees.
//!
//! A selector with `inherit_from = "name"` is merged with the template of
//! that name from `move_selector_templates`. Templates may themselves
//! inherit from other templates; children are resolved recursively.

use std::collections::BTreeMap;

use crate::move_selector::{child_path, MoveSelectorConfig};
use crate::ConfigError;

/// Resolves every `inherit_from` reference in the tree.
///
/// The returned tree contains no template references.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownTemplate`] for a missing template,
/// [`ConfigError::CyclicTemplate`] when a template (directly or through
/// its children) refers back to itself, and [`ConfigError::KindMismatch`]
/// when a selector inherits from a template of another kind.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use planforge_config::{resolve_templates, MoveSelectorConfig, SelectionOrder};
///
/// let mut templates = BTreeMap::new();
/// templates.insert(
///     "random_change".to_string(),
///     MoveSelectorConfig::change("employee").with_selection_order(SelectionOrder::Random),
/// );
///
/// let config = MoveSelectorConfig::union(vec![
///     MoveSelectorConfig::change("employee").with_inherit_from("random_change"),
/// ]);
///
/// let resolved = resolve_templates(&config, &templates).unwrap();
/// let leaf = &resolved.children()[0];
/// assert_eq!(leaf.common().selection_order, Some(SelectionOrder::Random));
/// assert_eq!(leaf.common().inherit_from, None);
/// ```
pub fn resolve_templates(
    config: &MoveSelectorConfig,
    templates: &BTreeMap<String, MoveSelectorConfig>,
) -> Result<MoveSelectorConfig, ConfigError> {
    let mut stack = Vec::new();
    resolve_at(config, templates, config.kind(), &mut stack)
}

fn resolve_at(
    config: &MoveSelectorConfig,
    templates: &BTreeMap<String, MoveSelectorConfig>,
    path: &str,
    stack: &mut Vec<String>,
) -> Result<MoveSelectorConfig, ConfigError> {
    let mut resolved = config.copy_config();
    let inherit_from = resolved.common_mut().inherit_from.take();

    // Own children first, so the merge compares resolved entries on both sides.
    for (i, child) in resolved.children_mut().iter_mut().enumerate() {
        *child = resolve_at(child, templates, &child_path(path, i), stack)?;
    }

    if let Some(name) = inherit_from {
        if stack.contains(&name) {
            stack.push(name);
            return Err(ConfigError::CyclicTemplate {
                path: path.to_string(),
                chain: stack.join(" -> "),
            });
        }
        let template = templates
            .get(&name)
            .ok_or_else(|| ConfigError::UnknownTemplate {
                path: path.to_string(),
                name: name.clone(),
            })?;

        stack.push(name);
        let parent = resolve_at(template, templates, path, stack)?;
        stack.pop();

        resolved
            .inherit(&parent)
            .map_err(|err| err.with_path(path))?;
    }

    Ok(resolved)
}
