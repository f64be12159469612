//! Merge helpers applied field by field during config inheritance.

/// Takes the parent's value only when the child's is unset.
///
/// ```
/// use planforge_config::inherit::inherit_overwritable;
///
/// let mut child = None;
/// inherit_overwritable(&mut child, &Some(3));
/// assert_eq!(child, Some(3));
///
/// let mut child = Some(1);
/// inherit_overwritable(&mut child, &Some(3));
/// assert_eq!(child, Some(1));
/// ```
pub fn inherit_overwritable<T: Clone>(child: &mut Option<T>, parent: &Option<T>) {
    if child.is_none() {
        child.clone_from(parent);
    }
}

/// Keeps the child's entries, then appends the parent's entries not
/// already present.
///
/// An empty child list therefore becomes a copy of the parent's.
///
/// ```
/// use planforge_config::inherit::inherit_mergeable_list;
///
/// let mut child = vec!["a", "b"];
/// inherit_mergeable_list(&mut child, &["b", "c"]);
/// assert_eq!(child, vec!["a", "b", "c"]);
/// ```
pub fn inherit_mergeable_list<T: Clone + PartialEq>(child: &mut Vec<T>, parent: &[T]) {
    for item in parent {
        if !child.contains(item) {
            child.push(item.clone());
        }
    }
}
