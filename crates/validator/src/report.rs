//! Report renderers
//!
//! Turn an [`ErrorsCollection`] into text through a [`Translator`]:
//!
//! - [`list`] - flat `path: message` lines, exact duplicates collapsed
//! - [`messages_map`] - path → messages, in tree order
//! - [`tree`] - nested JSON mirroring the error tree
//!
//! Paths join member keys with `.`; errors at the root have an empty path.
//! Every renderer refuses trees deeper than the executor could have
//! produced under `max_depth` and fails with
//! [`ValidatorError::MaxDepthExceeded`] instead of returning partial output.

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};
use verity_message::Translator;

use crate::error::{ValidatorError, ValidatorResult};
use crate::foundation::ErrorsCollection;

/// Key holding a node's own errors in [`tree`] when it also has members.
pub const OWN_ERRORS_KEY: &str = "";

/// Separator between member keys in report paths.
pub const PATH_SEPARATOR: char = '.';

// ============================================================================
// DEPTH GUARD
// ============================================================================

/// A node whose members sit at path length `level + 1` needs `level` to be
/// within `max_depth`.
fn guard(node: &ErrorsCollection, level: usize, max_depth: usize) -> ValidatorResult<()> {
    if node.has_members() && level > max_depth {
        return Err(ValidatorError::MaxDepthExceeded { max_depth });
    }
    Ok(())
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}{PATH_SEPARATOR}{key}")
    }
}

// ============================================================================
// LIST
// ============================================================================

/// One line of a [`ListReport`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListEntry {
    /// Dotted member path; empty at the root.
    pub path: String,
    /// Rendered message.
    pub message: String,
}

impl fmt::Display for ListEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Flat list of rendered errors, one per line when displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListReport {
    entries: Vec<ListEntry>,
}

impl ListReport {
    /// The entries in tree order.
    #[must_use]
    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    /// Displayed lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for ListReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

/// Renders the tree as `path: message` lines.
///
/// # Errors
///
/// [`ValidatorError::MaxDepthExceeded`] for trees deeper than `max_depth`.
pub fn list(
    errors: &ErrorsCollection,
    translator: Translator<'_>,
    max_depth: usize,
) -> ValidatorResult<ListReport> {
    let mut entries: IndexSet<ListEntry> = IndexSet::new();
    for (path, messages) in messages_map(errors, translator, max_depth)? {
        entries.extend(messages.into_iter().map(|message| ListEntry {
            path: path.clone(),
            message,
        }));
    }
    Ok(ListReport {
        entries: entries.into_iter().collect(),
    })
}

// ============================================================================
// MESSAGES MAP
// ============================================================================

/// Renders the tree into path → messages.
///
/// Only nodes with errors of their own get an entry.
///
/// # Errors
///
/// [`ValidatorError::MaxDepthExceeded`] for trees deeper than `max_depth`.
pub fn messages_map(
    errors: &ErrorsCollection,
    translator: Translator<'_>,
    max_depth: usize,
) -> ValidatorResult<IndexMap<String, Vec<String>>> {
    fn walk(
        node: &ErrorsCollection,
        path: &str,
        level: usize,
        translator: Translator<'_>,
        max_depth: usize,
        out: &mut IndexMap<String, Vec<String>>,
    ) -> ValidatorResult<()> {
        guard(node, level, max_depth)?;
        if !node.errors().is_empty() {
            out.entry(path.to_string())
                .or_default()
                .extend(node.errors().iter().map(|e| translator.render(e)));
        }
        for (key, member) in node.members() {
            walk(member, &join(path, key), level + 1, translator, max_depth, out)?;
        }
        Ok(())
    }

    let mut out = IndexMap::new();
    walk(errors, "", 0, translator, max_depth, &mut out)?;
    Ok(out)
}

// ============================================================================
// TREE
// ============================================================================

/// Renders the tree as nested JSON.
///
/// A node with only errors becomes an array of messages; a node with
/// members becomes an object, its own errors (if any) listed under
/// [`OWN_ERRORS_KEY`]. An empty tree renders as `{}`.
///
/// ```json
/// { "Password": ["Required"], "Tags": { "1": ["Required"] } }
/// ```
///
/// # Errors
///
/// [`ValidatorError::MaxDepthExceeded`] for trees deeper than `max_depth`.
pub fn tree(
    errors: &ErrorsCollection,
    translator: Translator<'_>,
    max_depth: usize,
) -> ValidatorResult<Value> {
    fn messages(node: &ErrorsCollection, translator: Translator<'_>) -> Value {
        Value::Array(
            node.errors()
                .iter()
                .map(|e| Value::String(translator.render(e)))
                .collect(),
        )
    }

    fn walk(
        node: &ErrorsCollection,
        level: usize,
        translator: Translator<'_>,
        max_depth: usize,
    ) -> ValidatorResult<Value> {
        guard(node, level, max_depth)?;
        if !node.has_members() {
            return Ok(messages(node, translator));
        }

        let mut object = Map::new();
        if !node.errors().is_empty() {
            object.insert(OWN_ERRORS_KEY.to_string(), messages(node, translator));
        }
        for (key, member) in node.members() {
            object.insert(key.to_string(), walk(member, level + 1, translator, max_depth)?);
        }
        Ok(Value::Object(object))
    }

    if errors.is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    walk(errors, 0, translator, max_depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use verity_message::ValidationError;

    fn sample() -> ErrorsCollection {
        let mut address = ErrorsCollection::new();
        address.add_member_error("City", ValidationError::new("Required"));

        let mut root = ErrorsCollection::new();
        root.add_error(ValidationError::new("Model broken"));
        root.add_member_error("Name", ValidationError::new("Too short"));
        root.add_member_error("Name", ValidationError::new("Too short"));
        root.add_member_errors("Address", address);
        root
    }

    fn chain(levels: usize) -> ErrorsCollection {
        let mut node = ErrorsCollection::from_error(ValidationError::new("Leaf"));
        for _ in 0..levels {
            let mut parent = ErrorsCollection::new();
            parent.add_member_errors("Next", node);
            node = parent;
        }
        node
    }

    #[test]
    fn test_list_collapses_exact_duplicates() {
        let report = list(&sample(), Translator::identity(), 10).expect("within depth");
        assert_eq!(
            report.lines(),
            vec!["Model broken", "Name: Too short", "Address.City: Required"]
        );
        assert_eq!(
            report.to_string(),
            "Model broken\nName: Too short\nAddress.City: Required"
        );
    }

    #[test]
    fn test_list_keeps_first_occurrence_order() {
        let mut root = ErrorsCollection::new();
        for template in ["A", "B", "A", "C", "B"] {
            root.add_member_error("Name", ValidationError::new(template));
        }
        let report = list(&root, Translator::identity(), 10).expect("within depth");
        assert_eq!(report.lines(), vec!["Name: A", "Name: B", "Name: C"]);
    }

    #[test]
    fn test_messages_map_keeps_duplicates() {
        let map = messages_map(&sample(), Translator::identity(), 10).expect("within depth");
        assert_eq!(map["Name"], vec!["Too short", "Too short"]);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["", "Name", "Address.City"]);
    }

    #[test]
    fn test_tree_shape() {
        let value = tree(&sample(), Translator::identity(), 10).expect("within depth");
        assert_eq!(
            value,
            json!({
                "": ["Model broken"],
                "Name": ["Too short", "Too short"],
                "Address": { "City": ["Required"] }
            })
        );
        assert_eq!(
            tree(&ErrorsCollection::new(), Translator::identity(), 10).expect("empty"),
            json!({})
        );
    }

    #[test]
    fn test_depth_guard() {
        // The deepest node with members sits at level 3 in `chain(4)`.
        assert!(tree(&chain(3), Translator::identity(), 2).is_ok());
        assert_eq!(
            tree(&chain(4), Translator::identity(), 2),
            Err(ValidatorError::MaxDepthExceeded { max_depth: 2 })
        );
        assert!(list(&chain(4), Translator::identity(), 2).is_err());
        assert!(messages_map(&chain(4), Translator::identity(), 2).is_err());
    }
}
