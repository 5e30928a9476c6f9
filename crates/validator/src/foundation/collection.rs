//! The hierarchical error tree.

use indexmap::IndexMap;
use verity_message::ValidationError;

// ============================================================================
// ERRORS COLLECTION
// ============================================================================

/// A node of the error tree.
///
/// Holds the errors attached directly at this node and the nested nodes of
/// its members, keyed by member name (or item index for collections). Member
/// keys keep first-insertion order. Errors are never deduplicated and empty
/// member nodes are never stored.
///
/// # Examples
///
/// ```rust,ignore
/// use verity_validator::foundation::ErrorsCollection;
/// use verity_message::ValidationError;
///
/// let mut address = ErrorsCollection::new();
/// address.add_member_error("Street", ValidationError::new("Global.Required"));
///
/// let mut root = ErrorsCollection::new();
/// root.add_member_errors("Address", address);
///
/// assert_eq!(root.error_count(), 1);
/// assert_eq!(root.depth(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorsCollection {
    errors: Vec<ValidationError>,
    members: IndexMap<String, ErrorsCollection>,
}

impl ErrorsCollection {
    /// Creates an empty node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a node holding a single error.
    #[must_use]
    pub fn from_error(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
            members: IndexMap::new(),
        }
    }

    /// Attaches an error at this node.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Attaches an error under a member key.
    pub fn add_member_error(&mut self, key: impl Into<String>, error: ValidationError) {
        self.members.entry(key.into()).or_default().add_error(error);
    }

    /// Attaches a nested collection under a member key.
    ///
    /// Empty collections are ignored. When the key already exists the
    /// collection is merged into the existing node.
    pub fn add_member_errors(&mut self, key: impl Into<String>, collection: ErrorsCollection) {
        if collection.is_empty() {
            return;
        }
        match self.members.entry(key.into()) {
            indexmap::map::Entry::Occupied(mut entry) => entry.get_mut().absorb(collection),
            indexmap::map::Entry::Vacant(entry) => {
                entry.insert(collection);
            }
        }
    }

    /// Merges collections into a new tree.
    ///
    /// Root errors are concatenated in order; members sharing a key are
    /// merged recursively. The inputs are left untouched.
    #[must_use]
    pub fn merge<'c>(collections: impl IntoIterator<Item = &'c ErrorsCollection>) -> Self {
        let mut merged = Self::new();
        for collection in collections {
            merged.absorb(collection.clone());
        }
        merged
    }

    /// Moves everything from `other` into this node.
    pub(crate) fn absorb(&mut self, other: ErrorsCollection) {
        self.errors.extend(other.errors);
        for (key, member) in other.members {
            self.add_member_errors(key, member);
        }
    }

    /// Applies `f` to each error attached directly at this node.
    pub(crate) fn map_errors(&mut self, f: impl Fn(ValidationError) -> ValidationError) {
        self.errors = std::mem::take(&mut self.errors).into_iter().map(f).collect();
    }

    /// Errors attached directly at this node.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Member nodes in insertion order.
    pub fn members(&self) -> impl ExactSizeIterator<Item = (&str, &ErrorsCollection)> {
        self.members.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The node of a member.
    #[must_use]
    pub fn member(&self, key: &str) -> Option<&ErrorsCollection> {
        self.members.get(key)
    }

    /// Returns true if the node carries no errors, directly or nested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.members.is_empty()
    }

    /// Returns true if the node has member nodes.
    #[must_use]
    pub fn has_members(&self) -> bool {
        !self.members.is_empty()
    }

    /// Total number of errors in this subtree.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.len()
            + self
                .members
                .values()
                .map(ErrorsCollection::error_count)
                .sum::<usize>()
    }

    /// Number of member levels below this node (0 for a leaf).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.members
            .values()
            .map(|m| m.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

// ============================================================================
// TESTS
// ============================================================================
