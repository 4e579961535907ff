use crate::RepositoryId;

/// Normalizes a name for comparison and indexing.
///
/// The original spelling is kept on the record for display; only lookups go
/// through the folded form. Stores persist this value alongside the name so
/// that cache and store agree on which names collide.
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

/// Attributes of a record that has not been stored yet.
pub trait EntityAttributes: Clone + Send + Sync {
    /// Display name the record will be registered under.
    fn name(&self) -> &str;

    /// Folded form of [`name`](Self::name).
    fn name_key(&self) -> String {
        fold_name(self.name())
    }
}

/// A record that a registry can manage: it has a store-assigned id and a
/// unique (case-insensitive) name.
///
/// Equality of implementors is expected to follow `repository_id`.
pub trait NamedEntity: Clone + Send + Sync + 'static {
    /// Everything a store needs to insert a new row of this kind.
    type Attributes: EntityAttributes;

    /// Entity kind, used in logs and error messages.
    const KIND: &'static str;

    fn repository_id(&self) -> RepositoryId;

    fn name(&self) -> &str;

    /// Builds the record once the store has assigned `id`.
    fn from_attributes(id: RepositoryId, attributes: Self::Attributes) -> Self;

    fn name_key(&self) -> String {
        fold_name(self.name())
    }
}
