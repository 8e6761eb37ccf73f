use uuid::Uuid;

/// Uniform access to the server-assigned identity of a persisted entity.
///
/// An entity without an id has never been accepted by the backend; save and
/// merge logic use this distinction to choose between create and update and
/// between replace and append.
pub trait Identified {
    /// The server-assigned identifier, if the entity has been persisted.
    fn id(&self) -> Option<Uuid>;
}
