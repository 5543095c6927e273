//! Read model trait for query-side views.

/// A read-only view built from data this client does not own.
///
/// Views are rebuilt wholesale from their source and never written back.
pub trait ReadModel: Send + Sync {
    /// Returns the name of this read model.
    fn name(&self) -> &'static str;

    /// Returns the number of entries in this read model.
    fn count(&self) -> usize;
}
