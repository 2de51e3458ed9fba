use thiserror::Error;

/// Construction failures. The table is never created in a degraded state.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum CapacityError {
    #[error("bucket capacity must be at least 1")]
    Zero,
    #[error("failed to allocate {capacity} bucket slots")]
    Alloc { capacity: usize },
}

/// Insert failures. The rejected value is handed back untouched.
#[derive(Error, Debug, Eq, PartialEq)]
pub enum InsertError<V> {
    #[error("key must not be empty")]
    EmptyKey(V),
}

impl<V> InsertError<V> {
    /// Recover the value that was not inserted.
    pub fn into_value(self) -> V {
        match self {
            InsertError::EmptyKey(v) => v,
        }
    }
}
