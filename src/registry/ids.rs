use crate::core::product::ProductId;
use uuid::Uuid;

/// Source of fresh product identifiers.
///
/// The registry owns its generator, so id allocation is serialized by the
/// registry's own `&mut self` borrow; there is no process-wide counter.
/// Every call hands out a new id, even if the caller then discards it.
pub trait IdGenerator {
    fn next_id(&mut self) -> ProductId;
}

/// Monotonic ids of the form `custom-1000`, `custom-1001`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>, start: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next: start,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("custom", 1000)
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> ProductId {
        let id = ProductId::new(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> ProductId {
        ProductId::new(Uuid::new_v4().to_string())
    }
}
