use thiserror::Error;

/// Reasons an arena or pool allocation can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocError {
    #[error("fixed buffer exhausted: requested {requested} bytes, {available} available")]
    OutOfMemory { requested: usize, available: usize },
    #[error("allocator refused a request of {0} bytes")]
    AllocatorRefused(usize),
    #[error("alignment {0} is not a power of two")]
    InvalidAlignment(usize),
    #[error("zero-sized allocation")]
    ZeroSize,
    #[error("pool exhausted after {0} elements")]
    PoolExhausted(usize),
}
