//! Byte accounting for `INFO_DATASET_MEMORY`.
//!
//! The total is per-entry heap bytes (key + value payload, see
//! [`Entry::heap_bytes`](crate::entry::Entry)) plus each live table's
//! bucket-vector capacity times a pointer-sized slot estimate. This keeps
//! the number stable and representative of retained memory without
//! depending on an allocator-specific introspection API.

/// The size, in bytes, of one bucket slot's table overhead (a `Vec<Entry>`
/// header plus one pointer-sized slot reservation), used to approximate
/// table scaffolding cost independent of current chain occupancy.
pub const BUCKET_SLOT_OVERHEAD: usize = std::mem::size_of::<usize>() * 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_overhead_is_pointer_sized() {
        assert!(BUCKET_SLOT_OVERHEAD >= 8);
    }
}
