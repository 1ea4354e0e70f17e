use std::default::Default;

/// Contains Config properties which will be used by an Archive
#[derive(Clone, Debug)]
pub struct ArchiveConfig {
    /// Largest count prefix accepted while decoding a collection. A larger
    /// count is treated as a failed field and the collection is read as empty.
    pub max_collection_len: u32,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            max_collection_len: 4096,
        }
    }
}
