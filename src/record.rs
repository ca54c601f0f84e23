use serde::{Deserialize, Serialize};

/// One catalog entry. `index` is the record's 0-based position in the source
/// and doubles as its identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub index: usize,
    pub description: String,
    pub name: String,
    pub price: String,
    pub image_reference: String,
}

impl Record {
    pub fn new(
        index: usize,
        description: impl Into<String>,
        name: impl Into<String>,
        price: impl Into<String>,
        image_reference: impl Into<String>,
    ) -> Self {
        Self {
            index,
            description: description.into(),
            name: name.into(),
            price: price.into(),
            image_reference: image_reference.into(),
        }
    }

    /// The 1-based id external callers use for this record.
    pub fn id(&self) -> i64 {
        crate::recommend::index_to_id(self.index)
    }

    pub fn has_description(&self) -> bool {
        !self.description.trim().is_empty()
    }
}
