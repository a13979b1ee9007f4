//! Leaf data objects.

/// A leaf value in the data tree.
///
/// The name is unique within the parent holder; the value is an
/// opaque payload as far as the model is concerned. Objects are owned
/// exclusively by their parent: removing one from its holder (or
/// clearing the holder) destroys it, so deletion is expressed through
/// [`crate::DataHolder::remove`] rather than a back-reference from
/// the object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataObject {
    name: String,
    value: String,
}

impl DataObject {
    /// Creates a leaf object.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The object's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The object's payload.
    pub fn value(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let object = DataObject::new("notch", "uuid-1234");
        assert_eq!(object.name(), "notch");
        assert_eq!(object.value(), "uuid-1234");
    }
}
