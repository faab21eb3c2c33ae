use std::fmt;

use crate::ConstantPool;

/// An attribute record. The payload is kept as opaque bytes.
#[derive(PartialEq, Eq, Clone)]
pub struct Attribute {
    pub attribute_name_index: u16,
    pub info: Vec<u8>,
}
impl Attribute {
    /// Number of bytes the record occupies in the class file.
    pub fn encoded_len(&self) -> usize {
        2 + 4 + self.info.len()
    }
}
impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("attribute_name_index", &self.attribute_name_index)
            .field("info", &format!("({} bytes)", self.info.len()))
            .finish()
    }
}

#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct Attributes(pub Vec<Attribute>);
impl Attributes {
    /// Attributes whose name index does not resolve to a Utf8 entry are
    /// skipped; use `ClassFile::check_name_references` to reject them instead.
    pub fn find_by_name(&self, name: &str, constant_pool: &ConstantPool) -> Option<&Attribute> {
        self.0.iter().find(|a| {
            constant_pool
                .utf8(a.attribute_name_index)
                .map_or(false, |s| s == name)
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.0.iter()
    }
}
impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
