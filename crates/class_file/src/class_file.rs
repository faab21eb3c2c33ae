use std::borrow::Cow;

use crate::{
    attributes::{Attribute, Attributes},
    constant_pool::ClassInfo,
    matches_cp_info,
    parser::{DecodeOptions, Parser},
    version::Version,
    AccessFlags, ConstantPool, Result,
};

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ClassFile {
    pub version: Version,
    pub constant_pool: ConstantPool,
    pub access_flags: AccessFlags,
    pub this_class: u16,
    pub super_class: u16,
    pub interfaces: Vec<u16>,
    pub fields: Vec<FieldInfo>,
    pub methods: Vec<MethodInfo>,
    pub attributes: Attributes,
}
impl ClassFile {
    pub fn parse(bytes: &[u8]) -> Result<ClassFile> {
        Parser::new(bytes).parse()
    }

    pub fn parse_with(bytes: &[u8], options: DecodeOptions) -> Result<ClassFile> {
        Parser::with_options(bytes, options).parse()
    }

    pub fn super_class(&self) -> Result<Option<Cow<'_, str>>> {
        // If the value of the super_class item is zero, then this class file must represent the
        // class Object, the only class or interface without a direct superclass.
        if self.super_class == 0 {
            return Ok(None);
        }

        // Otherwise the constant_pool entry at that index must be a CONSTANT_Class_info
        // structure representing the direct superclass of the class defined by this class file.
        Ok(Some(self.class_name_at(self.super_class)?))
    }

    pub fn class_name(&self) -> Result<Cow<'_, str>> {
        // The value of the this_class item must be a valid index into the constant_pool table.
        // The constant_pool entry at that index must be a CONSTANT_Class_info structure
        // representing the class or interface defined by this class file.
        self.class_name_at(self.this_class)
    }

    pub fn interface_names(&self) -> Result<Vec<Cow<'_, str>>> {
        self.interfaces
            .iter()
            .map(|&index| self.class_name_at(index))
            .collect()
    }

    pub fn field_name(&self, field: &FieldInfo) -> Result<Cow<'_, str>> {
        self.constant_pool.utf8(field.name_index)
    }

    pub fn field_descriptor(&self, field: &FieldInfo) -> Result<Cow<'_, str>> {
        self.constant_pool.utf8(field.descriptor_index)
    }

    pub fn method_name(&self, method: &MethodInfo) -> Result<Cow<'_, str>> {
        self.constant_pool.utf8(method.name_index)
    }

    pub fn method_descriptor(&self, method: &MethodInfo) -> Result<Cow<'_, str>> {
        self.constant_pool.utf8(method.descriptor_index)
    }

    pub fn attribute_name(&self, attribute: &Attribute) -> Result<Cow<'_, str>> {
        self.constant_pool.utf8(attribute.attribute_name_index)
    }

    /// Checks that every member name, member descriptor and attribute name
    /// refers to a Utf8 entry of the constant pool.
    pub fn check_name_references(&self) -> Result<()> {
        for member in self.fields.iter().chain(&self.methods) {
            self.constant_pool.utf8(member.name_index)?;
            self.constant_pool.utf8(member.descriptor_index)?;
            self.check_attribute_names(&member.attributes)?;
        }

        self.check_attribute_names(&self.attributes)
    }

    fn check_attribute_names(&self, attributes: &Attributes) -> Result<()> {
        for attribute in attributes {
            self.attribute_name(attribute)?;
        }
        Ok(())
    }

    fn class_name_at(&self, index: u16) -> Result<Cow<'_, str>> {
        let ClassInfo { name_index } = matches_cp_info!(self.constant_pool, index, Class)?;

        self.constant_pool.utf8(*name_index)
    }
}

/// A `field_info` or `method_info` record. Both share the same layout.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct MemberInfo {
    pub access_flags: AccessFlags,
    pub name_index: u16,
    pub descriptor_index: u16,
    pub attributes: Attributes,
}

pub type FieldInfo = MemberInfo;
pub type MethodInfo = MemberInfo;
