use std::io::{self, Write};

use byteorder::{BigEndian, WriteBytesExt};

use crate::{
    attributes::{Attribute, Attributes},
    class_file::MemberInfo,
    constant_pool::CpInfo,
    ClassFile,
};

type Endian = BigEndian;

impl ClassFile {
    /// Writes the class file in its on-disk layout.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_u32::<Endian>(0xCAFEBABE)?;
        w.write_u16::<Endian>(self.version.minor)?;
        w.write_u16::<Endian>(self.version.major)?;

        let constant_pool_count = self.constant_pool.count().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "too many constant pool entries")
        })?;
        w.write_u16::<Endian>(constant_pool_count)?;
        for cp_info in &self.constant_pool {
            write_cp_info(w, cp_info)?;
        }

        w.write_u16::<Endian>(self.access_flags.bits())?;
        w.write_u16::<Endian>(self.this_class)?;
        w.write_u16::<Endian>(self.super_class)?;

        w.write_u16::<Endian>(len_u16(self.interfaces.len())?)?;
        for interface in &self.interfaces {
            w.write_u16::<Endian>(*interface)?;
        }

        for members in [&self.fields, &self.methods] {
            w.write_u16::<Endian>(len_u16(members.len())?)?;
            for member in members {
                write_member(w, member)?;
            }
        }

        write_attributes(w, &self.attributes)
    }

    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }
}

fn write_cp_info<W: Write>(w: &mut W, cp_info: &CpInfo) -> io::Result<()> {
    // Placeholders have no representation of their own.
    let Some(tag) = cp_info.tag() else {
        return Ok(());
    };
    w.write_u8(tag as u8)?;

    match cp_info {
        CpInfo::Utf8(utf8) => {
            w.write_u16::<Endian>(len_u16(utf8.bytes.len())?)?;
            w.write_all(&utf8.bytes)
        }
        CpInfo::Integer(int) => w.write_i32::<Endian>(*int),
        CpInfo::Float(float) => w.write_u32::<Endian>(float.bytes),
        CpInfo::Long(wide) | CpInfo::Double(wide) => {
            w.write_u32::<Endian>(wide.high_bytes)?;
            w.write_u32::<Endian>(wide.low_bytes)
        }
        CpInfo::Class(class) => w.write_u16::<Endian>(class.name_index),
        CpInfo::String { string_index } => w.write_u16::<Endian>(*string_index),
        CpInfo::FieldRef(r) | CpInfo::MethodRef(r) | CpInfo::InterfaceMethodRef(r) => {
            w.write_u16::<Endian>(r.class_index)?;
            w.write_u16::<Endian>(r.name_and_type_index)
        }
        CpInfo::NameAndType(nat) => {
            w.write_u16::<Endian>(nat.name_index)?;
            w.write_u16::<Endian>(nat.descriptor_index)
        }
        CpInfo::MethodHandle(handle) => {
            w.write_u8(handle.reference_kind)?;
            w.write_u16::<Endian>(handle.reference_index)
        }
        CpInfo::MethodType(method_type) => w.write_u16::<Endian>(method_type.descriptor_index),
        CpInfo::Dynamic(dynamic) | CpInfo::InvokeDynamic(dynamic) => {
            w.write_u16::<Endian>(dynamic.bootstrap_method_attr_index)?;
            w.write_u16::<Endian>(dynamic.name_and_type_index)
        }
        CpInfo::Module(named) | CpInfo::Package(named) => w.write_u16::<Endian>(named.name_index),
        CpInfo::Unusable => Ok(()),
    }
}

fn write_member<W: Write>(w: &mut W, member: &MemberInfo) -> io::Result<()> {
    w.write_u16::<Endian>(member.access_flags.bits())?;
    w.write_u16::<Endian>(member.name_index)?;
    w.write_u16::<Endian>(member.descriptor_index)?;
    write_attributes(w, &member.attributes)
}

fn write_attributes<W: Write>(w: &mut W, attributes: &Attributes) -> io::Result<()> {
    w.write_u16::<Endian>(len_u16(attributes.len())?)?;
    attributes.iter().try_for_each(|a| write_attribute(w, a))
}

fn write_attribute<W: Write>(w: &mut W, attribute: &Attribute) -> io::Result<()> {
    let length = u32::try_from(attribute.info.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "attribute too long"))?;

    w.write_u16::<Endian>(attribute.attribute_name_index)?;
    w.write_u32::<Endian>(length)?;
    w.write_all(&attribute.info)
}

fn len_u16(len: usize) -> io::Result<u16> {
    u16::try_from(len).map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "too many items"))
}
