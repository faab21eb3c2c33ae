use std::convert::TryFrom;

use log::{debug, trace};

use crate::{
    attributes::{Attribute, Attributes},
    class_file::MemberInfo,
    constant_pool::{
        ClassInfo, ConstantTag, CpInfo, DynamicInfo, FloatInfo, MethodHandleInfo, MethodTypeInfo,
        NameAndTypeInfo, NamedInfo, RefInfo, Utf8Info, WideInfo,
    },
    cursor::ByteCursor,
    version::Version,
    AccessFlags, ClassFile, ClassFileError, ConstantPool, Result,
};

const MAGIC_IDENTIFIER: u32 = 0xCAFEBABE;

/// How Long and Double constants are indexed.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum WideConstantSlots {
    /// Long and Double take two slots; the second one holds [`CpInfo::Unusable`].
    /// This is what compilers emit.
    #[default]
    Double,
    /// Every entry takes one slot, so exactly `constant_pool_count - 1`
    /// entries are read.
    Single,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct DecodeOptions {
    pub wide_constants: WideConstantSlots,
}

pub struct Parser<'a> {
    r: ByteCursor<'a>,
    options: DecodeOptions,
}
impl<'a> Parser<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_options(buf, DecodeOptions::default())
    }

    pub fn with_options(buf: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            r: ByteCursor::new(buf),
            options,
        }
    }

    pub fn parse(mut self) -> Result<ClassFile> {
        self.parse_magic_identifier()?;
        let version = self.parse_version()?;
        debug!("class file version {} ({})", version, version.release());

        let constant_pool = self.parse_constant_pool()?;
        let access_flags = AccessFlags::from_bits_truncate(self.read_u16()?);
        let this_class = self.read_u16()?;
        let super_class = self.read_u16()?;

        let interfaces_count = self.read_u16()?;
        trace!("{} interfaces at offset {}", interfaces_count, self.r.position());
        let interfaces = (0..interfaces_count)
            .map(|_| self.read_u16())
            .collect::<Result<Vec<_>>>()?;

        let fields_count = self.read_u16()?;
        trace!("{} fields at offset {}", fields_count, self.r.position());
        let fields = self.parse_members(fields_count)?;

        let methods_count = self.read_u16()?;
        trace!("{} methods at offset {}", methods_count, self.r.position());
        let methods = self.parse_members(methods_count)?;

        let attributes_count = self.read_u16()?;
        trace!("{} attributes at offset {}", attributes_count, self.r.position());
        let attributes = self.parse_attributes(attributes_count)?;

        self.parse_end()?;
        debug!(
            "decoded {} constant pool slots, {} fields, {} methods, {} attributes",
            constant_pool.len(),
            fields.len(),
            methods.len(),
            attributes.len()
        );

        Ok(ClassFile {
            version,
            constant_pool,
            access_flags,
            this_class,
            super_class,
            interfaces,
            fields,
            methods,
            attributes,
        })
    }

    fn parse_magic_identifier(&mut self) -> Result<()> {
        match self.read_u32()? {
            MAGIC_IDENTIFIER => Ok(()),
            magic_identifier => Err(ClassFileError::NotAClassFile(magic_identifier)),
        }
    }

    fn parse_version(&mut self) -> Result<Version> {
        let minor = self.read_u16()?;
        let major = self.read_u16()?;
        Ok(Version { major, minor })
    }

    fn parse_end(&mut self) -> Result<()> {
        match self.r.remaining() {
            0 => Ok(()),
            remaining => Err(ClassFileError::TrailingOrTruncatedData { remaining }),
        }
    }

    fn parse_constant_pool(&mut self) -> Result<ConstantPool> {
        let constant_pool_count = self.read_u16()?;
        trace!("constant pool count {}", constant_pool_count);

        // Slot 0 is reserved, so a count of 0 or 1 both mean an empty pool.
        let mut count = (constant_pool_count as usize).saturating_sub(1);
        let mut res = Vec::with_capacity(count);
        while count > 0 {
            let cp_info = self.parse_cp_info()?;
            trace!("#{} = {:?}", res.len() + 1, cp_info);

            let slot_size = match (self.options.wide_constants, cp_info.tag()) {
                (WideConstantSlots::Double, Some(tag)) if tag.is_wide() => 2,
                _ => 1,
            };
            res.push(cp_info);
            // The placeholder only exists if it falls inside the declared count.
            if slot_size == 2 && count > 1 {
                res.push(CpInfo::Unusable);
            }

            count = count.saturating_sub(slot_size);
        }
        Ok(ConstantPool::new(res))
    }

    fn parse_cp_info(&mut self) -> Result<CpInfo> {
        let tag = self.read_u8()?;
        let tag = ConstantTag::try_from(tag).map_err(ClassFileError::UnknownConstantTag)?;

        let cp_info = match tag {
            ConstantTag::Utf8 => self.parse_utf8()?,
            ConstantTag::Integer => CpInfo::Integer(self.r.read_i32()?),
            ConstantTag::Float => CpInfo::Float(FloatInfo {
                bytes: self.read_u32()?,
            }),
            ConstantTag::Long => CpInfo::Long(self.parse_wide()?),
            ConstantTag::Double => CpInfo::Double(self.parse_wide()?),
            ConstantTag::Class => CpInfo::Class(ClassInfo {
                name_index: self.read_u16()?,
            }),
            ConstantTag::String => CpInfo::String {
                string_index: self.read_u16()?,
            },
            ConstantTag::FieldRef => CpInfo::FieldRef(self.parse_ref_info()?),
            ConstantTag::MethodRef => CpInfo::MethodRef(self.parse_ref_info()?),
            ConstantTag::InterfaceMethodRef => {
                CpInfo::InterfaceMethodRef(self.parse_ref_info()?)
            }
            ConstantTag::NameAndType => self.parse_name_and_type_info()?,
            ConstantTag::MethodHandle => self.parse_method_handle()?,
            ConstantTag::MethodType => CpInfo::MethodType(MethodTypeInfo {
                descriptor_index: self.read_u16()?,
            }),
            ConstantTag::Dynamic => CpInfo::Dynamic(self.parse_dynamic_info()?),
            ConstantTag::InvokeDynamic => CpInfo::InvokeDynamic(self.parse_dynamic_info()?),
            ConstantTag::Module => CpInfo::Module(NamedInfo {
                name_index: self.read_u16()?,
            }),
            ConstantTag::Package => CpInfo::Package(NamedInfo {
                name_index: self.read_u16()?,
            }),
        };

        Ok(cp_info)
    }

    fn parse_utf8(&mut self) -> Result<CpInfo> {
        let length = self.read_u16()?;
        let bytes = self.r.read_bytes(length as usize)?;

        Ok(CpInfo::Utf8(Utf8Info { bytes }))
    }

    fn parse_wide(&mut self) -> Result<WideInfo> {
        let high_bytes = self.read_u32()?;
        let low_bytes = self.read_u32()?;

        Ok(WideInfo {
            high_bytes,
            low_bytes,
        })
    }

    fn parse_name_and_type_info(&mut self) -> Result<CpInfo> {
        let name_index = self.read_u16()?;
        let descriptor_index = self.read_u16()?;

        Ok(CpInfo::NameAndType(NameAndTypeInfo {
            name_index,
            descriptor_index,
        }))
    }

    fn parse_method_handle(&mut self) -> Result<CpInfo> {
        let reference_kind = self.read_u8()?;
        let reference_index = self.read_u16()?;

        Ok(CpInfo::MethodHandle(MethodHandleInfo {
            reference_kind,
            reference_index,
        }))
    }

    fn parse_dynamic_info(&mut self) -> Result<DynamicInfo> {
        let bootstrap_method_attr_index = self.read_u16()?;
        let name_and_type_index = self.read_u16()?;

        Ok(DynamicInfo {
            bootstrap_method_attr_index,
            name_and_type_index,
        })
    }

    fn parse_ref_info(&mut self) -> Result<RefInfo> {
        let class_index = self.read_u16()?;
        let name_and_type_index = self.read_u16()?;

        Ok(RefInfo {
            class_index,
            name_and_type_index,
        })
    }

    fn parse_members(&mut self, count: u16) -> Result<Vec<MemberInfo>> {
        (0..count).map(|_| self.parse_member()).collect()
    }

    fn parse_member(&mut self) -> Result<MemberInfo> {
        let access_flags = AccessFlags::from_bits_truncate(self.read_u16()?);
        let name_index = self.read_u16()?;
        let descriptor_index = self.read_u16()?;
        let attributes_count = self.read_u16()?;
        let attributes = self.parse_attributes(attributes_count)?;

        Ok(MemberInfo {
            access_flags,
            name_index,
            descriptor_index,
            attributes,
        })
    }

    fn parse_attribute(&mut self) -> Result<Attribute> {
        let attribute_name_index = self.read_u16()?;
        let attribute_length = self.read_u32()?;
        let info = self.r.read_bytes(attribute_length as usize)?;

        Ok(Attribute {
            attribute_name_index,
            info,
        })
    }

    fn parse_attributes(&mut self, attributes_count: u16) -> Result<Attributes> {
        (0..attributes_count)
            .map(|_| self.parse_attribute())
            .collect::<Result<Vec<_>>>()
            .map(Attributes)
    }

    fn read_u32(&mut self) -> Result<u32> {
        self.r.read_u32()
    }

    fn read_u16(&mut self) -> Result<u16> {
        self.r.read_u16()
    }

    fn read_u8(&mut self) -> Result<u8> {
        self.r.read_u8()
    }
}




#[cfg(test)]
mod parse_attribute_tests {
    use super::*;

    #[test]
    fn it_should_be_able_to_parse_an_attribute() {
        let mut parser = Parser::new(&[0x00, 0x07, 0x00, 0x00, 0x00, 0x02, 0xAB, 0xCD, 0xEF]);
        let attribute = parser.parse_attribute().unwrap();

        assert_eq!(
            attribute,
            Attribute {
                attribute_name_index: 7,
                info: vec![0xAB, 0xCD]
            }
        );
        assert_eq!(parser.r.position(), attribute.encoded_len());
    }

    #[test]
    fn it_should_read_a_four_byte_length() {
        let mut parser = Parser::new(&[0x00, 0x01, 0x00, 0x01, 0x00, 0x00]);

        assert_eq!(
            parser.parse_attribute(),
            Err(ClassFileError::UnexpectedEndOfInput { offset: 6 })
        );
    }

    #[test]
    fn it_should_fail_if_there_are_not_enough_bytes_read() {
        assert_eq!(
            Parser::new(&[0x00, 0x07, 0x00, 0x00, 0x00, 0x03, 0xAB]).parse_attribute(),
            Err(ClassFileError::UnexpectedEndOfInput { offset: 6 })
        );
    }
}

#[cfg(test)]
mod parse_member_tests {
    use super::*;

    #[test]
    fn it_should_be_able_to_parse_a_member() {
        #[rustfmt::skip]
        let bytes = [
            0x00, 0x12,
            0x00, 0x04,
            0x00, 0x05,
            0x00, 0x01,
            0x00, 0x06, 0x00, 0x00, 0x00, 0x02, 0x00, 0x08,
        ];
        let mut parser = Parser::new(&bytes);

        assert_eq!(
            parser.parse_member().unwrap(),
            MemberInfo {
                access_flags: AccessFlags::PRIVATE | AccessFlags::FINAL,
                name_index: 4,
                descriptor_index: 5,
                attributes: Attributes(vec![Attribute {
                    attribute_name_index: 6,
                    info: vec![0x00, 0x08]
                }]),
            }
        );
        assert!(parser.r.is_at_end());
    }
}
