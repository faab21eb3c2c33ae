use std::{borrow::Cow, convert::TryFrom};

use crate::{ClassFileError, Result};

/// The constant pool of a class file.
///
/// Indices are 1-based, as in the class file itself. Index 0 is reserved and
/// never resolves to an entry.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct ConstantPool {
    cp_infos: Vec<CpInfo>,
}
impl ConstantPool {
    pub fn new(cp_infos: Vec<CpInfo>) -> Self {
        Self { cp_infos }
    }

    pub fn get(&self, index: u16) -> Option<&CpInfo> {
        if index == 0 {
            return None;
        }
        self.cp_infos.get(index as usize - 1)
    }

    /// Number of slots, including the placeholders after wide constants.
    pub fn len(&self) -> usize {
        self.cp_infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cp_infos.is_empty()
    }

    /// The value written as `constant_pool_count`, or `None` if the pool has
    /// more slots than the count can express.
    pub fn count(&self) -> Option<u16> {
        u16::try_from(self.cp_infos.len() + 1).ok()
    }

    pub fn utf8(&self, index: u16) -> Result<Cow<'_, str>> {
        match self.get(index) {
            Some(CpInfo::Utf8(utf8)) => Ok(utf8.to_str_lossy()),
            _ => Err(ClassFileError::UnresolvedUtf8Reference { index }),
        }
    }
}
impl<'a> IntoIterator for &'a ConstantPool {
    type Item = &'a CpInfo;
    type IntoIter = std::slice::Iter<'a, CpInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.cp_infos.iter()
    }
}

#[macro_export]
macro_rules! matches_cp_info {
    ($cp:expr, $index:expr, $i:ident) => {
        match $cp.get($index) {
            Some($crate::constant_pool::CpInfo::$i(n)) => Ok(n),
            Some(c) => Err($crate::ClassFileError::UnexpectedConstantPoolEntry(
                stringify!($i),
                c.clone(),
            )),
            None => Err($crate::ClassFileError::InvalidConstantPoolIndex($index)),
        }
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ConstantTag {
    Utf8 = 1,
    Integer = 3,
    Float = 4,
    Long = 5,
    Double = 6,
    Class = 7,
    String = 8,
    FieldRef = 9,
    MethodRef = 10,
    InterfaceMethodRef = 11,
    NameAndType = 12,
    MethodHandle = 15,
    MethodType = 16,
    Dynamic = 17,
    InvokeDynamic = 18,
    Module = 19,
    Package = 20,
}
impl ConstantTag {
    /// Long and Double entries take up two slots in the pool.
    pub fn is_wide(self) -> bool {
        matches!(self, ConstantTag::Long | ConstantTag::Double)
    }
}

impl TryFrom<u8> for ConstantTag {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(ConstantTag::Utf8),
            3 => Ok(ConstantTag::Integer),
            4 => Ok(ConstantTag::Float),
            5 => Ok(ConstantTag::Long),
            6 => Ok(ConstantTag::Double),
            7 => Ok(ConstantTag::Class),
            8 => Ok(ConstantTag::String),
            9 => Ok(ConstantTag::FieldRef),
            10 => Ok(ConstantTag::MethodRef),
            11 => Ok(ConstantTag::InterfaceMethodRef),
            12 => Ok(ConstantTag::NameAndType),
            15 => Ok(ConstantTag::MethodHandle),
            16 => Ok(ConstantTag::MethodType),
            17 => Ok(ConstantTag::Dynamic),
            18 => Ok(ConstantTag::InvokeDynamic),
            19 => Ok(ConstantTag::Module),
            20 => Ok(ConstantTag::Package),
            _ => Err(value),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum CpInfo {
    Utf8(Utf8Info),
    Integer(i32),
    Float(FloatInfo),
    Long(WideInfo),
    Double(WideInfo),
    Class(ClassInfo),
    String { string_index: u16 },
    FieldRef(RefInfo),
    MethodRef(RefInfo),
    InterfaceMethodRef(RefInfo),
    NameAndType(NameAndTypeInfo),
    MethodHandle(MethodHandleInfo),
    MethodType(MethodTypeInfo),
    Dynamic(DynamicInfo),
    InvokeDynamic(DynamicInfo),
    Module(NamedInfo),
    Package(NamedInfo),
    /// Second slot of a Long or Double entry.
    Unusable,
}
impl CpInfo {
    pub fn tag(&self) -> Option<ConstantTag> {
        Some(match self {
            CpInfo::Utf8(_) => ConstantTag::Utf8,
            CpInfo::Integer(_) => ConstantTag::Integer,
            CpInfo::Float(_) => ConstantTag::Float,
            CpInfo::Long(_) => ConstantTag::Long,
            CpInfo::Double(_) => ConstantTag::Double,
            CpInfo::Class(_) => ConstantTag::Class,
            CpInfo::String { .. } => ConstantTag::String,
            CpInfo::FieldRef(_) => ConstantTag::FieldRef,
            CpInfo::MethodRef(_) => ConstantTag::MethodRef,
            CpInfo::InterfaceMethodRef(_) => ConstantTag::InterfaceMethodRef,
            CpInfo::NameAndType(_) => ConstantTag::NameAndType,
            CpInfo::MethodHandle(_) => ConstantTag::MethodHandle,
            CpInfo::MethodType(_) => ConstantTag::MethodType,
            CpInfo::Dynamic(_) => ConstantTag::Dynamic,
            CpInfo::InvokeDynamic(_) => ConstantTag::InvokeDynamic,
            CpInfo::Module(_) => ConstantTag::Module,
            CpInfo::Package(_) => ConstantTag::Package,
            CpInfo::Unusable => return None,
        })
    }
}

/// Raw contents of a `CONSTANT_Utf8_info`.
///
/// The bytes are kept as they appear in the file (modified UTF-8), so they
/// are not guaranteed to be valid UTF-8.
#[derive(PartialEq, Eq, Clone)]
pub struct Utf8Info {
    pub bytes: Vec<u8>,
}
impl Utf8Info {
    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}
impl std::fmt::Debug for Utf8Info {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.to_str_lossy())
    }
}
impl From<&str> for Utf8Info {
    fn from(s: &str) -> Self {
        Self {
            bytes: s.as_bytes().to_vec(),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct FloatInfo {
    pub bytes: u32,
}
impl FloatInfo {
    pub fn value(&self) -> f32 {
        f32::from_bits(self.bytes)
    }
}

/// Payload shared by `CONSTANT_Long_info` and `CONSTANT_Double_info`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct WideInfo {
    pub high_bytes: u32,
    pub low_bytes: u32,
}
impl WideInfo {
    pub fn bits(&self) -> u64 {
        (self.high_bytes as u64) << 32 | self.low_bytes as u64
    }

    pub fn as_long(&self) -> i64 {
        self.bits() as i64
    }

    pub fn as_double(&self) -> f64 {
        f64::from_bits(self.bits())
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct RefInfo {
    pub class_index: u16,
    pub name_and_type_index: u16,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ClassInfo {
    // The value of the name_index item must be a valid index into the constant_pool table.
    // The constant_pool entry at that index must be a CONSTANT_Utf8_info structure
    // representing a valid binary class or interface name encoded in internal form.
    pub name_index: u16,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct NameAndTypeInfo {
    pub name_index: u16,
    pub descriptor_index: u16,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct MethodHandleInfo {
    pub reference_kind: u8,
    pub reference_index: u16,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct MethodTypeInfo {
    pub descriptor_index: u16,
}

/// Payload of `CONSTANT_Dynamic_info` and `CONSTANT_InvokeDynamic_info`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DynamicInfo {
    pub bootstrap_method_attr_index: u16,
    pub name_and_type_index: u16,
}

/// Payload of `CONSTANT_Module_info` and `CONSTANT_Package_info`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct NamedInfo {
    pub name_index: u16,
}
