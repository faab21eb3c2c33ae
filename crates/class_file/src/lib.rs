// https://docs.oracle.com/javase/specs/jvms/se19/html/jvms-4.html

mod access_flags;
pub mod attributes;
mod class_file;
#[macro_use]
pub mod constant_pool;
mod cursor;
mod error;
mod parser;
mod version;
mod writer;

pub use self::class_file::{ClassFile, FieldInfo, MemberInfo, MethodInfo};
pub use access_flags::AccessFlags;
pub use attributes::{Attribute, Attributes};
pub use constant_pool::{ConstantPool, CpInfo};
pub use cursor::ByteCursor;
pub use error::ClassFileError;
pub use parser::{DecodeOptions, Parser, WideConstantSlots};
pub use version::{Release, Version};

pub type Result<T, E = ClassFileError> = std::result::Result<T, E>;
