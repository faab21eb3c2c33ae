use thiserror::Error;

use crate::constant_pool;

#[derive(Error, Debug, PartialEq)]
pub enum ClassFileError {
    #[error("Not a class file, magic identifier: 0x{0:X}")]
    NotAClassFile(u32),
    #[error("Unexpected end of input at offset {offset}")]
    UnexpectedEndOfInput { offset: usize },
    #[error("Unknown constant pool tag: {0}")]
    UnknownConstantTag(u8),
    #[error("Decoding stopped with {remaining} bytes left over")]
    TrailingOrTruncatedData { remaining: usize },
    #[error("Constant pool index {index} does not refer to a Utf8 entry")]
    UnresolvedUtf8Reference { index: u16 },
    #[error("Constant pool index {0} is out of range")]
    InvalidConstantPoolIndex(u16),
    #[error("Expected {0}, found {1:?}")]
    UnexpectedConstantPoolEntry(&'static str, constant_pool::CpInfo),
}
