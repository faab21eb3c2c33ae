use std::io::{Cursor, Read};

use byteorder::ReadBytesExt;

use crate::{ClassFileError, Result};

/// Sequential big-endian reader over a borrowed byte buffer.
///
/// Every read is bounds checked. A read that would run past the end of the
/// buffer fails with [`ClassFileError::UnexpectedEndOfInput`] and leaves the
/// position where it was.
pub struct ByteCursor<'a> {
    r: Cursor<&'a [u8]>,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { r: Cursor::new(buf) }
    }

    pub fn position(&self) -> usize {
        self.r.position() as usize
    }

    pub fn remaining(&self) -> usize {
        self.r.get_ref().len().saturating_sub(self.position())
    }

    pub fn is_at_end(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let offset = self.position();
        self.r
            .read_u8()
            .map_err(|_| ClassFileError::UnexpectedEndOfInput { offset })
    }

    // Multi-byte reads are built from single byte reads, most significant
    // byte first.
    pub fn read_u16(&mut self) -> Result<u16> {
        self.ensure(2)?;
        let high = self.read_u8()? as u16;
        let low = self.read_u8()? as u16;
        Ok(high << 8 | low)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.ensure(4)?;
        let high = self.read_u16()? as u32;
        let low = self.read_u16()? as u32;
        Ok(high << 16 | low)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        self.ensure(len)?;
        let mut bytes = vec![0u8; len];
        let offset = self.position();
        self.r
            .read_exact(&mut bytes)
            .map_err(|_| ClassFileError::UnexpectedEndOfInput { offset })?;
        Ok(bytes)
    }

    fn ensure(&self, len: usize) -> Result<()> {
        if self.remaining() < len {
            return Err(ClassFileError::UnexpectedEndOfInput {
                offset: self.position(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod read_tests {
    use super::*;

    #[test]
    fn it_should_read_big_endian_values() {
        let mut cursor = ByteCursor::new(&[0x01, 0x02, 0x03, 0xCA, 0xFE, 0xBA, 0xBE]);

        assert_eq!(cursor.read_u8().unwrap(), 0x01);
        assert_eq!(cursor.read_u16().unwrap(), 0x0203);
        assert_eq!(cursor.read_u32().unwrap(), 0xCAFEBABE);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn it_should_read_negative_integers() {
        let mut cursor = ByteCursor::new(&[0xFF, 0xFF, 0xFF, 0xFE]);

        assert_eq!(cursor.read_i32().unwrap(), -2);
    }

    #[test]
    fn it_should_fail_if_there_is_not_enough_data() {
        let mut cursor = ByteCursor::new(&[0x01, 0x02, 0x03]);

        assert_eq!(
            cursor.read_u32(),
            Err(ClassFileError::UnexpectedEndOfInput { offset: 0 })
        );
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.read_u16().unwrap(), 0x0102);
        assert_eq!(
            cursor.read_u16(),
            Err(ClassFileError::UnexpectedEndOfInput { offset: 2 })
        );
        assert_eq!(cursor.read_u8().unwrap(), 0x03);
        assert_eq!(
            cursor.read_u8(),
            Err(ClassFileError::UnexpectedEndOfInput { offset: 3 })
        );
    }

    #[test]
    fn it_should_copy_out_exactly_the_requested_bytes() {
        let mut cursor = ByteCursor::new(&[0xAA, 0xBB, 0xCC]);

        assert_eq!(cursor.read_bytes(2).unwrap(), vec![0xAAu8, 0xBB]);
        assert_eq!(cursor.remaining(), 1);
        assert_eq!(cursor.read_bytes(0).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn it_should_not_allocate_past_the_end_of_the_buffer() {
        let mut cursor = ByteCursor::new(&[0xAA]);

        assert_eq!(
            cursor.read_bytes(u32::MAX as usize),
            Err(ClassFileError::UnexpectedEndOfInput { offset: 0 })
        );
        assert_eq!(cursor.remaining(), 1);
    }
}
