use bitflags::bitflags;

bitflags! {
    /// Access flags of a class, field or method.
    ///
    /// Class, field and method flags share bit positions, so several names
    /// alias the same bit. Every one of the 16 bits is named, which keeps
    /// `from_bits_truncate` lossless.
    #[derive(Default)]
    pub struct AccessFlags: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SUPER = 0x0020;
        const SYNCHRONIZED = 0x0020;
        const VOLATILE = 0x0040;
        const BRIDGE = 0x0040;
        const TRANSIENT = 0x0080;
        const VARARGS = 0x0080;
        const NATIVE = 0x0100;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
        const STRICT = 0x0800;
        const SYNTHETIC = 0x1000;
        const ANNOTATION = 0x2000;
        const ENUM = 0x4000;
        const MODULE = 0x8000;
        const MANDATED = 0x8000;
    }
}

#[cfg(test)]
mod access_flags_tests {
    use super::*;

    #[test]
    fn it_should_keep_every_bit() {
        for bits in [0x0000u16, 0x0021, 0x8000, 0xFFFF, 0x1234] {
            assert_eq!(AccessFlags::from_bits_truncate(bits).bits(), bits);
        }
    }

    #[test]
    fn it_should_alias_shared_positions() {
        assert_eq!(AccessFlags::SUPER, AccessFlags::SYNCHRONIZED);
        assert!(AccessFlags::from_bits_truncate(0x0020).contains(AccessFlags::SUPER));
    }
}
