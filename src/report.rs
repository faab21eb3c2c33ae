use std::{borrow::Cow, fmt};

use caramel_class_file::{
    AccessFlags, Attributes, ClassFile, MemberInfo, Release, Result, Version,
};

/// Human readable summary of a decoded class file.
///
/// All constant pool references are resolved up front, so building a report
/// fails on the first name that does not point at a Utf8 entry.
pub struct Report<'a> {
    version: Version,
    constant_pool_slots: usize,
    access_flags: AccessFlags,
    class_name: Cow<'a, str>,
    super_class: Option<Cow<'a, str>>,
    interfaces: Vec<Cow<'a, str>>,
    fields: Vec<MemberLine<'a>>,
    methods: Vec<MemberLine<'a>>,
    attributes: Vec<AttributeLine<'a>>,
}

struct MemberLine<'a> {
    access_flags: AccessFlags,
    name: Cow<'a, str>,
    descriptor: Cow<'a, str>,
    attributes: Vec<AttributeLine<'a>>,
}

struct AttributeLine<'a> {
    name: Cow<'a, str>,
    length: usize,
}

impl<'a> Report<'a> {
    pub fn new(class_file: &'a ClassFile) -> Result<Self> {
        Ok(Self {
            version: class_file.version,
            constant_pool_slots: class_file.constant_pool.len(),
            access_flags: class_file.access_flags,
            class_name: class_file.class_name()?,
            super_class: class_file.super_class()?,
            interfaces: class_file.interface_names()?,
            fields: member_lines(class_file, &class_file.fields)?,
            methods: member_lines(class_file, &class_file.methods)?,
            attributes: attribute_lines(class_file, &class_file.attributes)?,
        })
    }
}

fn member_lines<'a>(
    class_file: &'a ClassFile,
    members: &'a [MemberInfo],
) -> Result<Vec<MemberLine<'a>>> {
    members
        .iter()
        .map(|member| {
            Ok(MemberLine {
                access_flags: member.access_flags,
                name: class_file.constant_pool.utf8(member.name_index)?,
                descriptor: class_file.constant_pool.utf8(member.descriptor_index)?,
                attributes: attribute_lines(class_file, &member.attributes)?,
            })
        })
        .collect()
}

fn attribute_lines<'a>(
    class_file: &'a ClassFile,
    attributes: &'a Attributes,
) -> Result<Vec<AttributeLine<'a>>> {
    attributes
        .iter()
        .map(|attribute| {
            Ok(AttributeLine {
                name: class_file.attribute_name(attribute)?,
                length: attribute.info.len(),
            })
        })
        .collect()
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let release = match self.version.release() {
            Release::Java(label) => format!("Java SE {}", label),
            release => release.to_string(),
        };

        writeln!(f, " Version:        {} ({})", self.version, release)?;
        writeln!(f, " Constant Pool:  {} slots", self.constant_pool_slots)?;
        writeln!(f, " Access Flags:   0x{:04X}", self.access_flags.bits())?;
        writeln!(f, " This Class:     {}", self.class_name)?;
        writeln!(
            f,
            " Super Class:    {}",
            self.super_class.as_deref().unwrap_or("(none)")
        )?;
        writeln!(f, " Interfaces:     {}", self.interfaces.join(", "))?;

        writeln!(f, "Fields:")?;
        for field in &self.fields {
            write!(f, "{}", field)?;
        }

        writeln!(f, "Methods:")?;
        for method in &self.methods {
            write!(f, "{}", method)?;
        }

        writeln!(f, "Attributes:")?;
        for attribute in &self.attributes {
            writeln!(f, "    {}", attribute)?;
        }

        Ok(())
    }
}

impl fmt::Display for MemberLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "    0x{:04X} {} {}",
            self.access_flags.bits(),
            self.name,
            self.descriptor
        )?;
        for attribute in &self.attributes {
            writeln!(f, "        {}", attribute)?;
        }

        Ok(())
    }
}

impl fmt::Display for AttributeLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.name, self.length)
    }
}

#[cfg(test)]
mod report_tests {
    use caramel_class_file::{
        constant_pool::ClassInfo, Attribute, ClassFileError, ConstantPool, CpInfo,
    };

    use super::*;

    fn class_file() -> ClassFile {
        ClassFile {
            version: Version::new(52, 0),
            constant_pool: ConstantPool::new(vec![
                CpInfo::Utf8("Main".into()),
                CpInfo::Class(ClassInfo { name_index: 1 }),
                CpInfo::Utf8("main".into()),
                CpInfo::Utf8("([Ljava/lang/String;)V".into()),
                CpInfo::Utf8("Code".into()),
            ]),
            access_flags: AccessFlags::PUBLIC | AccessFlags::SUPER,
            this_class: 2,
            super_class: 0,
            interfaces: vec![],
            fields: vec![],
            methods: vec![MemberInfo {
                access_flags: AccessFlags::PUBLIC | AccessFlags::STATIC,
                name_index: 3,
                descriptor_index: 4,
                attributes: Attributes(vec![Attribute {
                    attribute_name_index: 5,
                    info: vec![0; 12],
                }]),
            }],
            attributes: Attributes::default(),
        }
    }

    #[test]
    fn it_should_render_a_summary() {
        let class_file = class_file();
        let report = Report::new(&class_file).unwrap().to_string();

        assert_eq!(
            report,
            [
                " Version:        52.0 (Java SE 8)",
                " Constant Pool:  5 slots",
                " Access Flags:   0x0021",
                " This Class:     Main",
                " Super Class:    (none)",
                " Interfaces:     ",
                "Fields:",
                "Methods:",
                "    0x0009 main ([Ljava/lang/String;)V",
                "        Code (12 bytes)",
                "Attributes:",
                "",
            ]
            .join("\n")
        );
    }

    #[test]
    fn it_should_fail_on_an_unresolved_name() {
        let mut class_file = class_file();
        class_file.methods[0].attributes.0[0].attribute_name_index = 2;

        assert!(matches!(
            Report::new(&class_file),
            Err(ClassFileError::UnresolvedUtf8Reference { index: 2 })
        ));
    }
}
