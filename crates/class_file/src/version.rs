use std::fmt;

/// Release labels by major version, in ascending order.
const RELEASES: &[(u16, &str)] = &[(51, "7"), (52, "8"), (53, "9"), (54, "10"), (55, "11")];

const FIRST_MAJOR_VERSION: u16 = 45;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Version {
    pub major: u16,
    pub minor: u16,
}
impl Version {
    pub fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }

    /// Human readable release for this version. Informational only; it has no
    /// influence on decoding.
    pub fn release(&self) -> Release {
        if self.major < FIRST_MAJOR_VERSION {
            return Release::Unknown;
        }

        match RELEASES.iter().find(|(major, _)| self.major <= *major) {
            Some((major, label)) if *major == self.major => Release::Java(*label),
            Some(_) => Release::Legacy,
            None => Release::Unsupported,
        }
    }
}
impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Release {
    Unknown,
    Legacy,
    Java(&'static str),
    Unsupported,
}
impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Release::Unknown => f.write_str("Unknown Java SE version"),
            Release::Legacy => f.write_str("Legacy Java SE version"),
            Release::Java(label) => f.write_str(label),
            Release::Unsupported => f.write_str("Not supported"),
        }
    }
}

#[cfg(test)]
mod release_tests {
    use super::*;

    #[test]
    fn it_should_label_known_releases() {
        assert_eq!(Version::new(51, 0).release(), Release::Java("7"));
        assert_eq!(Version::new(52, 0).release().to_string(), "8");
        assert_eq!(Version::new(55, 0).release().to_string(), "11");
    }

    #[test]
    fn it_should_label_versions_outside_the_table() {
        assert_eq!(Version::new(44, 0).release(), Release::Unknown);
        assert_eq!(Version::new(45, 3).release(), Release::Legacy);
        assert_eq!(Version::new(50, 0).release(), Release::Legacy);
        assert_eq!(Version::new(56, 0).release(), Release::Unsupported);
        assert_eq!(Version::new(65, 0).release(), Release::Unsupported);
    }

    #[test]
    fn it_should_display_major_and_minor() {
        assert_eq!(Version::new(52, 0).to_string(), "52.0");
    }
}
