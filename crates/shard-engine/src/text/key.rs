use std::fmt;
use std::path::PathBuf;

/// Font cache key: one font file opened at one pixel size.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct FontKey {
    pub path: PathBuf,
    pub size: u32,
}

impl FontKey {
    pub fn new(path: impl Into<PathBuf>, size: u32) -> Self {
        Self { path: path.into(), size }
    }
}

impl fmt::Display for FontKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.path.display(), self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_path_and_size() {
        assert_eq!(FontKey::new("fonts/calibri.ttf", 18).to_string(), "fonts/calibri.ttf,18");
    }

    #[test]
    fn size_is_part_of_identity() {
        assert_ne!(FontKey::new("a.ttf", 12), FontKey::new("a.ttf", 14));
    }
}
