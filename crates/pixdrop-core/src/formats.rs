//! Output format table
//!
//! The only source of truth for the content type and file extension of an output
//! format. TIFF can be produced by the encoder but has no entry here, so resolving
//! it (or any other name) fails.

/// Content type and extension for one output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    pub name: &'static str,
    pub content_type: &'static str,
    pub extension: &'static str,
}

pub const FORMAT_TABLE: [FormatInfo; 3] = [
    FormatInfo {
        name: "png",
        content_type: "image/png",
        extension: ".png",
    },
    FormatInfo {
        name: "jpeg",
        content_type: "image/jpeg",
        extension: ".jpg",
    },
    FormatInfo {
        name: "webp",
        content_type: "image/webp",
        extension: ".webp",
    },
];

impl FormatInfo {
    /// Look up a format by its exact name. Names are case-sensitive.
    pub fn lookup(name: &str) -> Option<&'static FormatInfo> {
        FORMAT_TABLE.iter().find(|info| info.name == name)
    }

    /// Append this format's extension to `key` unless it is already there.
    pub fn apply_extension(&self, key: &str) -> String {
        if key.ends_with(self.extension) {
            key.to_string()
        } else {
            format!("{}{}", key, self.extension)
        }
    }
}
