/// A user-facing format code and the catalog MIME types that satisfy it.
/// The first MIME type is the preferred one.
#[derive(Debug, PartialEq, Eq)]
pub struct FileFormat {
    pub code: &'static str,
    pub mime_types: &'static [&'static str],
}

impl FileFormat {
    pub fn primary_mime(&self) -> &'static str {
        self.mime_types[0]
    }

    /// First acceptable MIME type, in preference order, for which `has` returns true.
    pub fn first_match(&self, has: impl Fn(&str) -> bool) -> Option<&'static str> {
        self.mime_types.iter().copied().find(|mime| has(mime))
    }
}

pub static FORMATS: &[FileFormat] = &[
    FileFormat {
        code: "epub",
        mime_types: &["application/epub+zip"],
    },
    FileFormat {
        code: "mobi",
        mime_types: &["application/x-mobipocket-ebook", "application/kindle"],
    },
    // Rare on Gutenberg
    FileFormat {
        code: "pdf",
        mime_types: &["application/pdf"],
    },
    FileFormat {
        code: "html",
        mime_types: &["text/html", "text/html; charset=utf-8"],
    },
    FileFormat {
        code: "text",
        mime_types: &[
            "text/plain",
            "text/plain; charset=utf-8",
            "text/plain; charset=us-ascii",
        ],
    },
];

/// Codes searched for when the query does not name a format.
pub const DEFAULT_TARGET_FORMATS: &[&str] = &["epub", "mobi", "pdf"];

pub fn find_format(code: &str) -> Option<&'static FileFormat> {
    let code = code.trim().to_lowercase();
    FORMATS.iter().find(|format| format.code == code)
}

pub fn default_target_formats() -> Vec<&'static FileFormat> {
    DEFAULT_TARGET_FORMATS
        .iter()
        .filter_map(|code| find_format(code))
        .collect()
}
