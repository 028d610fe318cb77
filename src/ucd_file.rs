//! The UCD files the grapheme table is compiled from.

/// A UCD data file, identified by where it lives under the UCD root.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum UcdFile {
    GraphemeBreakProperty,
    EmojiData,
    PropList,
}

impl UcdFile {
    /// Every input file, in the order their lines are concatenated.  Earlier
    /// files take precedence for code points listed more than once.
    pub const ALL: [UcdFile; 3] = [
        UcdFile::GraphemeBreakProperty,
        UcdFile::EmojiData,
        UcdFile::PropList,
    ];

    /// Path relative to the UCD root, e.g. `auxiliary/GraphemeBreakProperty.txt`.
    pub fn relative_url(self) -> &'static str {
        match self {
            UcdFile::GraphemeBreakProperty => "auxiliary/GraphemeBreakProperty.txt",
            UcdFile::EmojiData => "emoji/emoji-data.txt",
            UcdFile::PropList => "PropList.txt",
        }
    }

    /// Name of the file in the local cache directory.
    pub fn file_name(self) -> &'static str {
        match self {
            UcdFile::GraphemeBreakProperty => "GraphemeBreakProperty.txt",
            UcdFile::EmojiData => "emoji-data.txt",
            UcdFile::PropList => "PropList.txt",
        }
    }

    pub fn url(self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.relative_url())
    }
}

#[test]
fn urls_join_cleanly() {
    assert_eq!(
        UcdFile::EmojiData.url("https://www.unicode.org/Public/UCD/latest/ucd/"),
        "https://www.unicode.org/Public/UCD/latest/ucd/emoji/emoji-data.txt"
    );
    assert_eq!(UcdFile::PropList.url("http://mirror"), "http://mirror/PropList.txt");
}
