/// Symmetric delimiters around a non-empty run of text.
///
/// The closing delimiter is the first one after at least one byte of
/// content, so `**a**b**` closes after `a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// `**text**`
    Strong,
    /// `*text*`
    StarItalic,
    /// `_text_`
    UnderscoreItalic,
}

impl Emphasis {
    /// Tried in this order at each position.
    pub const PRECEDENCE: [Emphasis; 3] = [
        Emphasis::Strong,
        Emphasis::StarItalic,
        Emphasis::UnderscoreItalic,
    ];

    pub fn delimiter(self) -> &'static [u8] {
        match self {
            Emphasis::Strong => b"**",
            Emphasis::StarItalic => b"*",
            Emphasis::UnderscoreItalic => b"_",
        }
    }
}
