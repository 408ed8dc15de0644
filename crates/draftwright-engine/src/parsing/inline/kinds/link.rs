/// Inline link `[text](href)`. Neither part may be empty, the text cannot
/// contain `]` and the href cannot contain `)`.
pub struct Link;

impl Link {
    pub const OPEN: u8 = b'[';
    pub const MIDDLE: &'static [u8; 2] = b"](";
    pub const CLOSE: u8 = b')';
}
