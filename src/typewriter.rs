//! Character-by-character reveal for `.section-tag` headings.

pub const CHAR_DELAY_MS: u32 = 50;
pub const CURSOR_LINGER_MS: u32 = 600;

pub const TYPEWRITER_CLASS: &str = "section-tag--typewriter";
pub const CHAR_CLASS: &str = "section-tag__char";
pub const CURSOR_CLASS: &str = "section-tag__cursor";
pub const REVEALED_CLASS: &str = "is-revealed";
pub const DONE_CLASS: &str = "is-done";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypewriterPlan {
    chars: Vec<char>,
}

impl TypewriterPlan {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn reveal_delay_ms(index: usize) -> u32 {
        u32::try_from(index)
            .unwrap_or(u32::MAX)
            .saturating_mul(CHAR_DELAY_MS)
    }

    pub fn cursor_done_delay_ms(&self) -> u32 {
        Self::reveal_delay_ms(self.chars.len()).saturating_add(CURSOR_LINGER_MS)
    }
}
