// Byte to character offset conversion for spans reported to callers

/// Forward-only byte -> char position counter
///
/// Each call to [`CharCounter::char_at`] only walks the bytes between the last
/// position and the target, so converting a sorted sequence of offsets is O(n)
/// over the whole text. Targets must be non-decreasing.
pub struct CharCounter<'a> {
    bytes: &'a [u8],
    byte_pos: usize,
    char_pos: usize,
}

impl<'a> CharCounter<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            byte_pos: 0,
            char_pos: 0,
        }
    }

    /// Character offset of `byte_pos`, which must lie on a char boundary
    pub fn char_at(&mut self, byte_pos: usize) -> usize {
        debug_assert!(byte_pos >= self.byte_pos, "offsets must be requested in order");
        while self.byte_pos < byte_pos && self.byte_pos < self.bytes.len() {
            // Continuation bytes are 0b10xx_xxxx
            if (self.bytes[self.byte_pos] & 0xC0) != 0x80 {
                self.char_pos += 1;
            }
            self.byte_pos += 1;
        }
        self.char_pos
    }
}

/// Byte range covering the character span `start..stop` of `text`
pub fn char_span_to_bytes(text: &str, start: usize, stop: usize) -> Option<(usize, usize)> {
    if start > stop {
        return None;
    }
    let mut indices = text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len()));
    let byte_start = indices.nth(start)?;
    let byte_stop = if stop == start {
        byte_start
    } else {
        indices.nth(stop - start - 1)?
    };
    Some((byte_start, byte_stop))
}
