//! Fixed-width, null-padded header text fields.

/// A text field of exactly `N` bytes on disk.
///
/// Contents are copied with [`Text::set`], which keeps at most `N - 1`
/// bytes so the field always ends in at least one NUL, and never splits a
/// UTF-8 character.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Text<const N: usize>([u8; N]);

impl<const N: usize> Text<N> {
    /// An all-zero field.
    pub const fn empty() -> Self {
        Self([0; N])
    }

    /// Creates a field holding `s` (truncated).
    pub fn new(s: &str) -> Self {
        let mut text = Self::empty();
        text.set(s);
        text
    }

    /// Replaces the contents with `s`, truncated to `N - 1` bytes on a
    /// character boundary and zero-padded.
    pub fn set(&mut self, s: &str) {
        let mut len = s.len().min(N.saturating_sub(1));
        while !s.is_char_boundary(len) {
            len -= 1;
        }
        self.0 = [0; N];
        self.0[..len].copy_from_slice(&s.as_bytes()[..len]);
    }

    /// Text up to the first NUL.
    pub fn as_str(&self) -> &str {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(N);
        // `set` only ever stores whole characters.
        std::str::from_utf8(&self.0[..end]).unwrap_or_default()
    }

    /// Raw on-disk bytes.
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    /// Returns `true` if no text is stored.
    pub fn is_empty(&self) -> bool {
        self.0[0] == 0
    }
}

impl<const N: usize> Default for Text<N> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<const N: usize> std::fmt::Debug for Text<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}
