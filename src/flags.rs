use bitflags::bitflags;

bitflags! {
    /// Decoder behavior flags.
    ///
    /// The empty set is strict: every malformed bit-string is an error.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CodecFlags: u8 {
        /// Drop a trailing partial code when the input runs out, instead of
        /// reporting the bit-string as truncated.
        const LENIENT_TRUNCATION = 0b_0000_0001;

        /// Discard bits that can no longer match any code and keep going,
        /// instead of failing.
        const SKIP_INVALID_CODES = 0b_0000_0010;

        const LENIENT = Self::LENIENT_TRUNCATION.bits() | Self::SKIP_INVALID_CODES.bits();
    }
}

impl Default for CodecFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl CodecFlags {
    pub fn is_strict(self) -> bool {
        self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_strict() {
        assert!(CodecFlags::default().is_strict());
        assert!(!CodecFlags::LENIENT_TRUNCATION.is_strict());
    }

    #[test]
    fn lenient_contains_both() {
        assert!(CodecFlags::LENIENT.contains(CodecFlags::LENIENT_TRUNCATION));
        assert!(CodecFlags::LENIENT.contains(CodecFlags::SKIP_INVALID_CODES));
    }
}
