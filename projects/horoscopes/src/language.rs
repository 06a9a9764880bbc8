/// Letters that only show up in Turkish among the languages our providers return.
const TURKISH_LETTERS: [char; 12] = ['ç', 'ğ', 'ı', 'ö', 'ş', 'ü', 'Ç', 'Ğ', 'İ', 'Ö', 'Ş', 'Ü'];

/// True unless `text` already contains a Turkish-specific letter.
pub fn needs_translation(text: &str) -> bool {
    !text.chars().any(|c| TURKISH_LETTERS.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_needs_translation() {
        assert!(needs_translation("Great day ahead"));
        assert!(needs_translation("Mind your finances, Aries."));
    }

    #[test]
    fn turkish_letter_suppresses_translation() {
        assert!(!needs_translation("Bugün işler yolunda"));
        assert!(!needs_translation("ş"));
        assert!(!needs_translation("İYİ"));
        assert!(!needs_translation("ılık"));
    }

    #[test]
    fn dotted_lowercase_i_is_not_turkish() {
        assert!(needs_translation("invest in friendships"));
    }

    #[test]
    fn empty_needs_translation() {
        assert!(needs_translation(""));
    }
}
