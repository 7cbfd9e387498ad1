use lexis_types::LookupKey;

/// Derives a single-word lookup key from raw selected text.
///
/// Takes the first whitespace-delimited segment and keeps only ASCII letters.
/// Anything that cleans down to nothing yields `None`.
pub fn extract(raw: Option<&str>) -> Option<LookupKey> {
    let first = raw?.split_whitespace().next()?;
    let cleaned: String = first.chars().filter(|c| c.is_ascii_alphabetic()).collect();

    LookupKey::new(&cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: &str) -> Option<String> {
        extract(Some(raw)).map(|k| k.to_string())
    }

    #[test]
    fn keeps_first_word_only() {
        assert_eq!(key("  Hello, world").as_deref(), Some("Hello"));
        assert_eq!(key("run\t\nfast").as_deref(), Some("run"));
    }

    #[test]
    fn strips_non_letters() {
        assert_eq!(key("don't").as_deref(), Some("dont"));
        assert_eq!(key("“quoted”").as_deref(), Some("quoted"));
        assert_eq!(key("café").as_deref(), Some("caf"));
        assert_eq!(key("abc123def").as_deref(), Some("abcdef"));
    }

    #[test]
    fn empty_results_are_absent() {
        assert_eq!(key("..."), None);
        assert_eq!(key(""), None);
        assert_eq!(key("   "), None);
        assert_eq!(key("42 apples"), None);
        assert_eq!(extract(None), None);
    }

    #[test]
    fn output_is_always_ascii_letters() {
        let inputs = [
            "Straße", "naïve approach", "C++", "\u{3000}日本語", "x-ray", "ﬁne", "Ω",
        ];
        for input in inputs {
            if let Some(k) = extract(Some(input)) {
                assert!(!k.as_str().is_empty());
                assert!(k.as_str().chars().all(|c| c.is_ascii_alphabetic()), "{input}");
            }
        }
    }
}
