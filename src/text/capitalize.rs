//! Locale-aware capitalization of the first cased character

use icu_casemap::CaseMapper;

use crate::locale::LocaleTag;

/// True for characters whose uppercase mapping differs from themselves
fn changes_when_uppercased(c: char) -> bool {
    let mut upper = c.to_uppercase();
    !(upper.len() == 1 && upper.next() == Some(c))
}

/// Uppercase the first character that has an uppercase form, leaving the
/// rest of `input` untouched.
///
/// Leading punctuation, whitespace and digits are skipped. The replacement
/// follows the locale's tailoring (`i` becomes `İ` in Turkish) and may be
/// longer than the original character. Without a locale the ambient one is
/// used.
pub fn capitalize(input: &str, locale: Option<&LocaleTag>) -> String {
    match locale {
        Some(locale) => capitalize_in(input, locale),
        None => capitalize_in(input, &LocaleTag::ambient()),
    }
}

/// [`capitalize`] with an explicit locale
pub fn capitalize_in(input: &str, locale: &LocaleTag) -> String {
    let Some((index, c)) = input.char_indices().find(|&(_, c)| changes_when_uppercased(c)) else {
        return input.to_string();
    };

    let end = index + c.len_utf8();
    let upper = CaseMapper::new().uppercase_to_string(&input[index..end], &locale.language_identifier());

    let mut out = String::with_capacity(input.len() + upper.len());
    out.push_str(&input[..index]);
    out.push_str(&upper);
    out.push_str(&input[end..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(s: &str) -> LocaleTag {
        LocaleTag::parse(s).unwrap()
    }

    #[test]
    fn test_basic_capitalization() {
        assert_eq!(capitalize_in("hello", &tag("en")), "Hello");
        assert_eq!(capitalize_in("hello", &tag("fr")), "Hello");
        assert_eq!(capitalize("hello", Some(&tag("en-US"))), "Hello");
    }

    #[test]
    fn test_only_first_cased_character_changes() {
        assert_eq!(capitalize_in("hello world", &tag("en")), "Hello world");
        assert_eq!(capitalize_in("Already", &tag("en")), "ALready");
        assert_eq!(capitalize_in("¿qué tal?", &tag("es")), "¿Qué tal?");
        assert_eq!(capitalize_in("  42 apples", &tag("en")), "  42 Apples");
    }

    #[test]
    fn test_uppercase_letters_are_skipped() {
        // Characters that are already uppercase do not count as cased here
        assert_eq!(capitalize_in("ABC def", &tag("en")), "ABC Def");
        assert_eq!(capitalize_in("NAME", &tag("en")), "NAME");
    }

    #[test]
    fn test_turkish_dotted_i() {
        assert_eq!(capitalize_in("italya", &tag("tr")), "İtalya");
        assert_eq!(capitalize_in("italya", &tag("en")), "Italya");
    }

    #[test]
    fn test_dutch_ij_digraph() {
        assert_eq!(capitalize_in("ĳsselmeer", &tag("nl")), "Ĳsselmeer");
    }

    #[test]
    fn test_supplementary_plane() {
        // Deseret small letter ew -> capital letter ew
        let input = "\u{10436}\u{10437}\u{10435}";
        let expected = "\u{1040E}\u{10437}\u{10435}";
        assert_eq!(capitalize_in(input, &tag("en")), expected);
    }

    #[test]
    fn test_expanding_mapping() {
        assert_eq!(capitalize_in("ßa", &tag("de")), "SSa");
    }

    #[test]
    fn test_nothing_to_capitalize() {
        assert_eq!(capitalize_in("", &tag("en")), "");
        assert_eq!(capitalize_in("...!?", &tag("en")), "...!?");
        assert_eq!(capitalize_in("123", &tag("en")), "123");
        assert_eq!(capitalize_in("名前", &tag("ja")), "名前");
    }
}
