//! Per-language phrasing for relative times
//!
//! Each phrasebook knows its idiomatic "auto" phrases (yesterday, next week)
//! and falls back to numeric phrasing with the language's plural rule.

use super::RelativeTimeUnit;
use crate::locale::LocaleTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phrasebook {
    English,
    French,
    Spanish,
    German,
}

impl Phrasebook {
    /// Phrasebook for a locale, degrading to English for unsupported languages
    pub(crate) fn for_locale(locale: &LocaleTag) -> Self {
        match locale.language() {
            "en" => Phrasebook::English,
            "fr" => Phrasebook::French,
            "es" => Phrasebook::Spanish,
            "de" => Phrasebook::German,
            other => {
                tracing::debug!("No relative time phrases for '{}', using English", other);
                Phrasebook::English
            }
        }
    }

    pub(crate) fn render(self, value: i64, unit: RelativeTimeUnit) -> String {
        if let Some(phrase) = self.auto_phrase(value, unit) {
            return phrase.to_string();
        }

        let count = value.unsigned_abs();
        let number = self.format_number(count);
        let noun = self.unit_name(unit, self.is_singular(count));

        match (self, value < 0) {
            (Phrasebook::English, true) => format!("{number} {noun} ago"),
            (Phrasebook::English, false) => format!("in {number} {noun}"),
            (Phrasebook::French, true) => format!("il y a {number} {noun}"),
            (Phrasebook::French, false) => format!("dans {number} {noun}"),
            (Phrasebook::Spanish, true) => format!("hace {number} {noun}"),
            (Phrasebook::Spanish, false) => format!("dentro de {number} {noun}"),
            (Phrasebook::German, true) => format!("vor {number} {noun}"),
            (Phrasebook::German, false) => format!("in {number} {noun}"),
        }
    }

    fn is_singular(self, count: u64) -> bool {
        match self {
            // French treats zero as singular
            Phrasebook::French => count <= 1,
            _ => count == 1,
        }
    }

    /// Idiomatic replacement for small offsets, if the language has one
    fn auto_phrase(self, value: i64, unit: RelativeTimeUnit) -> Option<&'static str> {
        use crate::relative::RelativeTimeUnit::*;

        let phrase = match (self, unit, value) {
            (Phrasebook::English, Second, 0) => "now",
            (Phrasebook::English, Minute, 0) => "this minute",
            (Phrasebook::English, Hour, 0) => "this hour",
            (Phrasebook::English, Day, -1) => "yesterday",
            (Phrasebook::English, Day, 0) => "today",
            (Phrasebook::English, Day, 1) => "tomorrow",
            (Phrasebook::English, Week, -1) => "last week",
            (Phrasebook::English, Week, 0) => "this week",
            (Phrasebook::English, Week, 1) => "next week",
            (Phrasebook::English, Month, -1) => "last month",
            (Phrasebook::English, Month, 0) => "this month",
            (Phrasebook::English, Month, 1) => "next month",
            (Phrasebook::English, Year, -1) => "last year",
            (Phrasebook::English, Year, 0) => "this year",
            (Phrasebook::English, Year, 1) => "next year",

            (Phrasebook::French, Second, 0) => "maintenant",
            (Phrasebook::French, Minute, 0) => "cette minute-ci",
            (Phrasebook::French, Hour, 0) => "cette heure-ci",
            (Phrasebook::French, Day, -2) => "avant-hier",
            (Phrasebook::French, Day, -1) => "hier",
            (Phrasebook::French, Day, 0) => "aujourd’hui",
            (Phrasebook::French, Day, 1) => "demain",
            (Phrasebook::French, Day, 2) => "après-demain",
            (Phrasebook::French, Week, -1) => "la semaine dernière",
            (Phrasebook::French, Week, 0) => "cette semaine",
            (Phrasebook::French, Week, 1) => "la semaine prochaine",
            (Phrasebook::French, Month, -1) => "le mois dernier",
            (Phrasebook::French, Month, 0) => "ce mois-ci",
            (Phrasebook::French, Month, 1) => "le mois prochain",
            (Phrasebook::French, Year, -1) => "l’année dernière",
            (Phrasebook::French, Year, 0) => "cette année",
            (Phrasebook::French, Year, 1) => "l’année prochaine",

            (Phrasebook::Spanish, Second, 0) => "ahora",
            (Phrasebook::Spanish, Minute, 0) => "este minuto",
            (Phrasebook::Spanish, Hour, 0) => "esta hora",
            (Phrasebook::Spanish, Day, -2) => "anteayer",
            (Phrasebook::Spanish, Day, -1) => "ayer",
            (Phrasebook::Spanish, Day, 0) => "hoy",
            (Phrasebook::Spanish, Day, 1) => "mañana",
            (Phrasebook::Spanish, Day, 2) => "pasado mañana",
            (Phrasebook::Spanish, Week, -1) => "la semana pasada",
            (Phrasebook::Spanish, Week, 0) => "esta semana",
            (Phrasebook::Spanish, Week, 1) => "la próxima semana",
            (Phrasebook::Spanish, Month, -1) => "el mes pasado",
            (Phrasebook::Spanish, Month, 0) => "este mes",
            (Phrasebook::Spanish, Month, 1) => "el próximo mes",
            (Phrasebook::Spanish, Year, -1) => "el año pasado",
            (Phrasebook::Spanish, Year, 0) => "este año",
            (Phrasebook::Spanish, Year, 1) => "el próximo año",

            (Phrasebook::German, Second, 0) => "jetzt",
            (Phrasebook::German, Minute, 0) => "in dieser Minute",
            (Phrasebook::German, Hour, 0) => "in dieser Stunde",
            (Phrasebook::German, Day, -2) => "vorgestern",
            (Phrasebook::German, Day, -1) => "gestern",
            (Phrasebook::German, Day, 0) => "heute",
            (Phrasebook::German, Day, 1) => "morgen",
            (Phrasebook::German, Day, 2) => "übermorgen",
            (Phrasebook::German, Week, -1) => "letzte Woche",
            (Phrasebook::German, Week, 0) => "diese Woche",
            (Phrasebook::German, Week, 1) => "nächste Woche",
            (Phrasebook::German, Month, -1) => "letzten Monat",
            (Phrasebook::German, Month, 0) => "diesen Monat",
            (Phrasebook::German, Month, 1) => "nächsten Monat",
            (Phrasebook::German, Year, -1) => "letztes Jahr",
            (Phrasebook::German, Year, 0) => "dieses Jahr",
            (Phrasebook::German, Year, 1) => "nächstes Jahr",

            _ => return None,
        };

        Some(phrase)
    }

    fn unit_name(self, unit: RelativeTimeUnit, singular: bool) -> &'static str {
        use crate::relative::RelativeTimeUnit::*;

        let (one, many) = match (self, unit) {
            (Phrasebook::English, Second) => ("second", "seconds"),
            (Phrasebook::English, Minute) => ("minute", "minutes"),
            (Phrasebook::English, Hour) => ("hour", "hours"),
            (Phrasebook::English, Day) => ("day", "days"),
            (Phrasebook::English, Week) => ("week", "weeks"),
            (Phrasebook::English, Month) => ("month", "months"),
            (Phrasebook::English, Year) => ("year", "years"),

            (Phrasebook::French, Second) => ("seconde", "secondes"),
            (Phrasebook::French, Minute) => ("minute", "minutes"),
            (Phrasebook::French, Hour) => ("heure", "heures"),
            (Phrasebook::French, Day) => ("jour", "jours"),
            (Phrasebook::French, Week) => ("semaine", "semaines"),
            (Phrasebook::French, Month) => ("mois", "mois"),
            (Phrasebook::French, Year) => ("an", "ans"),

            (Phrasebook::Spanish, Second) => ("segundo", "segundos"),
            (Phrasebook::Spanish, Minute) => ("minuto", "minutos"),
            (Phrasebook::Spanish, Hour) => ("hora", "horas"),
            (Phrasebook::Spanish, Day) => ("día", "días"),
            (Phrasebook::Spanish, Week) => ("semana", "semanas"),
            (Phrasebook::Spanish, Month) => ("mes", "meses"),
            (Phrasebook::Spanish, Year) => ("año", "años"),

            // Dative plural, same after "vor" and "in"
            (Phrasebook::German, Second) => ("Sekunde", "Sekunden"),
            (Phrasebook::German, Minute) => ("Minute", "Minuten"),
            (Phrasebook::German, Hour) => ("Stunde", "Stunden"),
            (Phrasebook::German, Day) => ("Tag", "Tagen"),
            (Phrasebook::German, Week) => ("Woche", "Wochen"),
            (Phrasebook::German, Month) => ("Monat", "Monaten"),
            (Phrasebook::German, Year) => ("Jahr", "Jahren"),
        };

        if singular { one } else { many }
    }

    /// Group digits the way each language writes counts
    fn format_number(self, n: u64) -> String {
        let (separator, min_digits) = match self {
            Phrasebook::English => (",", 4),
            Phrasebook::French => ("\u{202f}", 4),
            // Spanish leaves four-digit numbers ungrouped
            Phrasebook::Spanish => (".", 5),
            Phrasebook::German => (".", 4),
        };

        let digits = n.to_string();
        if digits.len() < min_digits {
            return digits;
        }

        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push_str(separator);
            }
            out.push(c);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relative::RelativeTimeUnit::*;

    #[test]
    fn test_english_numeric_and_auto() {
        let en = Phrasebook::English;
        assert_eq!(en.render(-2, Day), "2 days ago");
        assert_eq!(en.render(1, Hour), "in 1 hour");
        assert_eq!(en.render(0, Second), "now");
        assert_eq!(en.render(1, Week), "next week");
        assert_eq!(en.render(-3, Month), "3 months ago");
    }

    #[test]
    fn test_french_plural_rule() {
        let fr = Phrasebook::French;
        assert_eq!(fr.render(-1, Hour), "il y a 1 heure");
        assert_eq!(fr.render(3, Year), "dans 3 ans");
        assert_eq!(fr.render(-2, Month), "il y a 2 mois");
    }

    #[test]
    fn test_german_dative() {
        let de = Phrasebook::German;
        assert_eq!(de.render(-3, Day), "vor 3 Tagen");
        assert_eq!(de.render(2, Year), "in 2 Jahren");
        assert_eq!(de.render(-1, Day), "gestern");
    }

    #[test]
    fn test_number_grouping() {
        assert_eq!(Phrasebook::English.format_number(999), "999");
        assert_eq!(Phrasebook::English.format_number(1_234_567), "1,234,567");
        assert_eq!(Phrasebook::Spanish.format_number(1_234), "1234");
        assert_eq!(Phrasebook::Spanish.format_number(12_345), "12.345");
        assert_eq!(Phrasebook::French.format_number(2_000), "2\u{202f}000");
    }

    #[test]
    fn test_locale_lookup() {
        let tag = |s: &str| LocaleTag::parse(s).unwrap();
        assert_eq!(Phrasebook::for_locale(&tag("fr-CA")), Phrasebook::French);
        assert_eq!(Phrasebook::for_locale(&tag("es-419")), Phrasebook::Spanish);
        assert_eq!(Phrasebook::for_locale(&tag("pt-BR")), Phrasebook::English);
    }
}
