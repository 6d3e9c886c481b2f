use crate::lexicon::Lexicon;
use crate::types::{FindingType, InconsistencyFinding, ProfileRecord};
use chrono::{Datelike, NaiveDate};
use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

/// Lowercased stem that marks a sentence as talking about an arrival.
pub const ARRIVAL_MARKER: &str = "arrivé";

/// Display format for dates in finding messages.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

static PROPER_NOUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-z]+$").expect("proper noun pattern is valid"));

static YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:19|20)[0-9]{2}").expect("year pattern is valid"));

/// Runs the name and date checks with a given [`Lexicon`].
#[derive(Debug, Clone, Default)]
pub struct InconsistencyDetector {
    lexicon: Lexicon,
}

impl InconsistencyDetector {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Check `text` against `profile`.
    ///
    /// Returns nothing for empty text or a missing profile. Never fails:
    /// a check whose inputs are missing is simply skipped.
    pub fn detect(
        &self,
        text: &str,
        profile: Option<&ProfileRecord>,
    ) -> Vec<InconsistencyFinding> {
        let Some(profile) = profile else {
            return Vec::new();
        };
        if text.is_empty() {
            return Vec::new();
        }

        let mut findings = self.check_names(text, profile);
        findings.extend(check_mentioned_years(text, profile));
        findings.extend(check_arrival_before_birth(profile));

        for finding in &findings {
            trace!(
                "{} {}: {}",
                finding.severity.as_str(),
                finding.finding_type.as_str(),
                finding.message
            );
        }
        findings
    }

    fn check_names(&self, text: &str, profile: &ProfileRecord) -> Vec<InconsistencyFinding> {
        text.split_whitespace()
            .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|word| PROPER_NOUN.is_match(word))
            .filter(|word| !self.lexicon.is_generic_noun(word))
            .filter(|word| *word != profile.first_name && *word != profile.last_name)
            .filter(|word| !self.lexicon.is_excluded(word))
            .map(|word| {
                InconsistencyFinding::warning(
                    FindingType::Name,
                    format!(
                        "Nom propre inattendu : « {word} » ne correspond ni au prénom ni au nom du profil"
                    ),
                )
            })
            .collect()
    }
}

/// Check `text` against `profile` with the default [`Lexicon`].
pub fn detect(text: &str, profile: Option<&ProfileRecord>) -> Vec<InconsistencyFinding> {
    InconsistencyDetector::default().detect(text, profile)
}

fn check_mentioned_years(text: &str, profile: &ProfileRecord) -> Vec<InconsistencyFinding> {
    let Some(birth) = profile.birth_date else {
        return Vec::new();
    };
    if !text.to_lowercase().contains(ARRIVAL_MARKER) {
        return Vec::new();
    }

    YEAR.find_iter(text)
        .filter_map(|m| m.as_str().parse::<i32>().ok())
        .filter(|year| *year < birth.year())
        .filter_map(|year| NaiveDate::from_ymd_opt(year, 1, 1))
        .map(|arrival| {
            InconsistencyFinding::error(
                FindingType::Date,
                format!(
                    "L'année d'arrivée mentionnée ({}) est antérieure à la date de naissance ({})",
                    arrival.format(DATE_FORMAT),
                    birth.format(DATE_FORMAT)
                ),
            )
        })
        .collect()
}

fn check_arrival_before_birth(profile: &ProfileRecord) -> Option<InconsistencyFinding> {
    let (birth, arrival) = (profile.birth_date?, profile.arrival_date?);
    if arrival >= birth {
        return None;
    }
    Some(InconsistencyFinding::error(
        FindingType::Date,
        format!(
            "La date d'arrivée ({}) est antérieure à la date de naissance ({})",
            arrival.format(DATE_FORMAT),
            birth.format(DATE_FORMAT)
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn profile(first: &str, last: &str) -> ProfileRecord {
        ProfileRecord {
            first_name: first.to_string(),
            last_name: last.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn arrival_year_before_birth_is_an_error() {
        let p = ProfileRecord {
            birth_date: date(2018, 1, 1),
            ..profile("Marie", "Dupont")
        };

        let findings = detect("Marie est arrivée en 2015", Some(&p));

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].finding_type, FindingType::Date);
        assert_eq!(findings[0].severity, Severity::Error);
        assert!(findings[0].message.contains("01/01/2015"));
        assert!(findings[0].message.contains("01/01/2018"));
    }

    #[test]
    fn profile_arrival_before_birth_is_an_error() {
        let p = ProfileRecord {
            birth_date: date(2010, 1, 1),
            arrival_date: date(2005, 1, 1),
            ..Default::default()
        };

        let findings = detect("suivi du mois de mars sans incident", Some(&p));

        assert_eq!(
            findings,
            vec![InconsistencyFinding::error(
                FindingType::Date,
                "La date d'arrivée (01/01/2005) est antérieure à la date de naissance (01/01/2010)"
            )]
        );
    }

    #[test]
    fn empty_text_or_missing_profile_yields_nothing() {
        let p = ProfileRecord {
            birth_date: date(2010, 1, 1),
            arrival_date: date(2005, 1, 1),
            ..profile("Jean", "Martin")
        };
        assert!(detect("", Some(&p)).is_empty());
        assert!(detect("Paul est arrivé en 1999", None).is_empty());
    }

    #[test]
    fn blank_text_still_checks_profile_dates() {
        let p = ProfileRecord {
            birth_date: date(2010, 1, 1),
            arrival_date: date(2005, 1, 1),
            ..profile("Jean", "Martin")
        };

        let findings = detect("  \n", Some(&p));

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].finding_type, FindingType::Date);
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn year_equal_to_birth_year_is_not_reported() {
        let p = ProfileRecord {
            birth_date: date(2012, 6, 30),
            ..profile("Jean", "Martin")
        };
        assert!(detect("jean est arrivé en 2012", Some(&p)).is_empty());
        assert_eq!(detect("jean est arrivé en 2011", Some(&p)).len(), 1);
    }

    #[test]
    fn arrival_on_birth_date_is_not_reported() {
        let same_day = ProfileRecord {
            birth_date: date(2010, 3, 15),
            arrival_date: date(2010, 3, 15),
            ..profile("Jean", "Martin")
        };
        assert!(detect("bilan sans incident", Some(&same_day)).is_empty());

        let day_before = ProfileRecord {
            arrival_date: date(2010, 3, 14),
            ..same_day
        };
        assert_eq!(detect("bilan sans incident", Some(&day_before)).len(), 1);
    }

    #[test]
    fn year_scan_ignores_non_ascii_digits() {
        let p = ProfileRecord {
            birth_date: date(2018, 1, 1),
            ..Default::default()
        };

        // The Arabic-Indic "٢" must not swallow the following "2015".
        let findings = detect("arrivé 19\u{662}2015", Some(&p));

        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("01/01/2015"));
    }

    #[test]
    fn unknown_proper_noun_is_a_warning() {
        let p = profile("Jean", "Martin");

        let findings = detect("Jean a rencontré Paul.", Some(&p));

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].finding_type, FindingType::Name);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert!(findings[0].message.contains("« Paul »"));
    }

    #[test]
    fn stoplists_and_profile_names_are_skipped() {
        let p = profile("Lina", "Benali");

        let text = "Elle vit à Paris avec Madame Benali. Le Jeune Lina va bien. Il est en France.";
        let findings = detect(text, Some(&p));

        // Only the sentence-initial "Le" survives every filter.
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("« Le »"));
    }

    #[test]
    fn name_pattern_requires_single_leading_capital() {
        let p = profile("Jean", "Martin");
        let findings = detect("ONU, McDonald, Éric et X sont cités", Some(&p));
        assert!(findings.is_empty(), "{findings:?}");
    }

    #[test]
    fn each_occurrence_is_reported_in_text_order() {
        let p = profile("Jean", "Martin");
        let findings = detect("Paul puis Luc puis Paul", Some(&p));
        let names: Vec<_> = findings.iter().map(|f| f.message.clone()).collect();
        assert_eq!(names.len(), 3);
        assert!(names[0].contains("Paul"));
        assert!(names[1].contains("Luc"));
        assert!(names[2].contains("Paul"));
    }

    #[test]
    fn year_check_needs_arrival_wording_and_birth_date() {
        let born = ProfileRecord {
            birth_date: date(2012, 6, 30),
            ..profile("Jean", "Martin")
        };
        assert!(detect("jean a déménagé en 2005", Some(&born)).is_empty());
        assert!(detect("jean est arrivé en 2015", Some(&born)).is_empty());

        let unknown_birth = profile("Jean", "Martin");
        assert!(detect("jean est arrivé en 2005", Some(&unknown_birth)).is_empty());
    }

    #[test]
    fn arrival_marker_is_case_insensitive() {
        let p = ProfileRecord {
            birth_date: date(2012, 6, 30),
            ..Default::default()
        };
        let findings = detect("jean : ARRIVÉE EN 2008", Some(&p));
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("30/06/2012"));
    }

    #[test]
    fn findings_are_ordered_names_years_then_profile_dates() {
        let p = ProfileRecord {
            birth_date: date(2012, 1, 1),
            arrival_date: date(2011, 1, 1),
            ..profile("Jean", "Martin")
        };

        let findings = detect("arrivé en 2001 puis 2003 avec Paul", Some(&p));

        let kinds: Vec<_> = findings
            .iter()
            .map(|f| (f.finding_type, f.severity))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (FindingType::Name, Severity::Warning),
                (FindingType::Date, Severity::Error),
                (FindingType::Date, Severity::Error),
                (FindingType::Date, Severity::Error),
            ]
        );
        assert!(findings[1].message.contains("01/01/2001"));
        assert!(findings[2].message.contains("01/01/2003"));
        assert!(findings[3].message.starts_with("La date d'arrivée"));
    }

    #[test]
    fn custom_lexicon_extends_exclusions() {
        let lexicon = Lexicon {
            excluded_words: vec!["Lyon".to_string()],
            ..Lexicon::default()
        };
        let detector = InconsistencyDetector::new(lexicon);
        assert_eq!(detector.lexicon().excluded_words, vec!["Lyon"]);
        assert!(detector.lexicon().is_generic_noun("Jeune"));
        let p = profile("Jean", "Martin");

        assert!(detector.detect("jean habite Lyon", Some(&p)).is_empty());
        // Paris is no longer excluded once the list is replaced.
        assert_eq!(detector.detect("jean habite Paris", Some(&p)).len(), 1);
    }

    #[test]
    fn detection_is_deterministic() {
        let p = ProfileRecord {
            birth_date: date(2010, 1, 1),
            arrival_date: date(2005, 1, 1),
            ..profile("Jean", "Martin")
        };
        let text = "Jean est arrivé en 2001 avec Paul.";
        assert_eq!(detect(text, Some(&p)), detect(text, Some(&p)));
    }
}
