// FILE: crates/core/src/normalize.rs

//! Metadata normalization
//!
//! Turns one [`RawWorkRecord`] into the catalog's per-attribute shape:
//! - single-valued text loses embedded line breaks and is trimmed
//! - `"A / B / C"` fields become one trimmed value per part
//! - anything missing or empty becomes [`NONE_SENTINEL`] rather than absent

use crate::types::{Attribute, AttributeValue, NormalizedWork, RawWorkRecord};
use regex::Regex;
use std::sync::OnceLock;

/// Stored in place of a missing value
pub const NONE_SENTINEL: &str = "None";

const MULTI_VALUE_SEPARATOR: &str = " / ";

/// Normalizes one fetched record
///
/// Every remote attribute receives a value; `directory` and `creationDate`
/// come from the folder scan and are left to the catalog mutator.
pub fn normalize(record: &RawWorkRecord) -> NormalizedWork {
    let mut work = NormalizedWork::new(record.id.clone());

    work.insert(Attribute::Age, single(record.age.as_deref()));
    work.insert(Attribute::Author, multi(record.author.as_deref()));
    work.insert(Attribute::Circle, single(record.circle.as_deref()));
    work.insert(Attribute::Illustration, multi(record.illustration.as_deref()));
    work.insert(
        Attribute::ProductFormat,
        product_format(record.product_format.as_deref()),
    );
    work.insert(
        Attribute::ReleaseDate,
        release_date(record.release_date.as_deref()),
    );
    work.insert(Attribute::Scenario, multi(record.scenario.as_deref()));
    work.insert(Attribute::Series, single(record.series.as_deref()));
    work.insert(Attribute::Tag, tags(&record.tags));
    work.insert(Attribute::Title, single(record.title.as_deref()));
    work.insert(Attribute::VoiceActor, multi(record.voice_actor.as_deref()));

    work
}

/// Removes embedded line-break characters
pub fn strip_line_breaks(text: &str) -> String {
    text.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

fn sentinel_list() -> AttributeValue {
    AttributeValue::Multi(vec![NONE_SENTINEL.to_string()])
}

fn non_empty(values: Vec<String>) -> AttributeValue {
    if values.is_empty() {
        sentinel_list()
    } else {
        AttributeValue::Multi(values)
    }
}

fn single(raw: Option<&str>) -> AttributeValue {
    let cleaned = raw
        .map(|text| strip_line_breaks(text).trim().to_string())
        .filter(|text| !text.is_empty());

    AttributeValue::Single(cleaned.unwrap_or_else(|| NONE_SENTINEL.to_string()))
}

fn multi(raw: Option<&str>) -> AttributeValue {
    let Some(raw) = raw else {
        return sentinel_list();
    };

    let cleaned = strip_line_breaks(raw);
    non_empty(
        cleaned
            .split(MULTI_VALUE_SEPARATOR)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

fn tags(raw: &[String]) -> AttributeValue {
    non_empty(
        raw.iter()
            .map(|tag| strip_line_breaks(tag).trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect(),
    )
}

fn product_format(raw: Option<&str>) -> AttributeValue {
    let Some(raw) = raw else {
        return sentinel_list();
    };

    // "Voice / ASMR" is one format, not two.
    let cleaned = strip_line_breaks(raw).replace("Voice / ASMR", "Voice/ASMR");
    non_empty(cleaned.split_whitespace().map(str::to_string).collect())
}

fn ordinal_suffix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\b(\d{1,2})(?:st|nd|rd|th)\b")
            .unwrap_or_else(|e| unreachable!("ordinal pattern is valid: {e}"))
    })
}

fn release_date(raw: Option<&str>) -> AttributeValue {
    let Some(raw) = raw else {
        return AttributeValue::Single(NONE_SENTINEL.to_string());
    };

    let cleaned = strip_line_breaks(raw);
    let without_ordinals = ordinal_suffix().replace_all(&cleaned, "$1");
    let collapsed = without_ordinals.split_whitespace().collect::<Vec<_>>().join(" ");

    single(Some(&collapsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WorkId;

    fn record() -> RawWorkRecord {
        RawWorkRecord::new(WorkId::parse("RJ111111").unwrap())
    }

    fn values(work: &NormalizedWork, attribute: Attribute) -> Vec<String> {
        work.get(attribute).unwrap().values().to_vec()
    }

    #[test]
    fn test_multi_value_split() {
        let mut raw = record();
        raw.author = Some("Author A / Author B".to_string());

        let work = normalize(&raw);
        assert_eq!(values(&work, Attribute::Author), vec!["Author A", "Author B"]);
    }

    #[test]
    fn test_empty_multi_value_yields_sentinel() {
        let mut raw = record();
        raw.author = Some(String::new());
        raw.scenario = Some("   ".to_string());

        let work = normalize(&raw);
        assert_eq!(values(&work, Attribute::Author), vec!["None"]);
        assert_eq!(values(&work, Attribute::Scenario), vec!["None"]);
        assert_eq!(values(&work, Attribute::Illustration), vec!["None"]);
    }

    #[test]
    fn test_multi_value_trims_parts() {
        let mut raw = record();
        raw.voice_actor = Some("  Alice   /   Bob  / \nCarol ".to_string());

        let work = normalize(&raw);
        assert_eq!(
            values(&work, Attribute::VoiceActor),
            vec!["Alice", "Bob", "Carol"]
        );
    }

    #[test]
    fn test_single_values_strip_line_breaks() {
        let mut raw = record();
        raw.title = Some("\nSome\r\n Title\n".to_string());
        raw.circle = Some("Circle\n".to_string());

        let work = normalize(&raw);
        assert_eq!(
            work.get(Attribute::Title),
            Some(&AttributeValue::Single("Some Title".to_string()))
        );
        assert_eq!(values(&work, Attribute::Circle), vec!["Circle"]);
    }

    #[test]
    fn test_missing_single_values_default_to_sentinel() {
        let work = normalize(&record());
        for attribute in [
            Attribute::Age,
            Attribute::Circle,
            Attribute::ReleaseDate,
            Attribute::Series,
            Attribute::Title,
        ] {
            assert_eq!(
                work.get(attribute),
                Some(&AttributeValue::Single("None".to_string())),
                "{attribute}"
            );
        }
    }

    #[test]
    fn test_every_remote_attribute_present() {
        let work = normalize(&record());
        for attribute in Attribute::remote() {
            assert!(work.get(attribute).is_some(), "{attribute}");
        }
        assert!(work.get(Attribute::Directory).is_none());
        assert!(work.get(Attribute::CreationDate).is_none());
    }

    #[test]
    fn test_release_date_ordinals() {
        let mut raw = record();

        raw.release_date = Some("Jun 1st 2020".to_string());
        assert_eq!(values(&normalize(&raw), Attribute::ReleaseDate), vec!["Jun 1 2020"]);

        raw.release_date = Some("Jul 22nd, 2019\n".to_string());
        assert_eq!(values(&normalize(&raw), Attribute::ReleaseDate), vec!["Jul 22, 2019"]);

        raw.release_date = Some("Mar 3rd 2021".to_string());
        assert_eq!(values(&normalize(&raw), Attribute::ReleaseDate), vec!["Mar 3 2021"]);

        raw.release_date = Some("Oct 10th 2010".to_string());
        assert_eq!(values(&normalize(&raw), Attribute::ReleaseDate), vec!["Oct 10 2010"]);
    }

    #[test]
    fn test_release_date_keeps_plain_numbers() {
        let mut raw = record();
        raw.release_date = Some("2020/06/10".to_string());
        assert_eq!(values(&normalize(&raw), Attribute::ReleaseDate), vec!["2020/06/10"]);

        raw.release_date = Some("Apr 10 2020".to_string());
        assert_eq!(values(&normalize(&raw), Attribute::ReleaseDate), vec!["Apr 10 2020"]);
    }

    #[test]
    fn test_product_format_tokens() {
        let mut raw = record();
        raw.product_format = Some(" Voice / ASMR  Japanese\nAudio ".to_string());

        let work = normalize(&raw);
        assert_eq!(
            values(&work, Attribute::ProductFormat),
            vec!["Voice/ASMR", "JapaneseAudio"]
        );
    }

    #[test]
    fn test_tags() {
        let mut raw = record();
        raw.tags = vec![" Healing ".into(), "".into(), "Binaural\n".into()];
        assert_eq!(values(&normalize(&raw), Attribute::Tag), vec!["Healing", "Binaural"]);

        raw.tags.clear();
        assert_eq!(values(&normalize(&raw), Attribute::Tag), vec!["None"]);
    }
}
