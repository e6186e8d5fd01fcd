// src/domain/wire/fields.rs
//! Conversions from article sub-fields to their wire text form.
//!
//! Everything here is pure. Optional inputs degrade to `None` or to an empty
//! variant, never to an error.

use crate::domain::article::{Dateline, GeoPoint};
use crate::domain::vocabulary::Vocabulary;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Written wherever a timestamp is required but the article has none.
pub const DEFAULT_DATETIME: &str = "0001-01-01T00:00:00";

/// Local zone used for timestamps that carry an offset.
pub const LOCAL_TIMEZONE: Tz = chrono_tz::America::Toronto;

pub const DEFAULT_URGENCY: i32 = 3;

pub const WRITETHRU_TYPE: &str = "Writethru";

/// `YYYY-MM-DDTHH:MM:SS` in UTC, no offset suffix.
pub fn format_datetime(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(
        || DEFAULT_DATETIME.to_owned(),
        |dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
    )
}

/// Converted to [`LOCAL_TIMEZONE`] and suffixed with a `±HH:MM` offset.
pub fn format_local_datetime(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(
        || DEFAULT_DATETIME.to_owned(),
        |dt| {
            dt.with_timezone(&LOCAL_TIMEZONE)
                .format("%Y-%m-%dT%H:%M:%S%:z")
                .to_string()
        },
    )
}

/// English ordinal suffix for `n` (`1st`, `12th`, `22nd`, ...).
pub const fn ordinal_suffix(n: u32) -> &'static str {
    if matches!(n % 100, 4..=20) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Writethru {
    pub value: u32,
    /// `"<n><suffix>"`, only for a non-zero counter.
    pub ordinal: Option<String>,
}

impl Writethru {
    pub fn from_sequence(sequence: Option<u32>) -> Self {
        let value = sequence.unwrap_or(0);
        let ordinal = (value != 0).then(|| format!("{value}{}", ordinal_suffix(value)));
        Self { value, ordinal }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
    pub value: i32,
    pub label: Option<String>,
}

impl Ranking {
    pub fn resolve(urgency: Option<i32>, vocabulary: Option<&Vocabulary>) -> Self {
        let value = urgency.unwrap_or(DEFAULT_URGENCY);
        let label = vocabulary
            .and_then(|v| v.name_for(&value.to_string()))
            .map(str::to_owned);
        Self { value, label }
    }
}

pub fn keywords(values: &[String]) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(values.join(","))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categories {
    pub primary: String,
    pub index_code: String,
}

impl Categories {
    pub fn from_names(names: &[&str]) -> Option<Self> {
        let primary = (*names.first()?).to_owned();
        Some(Self {
            primary,
            index_code: names.join(","),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeline {
    /// No located place: only an empty `Placeline` element is written.
    Unknown,
    Located {
        city: Option<String>,
        province: Option<String>,
        country: Option<String>,
        placeline: String,
        coordinates: Option<Coordinates>,
    },
}

impl Placeline {
    pub fn from_dateline(dateline: Option<&Dateline>) -> Self {
        let Some(located) = dateline.and_then(|d| d.located.as_ref()) else {
            return Self::Unknown;
        };
        let placeline = [&located.city, &located.state, &located.country]
            .map(|piece| piece.as_deref().unwrap_or_default())
            .join(";");
        Self::Located {
            city: located.city.clone(),
            province: located.state.clone(),
            country: located.country.clone(),
            placeline,
            coordinates: located.location.map(coordinates),
        }
    }
}

fn coordinates(point: GeoPoint) -> Coordinates {
    Coordinates {
        latitude: decimal_text(point.lat),
        longitude: decimal_text(point.lon),
    }
}

/// Decimal text that always shows a fractional part for finite values (`45.0`, `-79.38`).
pub fn decimal_text(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains(['.', 'e', 'E']) {
        format!("{text}.0")
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::Located;
    use crate::domain::vocabulary::VocabularyItem;
    use chrono::TimeZone;

    #[test]
    fn ordinal_suffix_table() {
        let cases = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (11, "th"),
            (12, "th"),
            (13, "th"),
            (20, "th"),
            (21, "st"),
            (22, "nd"),
            (23, "rd"),
            (24, "th"),
            (101, "st"),
            (111, "th"),
            (121, "st"),
        ];
        for (n, expected) in cases {
            assert_eq!(ordinal_suffix(n), expected, "n = {n}");
        }
        for n in 4..=20 {
            assert_eq!(ordinal_suffix(n), "th", "n = {n}");
        }
    }

    #[test]
    fn writethru_zero_or_absent_has_no_ordinal() {
        assert_eq!(
            Writethru::from_sequence(None),
            Writethru {
                value: 0,
                ordinal: None
            }
        );
        assert_eq!(Writethru::from_sequence(Some(0)).ordinal, None);
    }

    #[test]
    fn writethru_combines_number_and_suffix() {
        let w = Writethru::from_sequence(Some(22));
        assert_eq!(w.value, 22);
        assert_eq!(w.ordinal.as_deref(), Some("22nd"));
    }

    #[test]
    fn missing_datetime_is_sentinel() {
        assert_eq!(format_datetime(None), "0001-01-01T00:00:00");
        assert_eq!(format_local_datetime(None), "0001-01-01T00:00:00");
    }

    #[test]
    fn datetime_formats_with_and_without_offset() {
        let winter = Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 5).unwrap();
        assert_eq!(format_datetime(Some(winter)), "2024-01-15T12:30:05");
        assert_eq!(
            format_local_datetime(Some(winter)),
            "2024-01-15T07:30:05-05:00"
        );

        let summer = Utc.with_ymd_and_hms(2024, 7, 1, 2, 0, 0).unwrap();
        assert_eq!(
            format_local_datetime(Some(summer)),
            "2024-06-30T22:00:00-04:00"
        );
    }

    #[test]
    fn ranking_defaults_and_looks_up_label() {
        let vocabulary = Vocabulary {
            id: "urgency".into(),
            items: vec![VocabularyItem {
                qcode: "3".into(),
                name: Some("Normal".into()),
            }],
        };
        let ranking = Ranking::resolve(None, Some(&vocabulary));
        assert_eq!(ranking.value, 3);
        assert_eq!(ranking.label.as_deref(), Some("Normal"));

        let unmatched = Ranking::resolve(Some(1), Some(&vocabulary));
        assert_eq!(unmatched.value, 1);
        assert_eq!(unmatched.label, None);

        assert_eq!(Ranking::resolve(Some(2), None).label, None);
    }

    #[test]
    fn keywords_join_or_omit() {
        assert_eq!(keywords(&[]), None);
        assert_eq!(
            keywords(&["a".to_owned(), "b".to_owned()]).as_deref(),
            Some("a,b")
        );
    }

    #[test]
    fn categories_take_first_as_primary() {
        assert_eq!(Categories::from_names(&[]), None);
        let c = Categories::from_names(&["Politics", "Economy"]).unwrap();
        assert_eq!(c.primary, "Politics");
        assert_eq!(c.index_code, "Politics,Economy");
    }

    #[test]
    fn placeline_with_city_only() {
        let dateline = Dateline {
            located: Some(Located {
                city: Some("Toronto".into()),
                ..Located::default()
            }),
            text: None,
        };
        match Placeline::from_dateline(Some(&dateline)) {
            Placeline::Located {
                city,
                province,
                country,
                placeline,
                coordinates,
            } => {
                assert_eq!(city.as_deref(), Some("Toronto"));
                assert_eq!(province, None);
                assert_eq!(country, None);
                assert_eq!(placeline, "Toronto;;");
                assert_eq!(coordinates, None);
            }
            Placeline::Unknown => panic!("expected located placeline"),
        }
    }

    #[test]
    fn placeline_without_located_place_is_unknown() {
        assert_eq!(Placeline::from_dateline(None), Placeline::Unknown);
        let empty = Dateline::default();
        assert_eq!(Placeline::from_dateline(Some(&empty)), Placeline::Unknown);
    }

    #[test]
    fn coordinates_render_as_decimal_text() {
        let dateline = Dateline {
            located: Some(Located {
                city: Some("Ottawa".into()),
                state: Some("Ontario".into()),
                country: Some("Canada".into()),
                location: Some(GeoPoint {
                    lat: 45.0,
                    lon: -75.6972,
                }),
            }),
            text: None,
        };
        let Placeline::Located {
            placeline,
            coordinates,
            ..
        } = Placeline::from_dateline(Some(&dateline))
        else {
            panic!("expected located placeline");
        };
        assert_eq!(placeline, "Ottawa;Ontario;Canada");
        let coordinates = coordinates.unwrap();
        assert_eq!(coordinates.latitude, "45.0");
        assert_eq!(coordinates.longitude, "-75.6972");
    }
}
