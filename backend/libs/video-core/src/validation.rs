//! Field rules for create and replace payloads
//!
//! Every rule runs and every violation is collected. Errors come out in field
//! order: title, author, availableResolutions, minAgeRestriction,
//! canBeDownloaded, publicationDate.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::constants::{
    MAX_AGE_RESTRICTION, MAX_AUTHOR_LENGTH, MAX_TITLE_LENGTH, MIN_AGE_RESTRICTION,
};
use crate::error::ValidationErrors;
use crate::models::{
    CreateVideoRequest, FieldUpdate, NewVideo, Resolution, UpdateVideoRequest, VideoUpdate,
};

pub const FIELD_TITLE: &str = "title";
pub const FIELD_AUTHOR: &str = "author";
pub const FIELD_AVAILABLE_RESOLUTIONS: &str = "availableResolutions";
pub const FIELD_MIN_AGE_RESTRICTION: &str = "minAgeRestriction";
pub const FIELD_CAN_BE_DOWNLOADED: &str = "canBeDownloaded";
pub const FIELD_PUBLICATION_DATE: &str = "publicationDate";

/// Validate a create payload.
///
/// `minAgeRestriction` is server-controlled on create, so whatever the client
/// sends there is dropped rather than rejected.
pub fn validate_create(req: &CreateVideoRequest) -> Result<NewVideo, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let title = check_text(&mut errors, FIELD_TITLE, "Title", req.title.as_ref(), MAX_TITLE_LENGTH);
    let author = check_text(
        &mut errors,
        FIELD_AUTHOR,
        "Author",
        req.author.as_ref(),
        MAX_AUTHOR_LENGTH,
    );
    let available_resolutions = check_resolutions(&mut errors, req.available_resolutions.as_ref());

    if req.min_age_restriction.as_ref().is_some_and(|v| !v.is_null()) {
        tracing::debug!("Ignoring client-supplied minAgeRestriction on create");
    }

    match (title, author, available_resolutions) {
        (Some(title), Some(author), Some(available_resolutions)) if errors.is_empty() => {
            Ok(NewVideo {
                title,
                author,
                available_resolutions,
            })
        }
        _ => Err(errors),
    }
}

/// Validate a replace payload.
///
/// Optional fields that were not sent become [`FieldUpdate::Keep`]. An explicit
/// `null` for `minAgeRestriction` clears the restriction.
pub fn validate_update(req: &UpdateVideoRequest) -> Result<VideoUpdate, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let title = check_text(&mut errors, FIELD_TITLE, "Title", req.title.as_ref(), MAX_TITLE_LENGTH);
    let author = check_text(
        &mut errors,
        FIELD_AUTHOR,
        "Author",
        req.author.as_ref(),
        MAX_AUTHOR_LENGTH,
    );
    let available_resolutions = check_resolutions(&mut errors, req.available_resolutions.as_ref());
    let min_age_restriction = check_min_age(&mut errors, req.min_age_restriction.as_ref());
    let can_be_downloaded = check_can_be_downloaded(&mut errors, req.can_be_downloaded.as_ref());
    let publication_date = check_publication_date(&mut errors, req.publication_date.as_ref());

    match (
        title,
        author,
        available_resolutions,
        min_age_restriction,
        can_be_downloaded,
        publication_date,
    ) {
        (
            Some(title),
            Some(author),
            Some(available_resolutions),
            Some(min_age_restriction),
            Some(can_be_downloaded),
            Some(publication_date),
        ) if errors.is_empty() => Ok(VideoUpdate {
            title,
            author,
            available_resolutions,
            can_be_downloaded,
            min_age_restriction,
            publication_date,
        }),
        _ => Err(errors),
    }
}

fn check_text(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    value: Option<&Value>,
    max_len: usize,
) -> Option<String> {
    let text = match value.and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            errors.push(field, format!("{label} is required and must be a non-empty string"));
            return None;
        }
    };

    if text.chars().count() > max_len {
        errors.push(field, format!("{label} must be no longer than {max_len} characters"));
        return None;
    }

    Some(text.to_string())
}

fn check_resolutions(errors: &mut ValidationErrors, value: Option<&Value>) -> Option<Vec<Resolution>> {
    let items = match value.and_then(Value::as_array) {
        Some(items) if !items.is_empty() => items,
        _ => {
            errors.push(
                FIELD_AVAILABLE_RESOLUTIONS,
                "Available resolutions must be a non-empty array",
            );
            return None;
        }
    };

    let mut resolutions = Vec::with_capacity(items.len());
    let mut invalid = Vec::new();
    for item in items {
        match item.as_str().and_then(|s| s.parse::<Resolution>().ok()) {
            Some(resolution) => {
                if !resolutions.contains(&resolution) {
                    resolutions.push(resolution);
                }
            }
            None => invalid.push(match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            }),
        }
    }

    if !invalid.is_empty() {
        errors.push(
            FIELD_AVAILABLE_RESOLUTIONS,
            format!("Invalid resolution value: {}", invalid.join(", ")),
        );
        return None;
    }

    Some(resolutions)
}

fn check_min_age(errors: &mut ValidationErrors, value: Option<&Value>) -> Option<FieldUpdate<Option<u8>>> {
    match value {
        None => Some(FieldUpdate::Keep),
        Some(Value::Null) => Some(FieldUpdate::Set(None)),
        Some(v) => match v.as_i64() {
            Some(age) if (MIN_AGE_RESTRICTION..=MAX_AGE_RESTRICTION).contains(&age) => {
                u8::try_from(age).ok().map(|age| FieldUpdate::Set(Some(age)))
            }
            _ => {
                errors.push(
                    FIELD_MIN_AGE_RESTRICTION,
                    format!(
                        "minAgeRestriction must be null or an integer between {MIN_AGE_RESTRICTION} and {MAX_AGE_RESTRICTION}"
                    ),
                );
                None
            }
        },
    }
}

fn check_can_be_downloaded(errors: &mut ValidationErrors, value: Option<&Value>) -> Option<FieldUpdate<bool>> {
    match value {
        None => Some(FieldUpdate::Keep),
        Some(Value::Bool(flag)) => Some(FieldUpdate::Set(*flag)),
        Some(_) => {
            errors.push(FIELD_CAN_BE_DOWNLOADED, "canBeDownloaded must be a boolean");
            None
        }
    }
}

fn check_publication_date(
    errors: &mut ValidationErrors,
    value: Option<&Value>,
) -> Option<FieldUpdate<DateTime<Utc>>> {
    match value {
        None => Some(FieldUpdate::Keep),
        Some(v) => match v.as_str().and_then(parse_date) {
            Some(date) => Some(FieldUpdate::Set(date)),
            None => {
                errors.push(FIELD_PUBLICATION_DATE, "Publication date must be a valid date");
                None
            }
        },
    }
}

/// Accepts RFC 3339 timestamps, zone-less date-times and plain `YYYY-MM-DD`
/// dates. Anything without an offset is taken as UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn create(body: Value) -> Result<NewVideo, ValidationErrors> {
        validate_create(&serde_json::from_value(body).unwrap())
    }

    fn update(body: Value) -> Result<VideoUpdate, ValidationErrors> {
        validate_update(&serde_json::from_value(body).unwrap())
    }

    #[test]
    fn test_create_valid() {
        let new_video = create(json!({
            "title": "Ocean",
            "author": "Jane Doe",
            "availableResolutions": ["P720"],
        }))
        .unwrap();

        assert_eq!(new_video.title, "Ocean");
        assert_eq!(new_video.author, "Jane Doe");
        assert_eq!(new_video.available_resolutions, vec![Resolution::P720]);
    }

    #[test]
    fn test_create_empty_title_single_error() {
        let errors = create(json!({
            "title": "",
            "author": "Jane",
            "availableResolutions": ["P720"],
        }))
        .unwrap_err();

        assert_eq!(errors.fields(), vec![FIELD_TITLE]);
    }

    #[test]
    fn test_create_whitespace_title_rejected() {
        let errors = create(json!({
            "title": "   ",
            "author": "Jane",
            "availableResolutions": ["P720"],
        }))
        .unwrap_err();

        assert_eq!(errors.fields(), vec![FIELD_TITLE]);
    }

    #[test]
    fn test_create_length_limits() {
        let errors = create(json!({
            "title": "t".repeat(MAX_TITLE_LENGTH + 1),
            "author": "a".repeat(MAX_AUTHOR_LENGTH + 1),
            "availableResolutions": ["P720"],
        }))
        .unwrap_err();
        assert_eq!(errors.fields(), vec![FIELD_TITLE, FIELD_AUTHOR]);

        assert!(create(json!({
            "title": "t".repeat(MAX_TITLE_LENGTH),
            "author": "a".repeat(MAX_AUTHOR_LENGTH),
            "availableResolutions": ["P720"],
        }))
        .is_ok());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        assert!(create(json!({
            "title": "é".repeat(MAX_TITLE_LENGTH),
            "author": "Jane",
            "availableResolutions": ["P720"],
        }))
        .is_ok());
    }

    #[test]
    fn test_create_unknown_resolution() {
        let errors = create(json!({
            "title": "Ocean",
            "author": "Jane",
            "availableResolutions": ["P720", "P999"],
        }))
        .unwrap_err();

        assert_eq!(errors.fields(), vec![FIELD_AVAILABLE_RESOLUTIONS]);
        assert!(errors.errors()[0].message.contains("P999"));
    }

    #[test]
    fn test_create_resolutions_must_be_non_empty_array() {
        for bad in [json!([]), json!("P720"), json!(null)] {
            let errors = create(json!({
                "title": "Ocean",
                "author": "Jane",
                "availableResolutions": bad,
            }))
            .unwrap_err();
            assert_eq!(errors.fields(), vec![FIELD_AVAILABLE_RESOLUTIONS]);
        }
    }

    #[test]
    fn test_duplicate_resolutions_collapse() {
        let new_video = create(json!({
            "title": "Ocean",
            "author": "Jane",
            "availableResolutions": ["P720", "P144", "P720"],
        }))
        .unwrap();

        assert_eq!(
            new_video.available_resolutions,
            vec![Resolution::P720, Resolution::P144]
        );
    }

    #[test]
    fn test_create_collects_all_errors_in_order() {
        let errors = create(json!({ "title": 5 })).unwrap_err();
        assert_eq!(
            errors.fields(),
            vec![FIELD_TITLE, FIELD_AUTHOR, FIELD_AVAILABLE_RESOLUTIONS]
        );
    }

    #[test]
    fn test_create_ignores_min_age_restriction() {
        assert!(create(json!({
            "title": "Ocean",
            "author": "Jane",
            "availableResolutions": ["P720"],
            "minAgeRestriction": 99,
        }))
        .is_ok());
    }

    #[test]
    fn test_update_min_age_out_of_range() {
        let errors = update(json!({
            "title": "Ocean",
            "author": "Jane",
            "availableResolutions": ["P720"],
            "minAgeRestriction": 25,
        }))
        .unwrap_err();

        assert_eq!(errors.fields(), vec![FIELD_MIN_AGE_RESTRICTION]);
    }

    #[test]
    fn test_update_min_age_presence() {
        let base = json!({
            "title": "Ocean",
            "author": "Jane",
            "availableResolutions": ["P720"],
        });
        assert_eq!(update(base.clone()).unwrap().min_age_restriction, FieldUpdate::Keep);

        let mut cleared = base.clone();
        cleared["minAgeRestriction"] = Value::Null;
        assert_eq!(update(cleared).unwrap().min_age_restriction, FieldUpdate::Set(None));

        let mut set = base.clone();
        set["minAgeRestriction"] = json!(18);
        assert_eq!(update(set).unwrap().min_age_restriction, FieldUpdate::Set(Some(18)));

        let mut fractional = base;
        fractional["minAgeRestriction"] = json!(12.5);
        assert!(update(fractional).is_err());
    }

    #[test]
    fn test_update_false_is_a_real_value() {
        let video_update = update(json!({
            "title": "Ocean",
            "author": "Jane",
            "availableResolutions": ["P720"],
            "canBeDownloaded": false,
        }))
        .unwrap();

        assert_eq!(video_update.can_be_downloaded, FieldUpdate::Set(false));
    }

    #[test]
    fn test_update_type_errors_in_field_order() {
        let errors = update(json!({
            "title": "Ocean",
            "author": "Jane",
            "availableResolutions": ["P720"],
            "publicationDate": "not a date",
            "canBeDownloaded": "yes",
            "minAgeRestriction": 0,
        }))
        .unwrap_err();

        assert_eq!(
            errors.fields(),
            vec![
                FIELD_MIN_AGE_RESTRICTION,
                FIELD_CAN_BE_DOWNLOADED,
                FIELD_PUBLICATION_DATE
            ]
        );
    }

    #[test]
    fn test_update_null_flag_and_date_rejected() {
        let errors = update(json!({
            "title": "Ocean",
            "author": "Jane",
            "availableResolutions": ["P720"],
            "canBeDownloaded": null,
            "publicationDate": null,
        }))
        .unwrap_err();

        assert_eq!(
            errors.fields(),
            vec![FIELD_CAN_BE_DOWNLOADED, FIELD_PUBLICATION_DATE]
        );
    }

    #[test]
    fn test_parse_date_formats() {
        let midnight = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_date("2024-05-01"), Some(midnight));
        assert_eq!(parse_date("2024-05-01T00:00:00.000Z"), Some(midnight));
        assert_eq!(parse_date("2024-05-01T02:00:00+02:00"), Some(midnight));
        assert_eq!(parse_date("2024-05-01T00:00:00"), Some(midnight));
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date(""), None);
    }
}
