//! Mapping between BSON documents and domain user records.
//!
//! Decoding is an allow-list projection: only known keys are read, so stray
//! keys in stored documents (version counters, empty-named columns left by
//! CSV imports) never reach the domain. Attribute values are coerced the way
//! a schema-aware ODM would cast them; values that cannot be coerced are
//! treated as absent.

use bson::{Bson, Document, doc};
use chrono::{DateTime, Utc};

use crate::domain::ports::UserStoreError;
use crate::domain::{GroupCount, UserField, UserId, UserRecord};

/// Decode one stored document into a user record.
pub(super) fn decode_user(document: &Document) -> Result<UserRecord, UserStoreError> {
    let id = match document.get(UserField::Id.as_str()) {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(text)) => text.clone(),
        Some(Bson::Null) | None => {
            return Err(UserStoreError::decode("document has no _id"));
        }
        Some(other) => other.to_string(),
    };
    let id = UserId::new(id).map_err(|err| UserStoreError::decode(err.to_string()))?;

    let mut record = UserRecord::new(id);
    record.number = integer(document, UserField::Number);
    record.location_name = text(document, UserField::LocationName);
    record.date = text(document, UserField::Date);
    record.login_hour = text(document, UserField::LoginHour);
    record.name = text(document, UserField::Name);
    record.age = integer(document, UserField::Age);
    record.gender = text(document, UserField::Gender);
    record.email = text(document, UserField::Email);
    record.phone_number = text(document, UserField::PhoneNumber);
    record.device_brand = text(document, UserField::DeviceBrand);
    record.digital_interest = text(document, UserField::DigitalInterest);
    record.location_type = text(document, UserField::LocationType);
    record.created_at = timestamp(document, UserField::CreatedAt);
    record.updated_at = timestamp(document, UserField::UpdatedAt);
    Ok(record)
}

fn text(document: &Document, field: UserField) -> Option<String> {
    match document.get(field.as_str())? {
        Bson::String(value) => Some(value.clone()),
        Bson::Int32(value) => Some(value.to_string()),
        Bson::Int64(value) => Some(value.to_string()),
        Bson::Double(value) => Some(value.to_string()),
        Bson::Boolean(value) => Some(value.to_string()),
        _ => None,
    }
}

fn integer(document: &Document, field: UserField) -> Option<i64> {
    match document.get(field.as_str())? {
        Bson::Int32(value) => Some(i64::from(*value)),
        Bson::Int64(value) => Some(*value),
        Bson::Double(value) => integral_double(*value),
        Bson::String(value) => value.trim().parse().ok(),
        _ => None,
    }
}

fn integral_double(value: f64) -> Option<i64> {
    const LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53
    if value.fract() == 0.0 && value.abs() <= LIMIT {
        // Exact: integral and within the contiguous integer range of f64.
        Some(value as i64)
    } else {
        None
    }
}

fn timestamp(document: &Document, field: UserField) -> Option<DateTime<Utc>> {
    match document.get(field.as_str())? {
        Bson::DateTime(value) => Some(value.to_chrono()),
        Bson::String(value) => DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|parsed| parsed.with_timezone(&Utc)),
        _ => None,
    }
}

/// Aggregation grouping the whole collection by the lowercased string form
/// of `field`. Missing and null values land in the `""` group.
pub(super) fn group_pipeline(field: UserField) -> Vec<Document> {
    let path = format!("${}", field.as_str());
    vec![doc! {
        "$group": {
            "_id": { "$toLower": { "$toString": path } },
            "count": { "$sum": 1 },
        }
    }]
}

/// Decode one `{ _id, count }` aggregation result.
pub(super) fn decode_group(document: &Document) -> Result<GroupCount, UserStoreError> {
    let value = match document.get("_id") {
        Some(Bson::String(value)) => value.clone(),
        Some(Bson::Null) | None => String::new(),
        Some(other) => other.to_string().to_lowercase(),
    };
    let count = match document.get("count") {
        Some(Bson::Int32(count)) => u64::try_from(*count).ok(),
        Some(Bson::Int64(count)) => u64::try_from(*count).ok(),
        _ => None,
    }
    .ok_or_else(|| UserStoreError::decode(format!("group {value:?} has no usable count")))?;
    Ok(GroupCount::new(value, count))
}

#[cfg(test)]
mod tests {
    //! Decoding coverage for stored documents and aggregation rows.
    use super::*;
    use bson::oid::ObjectId;
    use rstest::rstest;

    #[rstest]
    fn decode_user_projects_known_fields_only() {
        let oid = ObjectId::parse_str("64f1c0ffee64f1c0ffee64f1").expect("oid");
        let created = bson::DateTime::from_millis(1_710_000_000_000);
        let document = doc! {
            "_id": oid,
            "": "stray",
            "__v": 0,
            "Number": 12,
            "Name": "Budi",
            "Age": 27.0,
            "gender": "Male",
            "Login_Hour": 9,
            "createdAt": created,
        };

        let record = decode_user(&document).expect("document decodes");

        assert_eq!(record.id.as_ref(), "64f1c0ffee64f1c0ffee64f1");
        assert_eq!(record.number, Some(12));
        assert_eq!(record.name.as_deref(), Some("Budi"));
        assert_eq!(record.age, Some(27));
        assert_eq!(record.gender.as_deref(), Some("Male"));
        assert_eq!(record.login_hour.as_deref(), Some("9"));
        assert_eq!(record.created_at, Some(created.to_chrono()));
        assert_eq!(record.email, None);
    }

    #[rstest]
    fn decode_user_accepts_string_ids() {
        let record = decode_user(&doc! { "_id": "u-1" }).expect("decodes");
        assert_eq!(record.id.as_ref(), "u-1");
    }

    #[rstest]
    #[case(doc! { "Name": "nobody" })]
    #[case(doc! { "_id": bson::Bson::Null })]
    #[case(doc! { "_id": "  " })]
    fn decode_user_requires_identifier(#[case] document: Document) {
        let err = decode_user(&document).expect_err("identifier required");
        assert!(matches!(err, UserStoreError::Decode { .. }));
    }

    #[rstest]
    #[case(Bson::Int32(31), Some(31))]
    #[case(Bson::Int64(31), Some(31))]
    #[case(Bson::Double(31.0), Some(31))]
    #[case(Bson::Double(31.5), None)]
    #[case(Bson::String(" 31 ".to_owned()), Some(31))]
    #[case(Bson::String("thirty".to_owned()), None)]
    #[case(Bson::Boolean(true), None)]
    fn integers_are_coerced(#[case] value: Bson, #[case] expected: Option<i64>) {
        let document = doc! { "_id": "u-1", "Age": value };
        let record = decode_user(&document).expect("decodes");
        assert_eq!(record.age, expected);
    }

    #[rstest]
    fn group_pipeline_lowercases_string_form() {
        let pipeline = group_pipeline(UserField::Gender);
        assert_eq!(
            pipeline,
            vec![doc! {
                "$group": {
                    "_id": { "$toLower": { "$toString": "$gender" } },
                    "count": { "$sum": 1 },
                }
            }]
        );
    }

    #[rstest]
    #[case(doc! { "_id": "male", "count": 2 }, GroupCount::new("male", 2))]
    #[case(doc! { "_id": "", "count": 5_i64 }, GroupCount::new("", 5))]
    #[case(doc! { "_id": Bson::Null, "count": 1 }, GroupCount::new("", 1))]
    fn decode_group_reads_value_and_count(#[case] document: Document, #[case] expected: GroupCount) {
        assert_eq!(decode_group(&document).expect("decodes"), expected);
    }

    #[rstest]
    fn decode_group_rejects_missing_count() {
        let err = decode_group(&doc! { "_id": "male" }).expect_err("count required");
        assert!(matches!(err, UserStoreError::Decode { .. }));
    }
}
