//! User record model and the fixed set of groupable fields.
//!
//! Records are created outside this service; the domain only reads them.
//! Every attribute except the identifier is optional because the store does
//! not enforce a schema.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

/// Validation errors raised while building a [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// Store-assigned identifiers are never blank.
    #[error("user id must not be empty")]
    EmptyId,
}

/// Store-assigned user identifier.
///
/// Opaque text; MongoDB object ids are carried as their hex form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Validate and construct an identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One stored user document.
///
/// # Examples
/// ```
/// use users_api::domain::{UserField, UserId, UserRecord};
///
/// let mut record = UserRecord::new(UserId::new("64f1c0ffee").expect("id"));
/// record.gender = Some("Male".to_owned());
/// assert_eq!(record.group_key(UserField::Gender), "male");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Unique, immutable identifier.
    pub id: UserId,
    /// Sequence number from the source dataset.
    pub number: Option<i64>,
    /// Name of the location the user logged in from.
    pub location_name: Option<String>,
    /// Free-form date text; never parsed.
    pub date: Option<String>,
    /// Login hour text.
    pub login_hour: Option<String>,
    /// Full name.
    pub name: Option<String>,
    /// Age in years.
    pub age: Option<i64>,
    /// Gender as captured, with its original casing.
    pub gender: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone_number: Option<String>,
    /// Device brand.
    pub device_brand: Option<String>,
    /// Digital interest category.
    pub digital_interest: Option<String>,
    /// Location type.
    pub location_type: Option<String>,
    /// Maintained by the store on insert.
    pub created_at: Option<DateTime<Utc>>,
    /// Maintained by the store on update.
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    /// Record with only an identifier; attributes start absent.
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            number: None,
            location_name: None,
            date: None,
            login_hour: None,
            name: None,
            age: None,
            gender: None,
            email: None,
            phone_number: None,
            device_brand: None,
            digital_interest: None,
            location_type: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// String form of `field`, or `None` when the attribute is absent.
    ///
    /// Timestamps render as RFC 3339 with millisecond precision and a `Z`
    /// suffix, matching the store's own string conversion.
    pub fn field_text(&self, field: UserField) -> Option<String> {
        let text = |value: &Option<String>| value.clone();
        let integer = |value: &Option<i64>| value.map(|n| n.to_string());
        let timestamp = |value: &Option<DateTime<Utc>>| {
            value.map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true))
        };
        match field {
            UserField::Id => Some(self.id.to_string()),
            UserField::Number => integer(&self.number),
            UserField::LocationName => text(&self.location_name),
            UserField::Date => text(&self.date),
            UserField::LoginHour => text(&self.login_hour),
            UserField::Name => text(&self.name),
            UserField::Age => integer(&self.age),
            UserField::Gender => text(&self.gender),
            UserField::Email => text(&self.email),
            UserField::PhoneNumber => text(&self.phone_number),
            UserField::DeviceBrand => text(&self.device_brand),
            UserField::DigitalInterest => text(&self.digital_interest),
            UserField::LocationType => text(&self.location_type),
            UserField::CreatedAt => timestamp(&self.created_at),
            UserField::UpdatedAt => timestamp(&self.updated_at),
        }
    }

    /// Case-insensitive grouping key for `field`.
    ///
    /// Absent attributes fall into the empty-string group.
    pub fn group_key(&self, field: UserField) -> String {
        self.field_text(field)
            .map(|value| value.to_lowercase())
            .unwrap_or_default()
    }
}

/// Raised when a client names a field outside the user schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid groupBy field: {name}")]
pub struct UnknownFieldError {
    /// The rejected field name, exactly as supplied.
    pub name: String,
}

/// Schema paths a client may group by.
///
/// Names match the stored document keys exactly (case-sensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    /// `_id`
    Id,
    /// `Number`
    Number,
    /// `Name_of_Location`
    LocationName,
    /// `Date`
    Date,
    /// `Login_Hour`
    LoginHour,
    /// `Name`
    Name,
    /// `Age`
    Age,
    /// `gender`
    Gender,
    /// `Email`
    Email,
    /// `No_Telp`
    PhoneNumber,
    /// `Brand_Device`
    DeviceBrand,
    /// `Digital_Interest`
    DigitalInterest,
    /// `Location_Type`
    LocationType,
    /// `createdAt`
    CreatedAt,
    /// `updatedAt`
    UpdatedAt,
}

impl UserField {
    /// Every permitted field.
    pub const ALL: [UserField; 15] = [
        Self::Id,
        Self::Number,
        Self::LocationName,
        Self::Date,
        Self::LoginHour,
        Self::Name,
        Self::Age,
        Self::Gender,
        Self::Email,
        Self::PhoneNumber,
        Self::DeviceBrand,
        Self::DigitalInterest,
        Self::LocationType,
        Self::CreatedAt,
        Self::UpdatedAt,
    ];

    /// Document key for this field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "_id",
            Self::Number => "Number",
            Self::LocationName => "Name_of_Location",
            Self::Date => "Date",
            Self::LoginHour => "Login_Hour",
            Self::Name => "Name",
            Self::Age => "Age",
            Self::Gender => "gender",
            Self::Email => "Email",
            Self::PhoneNumber => "No_Telp",
            Self::DeviceBrand => "Brand_Device",
            Self::DigitalInterest => "Digital_Interest",
            Self::LocationType => "Location_Type",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserField {
    type Err = UnknownFieldError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == name)
            .ok_or_else(|| UnknownFieldError {
                name: name.to_owned(),
            })
    }
}

/// Number of records sharing one grouping key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCount {
    /// Lowercased string form of the field value.
    pub value: String,
    /// Records carrying that value.
    pub count: u64,
}

impl GroupCount {
    /// Pair a key with its count.
    pub fn new(value: impl Into<String>, count: u64) -> Self {
        Self {
            value: value.into(),
            count,
        }
    }
}

/// Result of grouping the whole collection by one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserGroups {
    /// Field the collection was partitioned by.
    pub field: UserField,
    /// One entry per distinct key; order is unspecified.
    pub groups: Vec<GroupCount>,
}
