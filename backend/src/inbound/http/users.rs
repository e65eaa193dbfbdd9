//! Users API handler.
//!
//! ```text
//! GET /api/users?page=2&limit=10
//! GET /api/users?groupBy=gender
//! ```
//!
//! A non-empty `groupBy` selects grouping mode and the paging parameters are
//! ignored; otherwise the request is a paginated listing.

use actix_web::{get, web};
use pagination::{Page, PageRequest};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{GroupCount, UserField, UserGroups, UserRecord};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;

/// Raw query string for `GET /api/users`.
///
/// Paging values stay textual so malformed input falls back to defaults
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UsersQueryParams {
    /// 1-based page number; defaults to 1.
    #[param(value_type = Option<u32>, example = 2)]
    pub page: Option<String>,
    /// Page size; defaults to 10.
    #[param(value_type = Option<u32>, example = 10)]
    pub limit: Option<String>,
    /// Field to group by; switches the endpoint to grouping mode.
    #[param(example = "gender")]
    pub group_by: Option<String>,
}

impl UsersQueryParams {
    fn group_field(&self) -> Option<&str> {
        self.group_by.as_deref().filter(|field| !field.is_empty())
    }

    fn page_request(&self) -> PageRequest {
        PageRequest::from_query(self.page.as_deref(), self.limit.as_deref())
    }
}

/// One user as exposed over HTTP.
///
/// Only known attributes are emitted, under their stored names, with the
/// identifier renamed to `id`. Absent attributes are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "64f1c0ffee64f1c0ffee64f1")]
    pub id: String,
    #[serde(rename = "Number", default, skip_serializing_if = "Option::is_none")]
    pub number: Option<i64>,
    #[serde(
        rename = "Name_of_Location",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub location_name: Option<String>,
    #[serde(rename = "Date", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "Login_Hour", default, skip_serializing_if = "Option::is_none")]
    pub login_hour: Option<String>,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "Age", default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Male")]
    pub gender: Option<String>,
    #[serde(rename = "Email", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "No_Telp", default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(
        rename = "Brand_Device",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub device_brand: Option<String>,
    #[serde(
        rename = "Digital_Interest",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub digital_interest: Option<String>,
    #[serde(
        rename = "Location_Type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub location_type: Option<String>,
    /// RFC 3339 with millisecond precision.
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "2024-03-09T16:00:00.000Z")]
    pub created_at: Option<String>,
    /// RFC 3339 with millisecond precision.
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<UserRecord> for UserResponse {
    fn from(record: UserRecord) -> Self {
        let created_at = record.field_text(UserField::CreatedAt);
        let updated_at = record.field_text(UserField::UpdatedAt);
        Self {
            id: record.id.to_string(),
            number: record.number,
            location_name: record.location_name,
            date: record.date,
            login_hour: record.login_hour,
            name: record.name,
            age: record.age,
            gender: record.gender,
            email: record.email,
            phone_number: record.phone_number,
            device_brand: record.device_brand,
            digital_interest: record.digital_interest,
            location_type: record.location_type,
            created_at,
            updated_at,
        }
    }
}

/// Pagination-mode response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UsersPageResponse {
    /// Number of records in the whole collection.
    #[schema(example = 25)]
    pub total: u64,
    /// Effective page number.
    #[schema(example = 2)]
    pub page: u32,
    /// Effective page size.
    #[schema(example = 10)]
    pub limit: u32,
    /// Records on this page, in natural store order.
    pub users: Vec<UserResponse>,
}

impl From<Page<UserRecord>> for UsersPageResponse {
    fn from(page: Page<UserRecord>) -> Self {
        let (total, request, items) = page.into_parts();
        Self {
            total,
            page: request.page(),
            limit: request.limit(),
            users: items.into_iter().map(UserResponse::from).collect(),
        }
    }
}

/// Number of users sharing one lowercased value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GroupCountResponse {
    /// Lowercased value; `""` collects users without the attribute.
    #[schema(example = "male")]
    pub value: String,
    /// Users carrying the value.
    #[schema(example = 2)]
    pub count: u64,
}

impl From<GroupCount> for GroupCountResponse {
    fn from(group: GroupCount) -> Self {
        Self {
            value: group.value,
            count: group.count,
        }
    }
}

/// Grouping-mode response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserGroupsResponse {
    /// Field the collection was grouped by.
    #[schema(example = "gender")]
    pub grouped_by: String,
    /// One entry per distinct value; order is unspecified.
    pub groups: Vec<GroupCountResponse>,
}

impl From<UserGroups> for UserGroupsResponse {
    fn from(groups: UserGroups) -> Self {
        Self {
            grouped_by: groups.field.as_str().to_owned(),
            groups: groups
                .groups
                .into_iter()
                .map(GroupCountResponse::from)
                .collect(),
        }
    }
}

/// Either response shape of `GET /api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ListUsersResponse {
    /// Returned when `groupBy` is absent or empty.
    Page(UsersPageResponse),
    /// Returned when `groupBy` names a permitted field.
    Groups(UserGroupsResponse),
}

/// List users one page at a time, or count them grouped by a field.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use users_api::inbound::http::users::list_users;
///
/// let app = App::new().service(web::scope("/api").service(list_users));
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    params(UsersQueryParams),
    responses(
        (status = 200, description = "Page of users or grouped counts", body = ListUsersResponse),
        (status = 400, description = "Unknown groupBy field", body = ErrorBody),
        (status = 500, description = "Store query failed", body = ErrorBody),
        (status = 503, description = "Store unreachable", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<UsersQueryParams>,
) -> ApiResult<web::Json<ListUsersResponse>> {
    let params = query.into_inner();
    if let Some(field) = params.group_field() {
        debug!(field, "grouping users");
        let groups = state.users.group_users(field).await?;
        return Ok(web::Json(ListUsersResponse::Groups(groups.into())));
    }

    let page = state.users.list_users(params.page_request()).await?;
    Ok(web::Json(ListUsersResponse::Page(page.into())))
}

#[cfg(test)]
mod tests;
