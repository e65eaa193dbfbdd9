//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the users endpoint, the health probes and the
//! response schemas. The document is served by Swagger UI under
//! `/api-docs/` and exported via `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::users::{
    GroupCountResponse, ListUsersResponse, UserGroupsResponse, UserResponse, UsersPageResponse,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        description = "Read-only access to the users collection: paginated listing and grouped counts."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ListUsersResponse,
        UsersPageResponse,
        UserGroupsResponse,
        GroupCountResponse,
        UserResponse,
        ErrorBody
    )),
    tags(
        (name = "users", description = "Listing and grouping users"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
