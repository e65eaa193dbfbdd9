//! Domain primitives, ports, and the users use-case.
//!
//! Purpose: keep the listing and grouping rules independent of actix-web and
//! of the MongoDB driver. Adapters depend on this module, never the reverse.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.
//! - `UserRecord` / `UserId` / `UserField`: the stored user and its groupable fields.
//! - `UsersService`: `UsersQuery` implementation over a `UserStore`.

pub mod error;
pub mod ports;
mod trace_id;
pub mod user;
mod users_service;

pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    GroupCount, UnknownFieldError, UserField, UserGroups, UserId, UserRecord, UserValidationError,
};
pub use self::users_service::UsersService;
