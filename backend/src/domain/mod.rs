//! Domain primitives, entities, and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants in each
//! type's Rustdoc. The `ports` module draws the hexagonal boundary; the
//! service modules implement the driving ports over driven repositories.

pub mod credentials;
mod directory;
pub mod error;
mod ledger;
mod password;
pub mod ports;
pub mod recipe;
mod trace_id;
pub mod user;

pub use self::credentials::{LoginCredentials, LoginValidationError};
pub use self::directory::UserDirectoryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ledger::RecipeLedgerService;
pub use self::password::{DigestError, PasswordDigest};
pub use self::recipe::{
    INSTRUCTIONS_MIN_CHARS, Recipe, RecipeDraft, RecipeId, RecipeValidationError,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("401 Not authorized"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
