//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API: all auth, recipe, and health endpoints, the request and
//! response body schemas, and the session cookie security scheme.
//!
//! The generated specification backs Swagger UI in debug builds and is
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::auth::{LoginBody, ProfileBody, SignupBody};
use crate::inbound::http::error::{ErrorBody, ErrorListBody};
use crate::inbound::http::recipes::{RecipeBody, RecipeDraftBody};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /signup and POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Recipes backend API",
        description = "HTTP interface for session-authenticated recipe sharing."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::check_session,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        SignupBody,
        LoginBody,
        ProfileBody,
        RecipeDraftBody,
        RecipeBody,
        ErrorBody,
        ErrorListBody
    )),
    tags(
        (name = "auth", description = "Signup, login, and session management"),
        (name = "recipes", description = "Recipe creation and listing"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
