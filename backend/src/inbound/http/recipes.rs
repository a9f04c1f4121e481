//! Recipe API handlers.
//!
//! ```text
//! GET /recipes
//! POST /recipes {"title":"...","instructions":"...","minutes_to_complete":30}
//! ```
//!
//! Both routes require a bound session. Creation failures answer 422 with a
//! `{"errors": [...]}` list carrying one message per violated rule.

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Recipe, RecipeDraft, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Recipe creation body for `POST /recipes`.
///
/// Required fields are optional at the wire level so an absent field reports
/// its presence rule instead of a deserialization failure.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RecipeDraftBody {
    /// Recipe title.
    pub title: Option<String>,
    /// Preparation instructions, at least 50 characters.
    pub instructions: Option<String>,
    /// Optional preparation time in minutes.
    pub minutes_to_complete: Option<i32>,
}

/// Recipe payload returned by list and create.
///
/// The owner appears only as `user_id`; the owner's recipe collection is
/// never embedded.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RecipeBody {
    /// Stable recipe identifier.
    pub id: String,
    pub title: String,
    pub instructions: String,
    /// Preparation time in minutes, or `null`.
    pub minutes_to_complete: Option<i32>,
    /// Identifier of the owning user.
    pub user_id: String,
}

impl From<&Recipe> for RecipeBody {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id().to_string(),
            title: recipe.title().to_owned(),
            instructions: recipe.instructions().to_owned(),
            minutes_to_complete: recipe.minutes_to_complete(),
            user_id: recipe.owner().to_string(),
        }
    }
}

fn require_user(session: &SessionContext) -> Result<UserId, Error> {
    session
        .user_id()?
        .ok_or_else(|| Error::unauthorized("Unauthorized: Please log in"))
}

/// List the recipes owned by the current session identity.
#[utoipa::path(
    get,
    path = "/recipes",
    responses(
        (status = 200, description = "Recipes owned by the current user", body = [RecipeBody]),
        (status = 401, description = "No active session", body = crate::inbound::http::error::ErrorBody),
        (status = 500, description = "Internal server error")
    ),
    tags = ["recipes"],
    operation_id = "listRecipes"
)]
#[get("/recipes")]
pub async fn list_recipes(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<RecipeBody>>> {
    let owner = require_user(&session)?;
    let recipes = state.recipes.list_by_owner(&owner).await?;
    Ok(web::Json(recipes.iter().map(RecipeBody::from).collect()))
}

/// Create a recipe owned by the current session identity.
#[utoipa::path(
    post,
    path = "/recipes",
    request_body = RecipeDraftBody,
    responses(
        (status = 201, description = "Recipe created", body = RecipeBody),
        (status = 401, description = "No active session", body = crate::inbound::http::error::ErrorBody),
        (status = 422, description = "Validation failure", body = crate::inbound::http::error::ErrorListBody),
        (status = 500, description = "Internal server error")
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Result<web::Json<RecipeDraftBody>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let owner = require_user(&session)?;
    let body = payload
        .map_err(|error| Error::validation(vec![error.to_string()]))?
        .into_inner();
    let draft = RecipeDraft {
        title: body.title,
        instructions: body.instructions,
        minutes_to_complete: body.minutes_to_complete,
    };
    let recipe = state.recipes.create(draft, owner).await?;
    Ok(HttpResponse::Created().json(RecipeBody::from(&recipe)))
}
