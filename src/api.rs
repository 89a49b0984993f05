use crate::*;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

/// JSON routes, nested under /api. Same state and invariants as the page.
pub fn router() -> Router<Arc<RwLock<AppState>>> {
    Router::new()
        .route(
            "/ingredients",
            routing::get(list_ingredients).post(add_ingredient),
        )
        .route("/recipe", routing::post(request_recipe))
}

#[derive(Serialize)]
pub struct IngredientsResponse {
    ingredients: Vec<String>,
}

#[derive(Deserialize)]
pub struct AddIngredientRequest {
    ingredient: String,
}

#[derive(Serialize)]
pub struct RecipeResponse {
    recipe: String,
}

#[derive(Serialize)]
pub struct ApiError {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ApiError {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Get the current ingredient list
pub async fn list_ingredients(
    State(app_state): State<Arc<RwLock<AppState>>>,
) -> Json<IngredientsResponse> {
    let app_state = app_state.read().await;
    Json(IngredientsResponse {
        ingredients: app_state.ingredients.as_slice().to_vec(),
    })
}

/// Add one ingredient, with the same validation as the form
pub async fn add_ingredient(
    State(app_state): State<Arc<RwLock<AppState>>>,
    Json(body): Json<AddIngredientRequest>,
) -> Response {
    let mut app_state = app_state.write().await;
    match app_state.ingredients.add(&body.ingredient) {
        AddOutcome::Added => (
            StatusCode::CREATED,
            Json(IngredientsResponse {
                ingredients: app_state.ingredients.as_slice().to_vec(),
            }),
        )
            .into_response(),
        AddOutcome::Empty => error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "ingredient must be non-empty",
        ),
        AddOutcome::Duplicate => {
            error_response(StatusCode::CONFLICT, "ingredient already on the list")
        }
    }
}

/// Run the gated generation workflow and return the raw completion
pub async fn request_recipe(State(app_state): State<Arc<RwLock<AppState>>>) -> Response {
    match web::run_generation(&app_state).await {
        Ok(recipe) => Json(RecipeResponse { recipe }).into_response(),
        Err(err @ (GenerateError::Busy | GenerateError::NotEnoughIngredients)) => {
            error_response(StatusCode::CONFLICT, err.to_string())
        }
        Err(err @ GenerateError::Service(_)) => {
            log::warn!("recipe generation failed: {err}");
            error_response(StatusCode::BAD_GATEWAY, err.to_string())
        }
    }
}
