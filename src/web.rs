use crate::*;
use askama::Template;
use axum::{
    extract::{Form, State},
    response::{self, IntoResponse},
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The recipe trigger only becomes reachable at this count.
pub const MIN_INGREDIENTS: usize = 3;

#[derive(Deserialize)]
pub struct IngredientSubmission {
    pub ingredient: String,
}

/// GET / — render the page. The error notice is one-shot: taken here,
/// shown once, gone on the next render.
pub async fn index(State(app_state): State<Arc<RwLock<AppState>>>) -> response::Response {
    let mut app_state = app_state.write().await;
    let notice = app_state.notice.take();
    let template = IndexTemplate::new(
        app_state.ingredients.as_slice().to_vec(),
        app_state.ingredients.len() >= MIN_INGREDIENTS,
        app_state.generating,
        app_state.recipe_html.clone(),
        notice,
    );
    response::Html(template.render().unwrap()).into_response()
}

/// POST /ingredients — one submission per form action. Empty and duplicate
/// entries are dropped silently; the redirect clears the input either way.
pub async fn add_ingredient(
    State(app_state): State<Arc<RwLock<AppState>>>,
    Form(form): Form<IngredientSubmission>,
) -> response::Redirect {
    let mut app_state = app_state.write().await;
    match app_state.ingredients.add(&form.ingredient) {
        AddOutcome::Added => log::debug!("added ingredient: {}", form.ingredient.trim()),
        AddOutcome::Empty | AddOutcome::Duplicate => {
            log::debug!("ignored ingredient submission: {:?}", form.ingredient);
        }
    }
    response::Redirect::to("/")
}

/// POST /generate — run the workflow, then redirect back to the page.
pub async fn generate(State(app_state): State<Arc<RwLock<AppState>>>) -> response::Redirect {
    match run_generation(&app_state).await {
        Ok(_) => {}
        // The trigger is disabled while a request is in flight, so a second
        // activation is a no-op rather than a user-visible error.
        Err(GenerateError::Busy) => log::debug!("generation already in flight"),
        Err(err) => {
            log::warn!("recipe generation failed: {err}");
            app_state.write().await.notice = Some(err.to_string());
        }
    }
    response::Redirect::to("/")
}

/// The recipe workflow: gate, mark in flight, dispatch, settle.
///
/// The in-flight flag is set true before dispatch and cleared on every
/// settlement path. The lock is released across the await, so form handling
/// stays responsive while the model thinks. On failure the previously stored
/// recipe and the ingredient list are left untouched.
pub async fn run_generation(
    app_state: &Arc<RwLock<AppState>>,
) -> Result<String, GenerateError> {
    let (generator, ingredients) = {
        let mut app_state = app_state.write().await;
        if app_state.generating {
            return Err(GenerateError::Busy);
        }
        if app_state.ingredients.len() < MIN_INGREDIENTS {
            return Err(GenerateError::NotEnoughIngredients);
        }
        app_state.generating = true;
        (
            app_state.generator.clone(),
            app_state.ingredients.as_slice().to_vec(),
        )
    };

    let result = generator.suggest_recipe(&ingredients).await;

    let mut app_state = app_state.write().await;
    app_state.generating = false;
    match result {
        Ok(recipe) => {
            app_state.recipe_html = Some(render_markdown(&recipe));
            Ok(recipe)
        }
        Err(err) => Err(GenerateError::Service(err)),
    }
}
