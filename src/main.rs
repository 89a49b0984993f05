// Bring in required crates
use axum::{self, routing};
use clap::Parser;
use tokio::{net, sync::RwLock};
use tower_http::{services, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Bring in our local modules
mod api;
mod error;
mod ingredients;
mod llm;
mod templates;
mod web;

use error::*;
use ingredients::*;
use llm::RecipeGenerator;
use templates::*;

use std::sync::Arc;

#[derive(Parser)]
#[command(about = "Collect ingredients and ask a local LLM for a recipe")]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    listen: String,

    /// Base URL of the local inference endpoint
    #[arg(long, default_value = "http://localhost:11434", env = "PANTRY_CHEF_LLM_URL")]
    llm_url: String,

    /// Model to request recipes from
    #[arg(long, default_value = "llama3.1:8b", env = "PANTRY_CHEF_MODEL")]
    model: String,
}

/// All mutable state for the page session: the ingredient list, the last
/// recipe (already rendered to HTML), the in-flight flag gating the trigger,
/// and a one-shot error notice for the next render.
pub struct AppState {
    pub ingredients: IngredientList,
    pub recipe_html: Option<String>,
    pub generating: bool,
    pub notice: Option<String>,
    pub generator: Arc<RecipeGenerator>,
}

impl AppState {
    pub fn new(generator: RecipeGenerator) -> Self {
        Self {
            ingredients: IngredientList::new(),
            recipe_html: None,
            generating: false,
            notice: None,
            generator: Arc::new(generator),
        }
    }
}

// Main server setup
async fn serve(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging and HTTP tracing for Axum with environment-based filtering.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pantry_chef=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let generator = RecipeGenerator::new(args.llm_url, args.model);
    tracing::info!(model = generator.model(), "recipe generator configured");
    let state = Arc::new(RwLock::new(AppState::new(generator)));

    let trace_layer = trace::TraceLayer::new_for_http()
        .make_span_with(trace::DefaultMakeSpan::new().level(tracing::Level::INFO))
        .on_response(trace::DefaultOnResponse::new().level(tracing::Level::INFO));

    // Create the router
    let app = axum::Router::new()
        .route("/", routing::get(web::index)) // The single page
        .route("/ingredients", routing::post(web::add_ingredient))
        .route("/generate", routing::post(web::generate))
        .nest("/api", api::router())
        // Serve static CSS file (must match file path & MIME)
        .route_service(
            "/chef.css",
            services::ServeFile::new_with_mime("assets/static/chef.css", &mime::TEXT_CSS_UTF_8),
        )
        .layer(trace_layer)
        .with_state(state);

    let listener = net::TcpListener::bind(&args.listen).await?;
    tracing::info!("listening on {}", args.listen);
    axum::serve(listener, app).await?;
    Ok(())
}

// Entry point of the app
#[tokio::main]
async fn main() {
    let args = Args::parse();
    // If serve() returns an error, log and exit
    if let Err(err) = serve(args).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
