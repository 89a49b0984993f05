// llm.rs
//
// Client for the local recipe-generation endpoint (Ollama-style chat API).
// The completion is treated as an opaque markdown string; nothing here parses
// or validates its structure beyond "non-empty".

use crate::error::ServiceError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You are an assistant that receives a list of \
ingredients that a user has and suggests a recipe they could make with some \
or all of those ingredients. You don't need to use every ingredient they \
mention in your recipe. Format your response in markdown.";

#[derive(Debug, Serialize, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatResponse {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResponseMessage {
    pub content: String,
}

/// Transport seam so the generator can be exercised without a live endpoint.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn post_chat(
        &self,
        url: &str,
        request: &ChatRequest,
    ) -> Result<ChatResponse, ServiceError>;
}

struct ReqwestTransport {
    client: reqwest::Client,
}

#[async_trait]
impl ChatTransport for ReqwestTransport {
    async fn post_chat(
        &self,
        url: &str,
        request: &ChatRequest,
    ) -> Result<ChatResponse, ServiceError> {
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| ServiceError::Unreachable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Malformed(e.to_string()))?;

        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| ServiceError::Malformed(e.to_string()))
    }
}

/// Asks the local inference endpoint for a recipe built from the current
/// ingredient set. One call per invocation; no retry, no cancellation.
pub struct RecipeGenerator {
    endpoint: String,
    model: String,
    transport: Arc<dyn ChatTransport>,
}

impl RecipeGenerator {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_transport(
            endpoint,
            model,
            Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        )
    }

    pub fn with_transport(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        transport: Arc<dyn ChatTransport>,
    ) -> Self {
        // Tolerate a trailing slash in the configured endpoint.
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self {
            endpoint,
            model: model.into(),
            transport,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Embed the ingredient list in a natural-language prompt and return the
    /// completion text verbatim. The caller enforces the minimum-ingredient
    /// gate before this is reachable.
    pub async fn suggest_recipe(&self, ingredients: &[String]) -> Result<String, ServiceError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(build_prompt(ingredients)),
            ],
            stream: false,
        };

        let url = format!("{}/api/chat", self.endpoint);
        tracing::debug!(model = %self.model, %url, "requesting recipe");
        let response = self.transport.post_chat(&url, &request).await?;

        let recipe = response.message.content;
        if recipe.trim().is_empty() {
            return Err(ServiceError::Malformed(
                "empty completion from recipe service".to_string(),
            ));
        }
        Ok(recipe)
    }
}

fn build_prompt(ingredients: &[String]) -> String {
    format!(
        "I have {}. Please give me a recipe you'd recommend I make!",
        ingredients.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubTransport {
        response: Mutex<Option<ChatResponse>>,
        error: Mutex<Option<ServiceError>>,
        requests: Mutex<Vec<(String, ChatRequest)>>,
    }

    #[async_trait]
    impl ChatTransport for StubTransport {
        async fn post_chat(
            &self,
            url: &str,
            request: &ChatRequest,
        ) -> Result<ChatResponse, ServiceError> {
            self.requests
                .lock()
                .unwrap()
                .push((url.to_string(), request.clone()));

            if let Some(err) = self.error.lock().unwrap().take() {
                return Err(err);
            }
            if let Some(response) = self.response.lock().unwrap().clone() {
                return Ok(response);
            }
            Err(ServiceError::Malformed("stub not configured".to_string()))
        }
    }

    fn stub_with_recipe(text: &str) -> Arc<StubTransport> {
        Arc::new(StubTransport {
            response: Mutex::new(Some(ChatResponse {
                message: ResponseMessage {
                    content: text.to_string(),
                },
            })),
            ..Default::default()
        })
    }

    fn ingredients(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn prompt_embeds_every_ingredient() {
        let stub = stub_with_recipe("# Omelette");
        let generator =
            RecipeGenerator::with_transport("http://localhost:11434", "llama3.1:8b", stub.clone());

        generator
            .suggest_recipe(&ingredients(&["egg", "flour", "milk"]))
            .await
            .unwrap();

        let requests = stub.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let (url, request) = &requests[0];
        assert_eq!(url, "http://localhost:11434/api/chat");
        assert_eq!(request.model, "llama3.1:8b");
        assert!(!request.stream);
        let user_message = &request.messages[1];
        assert_eq!(user_message.role, "user");
        for name in ["egg", "flour", "milk"] {
            assert!(user_message.content.contains(name));
        }
    }

    #[tokio::test]
    async fn trailing_slash_in_endpoint_does_not_double_up() {
        let stub = stub_with_recipe("# Omelette");
        let generator =
            RecipeGenerator::with_transport("http://localhost:11434/", "llama3.1:8b", stub.clone());

        generator
            .suggest_recipe(&ingredients(&["egg", "flour", "milk"]))
            .await
            .unwrap();

        let requests = stub.requests.lock().unwrap();
        assert_eq!(requests[0].0, "http://localhost:11434/api/chat");
    }

    #[tokio::test]
    async fn returns_completion_verbatim() {
        let stub = stub_with_recipe("# Pancakes\n\n- mix\n- fry");
        let generator =
            RecipeGenerator::with_transport("http://localhost:11434", "llama3.1:8b", stub);

        let recipe = generator
            .suggest_recipe(&ingredients(&["egg", "flour", "milk"]))
            .await
            .unwrap();
        assert_eq!(recipe, "# Pancakes\n\n- mix\n- fry");
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let stub = Arc::new(StubTransport {
            error: Mutex::new(Some(ServiceError::Unreachable(
                "connection refused".to_string(),
            ))),
            ..Default::default()
        });
        let generator =
            RecipeGenerator::with_transport("http://localhost:11434", "llama3.1:8b", stub);

        let result = generator
            .suggest_recipe(&ingredients(&["egg", "flour", "milk"]))
            .await;
        assert!(matches!(result, Err(ServiceError::Unreachable(_))));
    }

    #[tokio::test]
    async fn empty_completion_is_malformed() {
        let stub = stub_with_recipe("   \n");
        let generator =
            RecipeGenerator::with_transport("http://localhost:11434", "llama3.1:8b", stub);

        let result = generator
            .suggest_recipe(&ingredients(&["egg", "flour", "milk"]))
            .await;
        assert!(matches!(result, Err(ServiceError::Malformed(_))));
    }
}
