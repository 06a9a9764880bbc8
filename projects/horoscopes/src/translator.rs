use async_trait::async_trait;
use interfaces_openai_chat::index::{ChatClient, ChatMessage, ChatRequest};
use tracing::{debug, warn};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const TEMPERATURE: f32 = 0.7;
pub const SYSTEM_PROMPT: &str = "You are a professional translator. \
Translate the following horoscope into natural Turkish, preserving its tone. \
Reply with the translation only.";

#[async_trait]
pub trait Translator: Send + Sync {
    /// `None` when the translation could not be obtained; the caller decides
    /// what to store instead.
    async fn translate(&self, text: &str) -> Option<String>;
}

pub struct OpenAiTranslator {
    client: ChatClient,
    model: String,
}

impl OpenAiTranslator {
    pub fn new(client: ChatClient, model: &str) -> Self {
        Self { client, model: model.to_string() }
    }

    fn request(&self, text: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(text)],
            temperature: TEMPERATURE,
        }
    }
}

#[async_trait]
impl Translator for OpenAiTranslator {
    async fn translate(&self, text: &str) -> Option<String> {
        debug!(model = %self.model, chars = text.len(), "translating");

        let response = match self.client.complete(&self.request(text)).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "translation request failed");
                return None;
            }
        };

        match response.first_content() {
            Some(content) => Some(content.to_string()),
            None => {
                warn!("translation response had no usable content");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Client;

    fn translator_for(server: &mockito::Server) -> OpenAiTranslator {
        let client = ChatClient::new(Client::new(), "sk-test").with_base_url(&server.url());
        OpenAiTranslator::new(client, DEFAULT_MODEL)
    }

    #[tokio::test]
    async fn returns_trimmed_first_choice() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": DEFAULT_MODEL,
                "temperature": 0.7
            })))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"\nÖnünüzde harika bir gün var.\n"}}]}"#)
            .create_async()
            .await;

        let translator = translator_for(&server);

        assert_eq!(
            translator.translate("Great day ahead").await.as_deref(),
            Some("Önünüzde harika bir gün var.")
        );
    }

    #[tokio::test]
    async fn non_success_is_no_translation() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .create_async()
            .await;

        let translator = translator_for(&server);

        assert_eq!(translator.translate("Great day ahead").await, None);
    }

    #[tokio::test]
    async fn empty_completion_is_no_translation() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let translator = translator_for(&server);

        assert_eq!(translator.translate("Stay calm").await, None);
    }
}
