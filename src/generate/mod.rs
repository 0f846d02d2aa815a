// src/generate/mod.rs
// =============================================================================
// This module turns extracted repository files into Streamlit code.
//
// Submodules:
// - client: talks to the chat-completions API
// - prompt: the generation and revision prompts
// - extract: pulls the python code block out of a reply
//
// The model's reply is treated as opaque text; the only thing we look for in
// it is a fenced python block.
// =============================================================================

mod client;
mod extract;
mod prompt;

pub use client::{ChatClient, ChatSettings, DEFAULT_API_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE};

use client::{GenerateError, Message};
use extract::extract_code;

use crate::github::MatchedFile;

/// Generates and revises UI code with a chat model.
#[derive(Debug, Clone)]
pub struct UiGenerator {
    client: ChatClient,
}

impl UiGenerator {
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Asks the model for a first version of the UI built from `files`.
    pub async fn generate_ui(&self, files: &[MatchedFile]) -> Result<String, GenerateError> {
        let prompt = prompt::generation_prompt(files)?;

        let reply = self
            .client
            .complete(&[Message::system(prompt::GENERATOR_SYSTEM_PROMPT), Message::user(prompt)])
            .await?;
        Ok(extract_code(&reply))
    }

    /// Asks the model to revise `code` according to human `feedback`.
    pub async fn improve_code(&self, code: &str, feedback: &str) -> Result<String, GenerateError> {
        let prompt = prompt::improvement_prompt(code, feedback);
        let reply = self.client.complete(&[Message::user(prompt)]).await?;
        Ok(extract_code(&reply))
    }

    /// A plain assistant round trip, used by the `chat` command.
    pub async fn chat(&self, input: &str) -> Result<String, GenerateError> {
        self.client
            .complete(&[Message::system(prompt::ASSISTANT_SYSTEM_PROMPT), Message::user(input)])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use std::time::Duration;

    fn generator(base_url: String) -> UiGenerator {
        let client = ChatClient::new(ChatSettings {
            base_url,
            api_key: "sk-test".to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(5),
        })
        .unwrap();
        UiGenerator::new(client)
    }

    fn reply(content: &str) -> String {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_generate_ui_sends_files_and_extracts_code() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_body(Matcher::Regex("src/app.js".to_string()))
            .with_status(200)
            .with_body(reply("Sure!\n\n```python\nimport streamlit as st\n```\n"))
            .create_async()
            .await;

        let files = vec![MatchedFile {
            path: "src/app.js".to_string(),
            content: "console.log(1)".to_string(),
            extension: ".js".to_string(),
        }];
        let code = generator(server.url()).generate_ui(&files).await.unwrap();

        mock.assert_async().await;
        assert_eq!(code, "import streamlit as st");
    }

    #[tokio::test]
    async fn test_improve_code_sends_code_and_feedback() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex("st.title".to_string()),
                Matcher::Regex("add a sidebar".to_string()),
            ]))
            .with_status(200)
            .with_body(reply("```python\nst.sidebar.write('x')\n```"))
            .create_async()
            .await;

        let code = generator(server.url())
            .improve_code("st.title('a')", "add a sidebar")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(code, "st.sidebar.write('x')");
    }

    #[tokio::test]
    async fn test_chat_returns_reply_verbatim() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .match_body(Matcher::Regex("You are a helpful assistant.".to_string()))
            .with_status(200)
            .with_body(reply("```python\nprint(1)\n``` is how"))
            .create_async()
            .await;

        let answer = generator(server.url()).chat("how do I print?").await.unwrap();
        assert_eq!(answer, "```python\nprint(1)\n``` is how");
    }
}
