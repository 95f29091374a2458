#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};

use truthio::domain::{Credential, CredentialProvider, CredentialType, DomainError};

/// Credentials fixed at construction, for wiring the pipeline in tests
#[derive(Debug)]
pub struct StaticCredentials;

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn get_credential(
        &self,
        credential_type: &CredentialType,
    ) -> Result<Credential, DomainError> {
        let key = match credential_type {
            CredentialType::OpenAi => "sk-test",
            CredentialType::Serper => "serper-test",
        };
        Ok(Credential::new(credential_type.clone(), key.to_string()))
    }

    async fn supports(&self, _credential_type: &CredentialType) -> bool {
        true
    }

    fn provider_name(&self) -> &'static str {
        "static"
    }
}

/// Chat completion body whose assistant message is `content`
pub fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
    })
}

/// Chat completion body requesting one `web_search` call
pub fn search_call_completion(query: &str) -> Value {
    json!({
        "id": "chatcmpl-tool",
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {
                        "name": "web_search",
                        "arguments": json!({ "query": query }).to_string()
                    }
                }]
            },
            "finish_reason": "tool_calls"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
    })
}

pub fn serper_results(hits: &[(&str, &str, &str)]) -> Value {
    json!({
        "searchParameters": { "q": "query" },
        "organic": hits
            .iter()
            .enumerate()
            .map(|(i, (title, snippet, link))| json!({
                "title": title,
                "snippet": snippet,
                "link": link,
                "position": i + 1
            }))
            .collect::<Vec<_>>()
    })
}
