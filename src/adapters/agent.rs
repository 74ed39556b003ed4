use crate::adapters::serper::SerperClient;
use crate::domain::model::Enrichment;
use crate::domain::ports::Enricher;
use crate::utils::error::{CompassError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const INSTRUCTION_TEMPLATE: &str = "I need information about the following topic: {topic}. \
Give the explanation in a json format as \
{\"description\": The description of the topic, \"url\": Any page to learn more about this topic}";

// Rounds of tool use before the agent must answer.
const MAX_TOOL_ROUNDS: usize = 4;

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    tools: Vec<ToolSpec>,
    temperature: f32,
    max_tokens: u32,
    frequency_penalty: f32,
    presence_penalty: f32,
    top_p: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<ToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl ChatMessage {
    fn user(content: String) -> Self {
        Self {
            role: "user".to_string(),
            content: Some(content),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    fn tool(call_id: String, content: String) -> Self {
        Self {
            role: "tool".to_string(),
            content: Some(content),
            tool_calls: None,
            tool_call_id: Some(call_id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ToolCall {
    id: String,
    #[serde(rename = "type", default = "function_kind")]
    kind: String,
    function: FunctionCall,
}

fn function_kind() -> String {
    "function".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FunctionCall {
    name: String,
    // JSON-encoded argument object, as the chat API delivers it.
    arguments: String,
}

#[derive(Debug, Serialize)]
struct ToolSpec {
    #[serde(rename = "type")]
    kind: &'static str,
    function: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

fn web_search_spec() -> ToolSpec {
    ToolSpec {
        kind: "function",
        function: serde_json::json!({
            "name": "web_search",
            "description": "Search the web and return result titles, links and snippets",
            "parameters": {
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "The search query" }
                },
                "required": ["query"]
            }
        }),
    }
}

fn strip_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.trim_start_matches(['\r', '\n']);
    match rest.trim_end().strip_suffix("```") {
        Some(body) => body.trim_end(),
        None => text,
    }
}

/// Parse the agent's final text output. Anything that is not a JSON object
/// carrying string `description` and `url` keys is a shape violation; there
/// is no partial result.
pub fn parse_enrichment(text: &str) -> Result<Enrichment> {
    let body = strip_fence(text.trim());
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| CompassError::parse(format!("agent output is not JSON: {}", e)))?;

    let description = value
        .get("description")
        .and_then(|v| v.as_str())
        .ok_or_else(|| CompassError::parse("agent output missing \"description\""))?;
    let url = value
        .get("url")
        .and_then(|v| v.as_str())
        .ok_or_else(|| CompassError::parse("agent output missing \"url\""))?;

    Ok(Enrichment {
        description: description.to_string(),
        url: url.to_string(),
    })
}

/// Chat-completions client with one bound `web_search` tool, asked once per
/// topic for a JSON answer. Generation parameters are pinned so the agent
/// leans deterministic.
pub struct AgentEnricher {
    http: Client,
    api_url: String,
    api_key: String,
    model: String,
    search: SerperClient,
}

impl AgentEnricher {
    pub fn new(api_url: String, api_key: String, model: String, search: SerperClient) -> Self {
        Self {
            http: Client::new(),
            api_url,
            api_key,
            model,
            search,
        }
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            tools: vec![web_search_spec()],
            temperature: 0.0,
            max_tokens: 200,
            frequency_penalty: 1.0,
            presence_penalty: 0.0,
            top_p: 1.0,
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<ChatResponse>()
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| CompassError::Agent {
                message: "completion had no choices".to_string(),
            })
    }

    async fn run_tool(&self, call: &ToolCall) -> Result<String> {
        if call.function.name != "web_search" {
            return Err(CompassError::Agent {
                message: format!("agent requested unbound tool {}", call.function.name),
            });
        }

        let arguments: serde_json::Value = serde_json::from_str(&call.function.arguments)
            .map_err(|e| CompassError::parse(format!("tool arguments: {}", e)))?;
        let query = arguments
            .get("query")
            .and_then(|v| v.as_str())
            .ok_or_else(|| CompassError::parse("tool arguments missing \"query\""))?;

        tracing::debug!(query, "agent invoked web_search");
        let results = self.search.search(query).await?;
        Ok(serde_json::to_string(&results)?)
    }
}

#[async_trait]
impl Enricher for AgentEnricher {
    async fn enrich(&self, topic: &str) -> Result<Enrichment> {
        let prompt = INSTRUCTION_TEMPLATE.replace("{topic}", topic);
        let mut messages = vec![ChatMessage::user(prompt)];

        for _ in 0..MAX_TOOL_ROUNDS {
            let message = self.complete(&messages).await?;
            let tool_calls = message.tool_calls.clone().unwrap_or_default();

            if tool_calls.is_empty() {
                let text = message.content.as_deref().ok_or_else(|| CompassError::Agent {
                    message: "completion carried neither content nor tool calls".to_string(),
                })?;
                return parse_enrichment(text);
            }

            messages.push(message);
            for call in &tool_calls {
                let output = self.run_tool(call).await?;
                messages.push(ChatMessage::tool(call.id.clone(), output));
            }
        }

        Err(CompassError::Agent {
            message: format!("no final answer after {} tool rounds", MAX_TOOL_ROUNDS),
        })
    }
}
