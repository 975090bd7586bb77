//! 回合事件解析 - 从 agent_end 事件中取出最后一条助手消息
//!
//! 消息内容有三种形态：字符串、分段数组、其它。解析时一次性归类为
//! [`MessageContent`]，后续逻辑只处理这个枚举。

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// 助手角色名
pub const ASSISTANT_ROLE: &str = "assistant";

/// 回合结束事件
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Value")]
pub struct TurnEvent {
    /// 事件类型（如 "agent_end"）
    pub event_type: Option<String>,
    /// 按时间顺序排列的消息
    pub messages: Vec<AgentMessage>,
}

impl TurnEvent {
    /// 解析 hook 输入。接受事件对象或裸消息数组。
    pub fn parse(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    pub fn last_assistant_text(&self) -> Option<String> {
        extract_last_assistant_text(&self.messages)
    }
}

impl From<Value> for TurnEvent {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Self {
                event_type: None,
                messages: items.into_iter().map(AgentMessage::from).collect(),
            },
            Value::Object(mut obj) => {
                let event_type = obj.get("type").and_then(Value::as_str).map(str::to_string);
                let messages = match obj.remove("messages") {
                    Some(Value::Array(items)) => items.into_iter().map(AgentMessage::from).collect(),
                    _ => Vec::new(),
                };
                Self {
                    event_type,
                    messages,
                }
            }
            _ => Self::default(),
        }
    }
}

/// 单条消息
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct AgentMessage {
    pub role: Option<String>,
    pub content: MessageContent,
}

impl AgentMessage {
    pub fn new(role: impl Into<String>, content: MessageContent) -> Self {
        Self {
            role: Some(role.into()),
            content,
        }
    }

    pub fn is_assistant(&self) -> bool {
        self.role.as_deref() == Some(ASSISTANT_ROLE)
    }
}

impl From<Value> for AgentMessage {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(mut obj) => Self {
                role: obj.get("role").and_then(Value::as_str).map(str::to_string),
                content: obj
                    .remove("content")
                    .map(MessageContent::from)
                    .unwrap_or(MessageContent::Unrecognized),
            },
            _ => Self {
                role: None,
                content: MessageContent::Unrecognized,
            },
        }
    }
}

/// 消息内容
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    /// 纯字符串
    Text(String),
    /// 分段内容
    Parts(Vec<ContentPart>),
    /// 无法识别的形态（null、数字、对象等）
    Unrecognized,
}

impl From<Value> for MessageContent {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s),
            Value::Array(parts) => Self::Parts(parts.into_iter().map(ContentPart::from).collect()),
            _ => Self::Unrecognized,
        }
    }
}

impl MessageContent {
    /// 规范化文本：字符串去空白；分段只取文本段，用换行连接后去空白。
    /// 结果为空时返回 None。
    pub fn normalized_text(&self) -> Option<String> {
        let text = match self {
            Self::Text(s) => s.trim().to_string(),
            Self::Parts(parts) => parts
                .iter()
                .filter_map(|part| {
                    if part.as_text().is_none() {
                        debug!(kind = part.kind().unwrap_or("unknown"), "Skipping non-text content part");
                    }
                    part.as_text()
                })
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_string(),
            Self::Unrecognized => return None,
        };
        (!text.is_empty()).then_some(text)
    }
}

/// 内容分段
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    Text(String),
    /// 非文本段，保留类型名（如 "toolCall"、"thinking"）
    Other(Option<String>),
}

impl ContentPart {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Other(_) => None,
        }
    }

    /// 分段类型名；没有 type 字段时为 None
    pub fn kind(&self) -> Option<&str> {
        match self {
            Self::Text(_) => Some("text"),
            Self::Other(kind) => kind.as_deref(),
        }
    }
}

impl From<Value> for ContentPart {
    fn from(value: Value) -> Self {
        let Value::Object(obj) = value else {
            return Self::Other(None);
        };
        let kind = obj.get("type").and_then(Value::as_str);
        match (kind, obj.get("text")) {
            (Some("text"), Some(Value::String(text))) => Self::Text(text.clone()),
            _ => Self::Other(kind.map(str::to_string)),
        }
    }
}

/// 从后往前找到第一条助手消息，返回其规范化文本
///
/// 只看最近的一条助手消息：它为空或形态无法识别时直接返回 None，
/// 不会继续回溯更早的助手消息。
pub fn extract_last_assistant_text(messages: &[AgentMessage]) -> Option<String> {
    messages
        .iter()
        .rev()
        .find(|m| m.is_assistant())
        .and_then(|m| m.content.normalized_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn messages(value: Value) -> Vec<AgentMessage> {
        TurnEvent::from(value).messages
    }

    #[test]
    fn test_string_content_is_trimmed() {
        let msgs = messages(json!([
            {"role": "user", "content": "hi"},
            {"role": "assistant", "content": "  **Done.** All tests pass.\n"}
        ]));
        assert_eq!(
            extract_last_assistant_text(&msgs),
            Some("**Done.** All tests pass.".to_string())
        );
    }

    #[test]
    fn test_text_parts_joined_with_newline() {
        let msgs = messages(json!([
            {"role": "assistant", "content": [
                {"type": "text", "text": "a"},
                {"type": "toolCall", "name": "bash"},
                {"type": "text", "text": "b"}
            ]}
        ]));
        assert_eq!(extract_last_assistant_text(&msgs), Some("a\nb".to_string()));
    }

    #[test]
    fn test_part_kind_is_kept() {
        let parts = [
            ContentPart::from(json!({"type": "text", "text": "a"})),
            ContentPart::from(json!({"type": "thinking", "thinking": "hmm"})),
            ContentPart::from(json!({"type": "text", "text": 5})),
            ContentPart::from(json!("bare")),
        ];
        let kinds: Vec<Option<&str>> = parts.iter().map(ContentPart::kind).collect();
        assert_eq!(kinds, vec![Some("text"), Some("thinking"), Some("text"), None]);
        assert_eq!(parts[1], ContentPart::Other(Some("thinking".to_string())));
    }

    #[test]
    fn test_latest_assistant_wins() {
        let msgs = messages(json!([
            {"role": "assistant", "content": "first"},
            {"role": "user", "content": "again"},
            {"role": "assistant", "content": "second"},
            {"role": "toolResult", "content": "ignored"}
        ]));
        assert_eq!(extract_last_assistant_text(&msgs), Some("second".to_string()));
    }

    #[test]
    fn test_empty_latest_does_not_fall_back() {
        let msgs = messages(json!([
            {"role": "assistant", "content": "earlier answer"},
            {"role": "assistant", "content": "   "}
        ]));
        assert_eq!(extract_last_assistant_text(&msgs), None);
    }

    #[test]
    fn test_unrecognized_content_is_none() {
        for content in [json!(null), json!(42), json!({"text": "x"})] {
            let msgs = messages(json!([{"role": "assistant", "content": content}]));
            assert_eq!(extract_last_assistant_text(&msgs), None);
        }
        let missing = messages(json!([{"role": "assistant"}]));
        assert_eq!(extract_last_assistant_text(&missing), None);
    }

    #[test]
    fn test_no_assistant_message() {
        let msgs = messages(json!([{"role": "user", "content": "hi"}]));
        assert_eq!(extract_last_assistant_text(&msgs), None);
        assert_eq!(extract_last_assistant_text(&[]), None);
    }

    #[test]
    fn test_non_string_text_part_is_skipped() {
        let msgs = messages(json!([
            {"role": "assistant", "content": [{"type": "text", "text": 5}, {"type": "text", "text": "ok"}]}
        ]));
        assert_eq!(extract_last_assistant_text(&msgs), Some("ok".to_string()));
    }

    #[test]
    fn test_parse_event_object_and_bare_array() {
        let event = TurnEvent::parse(
            r#"{"type":"agent_end","messages":[{"role":"assistant","content":"x"}]}"#,
        )
        .unwrap();
        assert_eq!(event.event_type.as_deref(), Some("agent_end"));
        assert_eq!(event.last_assistant_text(), Some("x".to_string()));

        let bare = TurnEvent::parse(r#"[null, {"role":"assistant","content":"y"}]"#).unwrap();
        assert_eq!(bare.messages.len(), 2);
        assert_eq!(bare.last_assistant_text(), Some("y".to_string()));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        assert!(TurnEvent::parse("{not json").is_err());
    }
}
