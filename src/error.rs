use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractError>;

/// Whole-report failures. Field-level gaps never end up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// Non-success response from the charting service.
    #[error("请求失败: {status} {reason}")]
    Upstream { status: u16, reason: String },

    #[error("解析失败：未找到内容DIV")]
    NoContent,

    #[error("解析失败：文档无内容")]
    EmptyDocument,

    #[error("发生未知错误: {0}")]
    Internal(String),
}

impl ExtractError {
    /// Body handed to the serving layer: `{"error": "<message>"}`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_message_carries_status() {
        let e = ExtractError::Upstream {
            status: 502,
            reason: "Bad Gateway".into(),
        };
        assert_eq!(e.to_string(), "请求失败: 502 Bad Gateway");
    }

    #[test]
    fn json_body_has_error_field() {
        let body = ExtractError::EmptyDocument.to_json();
        assert_eq!(body["error"], "解析失败：文档无内容");
        assert_eq!(body.as_object().map(|o| o.len()), Some(1));
    }
}
