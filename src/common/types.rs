use serde::{Deserialize, Deserializer, Serialize};

pub type TemplateId = i64;

/// Trigger/response pair the bot matches incoming messages against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub id: TemplateId,
    pub trigger_text: String,
    pub response_text: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// One incoming message and the reply that was sent for it (empty if none matched).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageLog {
    pub id: i64,
    pub user_id: String,
    pub incoming_message: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub response_message: String,
    #[serde(default)]
    pub template_id: Option<TemplateId>,
    pub created_at: String,
}

/// Aggregates recomputed by the backend on every request.
///
/// Numeric fields stay optional so a missing value can be shown as `0`
/// instead of failing the whole payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_messages: Option<u64>,
    #[serde(default)]
    pub active_templates: Option<u64>,
    #[serde(default)]
    pub response_rate: Option<f64>,
    #[serde(default)]
    pub recent_messages: Vec<MessageLog>,
}

/// Envelope wrapped around every backend payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /templates`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateDraft {
    pub trigger_text: String,
    pub response_text: String,
    pub is_active: bool,
}

/// Body of `PUT /templates/{id}`; absent fields are left untouched server side.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TemplatePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl From<TemplateDraft> for TemplatePatch {
    fn from(draft: TemplateDraft) -> Self {
        Self {
            trigger_text: Some(draft.trigger_text),
            response_text: Some(draft.response_text),
            is_active: Some(draft.is_active),
        }
    }
}

/// Plain (non-enveloped) body of `GET /`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthBanner {
    pub message: String,
}

fn default_true() -> bool {
    true
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
