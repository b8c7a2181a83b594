use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumString};

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize, Display, EnumString, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[display("system")]
    System,
    #[display("user")]
    User,
    #[display("assistant")]
    Assistant,
}

/// A single chat turn as sent to the completion endpoint.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl ToString) -> Self {
        Self { role, content: content.to_string() }
    }

    pub fn system(content: impl ToString) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl ToString) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl ToString) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    /// Converts the message back into the loose JSON shape callers hand in.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({ "role": self.role.as_ref(), "content": self.content })
    }
}
