use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Kind of reference change a request describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    New,
    Change,
}

impl NotificationType {
    /// Wire code to enum; anything outside the two known codes is
    /// unrecognized.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::New),
            2 => Some(Self::Change),
            _ => None,
        }
    }
}

/// Position status referenced by a change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Completed,
    Pending,
    Rejected,
}

impl Status {
    pub fn from_code(code: i32) -> Result<Self, Error> {
        match code {
            0 => Ok(Self::Completed),
            1 => Ok(Self::Pending),
            2 => Ok(Self::Rejected),
            other => Err(Error::InvalidArgument(format!(
                "Unknown status code: {other}"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Pending => "Pending",
            Self::Rejected => "Rejected",
        }
    }
}

/// Old and new status codes accompanying a change notification.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct StatusChange {
    pub from: i32,
    pub to: i32,
}

/// Incoming change-of-status payload. Missing scalar fields deserialize to
/// zero/empty and are rejected during template assembly rather than at the
/// parse boundary, so a caller gets one error naming the field instead of
/// a deserialization fault.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReturnNotificationRequest {
    pub reseller_id: i64,
    pub notification_type: Option<i32>,
    pub client_id: i64,
    pub creator_id: i64,
    pub expert_id: i64,
    pub complaint_id: i64,
    pub complaint_number: String,
    pub consumption_id: i64,
    pub consumption_number: String,
    pub agreement_number: String,
    pub date: String,
    pub differences: Option<StatusChange>,
}

/// Per-channel delivery flags accumulated while a request is processed.
/// Built once per request, mutated in place, returned; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResult {
    pub notification_employee_by_email: bool,
    pub notification_client_by_email: bool,
    pub notification_client_by_sms: SmsOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsOutcome {
    pub is_sent: bool,
    pub message: String,
}

/// Resolved values for the notification templates, keyed the way the
/// template catalog expects them.
#[derive(Debug, Clone)]
pub struct TemplateData {
    pub complaint_id: i64,
    pub complaint_number: String,
    pub creator_id: i64,
    pub creator_name: String,
    pub expert_id: i64,
    pub expert_name: String,
    pub client_id: i64,
    pub client_name: String,
    pub consumption_id: i64,
    pub consumption_number: String,
    pub agreement_number: String,
    pub date: String,
    pub differences: String,
}

impl TemplateData {
    /// Every template key must resolve non-empty before any notification
    /// is attempted; the first empty one fails the whole request.
    pub fn validate(&self) -> Result<(), Error> {
        for (key, value) in self.entries() {
            if value.is_empty() {
                return Err(Error::InvalidState(format!(
                    "Template Data ({key}) is empty!"
                )));
            }
        }
        Ok(())
    }

    /// Flat key-value map handed to the renderer and the SMS channel.
    pub fn params(&self) -> BTreeMap<String, String> {
        self.entries()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }

    fn entries(&self) -> Vec<(&'static str, String)> {
        // Zero ids render as empty so the emptiness check treats a missing
        // reference the same as a missing string.
        fn id(value: i64) -> String {
            if value == 0 {
                String::new()
            } else {
                value.to_string()
            }
        }

        vec![
            ("COMPLAINT_ID", id(self.complaint_id)),
            ("COMPLAINT_NUMBER", self.complaint_number.clone()),
            ("CREATOR_ID", id(self.creator_id)),
            ("CREATOR_NAME", self.creator_name.clone()),
            ("EXPERT_ID", id(self.expert_id)),
            ("EXPERT_NAME", self.expert_name.clone()),
            ("CLIENT_ID", id(self.client_id)),
            ("CLIENT_NAME", self.client_name.clone()),
            ("CONSUMPTION_ID", id(self.consumption_id)),
            ("CONSUMPTION_NUMBER", self.consumption_number.clone()),
            ("AGREEMENT_NUMBER", self.agreement_number.clone()),
            ("DATE", self.date.clone()),
            ("DIFFERENCES", self.differences.clone()),
        ]
    }
}
