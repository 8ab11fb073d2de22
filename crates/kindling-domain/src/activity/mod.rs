use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shared::DomainError;

/// Raw activity event kinds delivered by the messaging collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    PresenceOpen,
    MessageSent,
    EchoBackSent,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::PresenceOpen => "PRESENCE_OPEN",
            ActivityType::MessageSent => "MESSAGE_SENT",
            ActivityType::EchoBackSent => "ECHO_BACK_SENT",
        }
    }
}

impl FromStr for ActivityType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PRESENCE_OPEN" => Ok(ActivityType::PresenceOpen),
            "MESSAGE_SENT" => Ok(ActivityType::MessageSent),
            "ECHO_BACK_SENT" => Ok(ActivityType::EchoBackSent),
            other => Err(DomainError::Validation(format!(
                "Unknown activity type: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Emotion classification attached to message activities by the
/// sentiment collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn is_positive(&self) -> bool {
        matches!(self, Sentiment::Positive)
    }
}

impl FromStr for Sentiment {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "POSITIVE" => Ok(Sentiment::Positive),
            "NEUTRAL" => Ok(Sentiment::Neutral),
            "NEGATIVE" => Ok(Sentiment::Negative),
            other => Err(DomainError::Validation(format!(
                "Unknown sentiment: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_type_parse_roundtrip() {
        for raw in ["PRESENCE_OPEN", "MESSAGE_SENT", "ECHO_BACK_SENT"] {
            let parsed: ActivityType = raw.parse().expect("known type");
            assert_eq!(parsed.as_str(), raw);
        }
    }

    #[test]
    fn test_unknown_activity_type_is_validation_error() {
        let result = ActivityType::from_str("APP_CLOSED");
        match result {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("APP_CLOSED")),
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_sentiment_positive() {
        assert!(Sentiment::Positive.is_positive());
        assert!(!Sentiment::Neutral.is_positive());
        assert!(!Sentiment::Negative.is_positive());
    }
}
