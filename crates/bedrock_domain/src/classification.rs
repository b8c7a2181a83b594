use derive_more::Display;
use serde::Serialize;
use strum_macros::EnumIter;

use crate::{ProviderError, truncate_chars};

/// Length of the message excerpt used as label for unrecognised errors.
const UNCLASSIFIED_LABEL_CHARS: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
pub enum ErrorClass {
    SystemOnlyMessages,
    MissingCredentials,
    InvalidSignature,
    AccessDenied,
    ResourceNotFound,
    Validation,
    Throttling,
}

/// One row of the classification table.
#[derive(Debug)]
pub struct ClassificationRule {
    pub class: ErrorClass,
    /// AWS error codes that identify the class exactly.
    pub codes: &'static [&'static str],
    /// Fragments searched for in the rendered error text.
    pub patterns: &'static [&'static str],
    pub label: &'static str,
    pub cause: &'static str,
    pub remediations: &'static [&'static str],
}

impl ClassificationRule {
    fn matches(&self, code: Option<&str>, text: &str) -> bool {
        code.is_some_and(|code| self.codes.contains(&code))
            || self.patterns.iter().any(|pattern| text.contains(pattern))
    }
}

/// Known Bedrock failure modes in priority order. The first matching row
/// names the failure; remediations are collected from every matching row.
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        class: ErrorClass::SystemOnlyMessages,
        codes: &[],
        patterns: &["at least one non-system message"],
        label: "only system messages",
        cause: "The request carried no user or assistant turn",
        remediations: &[
            "Make sure the message array contains a user message",
            "Add a message with the user role when only system messages are present",
        ],
    },
    ClassificationRule {
        class: ErrorClass::MissingCredentials,
        codes: &["NoCredentialsError", "CredentialsNotFound"],
        patterns: &[
            "NoCredentialsError",
            "CredentialsNotFound",
            "CredentialsNotLoaded",
            "no providers in chain provided credentials",
        ],
        label: "no credentials",
        cause: "AWS credentials are not configured",
        remediations: &[
            "Set the AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY environment variables",
            "Configure the AWS CLI with `aws configure`",
            "Add the AWS credentials to a .env file",
        ],
    },
    ClassificationRule {
        class: ErrorClass::InvalidSignature,
        codes: &["InvalidSignatureException", "UnrecognizedClientException"],
        patterns: &["InvalidSignatureException", "UnrecognizedClientException"],
        label: "invalid credentials",
        cause: "The access key or secret key is wrong",
        remediations: &["Reconfigure the access key and secret key with valid values"],
    },
    ClassificationRule {
        class: ErrorClass::AccessDenied,
        codes: &["AccessDeniedException"],
        patterns: &["AccessDeniedException", "Access denied"],
        label: "access denied",
        cause: "The identity lacks Bedrock or model permissions",
        remediations: &[
            "Grant bedrock:* permissions to the identity in IAM",
            "Request model access in the Bedrock console under Model access",
            "Check that the intended IAM user or role is in use",
        ],
    },
    ClassificationRule {
        class: ErrorClass::ResourceNotFound,
        codes: &["ResourceNotFoundException"],
        patterns: &["ResourceNotFoundException"],
        label: "model or resource not found",
        cause: "The model is not offered in this region",
        remediations: &[
            "Use the us-east-1 or us-west-2 region",
            "Check that the model id is correct",
            "Check that the region offers the model",
        ],
    },
    ClassificationRule {
        class: ErrorClass::Validation,
        codes: &["ValidationException"],
        patterns: &["ValidationException"],
        label: "request validation failed",
        cause: "The request was malformed or model access was never requested",
        remediations: &[
            "Check the request shape (messages, model)",
            "Check parameter ranges (temperature, max_tokens)",
            "Check that the message content does not violate usage policies",
        ],
    },
    ClassificationRule {
        class: ErrorClass::Throttling,
        codes: &["ThrottlingException"],
        patterns: &["ThrottlingException"],
        label: "rate limited",
        cause: "The API call quota was exceeded",
        remediations: &["Retry after a short wait or lower the request rate"],
    },
];

/// Outcome of running an error through [`CLASSIFICATION_RULES`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub class: Option<ErrorClass>,
    pub label: String,
    pub suggestions: Vec<String>,
}

impl Classification {
    pub fn is_known(&self) -> bool {
        self.class.is_some()
    }
}

pub fn classify(error: &ProviderError) -> Classification {
    classify_parts(error.code(), &error.to_string())
}

/// Classifies free-form error text when no error code is available.
pub fn classify_message(text: &str) -> Classification {
    classify_parts(None, text)
}

fn classify_parts(code: Option<&str>, text: &str) -> Classification {
    let matched: Vec<&ClassificationRule> = CLASSIFICATION_RULES
        .iter()
        .filter(|rule| rule.matches(code, text))
        .collect();

    let suggestions = matched
        .iter()
        .flat_map(|rule| rule.remediations.iter().map(|s| s.to_string()))
        .collect();

    match matched.first() {
        Some(rule) => Classification {
            class: Some(rule.class),
            label: rule.label.to_string(),
            suggestions,
        },
        None => Classification {
            class: None,
            label: truncate_chars(text, UNCLASSIFIED_LABEL_CHARS),
            suggestions,
        },
    }
}
