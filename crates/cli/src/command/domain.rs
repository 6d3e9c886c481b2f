use gensys_inconsistency::{InconsistencyFinding, LexiconError, ProfileRecord};
use gensys_protocol::ErrorCode;
use gensys_text::{FolderContent, RoutedSection};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub action: CommandAction,
    #[serde(default = "empty_payload")]
    pub payload: Value,
}

fn empty_payload() -> Value {
    Value::Object(Default::default())
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandAction {
    Normalize,
    Match,
    Detect,
    Route,
}

impl CommandAction {
    pub const ALL: [CommandAction; 4] = [
        CommandAction::Normalize,
        CommandAction::Match,
        CommandAction::Detect,
        CommandAction::Route,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            CommandAction::Normalize => "normalize",
            CommandAction::Match => "match",
            CommandAction::Detect => "detect",
            CommandAction::Route => "route",
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct NormalizePayload {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct NormalizeOutput {
    pub text: String,
    pub normalized: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MatchPayload {
    pub section: String,
    pub folder: String,
}

#[derive(Debug, Serialize)]
pub struct MatchOutput {
    /// Normalized section title
    pub section: String,
    /// Normalized folder name
    pub folder: String,
    pub matched: bool,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DetectPayload {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub profile: Option<ProfileRecord>,
}

#[derive(Debug, Serialize)]
pub struct DetectOutput {
    pub findings: Vec<InconsistencyFinding>,
    pub has_errors: bool,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RoutePayload {
    pub sections: Vec<String>,
    #[serde(default)]
    pub folders: Vec<FolderContent>,
    #[serde(default)]
    pub placeholder: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RouteOutput {
    pub sections: Vec<RoutedSection>,
}

/// Map a failure onto a stable error code and an optional hint.
///
/// The first recognised cause in the chain wins.
pub fn classify_error(err: &anyhow::Error) -> (ErrorCode, Option<String>) {
    for cause in err.chain() {
        if cause.is::<LexiconError>() {
            return (
                ErrorCode::LexiconError,
                Some("Check the file passed with --lexicon or GENSYS_LEXICON.".to_string()),
            );
        }
        if cause.is::<serde_json::Error>() {
            let actions: Vec<&str> = CommandAction::ALL.iter().map(|a| a.as_str()).collect();
            return (
                ErrorCode::InvalidRequest,
                Some(format!(
                    "Expected {{\"action\": ..., \"payload\": {{...}}}} with action one of: {}",
                    actions.join(", ")
                )),
            );
        }
        if cause.is::<std::io::Error>() {
            return (ErrorCode::IoError, None);
        }
    }
    (ErrorCode::Internal, None)
}
