pub mod domain;

pub use domain::{
    classify_error, CommandAction, CommandRequest, DetectOutput, DetectPayload, MatchOutput,
    MatchPayload, NormalizeOutput, NormalizePayload, RouteOutput, RoutePayload,
};

use anyhow::{Context, Result};
use gensys_inconsistency::{has_errors, InconsistencyDetector, Lexicon};
use gensys_protocol::CommandResponse;
use gensys_text::{is_match, normalize, SectionRouter};
use log::{debug, info, warn};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Runs command requests against a fixed lexicon.
pub struct CommandHandler {
    detector: InconsistencyDetector,
}

impl CommandHandler {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            detector: InconsistencyDetector::new(lexicon),
        }
    }

    pub fn execute(&self, request: CommandRequest) -> CommandResponse {
        let CommandRequest { action, payload } = request;
        debug!("Executing action '{}'", action.as_str());

        match self.dispatch(action, payload) {
            Ok(data) => CommandResponse::ok(data),
            Err(err) => {
                let (code, hint) = classify_error(&err);
                warn!("Action '{}' failed: {err:#}", action.as_str());
                CommandResponse::error(code, format!("{err:#}"), hint)
            }
        }
    }

    fn dispatch(&self, action: CommandAction, payload: Value) -> Result<Value> {
        match action {
            CommandAction::Normalize => {
                let payload: NormalizePayload = parse_payload(action, payload)?;
                to_value(NormalizeOutput {
                    normalized: normalize(&payload.text),
                    text: payload.text,
                })
            }
            CommandAction::Match => {
                let payload: MatchPayload = parse_payload(action, payload)?;
                let section = normalize(&payload.section);
                let folder = normalize(&payload.folder);
                let matched = is_match(&section, &folder);
                to_value(MatchOutput {
                    section,
                    folder,
                    matched,
                })
            }
            CommandAction::Detect => {
                let payload: DetectPayload = parse_payload(action, payload)?;
                let findings = self.detector.detect(&payload.text, payload.profile.as_ref());
                if payload.profile.is_none() {
                    info!("No profile supplied; skipping inconsistency checks");
                } else {
                    info!("Found {} possible inconsistencies", findings.len());
                }
                to_value(DetectOutput {
                    has_errors: has_errors(&findings),
                    findings,
                })
            }
            CommandAction::Route => {
                let payload: RoutePayload = parse_payload(action, payload)?;
                let mut router = SectionRouter::new();
                if let Some(placeholder) = payload.placeholder {
                    router = router.with_placeholder(placeholder);
                }
                let sections = router.route(&payload.sections, &payload.folders);
                let empty = sections.iter().filter(|s| s.is_placeholder).count();
                info!(
                    "Routed {} folder(s) into {} section(s), {empty} without content",
                    payload.folders.len(),
                    sections.len()
                );
                to_value(RouteOutput { sections })
            }
        }
    }
}

fn parse_payload<T: DeserializeOwned>(action: CommandAction, payload: Value) -> Result<T> {
    serde_json::from_value(payload)
        .with_context(|| format!("Invalid payload for action '{}'", action.as_str()))
}

fn to_value<T: Serialize>(output: T) -> Result<Value> {
    serde_json::to_value(output).context("Failed to serialize output")
}
