//! Prompt analyzer: turns a free-text user message (plus session context)
//! into a conversational reply and an optional suggested action.
//!
//! The primary path asks the chat model to classify the request; any network
//! or parse failure drops to the deterministic keyword classifier so the
//! chat flow never stalls on a bad response.

use crate::chat::client::{ChatBackend, ChatTurn};
use crate::chat::parse::{extract_json_object, fix_json_issues};
use crate::session::{ActionKind, DesignAction};
use crate::util::truncate;
use serde::Deserialize;

#[derive(Debug)]
pub struct DesignAnalysis {
    pub reply: String,
    pub suggested_action: Option<DesignAction>,
}

const RANDOM_KEYWORDS: [&str; 3] = ["random", "surprise", "anything you like"];
const MODIFY_KEYWORDS: [&str; 7] = [
    "change", "modify", "make it", "remove", "replace", "tweak", "turn it",
];

#[derive(Deserialize)]
struct AnalysisJson {
    reply: String,
    #[serde(rename = "suggestedAction")]
    suggested_action: Option<ActionJson>,
}

#[derive(Deserialize)]
struct ActionJson {
    #[serde(rename = "type")]
    kind: String,
    label: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "searchQuery")]
    query: String,
}

fn classification_instruction(has_logo: bool, has_edit_target: bool) -> String {
    format!(
        "You are a senior art director chatting with a user about their brand and \
suggesting Visual Identity System assets to generate.\n\
\n\
CONTEXT:\n\
- Logo uploaded: {has_logo}\n\
- Image selected for edit: {has_edit_target}\n\
\n\
INSTRUCTIONS:\n\
1. Reply helpfully and concisely to the user's input.\n\
2. Decide whether they want an action:\n\
   - Asking to create or show something, or naming an object: type GENERATE.\n\
   - Asking to change or tweak the selected image: type MODIFY.\n\
   - Asking for something random or a surprise: type RANDOM.\n\
   - Just chatting or asking a question: no action (null).\n\
3. Return ONLY a JSON object:\n\
{{\"reply\": \"string\", \"suggestedAction\": {{\"type\": \"GENERATE\"|\"MODIFY\"|\"RANDOM\", \
\"label\": \"short name\", \"description\": \"what will happen\", \
\"searchQuery\": \"distilled subject or edit instruction\"}} or null}}"
    )
}

/// Analyze the user's message. Delegates to the chat model and falls back
/// to [`fallback_analysis`] on any failure.
pub async fn analyze_request<C>(
    chat: &C,
    text: &str,
    has_logo: bool,
    has_edit_target: bool,
) -> DesignAnalysis
where
    C: ChatBackend + ?Sized,
{
    let messages = [
        ChatTurn::system(classification_instruction(has_logo, has_edit_target)),
        ChatTurn::user(text),
    ];

    match chat.complete(&messages, true).await {
        Ok(content) => match parse_analysis(&content) {
            Some(analysis) => analysis,
            None => {
                tracing::debug!("analyzer response unparseable, using fallback classifier");
                fallback_analysis(text, has_edit_target)
            }
        },
        Err(e) => {
            tracing::debug!(error = %e, "analyzer call failed, using fallback classifier");
            fallback_analysis(text, has_edit_target)
        }
    }
}

fn parse_analysis(content: &str) -> Option<DesignAnalysis> {
    let json = extract_json_object(content)?;
    let json = fix_json_issues(json);
    let parsed: AnalysisJson = serde_json::from_str(&json).ok()?;

    let suggested_action = match parsed.suggested_action {
        Some(action) => {
            let kind = match action.kind.as_str() {
                "GENERATE" => ActionKind::Generate,
                "MODIFY" => ActionKind::Modify,
                "RANDOM" => ActionKind::Random,
                _ => return None,
            };
            Some(DesignAction {
                kind,
                label: action.label,
                description: action.description,
                query: action.query,
            })
        }
        None => None,
    };

    Some(DesignAnalysis {
        reply: parsed.reply,
        suggested_action,
    })
}

/// Deterministic rule-based classification. Pure: the same input always
/// yields the same analysis.
pub fn fallback_analysis(text: &str, has_edit_target: bool) -> DesignAnalysis {
    let trimmed = text.trim();
    let lower = trimmed.to_lowercase();

    if RANDOM_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return DesignAnalysis {
            reply: "Alright, let me put together a random creative brand asset for you!"
                .to_string(),
            suggested_action: Some(DesignAction {
                kind: ActionKind::Random,
                label: "Surprise Me".to_string(),
                description: "Generate a completely random, high-quality brand asset."
                    .to_string(),
                query: "random".to_string(),
            }),
        };
    }

    if has_edit_target && MODIFY_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return DesignAnalysis {
            reply: format!("Got it, I'll modify the selected image: {}", trimmed),
            suggested_action: Some(DesignAction {
                kind: ActionKind::Modify,
                label: "Modify Image".to_string(),
                description: format!("Apply the change: {}", truncate(trimmed, 40)),
                query: trimmed.to_string(),
            }),
        };
    }

    if !trimmed.is_empty() {
        return DesignAnalysis {
            reply: format!("Understood, I'll generate: {}", trimmed),
            suggested_action: Some(DesignAction {
                kind: ActionKind::Generate,
                label: format!("Generate: {}", truncate(trimmed, 24)),
                description: format!("Create brand assets for {}", trimmed),
                query: trimmed.to_string(),
            }),
        };
    }

    DesignAnalysis {
        reply: "Hello! Tell me what brand asset you'd like: a business card, \
                a t-shirt, a billboard..."
            .to_string(),
        suggested_action: None,
    }
}
