//! Creative prompt expander: turns one topic into a small set of diverse
//! generation prompts, each of which keeps the brand/logo visible in the
//! scene.

use crate::chat::client::{ChatBackend, ChatTurn};
use crate::chat::parse::{extract_json_array, fix_json_issues};

/// Upper bound on the expanded prompt set; the default is three.
pub const MAX_PROMPTS: usize = 5;

const DEFAULT_SEED: &str = "Brand identity assets";

fn expansion_instruction(seed: &str) -> String {
    format!(
        "You are an expert creative director. Generate high-quality, photorealistic \
image-generation prompts for brand assets based on the input: \"{seed}\".\n\
\n\
INSTRUCTIONS:\n\
1. Produce 3 prompts (up to {MAX_PROMPTS} if the input asks for more).\n\
2. Make the prompts diverse if the input is generic.\n\
3. Every prompt must mention \"logo applied\" or \"branding visible\".\n\
4. Return ONLY a JSON array of strings."
    )
}

/// Expand `seed` into 1..=[`MAX_PROMPTS`] prompts. Never fails and never
/// returns an empty set: bad remote output drops to [`fallback_prompts`].
pub async fn creative_prompts<C>(chat: &C, seed: &str) -> Vec<String>
where
    C: ChatBackend + ?Sized,
{
    let seed = match seed.trim() {
        "" => DEFAULT_SEED,
        s => s,
    };

    let messages = [
        ChatTurn::system(expansion_instruction(seed)),
        ChatTurn::user(seed),
    ];

    match chat.complete(&messages, true).await {
        Ok(content) => match parse_prompts(&content) {
            Some(prompts) => prompts,
            None => {
                tracing::debug!("expander response unparseable, using fallback prompts");
                fallback_prompts(seed)
            }
        },
        Err(e) => {
            tracing::debug!(error = %e, "expander call failed, using fallback prompts");
            fallback_prompts(seed)
        }
    }
}

fn parse_prompts(content: &str) -> Option<Vec<String>> {
    let json = extract_json_array(content)?;
    let json = fix_json_issues(json);
    let parsed: Vec<String> = serde_json::from_str(&json).ok()?;

    let prompts: Vec<String> = parsed
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .take(MAX_PROMPTS)
        .collect();

    if prompts.is_empty() {
        None
    } else {
        Some(prompts)
    }
}

/// Three fixed stylistic variants of the seed, each keeping the branding
/// in frame.
pub fn fallback_prompts(seed: &str) -> Vec<String> {
    vec![
        format!("{seed}, photorealistic, professional photography, branding visible"),
        format!("{seed}, cinematic lighting, close up, logo applied"),
        format!("{seed}, studio shot, minimalist composition, branding visible"),
    ]
}
