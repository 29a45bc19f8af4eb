//! System message composition.
//!
//! The system message instructs the model to role-play the selected board
//! members. It is rendered from the per-language template by joining the
//! member names with ", " in their selection order and substituting them
//! at the template's `{members}` placeholder.

use std::collections::HashMap;

use stratboard_types::config::{Language, MEMBERS_PLACEHOLDER};
use stratboard_types::error::PromptError;

/// Render the system message for the given board and language.
///
/// Fails with [`PromptError::MissingLanguage`] when `system_prompts` has no
/// template for `language`. That map is required to cover every supported
/// language (a config invariant), so this is not handled defensively here.
pub fn compose_system_message(
    board_members: &[String],
    language: Language,
    system_prompts: &HashMap<Language, String>,
) -> Result<String, PromptError> {
    let template = system_prompts
        .get(&language)
        .ok_or(PromptError::MissingLanguage(language))?;

    let members = board_members.join(", ");
    Ok(template.replace(MEMBERS_PLACEHOLDER, &members))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratboard_types::config::BoardConfig;

    #[test]
    fn test_compose_joins_members_in_order() {
        let prompts = HashMap::from([(
            Language::English,
            "Advisors: {members}. Answer as a board.".to_string(),
        )]);
        let members = vec!["A".to_string(), "B".to_string()];

        let message = compose_system_message(&members, Language::English, &prompts).unwrap();
        assert_eq!(message, "Advisors: A, B. Answer as a board.");
    }

    #[test]
    fn test_compose_with_default_templates() {
        let config = BoardConfig::default();
        let members = vec!["Laozi".to_string(), "Steve Jobs".to_string()];

        let message =
            compose_system_message(&members, Language::Russian, &config.system_prompts).unwrap();
        assert!(message.contains("Laozi, Steve Jobs"));
        assert!(!message.contains(MEMBERS_PLACEHOLDER));
    }

    #[test]
    fn test_compose_missing_language_fails() {
        let prompts = HashMap::from([(Language::English, "{members}".to_string())]);

        let err = compose_system_message(&[], Language::Russian, &prompts).unwrap_err();
        assert_eq!(err, PromptError::MissingLanguage(Language::Russian));
    }

    #[test]
    fn test_compose_empty_board_substitutes_empty_string() {
        let prompts = HashMap::from([(Language::English, "Board: {members}!".to_string())]);

        let message = compose_system_message(&[], Language::English, &prompts).unwrap();
        assert_eq!(message, "Board: !");
    }
}
