//! Board configuration types for stratboard.
//!
//! `BoardConfig` represents the mutable configuration root shared by all
//! sessions: the default board member list, the per-language system prompt
//! templates, and the per-language UI translation tables. The hard-coded
//! defaults here seed the remote store on first use and serve as the local
//! fallback whenever the store is unreachable.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Placeholder in a system prompt template replaced by the joined member names.
pub const MEMBERS_PLACEHOLDER: &str = "{members}";

/// Supported interface languages.
///
/// Serializes as the full language name (`"English"` / `"Russian"`) because
/// that is the key format used in the stored prompt and translation maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Russian,
}

impl Language {
    /// All supported languages, in display order.
    pub const ALL: [Language; 2] = [Language::English, Language::Russian];
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => write!(f, "English"),
            Language::Russian => write!(f, "Russian"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "English" => Ok(Language::English),
            "Russian" => Ok(Language::Russian),
            other => Err(format!("invalid language: '{other}'")),
        }
    }
}

/// The mutable configuration root shared by all sessions.
///
/// Stored under `config/` in the document store as three sibling documents.
/// Invariant: `system_prompts` and `translations` carry an entry for every
/// supported language; `board_members` has no store-level size or
/// uniqueness constraint (the 12-member cap is enforced per session).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "default_board_members")]
    pub board_members: Vec<String>,
    #[serde(default = "default_system_prompts")]
    pub system_prompts: HashMap<Language, String>,
    #[serde(default = "default_translations")]
    pub translations: HashMap<Language, HashMap<String, String>>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            board_members: default_board_members(),
            system_prompts: default_system_prompts(),
            translations: default_translations(),
        }
    }
}

impl BoardConfig {
    /// Look up a translated UI string, falling back to the key itself when
    /// the language or key is missing.
    pub fn translate(&self, language: Language, key: &str) -> String {
        self.translations
            .get(&language)
            .and_then(|table| table.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

fn default_board_members() -> Vec<String> {
    [
        "Laozi",
        "Charles Darwin",
        "Woody Allen",
        "Steve Jobs",
        "Elon Musk",
        "Bertrand Russell",
        "Erasmus of Rotterdam",
        "Steven Pinker",
        "Adam Grant",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_system_prompts() -> HashMap<Language, String> {
    let english = "My personal board of directors includes: {members}\n\n\
        I will ask the question and you will give the most unique, relevant and \
        ground-breaking advice. Do it like a board meeting. Don't go on long rants. \
        Choose a character to speak and speak from that character. Make sure you say \
        which character is speaking. Ask me additional questions that catalyse insight \
        and offer advice from different characters, only one at a time. If another \
        member of the committee has a serious disagreement with a statement or question \
        provided, include their position as well.";

    let russian = "В мой персональный совет директоров входят: {members}\n\
        Я задам вопрос, а вы дадите самый уникальный, актуальный и прорывной совет. \
        Действуйте как на заседании совета директоров. Не уходите в длинные рассуждения. \
        Выберите одного из членов совета и говорите от его лица. Обязательно указывайте, \
        кто говорит. Задавайте мне дополнительные вопросы, которые помогут найти новое \
        решение, и предлагайте советы от разных членов совета, только по одному за раз. \
        Если другой член совета имеет серьезные разногласия с высказанным утверждением \
        или вопросом, включите и его позицию.";

    HashMap::from([
        (Language::English, english.to_string()),
        (Language::Russian, russian.to_string()),
    ])
}

fn default_translations() -> HashMap<Language, HashMap<String, String>> {
    let english = [
        ("title", "Your Personal Board of Directors"),
        ("language_selector", "Select Language"),
        ("board_members_label", "Select Your Board Members"),
        ("chat_placeholder", "Ask your board a question..."),
        ("send_button", "Send"),
        (
            "instructions",
            "Welcome to your Personal Board of Directors!\n\n\
             Here you can engage in meaningful conversations with historical and \
             contemporary figures who serve as your virtual mentors. To get started:\n\
             1. Select your board members from the list or add custom ones\n\
             2. Type your question in the chat box\n\
             3. Receive wisdom and insights from your chosen advisors\n\n\
             Each conversation is unique and builds upon previous interactions.",
        ),
    ];

    let russian = [
        ("title", "Ваш Личный Совет Директоров"),
        ("language_selector", "Выберите Язык"),
        ("board_members_label", "Выберите Членов Совета"),
        ("chat_placeholder", "Задайте вопрос совету..."),
        ("send_button", "Отправить"),
        (
            "instructions",
            "Добро пожаловать в ваш Личный Совет Директоров!\n\n\
             Здесь вы можете вести содержательные беседы с историческими и современными \
             личностями, которые выступают в роли ваших виртуальных наставников. Чтобы начать:\n\
             1. Выберите членов совета из списка или добавьте своих\n\
             2. Введите свой вопрос в чате\n\
             3. Получите мудрость и понимание от выбранных советников\n\n\
             Каждая беседа уникальна и основывается на предыдущих взаимодействиях.",
        ),
    ];

    let to_table = |entries: &[(&str, &str)]| {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>()
    };

    HashMap::from([
        (Language::English, to_table(&english)),
        (Language::Russian, to_table(&russian)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_roundtrip() {
        for lang in Language::ALL {
            let s = lang.to_string();
            let parsed: Language = s.parse().unwrap();
            assert_eq!(lang, parsed);
        }
    }

    #[test]
    fn test_language_serde_uses_full_name() {
        let json = serde_json::to_string(&Language::Russian).unwrap();
        assert_eq!(json, "\"Russian\"");
        let parsed: Language = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Language::Russian);
    }

    #[test]
    fn test_language_default_is_english() {
        assert_eq!(Language::default(), Language::English);
    }

    #[test]
    fn test_default_config_covers_all_languages() {
        let config = BoardConfig::default();
        assert_eq!(config.board_members.len(), 9);
        for lang in Language::ALL {
            let template = config.system_prompts.get(&lang).unwrap();
            assert!(template.contains(MEMBERS_PLACEHOLDER));
            assert!(config.translations.get(&lang).unwrap().contains_key("title"));
        }
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = BoardConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: BoardConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.board_members, config.board_members);
        assert_eq!(parsed.system_prompts, config.system_prompts);
    }

    #[test]
    fn test_partial_config_document_fills_defaults() {
        let parsed: BoardConfig =
            serde_json::from_str(r#"{"board_members": ["Ada Lovelace"]}"#).unwrap();
        assert_eq!(parsed.board_members, vec!["Ada Lovelace".to_string()]);
        assert_eq!(parsed.system_prompts.len(), 2);
        assert_eq!(parsed.translations.len(), 2);
    }

    #[test]
    fn test_translate_falls_back_to_key() {
        let config = BoardConfig::default();
        assert_eq!(config.translate(Language::English, "send_button"), "Send");
        assert_eq!(config.translate(Language::English, "no_such_key"), "no_such_key");
    }
}
