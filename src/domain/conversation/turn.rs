//! Conversation turns and reply shaping.

use serde::{Deserialize, Serialize};

/// Sentinel passed to the reasoner when the agent opens the conversation
/// and no counterpart message exists yet.
pub const FIRST_MESSAGE: &str = "PRIMEIRA_MENSAGEM";

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Our side of the conversation.
    Agent,
    /// The person we are talking to (reception, manager, patient, lead).
    Counterpart,
}

/// A single immutable turn. An ordered sequence forms the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    /// Creates an agent-authored turn.
    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            role: Role::Agent,
            text: text.into(),
        }
    }

    /// Creates a counterpart-authored turn.
    pub fn counterpart(text: impl Into<String>) -> Self {
        Self {
            role: Role::Counterpart,
            text: text.into(),
        }
    }
}

/// Renders a history as a plain transcript for reasoner input.
///
/// An empty history renders as `[]` so the reasoner sees an explicit
/// nothing rather than an empty string.
pub fn render_history(history: &[Turn]) -> String {
    if history.is_empty() {
        return "[]".to_string();
    }

    history
        .iter()
        .map(|turn| {
            let who = match turn.role {
                Role::Agent => "agent",
                Role::Counterpart => "counterpart",
            };
            format!("{}: {}", who, turn.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Splits a reply into its outbound messages.
///
/// The reasoner may pack several messages into one reply separated by
/// `|||`. Empty segments are dropped; a reply with no separator comes back
/// as a single message.
pub fn split_reply(reply: &str) -> Vec<String> {
    reply
        .split("|||")
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Time-of-day greeting for prompt context.
pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        6..=11 => "Bom dia",
        12..=17 => "Boa tarde",
        _ => "Boa noite",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod history {
        use super::*;

        #[test]
        fn empty_history_renders_as_brackets() {
            assert_eq!(render_history(&[]), "[]");
        }

        #[test]
        fn turns_render_in_order_with_roles() {
            let history = vec![
                Turn::agent("Bom dia, é da clínica Sorriso?"),
                Turn::counterpart("Sim, quem fala?"),
            ];
            assert_eq!(
                render_history(&history),
                "agent: Bom dia, é da clínica Sorriso?\ncounterpart: Sim, quem fala?"
            );
        }
    }

    mod reply_splitting {
        use super::*;

        #[test]
        fn single_message_passes_through() {
            assert_eq!(split_reply("Obrigado!"), vec!["Obrigado!"]);
        }

        #[test]
        fn splits_on_triple_pipe() {
            assert_eq!(
                split_reply("Nossa empresa ajuda clínicas. ||| Faria sentido batermos um papo?"),
                vec![
                    "Nossa empresa ajuda clínicas.",
                    "Faria sentido batermos um papo?"
                ]
            );
        }

        #[test]
        fn drops_empty_segments() {
            assert_eq!(split_reply("Oi ||| ||| Tudo bem?"), vec!["Oi", "Tudo bem?"]);
            assert!(split_reply("   ").is_empty());
        }
    }

    mod greetings {
        use super::*;

        #[test]
        fn morning_from_six_to_eleven() {
            assert_eq!(greeting_for_hour(6), "Bom dia");
            assert_eq!(greeting_for_hour(11), "Bom dia");
        }

        #[test]
        fn afternoon_from_twelve_to_seventeen() {
            assert_eq!(greeting_for_hour(12), "Boa tarde");
            assert_eq!(greeting_for_hour(17), "Boa tarde");
        }

        #[test]
        fn evening_otherwise() {
            assert_eq!(greeting_for_hour(18), "Boa noite");
            assert_eq!(greeting_for_hour(23), "Boa noite");
            assert_eq!(greeting_for_hour(3), "Boa noite");
        }
    }

    #[test]
    fn turn_serializes_with_snake_case_role() {
        let json = serde_json::to_string(&Turn::counterpart("oi")).unwrap();
        assert_eq!(json, r#"{"role":"counterpart","text":"oi"}"#);
    }
}
