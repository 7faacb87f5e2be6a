//! Prompt assembly — persona instruction, trimmed history, new user turn.

use crate::chat::ConversationTurn;

/// Maximum number of prior turns forwarded upstream.
pub const HISTORY_CAP: usize = 10;

/// Fixed system instruction sent at the head of every prompt.
pub const PERSONA: &str = "You are Virtual Mum, a warm, patient and encouraging parent figure \
chatting with a child or young teenager. Keep answers short, simple and age-appropriate. \
Never ask for or store personal information such as full names, addresses, schools, phone \
numbers or passwords. For medical, legal or emergency questions, gently tell the child to talk \
to a trusted adult straight away, and in an emergency to contact local emergency services. \
Encourage kindness, a growth mindset and safe behaviour online.";

/// Ordered turns sent to the completion service for one request.
///
/// Always `[system] + last N history turns + [user]`, so its length never
/// exceeds `N + 2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSequence {
    turns: Vec<ConversationTurn>,
}

impl PromptSequence {
    /// Builds the sequence, keeping only the most recent `cap` history turns.
    pub fn build(
        instruction: &str,
        history: &[ConversationTurn],
        message: &str,
        cap: usize,
    ) -> Self {
        let kept = &history[history.len().saturating_sub(cap)..];

        let mut turns = Vec::with_capacity(kept.len() + 2);
        turns.push(ConversationTurn::system(instruction));
        turns.extend_from_slice(kept);
        turns.push(ConversationTurn::user(message));

        Self { turns }
    }

    /// Builds the sequence with the default persona and history cap.
    pub fn with_persona(history: &[ConversationTurn], message: &str) -> Self {
        Self::build(PERSONA, history, message, HISTORY_CAP)
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of history turns carried (excludes the system and user turns).
    pub fn history_len(&self) -> usize {
        self.turns.len().saturating_sub(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Role;

    fn numbered_history(n: usize) -> Vec<ConversationTurn> {
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    ConversationTurn::user(format!("turn {i}"))
                } else {
                    ConversationTurn::assistant(format!("turn {i}"))
                }
            })
            .collect()
    }

    #[test]
    fn empty_history_yields_system_then_user() {
        let seq = PromptSequence::with_persona(&[], "Hi");
        assert_eq!(
            seq.turns(),
            &[ConversationTurn::system(PERSONA), ConversationTurn::user("Hi")]
        );
    }

    #[test]
    fn long_history_keeps_most_recent_suffix_in_order() {
        let history = numbered_history(15);
        let seq = PromptSequence::with_persona(&history, "next");

        assert_eq!(seq.len(), HISTORY_CAP + 2);
        assert_eq!(seq.history_len(), HISTORY_CAP);
        assert_eq!(&seq.turns()[1..=HISTORY_CAP], &history[5..]);
        assert!(!seq.turns().iter().any(|t| t.content == "turn 4"));
    }

    #[test]
    fn short_history_is_kept_whole() {
        let history = numbered_history(3);
        let seq = PromptSequence::with_persona(&history, "q");
        assert_eq!(seq.len(), 5);
        assert_eq!(&seq.turns()[1..4], &history[..]);
    }

    #[test]
    fn history_exactly_at_cap_is_not_trimmed() {
        let history = numbered_history(HISTORY_CAP);
        let seq = PromptSequence::with_persona(&history, "q");
        assert_eq!(seq.history_len(), HISTORY_CAP);
        assert_eq!(seq.turns()[1].content, "turn 0");
    }

    #[test]
    fn length_never_exceeds_cap_plus_two() {
        for n in [0, 1, 9, 10, 11, 50] {
            let seq = PromptSequence::build("sys", &numbered_history(n), "m", 4);
            assert!(seq.len() <= 6, "n={n} len={}", seq.len());
        }
    }

    #[test]
    fn first_turn_is_system_and_last_is_user() {
        let seq = PromptSequence::build("sys", &numbered_history(4), "latest", 10);
        assert_eq!(seq.turns()[0].role, Role::System);
        assert_eq!(seq.turns().last().unwrap(), &ConversationTurn::user("latest"));
    }
}
