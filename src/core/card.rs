//! Scheme card types

use crate::core::CardId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Type line that marks a scheme as ongoing
const ONGOING_TYPE_LINE: &str = "ongoing scheme";

/// One scheme card as it exists during a session
///
/// Cards are immutable after creation; a session only ever moves them
/// between zones. Many session cards can share the same printed scheme
/// (decks may run duplicates), so `id` identifies the instance, not the
/// printing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeCard {
    /// Unique ID for this card instance
    pub id: CardId,

    /// Scheme name (e.g., "Every Last Vestige Shall Rot")
    pub name: String,

    /// Type line (e.g., "Scheme" or "Ongoing Scheme")
    pub type_line: String,

    /// Rules text
    pub text: String,

    /// Image references (typically a small and a full-size art file)
    pub images: SmallVec<[String; 2]>,
}

impl SchemeCard {
    pub fn new(id: CardId, name: String, type_line: String) -> Self {
        SchemeCard {
            id,
            name,
            type_line,
            text: String::new(),
            images: SmallVec::new(),
        }
    }

    /// Whether this scheme stays in play once drawn
    ///
    /// Classification is a case-insensitive exact match on the type line;
    /// anything that is not literally an ongoing scheme resolves and is
    /// set aside when the next scheme is drawn.
    pub fn is_ongoing(&self) -> bool {
        self.type_line.trim().eq_ignore_ascii_case(ONGOING_TYPE_LINE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ongoing_classification() {
        let mut card = SchemeCard::new(
            CardId::new(0),
            "Approach My Molten Realm".to_string(),
            "Scheme".to_string(),
        );
        assert!(!card.is_ongoing());

        card.type_line = "Ongoing Scheme".to_string();
        assert!(card.is_ongoing());

        // Case and surrounding whitespace are irrelevant
        card.type_line = "  ONGOING SCHEME ".to_string();
        assert!(card.is_ongoing());

        // Prefix/suffix matches do not count
        card.type_line = "Ongoing Scheme - Legendary".to_string();
        assert!(!card.is_ongoing());
    }
}
