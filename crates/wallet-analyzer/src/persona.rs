//! Persona labels for each complexity level.

use serde::Serialize;

use crate::scoring::MAX_COMPLEXITY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Persona {
    pub level: u8,
    pub title: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
}

/// One persona per complexity level, indexed by level.
#[rustfmt::skip]
pub const PERSONAS: [Persona; MAX_COMPLEXITY as usize + 1] = [
    Persona { level: 0, title: "Amish", emoji: "🚫", description: "What's a computer?" },
    Persona { level: 1, title: "Peter Schiff", emoji: "🪙", description: "Still thinks crypto is a Ponzi scheme" },
    Persona { level: 2, title: "Elizabeth Warren", emoji: "👩‍⚖️", description: "Thinks crypto is only for criminals" },
    Persona { level: 3, title: "Jim Cramer", emoji: "📺", description: "Finally excited about crypto" },
    Persona { level: 4, title: "Mark Cuban", emoji: "🦈", description: "Got rugged but still believes" },
    Persona { level: 5, title: "Gary Gensler", emoji: "👨‍🏫", description: "Taught crypto at MIT, now regulates it" },
    Persona { level: 6, title: "Sam Bankman-Fried", emoji: "👨‍🦱", description: "Started off solid" },
    Persona { level: 7, title: "CZ Binance", emoji: "🔄", description: "Funds are SAFU" },
    Persona { level: 8, title: "Do Kwon", emoji: "🌕", description: "Up and to the right!?!" },
    Persona { level: 9, title: "Vitalik Buterin", emoji: "👨‍💻", description: "Created Ethereum in his sleep" },
    Persona { level: 10, title: "Satoshi Nakamoto", emoji: "👻", description: "The one who started it all" },
];

impl Persona {
    /// Persona for a complexity score; scores above the scale map to the top level.
    pub fn for_complexity(score: u8) -> &'static Persona {
        &PERSONAS[usize::from(score.min(MAX_COMPLEXITY))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_match_index() {
        for (i, persona) in PERSONAS.iter().enumerate() {
            assert_eq!(usize::from(persona.level), i);
        }
    }

    #[test]
    fn test_for_complexity() {
        assert_eq!(Persona::for_complexity(0).title, "Amish");
        assert_eq!(Persona::for_complexity(6).title, "Sam Bankman-Fried");
        assert_eq!(Persona::for_complexity(10).title, "Satoshi Nakamoto");
        assert_eq!(Persona::for_complexity(200).level, 10);
    }
}
