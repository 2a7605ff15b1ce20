//! Local-only conversation responder.
//!
//! A pure function mapping an utterance to a canned reply. Used when no
//! authenticated session exists and chat runs entirely against the local
//! snapshot store.

/// One keyword rule: the reply fires when any keyword is contained in the
/// lowercased input.
struct Rule {
    keywords: &'static [&'static str],
    reply: &'static str,
}

/// Rules are tested in order and the first match wins. The order is part of
/// the contract: "estou bem e feliz" must hit the happiness branch, never
/// the fallback, and greetings outrank everything else.
const RULES: &[Rule] = &[
    Rule {
        keywords: &["olá", "oi", "hey"],
        reply: "Olá! É um prazer conversar com você. Como você está se sentindo hoje?",
    },
    Rule {
        keywords: &["ansioso", "ansiedade"],
        reply: "Entendo que você está se sentindo ansioso. Que tal fazer um exercício de respiração? Acesse a opção 'Respirar' no menu.",
    },
    Rule {
        keywords: &["triste", "tristeza"],
        reply: "Sinto muito que você esteja se sentindo assim. Lembre-se de que sentimentos são passageiros. Quer falar mais sobre isso?",
    },
    Rule {
        keywords: &["feliz", "bem"],
        reply: "Que maravilhoso ouvir isso! Momentos de alegria merecem ser celebrados. O que está trazendo essa felicidade?",
    },
    Rule {
        keywords: &["ajuda", "socorro"],
        reply: "Estou aqui para você. Posso oferecer exercícios de respiração, conversas reflexivas ou um espaço para escrever no diário. O que você precisa agora?",
    },
    Rule {
        keywords: &["obrigado", "obrigada"],
        reply: "Por nada! É um prazer poder ajudá-lo. Sempre que precisar, estarei aqui.",
    },
];

/// Generic empathetic fallback when no rule matches.
const FALLBACK: &str =
    "Compreendo. Conte-me mais sobre isso. Estou aqui para ouvir e ajudar no que for possível.";

/// Deterministic reply for `input`: case-insensitive substring containment
/// over [`RULES`], first match wins.
pub fn respond(input: &str) -> &'static str {
    let lower = input.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lower.contains(k)))
        .map(|rule| rule.reply)
        .unwrap_or(FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sadness_branch() {
        let reply = respond("estou triste hoje");
        assert!(reply.starts_with("Sinto muito"));
    }

    #[test]
    fn gratitude_branch() {
        let reply = respond("obrigado!");
        assert!(reply.starts_with("Por nada"));
    }

    #[test]
    fn unmatched_input_falls_back() {
        assert_eq!(respond("xyzzy123"), FALLBACK);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(respond("OBRIGADA"), respond("obrigada"));
        assert_eq!(respond("Estou ANSIOSO"), respond("estou ansioso"));
    }

    #[test]
    fn first_match_wins_on_overlap() {
        // "oi" (greeting) appears before "triste" in rule order, and the
        // greeting keyword occurs as a substring here.
        let reply = respond("oi, estou triste");
        assert!(reply.starts_with("Olá!"));
    }

    #[test]
    fn same_input_same_reply() {
        assert_eq!(respond("me sinto bem"), respond("me sinto bem"));
    }
}
