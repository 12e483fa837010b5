//! Maps free-text completion answers onto catalog characters.
//!
//! Precedence: exact (case-insensitive) match, then containment in either
//! direction, then a fuzzy score of `100 * shared tokens - edit distance`
//! over normalized names. The only non-deterministic path is the random
//! pick used when fuzzy scoring has no candidate at all.

use std::collections::HashSet;

use charades_domain::{Character, MatchKind};

use crate::infrastructure::ports::RandomPort;

/// The character an answer most plausibly names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub character: &'a Character,
    pub kind: MatchKind,
}

/// Whether `guess` names `target`: case-insensitive equality or containment
/// in either direction.
pub fn names_match(guess: &str, target: &str) -> bool {
    let guess = guess.trim().to_lowercase();
    let target = target.trim().to_lowercase();
    if guess.is_empty() {
        return false;
    }
    guess == target || guess.contains(&target) || target.contains(&guess)
}

/// Resolve `guess` against `catalog`. Returns `None` only for an empty catalog.
pub fn resolve<'a>(
    guess: &str,
    catalog: &'a [Character],
    random: &dyn RandomPort,
) -> Option<Resolution<'a>> {
    if catalog.is_empty() {
        return None;
    }

    let needle = guess.trim().to_lowercase();
    if !needle.is_empty() {
        let names: Vec<String> = catalog.iter().map(|c| c.name.trim().to_lowercase()).collect();

        if let Some(i) = names.iter().position(|name| *name == needle) {
            return Some(Resolution {
                character: &catalog[i],
                kind: MatchKind::Exact,
            });
        }

        if let Some(i) = names.iter().position(|name| {
            !name.is_empty() && (needle.contains(name.as_str()) || name.contains(&needle))
        }) {
            return Some(Resolution {
                character: &catalog[i],
                kind: MatchKind::Contained,
            });
        }
    }

    if let Some(character) = fuzzy_best(guess, catalog) {
        return Some(Resolution {
            character,
            kind: MatchKind::Fuzzy,
        });
    }

    let character = &catalog[random.gen_index(catalog.len())];
    tracing::warn!(
        guess = %guess,
        fallback_character = %character.name,
        "Completion answer matched no catalog character, picked one at random"
    );
    Some(Resolution {
        character,
        kind: MatchKind::RandomFallback,
    })
}

/// Lowercase, keep alphanumerics and spaces, trim.
fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Highest `100 * overlap - distance`, ties to the smaller distance, then
/// to the earlier candidate.
fn fuzzy_best<'a>(guess: &str, catalog: &'a [Character]) -> Option<&'a Character> {
    let guess = normalize(guess);
    if guess.is_empty() {
        return None;
    }
    let guess_tokens: HashSet<&str> = guess.split_whitespace().collect();

    let mut best: Option<(&Character, i64, usize)> = None;
    for character in catalog {
        let name = normalize(&character.name);
        if name.is_empty() {
            continue;
        }
        let tokens: HashSet<&str> = name.split_whitespace().collect();
        let overlap = tokens.intersection(&guess_tokens).count();
        let distance = strsim::levenshtein(&name, &guess);
        let score = overlap as i64 * 100 - distance as i64;

        let better = match best {
            None => true,
            Some((_, best_score, best_distance)) => {
                score > best_score || (score == best_score && distance < best_distance)
            }
        };
        if better {
            best = Some((character, score, distance));
        }
    }

    best.map(|(character, _, _)| character)
}
