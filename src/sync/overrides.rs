use std::sync::LazyLock;

use regex::Regex;

static PROMO_COLLECTOR_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[s★c]$").expect("Invalid regex"));

/// Memorabilia set codes kept in the catalog despite their set type.
const MEMORABILIA_CATALOGUED: [&str; 3] = ["ptg", "30a", "p30a"];

/// Set codes whose card prints are never imported.
const EXCLUDED_CARD_SET_CODES: [&str; 2] = ["cmb1", "cmb2"];

/// Curated block assignment for sets the upstream data leaves
/// ungrouped.
#[must_use]
pub fn block_override(code: &str) -> Option<(&'static str, &'static str)> {
    match code {
        "gnt" | "gn2" | "gn3" => Some(("gnt", "Game Night")),
        _ => None,
    }
}

/// Curated parent-set corrections for sets the upstream data links
/// to the wrong parent or to none.
#[must_use]
pub fn parent_override(code: &str) -> Option<&'static str> {
    match code {
        "gk1" => Some("grn"),
        "gk2" => Some("rna"),
        "pltc" => Some("ltc"),
        "h1r" => Some("mh1"),
        "h2r" => Some("mh2"),
        _ => None,
    }
}

#[must_use]
pub fn is_memorabilia_catalogued(code: &str) -> bool {
    MEMORABILIA_CATALOGUED.contains(&code)
}

#[must_use]
pub fn is_card_set_excluded(code: &str) -> bool {
    EXCLUDED_CARD_SET_CODES.contains(&code)
}

/// Prints whose collector number carries a stamp or variant marker
/// are promotional even when not flagged as such.
#[must_use]
pub fn has_promo_collector_number(collector_number: &str) -> bool {
    PROMO_COLLECTOR_NUMBER.is_match(collector_number)
}

/// Parses the "A deck can have ... cards named X." clause from a
/// card's rules text. `i32::MAX` stands for "any number".
#[must_use]
pub fn special_deck_restrictions(name: &str, oracle_text: &str) -> Option<i32> {
    let pattern = format!(
        "A deck can have (any number of cards|only one card|up to (\\w+) cards) named {}\\.",
        regex::escape(name)
    );
    let regex = Regex::new(&pattern).ok()?;
    let captures = regex.captures(oracle_text)?;
    match captures.get(1)?.as_str() {
        "any number of cards" => Some(i32::MAX),
        "only one card" => Some(1),
        _ => {
            let word = captures.get(2)?.as_str();
            match count_word(word) {
                Some(count) => Some(count),
                None => {
                    log::warn!("Unrecognised deck restriction count {word:?} on {name:?}");
                    None
                }
            }
        }
    }
}

fn count_word(word: &str) -> Option<i32> {
    let count = match word {
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        "thirteen" => 13,
        "fourteen" => 14,
        "fifteen" => 15,
        _ => return None,
    };
    Some(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_night_sets_share_a_block() {
        assert_eq!(block_override("gn2"), Some(("gnt", "Game Night")));
        assert_eq!(block_override("neo"), None);
    }

    #[test]
    fn test_guild_kit_parents_are_corrected() {
        assert_eq!(parent_override("gk1"), Some("grn"));
        assert_eq!(parent_override("gk2"), Some("rna"));
        assert_eq!(parent_override("tneo"), None);
    }

    #[test]
    fn test_catalogued_memorabilia() {
        assert!(is_memorabilia_catalogued("ptg"));
        assert!(!is_memorabilia_catalogued("uplist"));
    }

    #[test]
    fn test_promo_collector_number_markers() {
        assert!(has_promo_collector_number("123s"));
        assert!(has_promo_collector_number("45★"));
        assert!(has_promo_collector_number("7c"));
        assert!(!has_promo_collector_number("123"));
        assert!(!has_promo_collector_number("45p7"));
    }

    #[test]
    fn test_seven_dwarves_restriction() {
        let restriction = special_deck_restrictions(
            "Seven Dwarves",
            "A deck can have up to seven cards named Seven Dwarves.",
        );
        assert_eq!(restriction, Some(7));
    }

    #[test]
    fn test_any_number_restriction() {
        let restriction = special_deck_restrictions(
            "Persistent Petitioners",
            "A deck can have any number of cards named Persistent Petitioners.",
        );
        assert_eq!(restriction, Some(i32::MAX));
    }

    #[test]
    fn test_only_one_restriction() {
        let restriction = special_deck_restrictions(
            "Seven Dwarves",
            "A deck can have only one card named Seven Dwarves.",
        );
        assert_eq!(restriction, Some(1));
    }

    #[test]
    fn test_plain_rules_text_has_no_restriction() {
        assert_eq!(special_deck_restrictions("Consider", "Surveil 1."), None);
    }

    #[test]
    fn test_restriction_requires_exact_name() {
        let restriction = special_deck_restrictions(
            "Shadowborn Apostle",
            "A deck can have any number of cards named Rat Colony.",
        );
        assert_eq!(restriction, None);
    }
}
