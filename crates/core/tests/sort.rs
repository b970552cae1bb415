// Unit tests for card ordering
use binder_core::util::sort::{CardOrder, sort_cards};
use serde_json::{Value, json};

fn numbers(cards: &[Value]) -> Vec<String> {
    cards
        .iter()
        .map(|c| match &c["number"] {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}

#[test]
fn test_sort_by_number_is_natural() {
    let mut cards = vec![
        json!({"set": "base1", "number": "10"}),
        json!({"set": "base1", "number": "2"}),
        json!({"set": "base1", "number": 44}),
        json!({"set": "base1", "number": "TG01"}),
    ];

    sort_cards(&mut cards, CardOrder::Number);

    assert_eq!(
        numbers(&cards),
        vec!["2", "10", "44", "TG01"]
    );
}

#[test]
fn test_sort_by_number_groups_sets() {
    let mut cards = vec![
        json!({"set": "jungle", "number": "1"}),
        json!({"set": "base1", "number": "99"}),
        json!({"set": "base1", "number": "1"}),
    ];

    sort_cards(&mut cards, CardOrder::Number);

    let sets: Vec<&str> = cards.iter().map(|c| c["set"].as_str().unwrap()).collect();
    assert_eq!(sets, vec!["base1", "base1", "jungle"]);
    assert_eq!(cards[0]["number"], "1");
}

#[test]
fn test_sort_by_id_puts_unknown_last() {
    let mut cards = vec![
        json!({"pokemon": "missingno"}),
        json!({"pokemon": "pikachu", "id": 25}),
        json!({"pokemon": "bulbasaur", "id": 1}),
    ];

    sort_cards(&mut cards, CardOrder::Id);

    let names: Vec<&str> = cards
        .iter()
        .map(|c| c["pokemon"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["bulbasaur", "pikachu", "missingno"]);
}

#[test]
fn test_source_order_untouched() {
    let mut cards = vec![json!({"id": 3}), json!({"id": 1})];
    sort_cards(&mut cards, CardOrder::Source);
    assert_eq!(cards[0]["id"], 3);
}

#[test]
fn test_parse_order() {
    assert_eq!(CardOrder::parse("number"), Some(CardOrder::Number));
    assert_eq!(CardOrder::parse("none"), Some(CardOrder::Source));
    assert_eq!(CardOrder::parse("alphabetical"), None);
}
