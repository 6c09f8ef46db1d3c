//! End-to-end round lifecycle through the library API.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use ruleta::engine::RoundRegistry;
use ruleta::storage::MemoryStore;
use ruleta::types::*;

use crate::scripted_wheel::ScriptedWheel;

fn registry_with(script: &[u8]) -> (RoundRegistry, ScriptedWheel) {
    let wheel = ScriptedWheel::new(script);
    let registry = RoundRegistry::new(Box::new(MemoryStore::new()), Box::new(wheel.clone()));
    (registry, wheel)
}

#[test]
fn test_two_consecutive_rounds_on_one_table() {
    let (mut registry, wheel) = registry_with(&[7, 18]);
    let id = registry.create();

    // Round 1: lands on 7.
    registry.open(&id).unwrap();
    registry.place_wager(&id, &WagerRequest::on_number(7, 100.0)).unwrap();
    registry.place_wager(&id, &WagerRequest::on_color("red", 50.0)).unwrap();
    let first = registry.close(&id).unwrap();
    assert_eq!(first.winning_number, 7);
    assert_eq!(first.winning_color, Color::Black);
    assert_eq!(first.results[0].result, Verdict::Win);
    assert_eq!(first.results[0].payout, dec!(500.00));
    assert_eq!(first.results[1].result, Verdict::Lose);
    assert_eq!(first.results[1].payout, Decimal::ZERO);

    // Round 2: fresh wagers, lands on 18.
    registry.open(&id).unwrap();
    assert_eq!(registry.list()[0].total_wagers, 0);
    registry.place_wager(&id, &WagerRequest::on_color("Rojo", 50.0)).unwrap();
    let second = registry.close(&id).unwrap();
    assert_eq!(second.winning_number, 18);
    assert_eq!(second.results.len(), 1);
    assert_eq!(second.results[0].payout, dec!(90.00));

    assert_eq!(*wheel.drawn().lock().unwrap(), vec![7, 18]);
}

#[test]
fn test_failed_operations_never_spin_or_mutate() {
    let (mut registry, wheel) = registry_with(&[3]);
    let id = registry.create();

    assert_eq!(registry.close(&id), Err(RoundError::NotOpen));
    assert_eq!(registry.close("unknown"), Err(RoundError::NotFound));
    assert!(wheel.drawn().lock().unwrap().is_empty());

    registry.open(&id).unwrap();
    let bad = [
        WagerRequest::on_number(5, 10_001.0),
        WagerRequest::on_number(99, 5.0),
        WagerRequest::on_color("purple", 5.0),
        WagerRequest::default(),
    ];
    for req in &bad {
        assert!(registry.place_wager(&id, req).is_err());
    }
    let detail = registry.get(&id).unwrap();
    assert!(detail.wagers.is_empty());
    assert_eq!(detail.status, RoundStatus::Open);
}

#[test]
fn test_settled_round_keeps_wagers_until_reopened() {
    let (mut registry, _) = registry_with(&[0]);
    let id = registry.create();
    registry.open(&id).unwrap();
    registry.place_wager(&id, &WagerRequest::on_number(0, 1.0)).unwrap();
    registry.close(&id).unwrap();

    let summary = &registry.list()[0];
    assert_eq!(summary.status, RoundStatus::Closed);
    assert_eq!(summary.total_wagers, 1);
    assert_eq!(summary.winning_number, Some(0));
    assert_eq!(summary.winning_color, Some(Color::Red));

    registry.open(&id).unwrap();
    let summary = &registry.list()[0];
    assert_eq!(summary.total_wagers, 0);
    assert!(summary.winning_number.is_none());
}

#[test]
fn test_redundant_open_preserves_in_flight_wagers() {
    let (mut registry, _) = registry_with(&[1]);
    let id = registry.create();
    registry.open(&id).unwrap();
    registry.place_wager(&id, &WagerRequest::on_color("negro", 10.0)).unwrap();
    registry.place_wager(&id, &WagerRequest::on_number(1, 10.0)).unwrap();

    let reopened = registry.open(&id).unwrap();
    assert_eq!(reopened.status, RoundStatus::Open);

    let outcome = registry.close(&id).unwrap();
    assert_eq!(outcome.results.len(), 2);
    assert_eq!(outcome.results[0].payout, dec!(18));
    assert_eq!(outcome.results[1].payout, dec!(50));
}

#[test]
fn test_seeded_draws_are_roughly_uniform() {
    let mut registry = RoundRegistry::in_memory(Some(37));
    let id = registry.create();
    let mut counts = [0u32; 37];

    for _ in 0..11_100 {
        registry.open(&id).unwrap();
        let outcome = registry.close(&id).unwrap();
        counts[outcome.winning_number as usize] += 1;
    }

    // Expected 300 per pocket, std dev ~17.
    for (pocket, &count) in counts.iter().enumerate() {
        assert!((200..=400).contains(&count), "pocket {pocket} drawn {count} times");
    }
}

#[test]
fn test_winning_color_matches_parity() {
    let script: Vec<u8> = (0..=36).collect();
    let (mut registry, _) = registry_with(&script);
    let id = registry.create();
    for n in 0..=36u8 {
        registry.open(&id).unwrap();
        let outcome = registry.close(&id).unwrap();
        assert_eq!(outcome.winning_number, n);
        let expected = if n % 2 == 0 { Color::Red } else { Color::Black };
        assert_eq!(outcome.winning_color, expected);
    }
}
