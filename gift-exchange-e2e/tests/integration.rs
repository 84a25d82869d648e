// cargo test -p gift-exchange-e2e --test integration

use std::collections::HashMap;

use figment::providers::{Format as _, Toml};
use figment::Figment;
use gift_exchange_backend::{
    BroadcastSummary, Exchange, ExchangeError, ExchangeSettings, LogNotifier, Notifier,
    ParticipantDirectory, StaticDirectory,
};
use gift_exchange_config::Config;
use gift_exchange_e2e::{family, init_tracing, FailingNotifier};
use gift_exchange_optimizer::{
    generate, validate, Assignment, ForbiddenPairs, GenerationError, Group, Participant,
    DEFAULT_MAX_ATTEMPTS,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng as _};

/// Rebuilds the stored assignment from one reveal per participant.
fn revealed_assignment<D: ParticipantDirectory, N: Notifier, R: Rng>(
    exchange: &Exchange<D, N, R>,
    participants: &[Participant],
) -> Assignment {
    let ids: HashMap<&str, &str> = participants
        .iter()
        .map(|p| (p.name.as_str(), p.id.as_str()))
        .collect();
    participants
        .iter()
        .map(|giver| {
            let reveal = exchange.request_reveal(giver.id.as_str()).unwrap();
            (giver.id.as_str(), ids[reveal.receiver_name.as_str()])
        })
        .collect()
}

fn settings() -> ExchangeSettings {
    ExchangeSettings {
        budget: "$25–$40".to_owned(),
        max_attempts: DEFAULT_MAX_ATTEMPTS,
        forbidden_pairs: ForbiddenPairs::default(),
    }
}

#[test]
fn balanced_families_always_cross() {
    init_tracing();
    let participants = family();
    let groups: HashMap<&str, &Group> = participants
        .iter()
        .map(|p| (p.id.as_str(), &p.group))
        .collect();

    for seed in 0..50 {
        let assignment = generate(
            &participants,
            &ForbiddenPairs::default(),
            DEFAULT_MAX_ATTEMPTS,
            &mut StdRng::seed_from_u64(seed),
        )
        .unwrap();
        assert_eq!(assignment.len(), 6);
        for (giver, receiver) in assignment.iter() {
            assert_ne!(groups[giver.as_str()], groups[receiver.as_str()]);
        }
    }
}

#[test]
fn single_family_cannot_be_assigned() {
    init_tracing();
    let participants = vec![
        Participant::new("augustus", "Augustus", "Rollin"),
        Participant::new("genevieve", "Genevieve", "Rollin"),
    ];
    let result = generate(
        &participants,
        &ForbiddenPairs::default(),
        DEFAULT_MAX_ATTEMPTS,
        &mut StdRng::seed_from_u64(0),
    );
    assert_eq!(
        result,
        Err(GenerationError::Exhausted {
            attempts: DEFAULT_MAX_ATTEMPTS
        })
    );
}

#[test]
fn reveal_discloses_one_pair_only() {
    init_tracing();
    let exchange = Exchange::new(
        StaticDirectory::new(family()).unwrap(),
        LogNotifier,
        settings(),
    );
    let stored: Assignment = [
        ("augustus", "ethan"),
        ("genevieve", "lucas"),
        ("portia", "blake"),
        ("ethan", "genevieve"),
        ("lucas", "portia"),
        ("blake", "augustus"),
    ]
    .into_iter()
    .collect();
    exchange.replace_assignment(stored.clone());

    let reveal = exchange.request_reveal("augustus").unwrap();
    let body = serde_json::to_value(&reveal).unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "giverName": "Augustus", "receiverName": "Ethan" })
    );
    assert_eq!(body.as_object().map(serde_json::Map::len), Some(2));

    // revealing must not touch the stored assignment
    assert_eq!(revealed_assignment(&exchange, &family()), stored);
}

#[test]
fn reveal_of_unknown_participant_is_not_found() {
    init_tracing();
    let exchange = Exchange::new(
        StaticDirectory::new(family()).unwrap(),
        LogNotifier,
        settings(),
    );
    let error = exchange.request_reveal("rudolph").unwrap_err();
    assert!(error.is_not_found());
    assert_eq!(
        error,
        ExchangeError::UnknownParticipant("rudolph".to_owned())
    );
}

#[tokio::test]
async fn broadcast_reports_partial_failure() {
    init_tracing();
    let exchange = Exchange::with_rng(
        StaticDirectory::new(family()).unwrap(),
        FailingNotifier::new("lucas@example.com"),
        settings(),
        StdRng::seed_from_u64(5),
    );

    let summary = exchange.request_broadcast().await.unwrap();
    assert_eq!(
        summary,
        BroadcastSummary {
            sent_count: 5,
            failed_count: 1
        }
    );
    assert_eq!(
        serde_json::to_value(summary).unwrap(),
        serde_json::json!({ "sentCount": 5, "failedCount": 1 })
    );
}

#[tokio::test]
async fn reset_then_broadcast_uses_a_fresh_valid_assignment() {
    init_tracing();
    let notifier = FailingNotifier::new("nobody@example.com");
    let exchange = Exchange::with_rng(
        StaticDirectory::new(family()).unwrap(),
        notifier,
        settings(),
        StdRng::seed_from_u64(9),
    );

    exchange.request_reveal("portia").unwrap();
    assert!(exchange.request_reset().had_assignment);
    assert!(!exchange.has_assignment());

    let summary = exchange.request_broadcast().await.unwrap();
    assert_eq!(summary.sent_count, 6);
    assert_eq!(summary.failed_count, 0);

    let assignment = revealed_assignment(&exchange, &family());
    assert!(validate(&assignment, &family(), &ForbiddenPairs::default()).is_valid());
}

#[test]
fn shipped_roster_is_feasible() {
    init_tracing();
    let config: Config = Figment::new()
        .merge(Toml::string(include_str!("../../gift-exchange.toml")))
        .extract()
        .unwrap();
    assert_eq!(config.participants.len(), 6);

    let settings = ExchangeSettings::from(&config);
    let forbidden: ForbiddenPairs = config.forbidden_pairs.iter().collect();
    let exchange = Exchange::with_rng(
        StaticDirectory::new(config.participants.clone()).unwrap(),
        LogNotifier,
        settings,
        StdRng::seed_from_u64(1),
    );
    exchange.ensure_assignment().unwrap();

    let assignment = revealed_assignment(&exchange, &config.participants);
    assert!(validate(&assignment, &config.participants, &forbidden).is_valid());
}
