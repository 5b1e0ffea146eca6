use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entropy::OsRandom;
use crate::domain::id_gen::is_well_formed;
use crate::domain::registry::SessionRegistry;
use crate::domain::session::now_unix;
use crate::domain::test_helpers::{alice, bob, FailingRandom, ScriptedRandom};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

#[test]
fn create_registers_empty_session() {
    let registry = SessionRegistry::new();
    let session = registry.create("10.0.0.7").unwrap();

    assert!(is_well_formed(session.id()));
    assert_eq!(session.owner(), "10.0.0.7");
    assert_eq!(session.difficulty(), 0);
    assert_eq!(session.player_count(), 0);
    assert_eq!(registry.len(), 1);
}

#[test]
fn find_by_id_returns_the_same_session() {
    let registry = SessionRegistry::new();
    let created = registry.create("owner").unwrap();
    created.add_player(alice()).unwrap();

    let found = registry.find_by_id(created.id()).unwrap();
    assert!(Arc::ptr_eq(&created, &found));
    assert_eq!(found.player_count(), 1);
}

#[test]
fn find_unknown_id_is_not_found() {
    let registry = SessionRegistry::new();
    let err = registry.find_by_id("zzzzzz").unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Session, _)));
}

#[test]
fn entropy_failure_registers_nothing() {
    let registry = SessionRegistry::with_random_source(Arc::new(FailingRandom));
    let err = registry.create("owner").unwrap_err();
    assert!(matches!(err, DomainError::Infra(..)));
    assert!(registry.is_empty());
}

#[test]
fn colliding_ids_are_redrawn() {
    // Six zeros give "aaaaaa" twice, then six ones give "bbbbbb".
    let mut script = vec![0; 12];
    script.extend([1; 6]);
    let registry = SessionRegistry::with_random_source(Arc::new(ScriptedRandom::new(&script)));

    let first = registry.create("owner").unwrap();
    let second = registry.create("owner").unwrap();
    assert_eq!(first.id(), "aaaaaa");
    assert_eq!(second.id(), "bbbbbb");
    assert_eq!(registry.len(), 2);
}

#[test]
fn exhausted_ids_are_a_conflict() {
    // Exhausted script keeps yielding index 0: every id is "aaaaaa".
    let registry = SessionRegistry::with_random_source(Arc::new(ScriptedRandom::new(&[])));
    registry.create("owner").unwrap();
    let err = registry.create("owner").unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::SessionIdExhausted, _)
    ));
    assert_eq!(registry.len(), 1);
}

#[test]
fn concurrent_creates_yield_distinct_sessions() {
    let registry = Arc::new(SessionRegistry::with_random_source(Arc::new(OsRandom)));
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                (0..10)
                    .map(|_| registry.create(&format!("owner-{t}")).unwrap().id().to_string())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for h in handles {
        for id in h.join().unwrap() {
            assert!(ids.insert(id));
        }
    }
    assert_eq!(registry.len(), 80);
}

#[test]
fn evict_idle_removes_only_stale_sessions() {
    let registry = SessionRegistry::new();
    let stale = registry.create("a").unwrap();
    let fresh = registry.create("b").unwrap();

    let now = now_unix();
    stale.set_last_active(now - 3_600);

    let evicted = registry.evict_idle_at(now, Duration::from_secs(600));
    assert_eq!(evicted, 1);
    assert!(registry.find_by_id(stale.id()).is_err());
    assert!(registry.find_by_id(fresh.id()).is_ok());
}

#[test]
fn session_activity_refreshes_last_active() {
    let registry = SessionRegistry::new();
    let session = registry.create("a").unwrap();
    session.set_last_active(0);

    session.add_player(alice()).unwrap();
    assert!(session.last_active() > 0);
    assert_eq!(registry.evict_idle(Duration::from_secs(600)), 0);
}

#[test]
fn evicted_session_rejects_later_operations() {
    let registry = SessionRegistry::new();
    let held = registry.create("a").unwrap();
    held.add_player(alice()).unwrap();

    let now = now_unix();
    held.set_last_active(now - 3_600);
    assert_eq!(registry.evict_idle_at(now, Duration::from_secs(600)), 1);
    assert!(held.is_closed());

    let err = held.add_player(bob()).unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Session, _)));
    let err = held.remove_player("Alice").unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Session, _)));
    let err = held.generate_round(":& drinks").unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Session, _)));
    assert_eq!(held.player_count(), 1);
}

#[test]
fn reading_a_session_counts_as_activity() {
    let registry = SessionRegistry::new();
    let session = registry.create("a").unwrap();
    session.set_last_active(0);

    let _ = session.snapshot();
    assert!(session.last_active() > 0);
    assert_eq!(registry.evict_idle(Duration::from_secs(600)), 0);
    assert!(!session.is_closed());
}
