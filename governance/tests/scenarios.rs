//! End-to-end governance scenarios: engine + in-memory store + nullable
//! oracle and clock, driven only through the public API.

use std::sync::Arc;
use std::thread;

use yideng_governance::{
    GovernanceEngine, GovernanceError, GovernanceParams, ProposalState, VotingPowerPolicy,
};
use yideng_nullables::{NullBalanceOracle, NullClock};
use yideng_types::{Address, AuthorityGate, TokenAmount};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const START: u64 = 1_700_000_000;
const ONE_HOUR: u64 = 3600;

fn addr(name: &str) -> Address {
    Address::new(format!("0x{name}"))
}

fn amount(raw: u128) -> TokenAmount {
    TokenAmount::new(raw)
}

struct Dao {
    engine: Arc<GovernanceEngine>,
    oracle: Arc<NullBalanceOracle>,
    clock: Arc<NullClock>,
}

fn dao(quorum: u128, policy: VotingPowerPolicy) -> Dao {
    let oracle = Arc::new(NullBalanceOracle::with_balances([("0xX", 60), ("0xY", 50)]));
    let clock = Arc::new(NullClock::new(START));
    let params = GovernanceParams {
        quorum: amount(quorum),
        voting_power: policy,
        ..GovernanceParams::default()
    };
    let engine = Arc::new(GovernanceEngine::new(
        params,
        oracle.clone(),
        clock.clone(),
        AuthorityGate::new(addr("admin")),
    ));
    Dao {
        engine,
        oracle,
        clock,
    }
}

// ---------------------------------------------------------------------------
// Tally scenarios
// ---------------------------------------------------------------------------

#[test]
fn majority_with_quorum_passes() {
    let d = dao(100, VotingPowerPolicy::Snapshot);
    let id = d
        .engine
        .create_proposal(&addr("X"), "fund the workshop", ONE_HOUR)
        .unwrap();

    d.engine.vote(&addr("X"), id, true).unwrap();
    d.engine.vote(&addr("Y"), id, false).unwrap();

    let stats = d.engine.vote_stats(id).unwrap();
    assert_eq!(stats.votes_for, amount(60));
    assert_eq!(stats.votes_against, amount(50));
    assert_eq!(stats.total_votes, amount(110));
    assert!(stats.passed);
}

#[test]
fn majority_without_quorum_fails() {
    let d = dao(100, VotingPowerPolicy::Snapshot);
    let id = d
        .engine
        .create_proposal(&addr("X"), "fund the workshop", ONE_HOUR)
        .unwrap();

    d.engine.vote(&addr("X"), id, true).unwrap();

    let stats = d.engine.vote_stats(id).unwrap();
    assert_eq!(stats.total_votes, amount(60));
    assert!(stats.votes_for > stats.votes_against);
    assert!(!stats.passed);
}

#[test]
fn stats_readable_after_finalization() {
    let d = dao(100, VotingPowerPolicy::Snapshot);
    let id = d.engine.create_proposal(&addr("X"), "p", ONE_HOUR).unwrap();
    d.engine.vote(&addr("X"), id, true).unwrap();
    d.engine.vote(&addr("Y"), id, false).unwrap();

    d.clock.advance(ONE_HOUR);
    let final_stats = d.engine.finalize(id).unwrap();
    assert!(final_stats.passed);
    assert_eq!(d.engine.vote_stats(id).unwrap(), final_stats);
    assert_eq!(final_stats.state, ProposalState::Finalized);
}

// ---------------------------------------------------------------------------
// Protocol rules
// ---------------------------------------------------------------------------

#[test]
fn second_vote_from_same_account_is_rejected() {
    let d = dao(0, VotingPowerPolicy::Snapshot);
    let id = d.engine.create_proposal(&addr("X"), "p", ONE_HOUR).unwrap();

    d.engine.vote(&addr("X"), id, true).unwrap();
    assert_eq!(
        d.engine.vote(&addr("X"), id, false),
        Err(GovernanceError::AlreadyVoted {
            proposal: id,
            voter: addr("X")
        })
    );
    let stats = d.engine.vote_stats(id).unwrap();
    assert_eq!(stats.votes_for, amount(60));
    assert_eq!(stats.votes_against, TokenAmount::ZERO);
}

#[test]
fn vote_at_or_after_deadline_is_closed() {
    let d = dao(0, VotingPowerPolicy::Snapshot);
    let id = d.engine.create_proposal(&addr("X"), "p", ONE_HOUR).unwrap();

    d.clock.advance(ONE_HOUR);
    assert_eq!(
        d.engine.vote(&addr("X"), id, true),
        Err(GovernanceError::VotingClosed(id))
    );
    d.clock.advance(10 * ONE_HOUR);
    assert_eq!(
        d.engine.vote(&addr("Y"), id, false),
        Err(GovernanceError::VotingClosed(id))
    );
    assert_eq!(d.engine.vote_stats(id).unwrap().total_votes, TokenAmount::ZERO);
}

#[test]
fn vote_after_finalize_is_closed() {
    let d = dao(0, VotingPowerPolicy::Snapshot);
    let id = d.engine.create_proposal(&addr("X"), "p", ONE_HOUR).unwrap();
    d.clock.advance(ONE_HOUR);
    d.engine.finalize(id).unwrap();
    assert_eq!(
        d.engine.vote(&addr("X"), id, true),
        Err(GovernanceError::VotingClosed(id))
    );
}

#[test]
fn finalize_twice_is_rejected() {
    let d = dao(0, VotingPowerPolicy::Snapshot);
    let id = d.engine.create_proposal(&addr("X"), "p", ONE_HOUR).unwrap();

    assert_eq!(
        d.engine.finalize(id),
        Err(GovernanceError::VotingStillOpen(id))
    );
    d.clock.advance(ONE_HOUR);
    assert!(d.engine.finalize(id).is_ok());
    assert_eq!(
        d.engine.finalize(id),
        Err(GovernanceError::AlreadyExecuted(id))
    );
}

#[test]
fn proposals_are_independent() {
    let d = dao(0, VotingPowerPolicy::Snapshot);
    let a = d.engine.create_proposal(&addr("X"), "a", ONE_HOUR).unwrap();
    let b = d.engine.create_proposal(&addr("X"), "b", 2 * ONE_HOUR).unwrap();

    d.engine.vote(&addr("X"), a, true).unwrap();
    d.engine.vote(&addr("X"), b, false).unwrap();

    d.clock.advance(ONE_HOUR);
    d.engine.finalize(a).unwrap();
    assert_eq!(d.engine.proposal_state(b), Ok(ProposalState::Open));
    d.engine.vote(&addr("Y"), b, false).unwrap();
    assert_eq!(d.engine.vote_stats(b).unwrap().votes_against, amount(110));
}

// ---------------------------------------------------------------------------
// Voting power policies
// ---------------------------------------------------------------------------

#[test]
fn snapshot_policy_ignores_tokens_acquired_mid_vote() {
    let d = dao(0, VotingPowerPolicy::Snapshot);
    let id = d.engine.create_proposal(&addr("X"), "p", ONE_HOUR).unwrap();

    d.oracle.set_balance(&addr("Y"), 10_000);
    d.oracle.set_balance(&addr("late"), 500);

    assert_eq!(
        d.engine.calculate_voting_power(&addr("Y"), id),
        Ok(amount(50))
    );
    d.engine.vote(&addr("Y"), id, false).unwrap();
    assert_eq!(d.engine.vote_stats(id).unwrap().votes_against, amount(50));

    assert_eq!(
        d.engine.vote(&addr("late"), id, true),
        Err(GovernanceError::ZeroVotingPower(addr("late")))
    );
}

#[test]
fn each_proposal_freezes_its_own_snapshot() {
    let d = dao(0, VotingPowerPolicy::Snapshot);
    let before = d.engine.create_proposal(&addr("X"), "before", ONE_HOUR).unwrap();
    d.oracle.set_balance(&addr("X"), 1_000);
    let after = d.engine.create_proposal(&addr("X"), "after", ONE_HOUR).unwrap();

    assert_eq!(d.engine.calculate_voting_power(&addr("X"), before), Ok(amount(60)));
    assert_eq!(d.engine.calculate_voting_power(&addr("X"), after), Ok(amount(1_000)));
}

#[test]
fn live_policy_reads_balance_at_vote_time() {
    let d = dao(0, VotingPowerPolicy::Live);
    let id = d.engine.create_proposal(&addr("X"), "p", ONE_HOUR).unwrap();

    d.oracle.set_balance(&addr("Y"), 70);
    d.engine.vote(&addr("Y"), id, false).unwrap();
    d.engine.vote(&addr("X"), id, true).unwrap();

    let stats = d.engine.vote_stats(id).unwrap();
    assert_eq!(stats.votes_against, amount(70));
    assert!(!stats.passed);
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn concurrent_duplicate_votes_count_once() {
    let d = dao(0, VotingPowerPolicy::Snapshot);
    let id = d.engine.create_proposal(&addr("X"), "p", ONE_HOUR).unwrap();

    let results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..16)
            .map(|_| s.spawn(|| d.engine.vote(&addr("X"), id, true)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, GovernanceError::AlreadyVoted { .. })));
    assert_eq!(d.engine.vote_stats(id).unwrap().votes_for, amount(60));
}

#[test]
fn concurrent_distinct_voters_all_counted() {
    let d = dao(0, VotingPowerPolicy::Snapshot);
    for i in 0..32 {
        d.oracle.set_balance(&addr(&format!("v{i}")), 1);
    }
    let id = d.engine.create_proposal(&addr("X"), "p", ONE_HOUR).unwrap();

    thread::scope(|s| {
        for i in 0..32 {
            let engine = &d.engine;
            s.spawn(move || engine.vote(&addr(&format!("v{i}")), id, i % 2 == 0).unwrap());
        }
    });

    let stats = d.engine.vote_stats(id).unwrap();
    assert_eq!(stats.votes_for, amount(16));
    assert_eq!(stats.votes_against, amount(16));
    assert_eq!(d.engine.proposal(id).unwrap().voters.len(), 32);
}

#[test]
fn concurrent_creation_yields_unique_ids() {
    let d = dao(0, VotingPowerPolicy::Live);
    let mut ids: Vec<u64> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let engine = &d.engine;
                s.spawn(move || {
                    (0..25)
                        .map(|j| {
                            engine
                                .create_proposal(&addr("X"), &format!("p{i}-{j}"), ONE_HOUR)
                                .unwrap()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });
    ids.sort_unstable();
    assert_eq!(ids, (1..=200).collect::<Vec<_>>());
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

#[test]
fn finalized_proposal_serializes_to_json() {
    let d = dao(10, VotingPowerPolicy::Snapshot);
    let id = d
        .engine
        .create_proposal(&addr("X"), "publish the syllabus", ONE_HOUR)
        .unwrap();
    d.engine.vote(&addr("X"), id, true).unwrap();
    d.clock.advance(ONE_HOUR);
    let stats = d.engine.finalize(id).unwrap();

    let json = serde_json::to_value(stats).unwrap();
    assert_eq!(json["state"], "finalized");
    assert_eq!(json["votes_for"], 60);
    assert_eq!(json["passed"], true);

    let proposal = d.engine.proposal(id).unwrap();
    let text = serde_json::to_string(&proposal).unwrap();
    let back: yideng_governance::Proposal = serde_json::from_str(&text).unwrap();
    assert_eq!(back, proposal);
    assert!(back.voters.contains_key(&addr("X")));
}
