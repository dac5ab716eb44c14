//! Cascade benchmark suite.
//!
//! The classifier and the order computation run on every generate call,
//! ahead of any network I/O, so they should stay comfortably sub-microsecond:
//!   classify_quota_error ............. < 1μs
//!   classify_transient_error ......... < 1μs
//!   classify_unknown_error ........... < 1μs
//!   attempt_order_ranked ............. < 1μs
//!   attempt_order_preferred .......... < 1μs

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cascade_core::classify::{classify, FailureClass};
use cascade_core::provider::ProviderId;
use cascade_core::state::ScoreBoard;

fn seeded_board() -> ScoreBoard {
    let mut board = ScoreBoard::new(ProviderId::ALL);
    for _ in 0..8 {
        board.record_success(ProviderId::Claude);
    }
    for _ in 0..2 {
        board.record_failure(ProviderId::Claude, FailureClass::Transient);
    }
    board.record_success(ProviderId::Gemini);
    board.record_failure(ProviderId::Gemini, FailureClass::Transient);
    board
}

fn bench_classify(c: &mut Criterion) {
    let quota = "claude API error: HTTP 400 Bad Request: Your credit balance is too low to access the API";
    let transient = "gemini API error: HTTP 503 Service Unavailable: upstream unavailable";
    let unknown = "openai returned a malformed response: missing field `choices`";

    c.bench_function("classify_quota_error", |b| {
        b.iter(|| classify(black_box(quota)));
    });
    c.bench_function("classify_transient_error", |b| {
        b.iter(|| classify(black_box(transient)));
    });
    c.bench_function("classify_unknown_error", |b| {
        b.iter(|| classify(black_box(unknown)));
    });
}

fn bench_order(c: &mut Criterion) {
    let board = seeded_board();

    c.bench_function("attempt_order_ranked", |b| {
        b.iter(|| board.attempt_order(black_box(None)));
    });
    c.bench_function("attempt_order_preferred", |b| {
        b.iter(|| board.attempt_order(black_box(Some(ProviderId::OpenAi))));
    });
}

criterion_group!(benches, bench_classify, bench_order);
criterion_main!(benches);
