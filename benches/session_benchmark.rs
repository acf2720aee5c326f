//! Performance benchmarks for the session state machine
//!
//! Measures full-session throughput (select, draw out the pool, end) and
//! the cost of the individual hot transitions, using Criterion.rs.

use archenemy::core::{CardId, Deck, DeckId, SchemeCard};
use archenemy::session::Session;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jiff::Timestamp;

fn make_deck(size: u32) -> Deck {
    let cards = (0..size)
        .map(|i| {
            let type_line = if i % 4 == 0 { "Ongoing Scheme" } else { "Scheme" };
            SchemeCard::new(CardId::new(0), format!("S{i}"), type_line.to_string())
        })
        .collect();
    Deck {
        id: DeckId::new(1),
        name: "bench deck".to_string(),
        description: None,
        owner: "archenemy".to_string(),
        public: false,
        archived: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        cards,
    }
}

fn bench_full_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_session");
    for size in [20u32, 60, 200] {
        let decks = vec![make_deck(size)];
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut session = Session::with_seed(42);
                session.select_deck(DeckId::new(1), &decks).unwrap();
                session.start_game().unwrap();
                while session.draw_scheme().unwrap().is_some() {}
                session.end_game();
                black_box(session.game_ended)
            });
        });
    }
    group.finish();
}

fn bench_shuffle(c: &mut Criterion) {
    let decks = vec![make_deck(60)];
    c.bench_function("shuffle_pool_60", |b| {
        let mut session = Session::with_seed(42);
        session.select_deck(DeckId::new(1), &decks).unwrap();
        session.start_game().unwrap();
        b.iter(|| {
            session.shuffle_pool().unwrap();
            black_box(session.pool.len())
        });
    });
}

fn bench_draw_undo(c: &mut Criterion) {
    // Normal schemes only, so every draw feeds the resolved pile and each
    // draw/undo pair leaves the pool size unchanged.
    let mut deck = make_deck(60);
    for card in &mut deck.cards {
        card.type_line = "Scheme".to_string();
    }
    let decks = vec![deck];
    c.bench_function("draw_undo_pair", |b| {
        let mut session = Session::with_seed(42);
        session.select_deck(DeckId::new(1), &decks).unwrap();
        session.start_game().unwrap();
        // Prime one resolved card so undo always has work.
        session.draw_scheme().unwrap();
        session.draw_scheme().unwrap();
        b.iter(|| {
            session.draw_scheme().unwrap();
            session.undo_last_draw().unwrap();
            black_box(session.pool.len())
        });
    });
}

criterion_group!(benches, bench_full_session, bench_shuffle, bench_draw_undo);
criterion_main!(benches);
