use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use quince_chess::game_state::game_state::GameState;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    fen: &'static str,
    expected_moves: usize,
}

const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: STARTPOS_FEN,
        expected_moves: 20,
    },
    BenchCase {
        name: "midgame",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        expected_moves: 48,
    },
    BenchCase {
        name: "endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_moves: 14,
    },
];

fn verify_cases() {
    for case in CASES {
        let game = GameState::from_fen(case.fen).expect("bench FEN should parse");
        let count = game.all_legal_moves().len();
        assert_eq!(
            count, case.expected_moves,
            "{}: expected {} legal moves, generated {}",
            case.name, case.expected_moves, count
        );
    }
}

fn bench_legal_moves(c: &mut Criterion) {
    verify_cases();

    let mut group = c.benchmark_group("all_legal_moves");
    for case in CASES {
        let game = GameState::from_fen(case.fen).expect("bench FEN should parse");
        group.bench_with_input(BenchmarkId::from_parameter(case.name), &game, |b, game| {
            b.iter(|| black_box(game.all_legal_moves().len()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_legal_moves);
criterion_main!(benches);
