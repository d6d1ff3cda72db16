use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use tictactoe_core::{Board, Bot, Difficulty, Minimax, Position, Symbol};

fn board_with(moves: &[(usize, usize, Symbol)]) -> Board {
    let mut board = Board::new();
    for &(row, col, symbol) in moves {
        board
            .apply_move(Position::new(row, col), symbol)
            .expect("bench position is legal");
    }
    board
}

fn bench_minimax_empty_board(c: &mut Criterion) {
    c.bench_function("minimax_empty_board", |b| {
        b.iter(|| {
            let mut board = Board::new();
            Minimax::new(Symbol::X).best_move(black_box(&mut board))
        })
    });
}

fn bench_minimax_mid_game(c: &mut Criterion) {
    let board = board_with(&[(1, 1, Symbol::X), (0, 0, Symbol::O), (2, 1, Symbol::X)]);
    c.bench_function("minimax_mid_game", |b| {
        b.iter(|| {
            let mut scratch = board;
            Minimax::new(Symbol::O).best_move(black_box(&mut scratch))
        })
    });
}

fn bench_bot_self_play(c: &mut Criterion) {
    let mut group = c.benchmark_group("self_play");
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        group.bench_function(difficulty.to_string(), |b| {
            b.iter(|| {
                let mut board = Board::new();
                let mut x = Bot::with_seed(Symbol::X, difficulty, 1);
                let mut o = Bot::with_seed(Symbol::O, difficulty, 2);
                let mut symbol = Symbol::X;
                while !board.is_full() && !board.is_winner(symbol.opponent()) {
                    let bot = if symbol == Symbol::X { &mut x } else { &mut o };
                    let pos = bot.choose_move(&board).expect("board has empty cells");
                    board.apply_move(pos, symbol).expect("bot picks empty cells");
                    symbol = symbol.opponent();
                }
                board
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_minimax_empty_board,
    bench_minimax_mid_game,
    bench_bot_self_play
);
criterion_main!(benches);
