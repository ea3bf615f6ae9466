// benches/roster.rs
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use goal_scorer::roster::Roster;

const POSITIONS: [&str; 4] = ["Attacker", "Midfielder", "Defender", "Goalkeeper"];

fn synthetic_rows(n: usize) -> Vec<Vec<String>> {
    let mut rows = Vec::with_capacity(n + 1);
    rows.push(["Name", "Position", "Goals", "Matches", "Minutes", "Minutes per goal"]
        .iter().map(|s| s.to_string()).collect());
    for i in 0..n {
        let goals = i % 30;
        rows.push(vec![
            format!("Player {i}"),
            POSITIONS[i % 4].to_string(),
            goals.to_string(),
            (i % 38).to_string(),
            (i * 17 % 3420).to_string(),
            String::new(),
        ]);
    }
    rows
}

fn bench_roster(c: &mut Criterion) {
    let rows = synthetic_rows(5_000);

    c.bench_function("roster_from_rows_5k", |b| {
        b.iter(|| {
            let r = Roster::from_rows(black_box(rows.clone()));
            black_box(r.len())
        })
    });

    let roster = Roster::from_rows(rows.clone());
    c.bench_function("roster_find_last_5k", |b| {
        b.iter(|| black_box(roster.find(black_box("player 4999")).len()))
    });
}

criterion_group!(benches, bench_roster);
criterion_main!(benches);
