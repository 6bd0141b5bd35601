use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use rl::{AntTruncatedObsEnv, Env};

fn bench_ant_step(c: &mut Criterion) {
    let mut env = AntTruncatedObsEnv::new(None).expect("ant env");
    let mut rng = StdRng::seed_from_u64(0);
    env.reset(Some(0)).expect("reset");
    c.bench_function("ant_step", |b| {
        b.iter(|| {
            let action = env.action_space().sample(&mut rng);
            let step = env.step(black_box(&action)).expect("step");
            if step.terminated {
                env.reset(None).expect("reset");
            }
            black_box(step.reward)
        });
    });
}

fn bench_ant_reset(c: &mut Criterion) {
    let mut env = AntTruncatedObsEnv::new(None).expect("ant env");
    let mut seed = 0;
    c.bench_function("ant_reset", |b| {
        b.iter(|| {
            seed += 1;
            black_box(env.reset(Some(seed)).expect("reset"))
        });
    });
}

criterion_group!(benches, bench_ant_step, bench_ant_reset);
criterion_main!(benches);
