use authpad::config::loader::{default_config_content, parse_config};
use authpad::Config;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn bench_config_creation(c: &mut Criterion) {
    c.bench_function("config_default", |b| b.iter(Config::default));
}

fn bench_config_parsing(c: &mut Criterion) {
    let content = default_config_content();

    c.bench_function("config_parse_with_interpolation", |b| {
        b.iter(|| parse_config(black_box(content)))
    });

    let config = Config::default();
    let toml_str = toml::to_string(&config).unwrap();
    c.bench_function("config_from_toml", |b| {
        b.iter(|| toml::from_str::<Config>(black_box(&toml_str)))
    });
}

fn bench_config_validation(c: &mut Criterion) {
    let mut config = Config::default();
    config.auth.jwt_secret = Some(authpad::config::SecretKey::new("bench-secret"));

    c.bench_function("config_validate", |b| b.iter(|| black_box(&config).validate()));
}

criterion_group!(
    benches,
    bench_config_creation,
    bench_config_parsing,
    bench_config_validation
);
criterion_main!(benches);
