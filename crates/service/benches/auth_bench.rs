use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::auth::domain::{LoginInput, RegisterInput};
use service::auth::repository::mock::MockAuthRepository;
use service::auth::{AuthConfig, AuthService};

fn bench_login(c: &mut Criterion) {
    let repo = Arc::new(MockAuthRepository::default());
    let svc = AuthService::new(repo, AuthConfig::new("secret", 12));

    // pre-create operator outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    let _ = rt.block_on(svc.register(RegisterInput {
        name: "Bench".into(),
        email: "bench@example.com".into(),
        phone: None,
        identification: "0999999999".into(),
        password: "Benchmark1".into(),
    }));

    c.bench_function("auth_login_verify", |b| {
        b.iter(|| {
            let session = rt
                .block_on(svc.login(LoginInput { email: "bench@example.com".into(), password: "Benchmark1".into() }))
                .unwrap();
            svc.verify_token(&session.access_token).unwrap();
        });
    });
}

criterion_group!(benches, bench_login);
criterion_main!(benches);
