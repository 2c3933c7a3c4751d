//! Pricing benchmarks
//!
//! The calculator reprices on every keystroke, so each product line is
//! measured on its own plus the full dispatch through the engine.

use cotador_pricing::rates::{LinkKind, RateBook};
use cotador_pricing::{
    price_link, price_pabx, price_sip, price_vm, LinkConfig, PabxConfig, PricingEngine,
    ServiceConfiguration, SipConfig, VmConfig,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_pabx(c: &mut Criterion) {
    let book = RateBook::default();
    let mut group = c.benchmark_group("pabx");

    for extensions in [5u32, 50, 700] {
        group.bench_with_input(
            BenchmarkId::new("extensions", extensions),
            &extensions,
            |b, &extensions| {
                let config = PabxConfig::new(extensions).without_setup().with_devices(extensions);
                b.iter(|| price_pabx(black_box(&config), &book.pabx));
            },
        );
    }

    group.finish();
}

fn bench_products(c: &mut Criterion) {
    let book = RateBook::default();
    let mut group = c.benchmark_group("products");

    let sip = SipConfig::new("franquia_10").with_additional_channels(4);
    group.bench_function("sip", |b| {
        b.iter(|| price_sip(black_box(&sip), &book.sip));
    });

    let vm = VmConfig {
        os: "Windows Server 2022".to_string(),
        contract_months: 36,
        backup_gb: 200,
        snapshot: true,
        ..VmConfig::default()
    };
    group.bench_function("vm", |b| {
        b.iter(|| price_vm(black_box(&vm), &book.vm, &book.tax, &book.policy));
    });

    let link = LinkConfig::new(LinkKind::Fiber, 500, 24);
    group.bench_function("link", |b| {
        b.iter(|| price_link(black_box(&link), &book.links));
    });

    group.finish();
}

fn bench_engine_dispatch(c: &mut Criterion) {
    let engine = PricingEngine::default();
    let configurations = vec![
        ServiceConfiguration::Pabx(PabxConfig::new(30).with_ai_agent("40k")),
        ServiceConfiguration::Sip(SipConfig::new("ilimitado_10")),
        ServiceConfiguration::Vm(VmConfig::default()),
        ServiceConfiguration::Link(LinkConfig::new(LinkKind::Radio, 50, 12)),
    ];

    c.bench_function("engine/quote_all", |b| {
        b.iter(|| {
            for configuration in &configurations {
                black_box(engine.quote(black_box(configuration)));
            }
        });
    });
}

criterion_group!(benches, bench_pabx, bench_products, bench_engine_dispatch);
criterion_main!(benches);
