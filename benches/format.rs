//! Formatting hot-path benchmarks: message building is pure string
//! assembly and should stay well under a microsecond.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wirelog::{Cef, Leef, Rfc3164, Rfc3164Options, Rfc5424, Rfc5424Options};

fn bench_rfc3164(c: &mut Criterion) {
    let formatter = Rfc3164::new();
    let options = Rfc3164Options::default();
    c.bench_function("rfc3164_build_message", |b| {
        b.iter(|| {
            formatter
                .build_message(black_box("the quick brown fox jumps over the lazy dog"), &options)
                .unwrap()
        })
    });
}

fn bench_rfc5424(c: &mut Criterion) {
    let formatter = Rfc5424::new();
    let options = Rfc5424Options {
        structured_data: vec![
            "[origin ip=\"10.0.0.1\"]".to_owned(),
            "[meta sequenceId=\"42\"]".to_owned(),
        ],
        ..Rfc5424Options::default()
    };
    c.bench_function("rfc5424_build_message", |b| {
        b.iter(|| {
            formatter
                .build_message(black_box("the quick brown fox jumps over the lazy dog"), &options)
                .unwrap()
        })
    });
}

fn bench_leef(c: &mut Criterion) {
    let mut event = Leef::new().with_vendor("IBM").with_product("QRadar");
    event.set_attribute("src", "10.0.0.1");
    event.set_attribute("dst", "10.0.0.2");
    event.set_attribute("usrName", "root");
    c.bench_function("leef_build_message", |b| {
        b.iter(|| black_box(&event).build_message())
    });
}

fn bench_cef(c: &mut Criterion) {
    let mut event = Cef::new().with_device_vendor("Acme").with_name("port scan");
    event.set_extension("sourceAddress", "10.0.0.1");
    event.set_extension("destinationPort", 22u16);
    event.set_extension("message", "connection attempt");
    c.bench_function("cef_validate_and_build", |b| {
        b.iter(|| {
            let event = black_box(&event);
            event.validate().unwrap();
            event.build_message()
        })
    });
}

criterion_group!(benches, bench_rfc3164, bench_rfc5424, bench_leef, bench_cef);
criterion_main!(benches);
