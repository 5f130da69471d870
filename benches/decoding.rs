use adif2cabrillo::{parse, to_string, Config, Templates};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn synthetic_log(qsos: usize) -> String {
    let mut text = String::from("Benchmark log\n<ADIF_VER:5>3.1.4\n<PROGRAMID:5>bench\n<EOH>\n");
    for i in 0..qsos {
        let call = format!("K{}ABC", i % 10);
        text.push_str(&format!(
            "<CALL:{}>{} <QSO_DATE:8>20240622 <TIME_ON:6>{:02}{:02}00 <BAND:3>20m \
             <FREQ:6>14.025 <MODE:2>CW <RST_SENT:3>599 <RST_RCVD:3>599 <SRX:{}>{} <EOR>\n",
            call.len(),
            call,
            (i / 60) % 24,
            i % 60,
            (i + 1).to_string().len(),
            i + 1
        ));
    }
    text
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for size in [10, 1_000, 10_000] {
        let text = synthetic_log(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_render(c: &mut Criterion) {
    let config = Config::new(Templates::new(
        "START-OF-LOG: 3.0\nCALLSIGN: {{ CALLSIGN }}",
        "QSO: {{ (FREQ * 1000)|round|int|lpad(5) }} {{ MODE }} {{ DATE_TIME }} {{ CALL|rpad(13) }} {{ RST_RCVD }} {{ SRX|lpad(4, '0') }}",
        "END-OF-LOG:",
    ))
    .with_variable("CALLSIGN", "W1AW");
    let doc = parse(&synthetic_log(1_000));

    c.bench_function("render_1000", |b| {
        b.iter(|| to_string(black_box(&config), black_box(&doc)).unwrap())
    });
}

criterion_group!(benches, benchmark_parse, benchmark_render);
criterion_main!(benches);
