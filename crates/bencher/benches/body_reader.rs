use bencher::{TestCase, TestPayload};
use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use micro_body::BodyConfig;
use micro_body::protocol::PayloadSize;
use micro_body::reader::{BodyRead, BodyReader};
use micro_body::source::BufferedSource;
use std::hint::black_box;
use tokio::runtime::Runtime;

const READ_SIZES: [usize; 3] = [512, 8 * 1024, 64 * 1024];

fn create_test_cases() -> Vec<(TestCase, PayloadSize)> {
    vec![
        (TestCase::small("fixed_1k", TestPayload::fixed(1024)), PayloadSize::new_length(1024)),
        (TestCase::large("fixed_1m", TestPayload::fixed(1024 * 1024)), PayloadSize::new_length(1024 * 1024)),
        (TestCase::normal("chunked_64k_by_1k", TestPayload::chunked(64 * 1024, 1024)), PayloadSize::new_chunked()),
        (TestCase::large("chunked_1m_by_16k", TestPayload::chunked(1024 * 1024, 16 * 1024)), PayloadSize::new_chunked()),
    ]
}

fn benchmark_body_reader(criterion: &mut Criterion) {
    let runtime = Runtime::new().expect("tokio runtime should build");
    let config = BodyConfig::default();
    let mut group = criterion.benchmark_group("body_reader");

    for (case, payload_size) in create_test_cases() {
        group.throughput(Throughput::Bytes(case.payload().body_len() as u64));

        for read_size in READ_SIZES {
            let id = BenchmarkId::new(case.name(), read_size);
            group.bench_with_input(id, &case, |b, case| {
                b.to_async(&runtime).iter_batched(
                    || (BufferedSource::with_config(case.payload().wire(), &config), vec![0u8; read_size]),
                    |(mut source, mut buf)| {
                        let config = &config;
                        async move {
                            let mut reader = BodyReader::new(&mut source, payload_size, config);
                            loop {
                                let outcome = reader.read(&mut buf).await.expect("input should be a valid body");
                                black_box(&buf[..outcome.read]);
                                if outcome.complete {
                                    break;
                                }
                            }
                        }
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }

    group.finish();
}

criterion_group!(body_reader, benchmark_body_reader);
criterion_main!(body_reader);
