//! Throughput benchmarks for the fan-out copier.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use manifold::buffer::Buffer;
use manifold::element::Element;
use manifold::elements::{FanOut, FanOutConfig};
use manifold::metadata::Metadata;
use manifold::port::{MaxDelay, PortConfig, port};
use std::hint::black_box;

const BUFFER_SIZE: usize = 4096;
const BATCH: usize = 64;

fn bench_fanout_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("fanout_copy");
    group.throughput(Throughput::Bytes((BUFFER_SIZE * BATCH) as u64));

    for copy_num in [1usize, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(copy_num),
            &copy_num,
            |b, &copy_num| {
                b.iter(|| {
                    let (producer, input) = port(PortConfig::new(BATCH));
                    let mut outs = Vec::with_capacity(copy_num);
                    let mut consumers = Vec::with_capacity(copy_num);
                    for _ in 0..copy_num {
                        let (out, consumer) = port(PortConfig::new(BATCH));
                        outs.push(out);
                        consumers.push(consumer);
                    }

                    let mut fanout = FanOut::new(FanOutConfig::new(copy_num)).unwrap();
                    fanout.open(input, outs).unwrap();

                    for seq in 0..BATCH as u64 {
                        producer
                            .write(Buffer::from_bytes(
                                vec![0u8; BUFFER_SIZE],
                                Metadata::with_sequence(seq),
                            ))
                            .unwrap();
                    }
                    for _ in 0..BATCH {
                        black_box(fanout.process().unwrap());
                    }
                    for consumer in &consumers {
                        while let Ok(buffer) = consumer.read_with(MaxDelay::None) {
                            black_box(buffer.len());
                        }
                    }
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_fanout_copy);
criterion_main!(benches);
