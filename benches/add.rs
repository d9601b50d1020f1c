//  Copyright 2023 MrCroxx
//
//  Licensed under the Apache License, Version 2.0 (the "License");
//  you may not use this file except in compliance with the License.
//  You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand_mt::Mt64;
use shared_cmsketch::CMSketchU64;

const FEW: &[u8] = b"abcdefgh123456789";
const MANY: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ123456789";

fn keys(runes: &[u8], length: usize, cases: usize) -> Vec<Vec<u8>> {
    let mut rng = Mt64::new_unseeded();
    (0..cases)
        .map(|_| {
            (0..length)
                .map(|_| runes[(rng.next_u64() % runes.len() as u64) as usize])
                .collect()
        })
        .collect()
}

fn bench_add(c: &mut Criterion, name: &str, runes: &'static [u8], length: usize) {
    c.bench_function(name, move |b| {
        let cases = 100_000;
        b.iter_batched(
            || {
                let keys = black_box(keys(runes, length, cases));
                let cms = CMSketchU64::new(0.999, 0.001).unwrap();
                (cms, keys)
            },
            |(cms, keys)| {
                keys.iter().for_each(|key| cms.add(key, 1));
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_add_few(c: &mut Criterion) {
    bench_add(c, "Test CMSketchU64 add few runes 6", FEW, 6);
    bench_add(c, "Test CMSketchU64 add few runes 12", FEW, 12);
}

fn bench_add_many(c: &mut Criterion) {
    bench_add(c, "Test CMSketchU64 add many runes 6", MANY, 6);
    bench_add(c, "Test CMSketchU64 add many runes 12", MANY, 12);
    bench_add(c, "Test CMSketchU64 add many runes 25", MANY, 25);
    bench_add(c, "Test CMSketchU64 add many runes 45", MANY, 45);
}

fn bench_add_parallel(c: &mut Criterion) {
    c.bench_function("Test CMSketchU64 add 4 threads", move |b| {
        let cases = 100_000;
        b.iter_batched(
            || {
                let keys = black_box(keys(MANY, 12, cases));
                let cms = CMSketchU64::new(0.999, 0.001).unwrap();
                (cms, keys)
            },
            |(cms, keys)| {
                std::thread::scope(|s| {
                    for chunk in keys.chunks(cases / 4) {
                        let cms = &cms;
                        s.spawn(move || chunk.iter().for_each(|key| cms.add(key, 1)));
                    }
                });
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_add_few, bench_add_many, bench_add_parallel);
criterion_main!(benches);
