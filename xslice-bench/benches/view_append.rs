use criterion::{black_box, criterion_group, criterion_main, Criterion};
use xslice_buffer::{GrowPolicy, View};

fn bench_append(c: &mut Criterion) {
    (10..=16).step_by(3).for_each(|log2_size| {
        let size = 2usize.pow(log2_size);
        c.bench_function(&format!("view_push_from_empty_{}", size), |b| {
            b.iter(|| {
                let mut v = View::<i32>::new();
                for i in 0..size {
                    v.push(black_box(i as i32)).unwrap();
                }
                black_box(v.cap())
            })
        });

        c.bench_function(&format!("view_push_presized_{}", size), |b| {
            b.iter(|| {
                let mut v = View::<i32>::with_len_cap(0, size).unwrap();
                for i in 0..size {
                    v.push(black_box(i as i32)).unwrap();
                }
                black_box(v.cap())
            })
        });

        c.bench_function(&format!("view_push_doubling_only_{}", size), |b| {
            let policy = GrowPolicy::new(usize::MAX, 4).unwrap();
            b.iter(|| {
                let mut v = View::<i32>::new().with_policy(policy);
                for i in 0..size {
                    v.push(black_box(i as i32)).unwrap();
                }
                black_box(v.cap())
            })
        });

        let chunk: Vec<i32> = (0..64).collect();
        c.bench_function(&format!("view_extend_chunks_{}", size), |b| {
            b.iter(|| {
                let mut v = View::<i32>::new();
                for _ in 0..size / chunk.len() {
                    v.extend_from_slice(black_box(&chunk)).unwrap();
                }
                black_box(v.len())
            })
        });
    });
}

criterion_group!(benches, bench_append);
criterion_main!(benches);
