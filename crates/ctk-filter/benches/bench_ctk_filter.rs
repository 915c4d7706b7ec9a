use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ctk_filter::{filter_output_for, Category};
use rand::{Rng, SeedableRng};

fn generate_build_log(size_kb: usize) -> String {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let mut text = String::with_capacity(size_kb * 1024);
    let mut i = 0;
    while text.len() < size_kb * 1024 {
        let line = match rng.gen_range(0..6) {
            0 => format!("\x1b[32m   Compiling crate-{i} v0.{}.0\x1b[0m\n", rng.gen_range(0..20)),
            1 => format!("INFO: worker {} processed batch {i}\n", rng.gen_range(0..8)),
            2 => format!("[{}/{}] building object {i}.o\n", i % 100, 100),
            3 => format!("request {i} served in {}ms\n", rng.gen_range(1..500)),
            4 => "\n\n".to_string(),
            _ => format!("src/module_{i}.rs:{}: warning kept for review\n", rng.gen_range(1..900)),
        };
        text.push_str(&line);
        i += 1;
    }
    text.truncate(size_kb * 1024);
    text
}

fn generate_git_status(files: usize) -> String {
    let mut text = String::from("On branch main\nChanges not staged for commit:\n");
    text.push_str("  (use \"git add <file>...\" to update what will be committed)\n");
    for i in 0..files {
        text.push_str(&format!("\tmodified:   src/component_{i}/index.ts\n"));
    }
    text
}

fn bench_filter_logs(c: &mut Criterion) {
    let log_1k = generate_build_log(1);
    let log_10k = generate_build_log(10);
    let log_100k = generate_build_log(100);

    let categories = [
        ("generic", Category::Generic),
        ("rust", Category::Rust),
        ("docker", Category::Docker),
    ];
    for (name, category) in categories {
        c.bench_function(&format!("filter_{name}_1kb"), |b| {
            b.iter(|| black_box(filter_output_for(black_box(&log_1k), category)))
        });
        c.bench_function(&format!("filter_{name}_10kb"), |b| {
            b.iter(|| black_box(filter_output_for(black_box(&log_10k), category)))
        });
        c.bench_function(&format!("filter_{name}_100kb"), |b| {
            b.iter(|| black_box(filter_output_for(black_box(&log_100k), category)))
        });
    }
}

fn bench_filter_git(c: &mut Criterion) {
    let status = generate_git_status(200);
    c.bench_function("filter_git_status_200_files", |b| {
        b.iter(|| black_box(filter_output_for(black_box(&status), Category::Git)))
    });
}

criterion_group!(benches, bench_filter_logs, bench_filter_git);
criterion_main!(benches);
