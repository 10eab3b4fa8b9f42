use criterion::measurement::WallTime;
use criterion::{BenchmarkGroup, Criterion, criterion_group, criterion_main};
use gresview::gres::parse_gres;
use gresview::nodes::{expand, parse_hostlist};

fn bench_parse_gres(c: &mut BenchmarkGroup<WallTime>) {
    c.bench_function("whole devices", |bencher| {
        bencher.iter(|| parse_gres(Some("gpu:8(S:0-1)"), "gpu:5(IDX:0-3,6)"));
    });
    c.bench_function("devices and shards", |bencher| {
        bencher.iter(|| parse_gres(Some("gpu:4,shard:16"), "gpu:2,shard:3(IDX:2)"));
    });
    c.bench_function("mig slices", |bencher| {
        bencher.iter(|| {
            parse_gres(
                Some("gpu:1g.10gb:4,gpu:2g.20gb:2,gpu:3g.40gb:1"),
                "gpu:1g.10gb:2(IDX:0,3),gpu:2g.20gb:1(IDX:4),gpu:3g.40gb:0",
            )
        });
    });
}

fn bench_expand(c: &mut BenchmarkGroup<WallTime>) {
    c.bench_function("range token", |bencher| {
        bencher.iter(|| expand("node0001-0512"));
    });
    c.bench_function("host list", |bencher| {
        bencher.iter(|| parse_hostlist("rack[1-4]-gpu[001-128],login[1-2]"));
    });
}

pub fn benchmark_gres(c: &mut Criterion) {
    let mut group = c.benchmark_group("gres");
    bench_parse_gres(&mut group);
}

pub fn benchmark_nodes(c: &mut Criterion) {
    let mut group = c.benchmark_group("nodes");
    bench_expand(&mut group);
}

criterion_group!(gres, benchmark_gres);
criterion_group!(nodes, benchmark_nodes);

criterion_main!(gres, nodes);
