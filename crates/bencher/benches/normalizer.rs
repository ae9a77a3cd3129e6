use bencher::{TestCase, TestFile};
use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use micro_route_http::protocol::{Request, analyze_body, extract_headers, find_header};
use std::hint::black_box;

static SMALL_HEADER: TestFile = TestFile::new("get_small.txt", include_str!("../resources/request/get_small.txt"));
static LARGE_HEADER: TestFile = TestFile::new("get_large.txt", include_str!("../resources/request/get_large.txt"));
static FORM_BODY: TestFile = TestFile::new("post_form.txt", include_str!("../resources/request/post_form.txt"));
static JSON_BODY: TestFile = TestFile::new("post_json.txt", include_str!("../resources/request/post_json.txt"));

fn header_cases() -> Vec<TestCase> {
    vec![TestCase::small("small_header", SMALL_HEADER), TestCase::large("large_header", LARGE_HEADER)]
}

fn body_cases() -> Vec<TestCase> {
    vec![TestCase::normal("form_body", FORM_BODY), TestCase::normal("json_body", JSON_BODY)]
}

fn benchmark_extract_headers(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("extract_headers");

    for case in header_cases() {
        let vars = case.file().vars();
        group.throughput(Throughput::Bytes(case.file().content().len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(case.name()), &vars, |b, vars| {
            b.iter(|| black_box(extract_headers(vars.iter())));
        });
    }

    group.finish();
}

fn benchmark_analyze_body(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("analyze_body");

    for case in body_cases() {
        let headers = extract_headers(case.file().vars());
        let content_type = find_header(&headers, "Content-Type").map(str::to_owned);
        let body = case.file().body();
        group.throughput(Throughput::Bytes(body.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(case.name()), &body, |b, body| {
            b.iter(|| black_box(analyze_body(content_type.as_deref(), body)));
        });
    }

    group.finish();
}

fn benchmark_request(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("request_from_vars");

    for case in header_cases().into_iter().chain(body_cases()) {
        group.throughput(Throughput::Bytes(case.file().content().len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(case.name()), &case, |b, case| {
            b.iter_batched(
                || case.file().vars(),
                |vars| {
                    let request = Request::from_vars(vars, case.file().body()).expect("fixture should hold a supported method");
                    black_box(request);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(normalizer, benchmark_extract_headers, benchmark_analyze_body, benchmark_request);
criterion_main!(normalizer);
