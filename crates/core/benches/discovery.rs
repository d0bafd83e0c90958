use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use faro_core::{
    Document, ItemSelectors, SiteProfile, collect_items, locate_search, resolve_selectors, select_container,
    strip_hidden,
};
use url::Url;

fn bench_parse(c: &mut Criterion) {
    let front = std::fs::read_to_string("../../tests/fixtures/front_page.html").unwrap();
    let results = std::fs::read_to_string("../../tests/fixtures/results_page.html").unwrap();

    let mut group = c.benchmark_group("parse");

    group.bench_with_input(BenchmarkId::new("front_page", "4KB"), &front, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });
    group.bench_with_input(BenchmarkId::new("results_page", "8KB"), &results, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.finish();
}

fn bench_strip_hidden(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/results_page.html").unwrap();

    c.bench_function("strip_hidden", |b| b.iter(|| strip_hidden(black_box(&html))));
}

fn bench_locate_search(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/front_page.html").unwrap();
    let doc = Document::parse(&html).unwrap();
    let base = Url::parse("https://tribuna.test/").unwrap();

    c.bench_function("locate_search", |b| b.iter(|| locate_search(black_box(&doc), black_box(&base))));
}

fn bench_container_election(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/results_page.html").unwrap();
    let doc = Document::parse(&html).unwrap();

    c.bench_function("container_election", |b| b.iter(|| select_container(black_box(&doc))));
}

fn bench_resolve_selectors(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/results_page.html").unwrap();
    let doc = Document::parse(&html).unwrap();

    c.bench_function("resolve_selectors", |b| b.iter(|| resolve_selectors(black_box(&doc))));
}

fn bench_collect(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/results_page.html").unwrap();
    let doc = Document::parse_with_url(&html, "https://tribuna.test/").unwrap();
    let profile = SiteProfile {
        name: "Tribuna Portal".to_string(),
        site_url: "https://tribuna.test/".to_string(),
        search_url: "https://tribuna.test/busca?q=notícias".to_string(),
        logo_path: "assets/images/parceiros/tribuna.png".to_string(),
        accent_color: "#1e4a73".to_string(),
        selectors: ItemSelectors {
            container: "article".to_string(),
            title: Some("h2 a".to_string()),
            summary: Some(".excerpt".to_string()),
            link: Some("h2 a".to_string()),
            image: Some("img".to_string()),
            date: Some(".date".to_string()),
        },
        verified: true,
        discovered_at: "2026-08-01 09:00:00".to_string(),
    };

    c.bench_function("collect_items", |b| {
        b.iter(|| collect_items(black_box(&profile), black_box(&doc), black_box(5)))
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_strip_hidden,
    bench_locate_search,
    bench_container_election,
    bench_resolve_selectors,
    bench_collect
);
criterion_main!(benches);
