use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, SamplingMode, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};

use showcase::model::{Product, SortKey};
use showcase::pagination::PaginationView;
use showcase::transform::transform;

const WORDS: [&str; 12] = [
    "Essence", "Mascara", "Lipstick", "Powder", "Écran", "laptop", "Apple", "zeste", "Mirror", "Émile", "Red", "Chair",
];

fn gen_products(n: usize, seed: u64) -> Vec<Product> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let title = format!("{} {} {}", WORDS[rng.gen_range(0..WORDS.len())], WORDS[rng.gen_range(0..WORDS.len())], i);
            Product {
                id: i as u64 + 1,
                description: format!("{} for everyday use", title),
                title,
                price: rng.gen_range(1.0..2000.0),
                discount_percentage: rng.gen_range(0.0..25.0),
                rating: rng.gen_range(1.0..5.0),
                stock: rng.gen_range(0..200),
                brand: WORDS[rng.gen_range(0..WORDS.len())].to_string(),
                category: "beauty".to_string(),
                thumbnail: String::new(),
                images: Vec::new(),
            }
        })
        .collect()
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");
    group.sampling_mode(SamplingMode::Flat);

    // a page is 12 products; larger sizes show how sorting scales
    for &n in &[12usize, 100, 1_000] {
        let products = gen_products(n, 0xC0FF_EE00);
        group.throughput(Throughput::Elements(n as u64));
        for key in [SortKey::None, SortKey::PriceAsc, SortKey::NameAsc, SortKey::RatingDesc] {
            group.bench_with_input(BenchmarkId::new(key.to_string(), n), &products, |b, products| {
                b.iter(|| criterion::black_box(transform(products, "", key)));
            });
        }
        group.bench_with_input(BenchmarkId::new("search+name-asc", n), &products, |b, products| {
            b.iter(|| criterion::black_box(transform(products, "mirror", SortKey::NameAsc)));
        });
    }
    group.finish();
}

fn bench_pagination(c: &mut Criterion) {
    c.bench_function("pagination_view", |b| {
        b.iter(|| {
            for page in 1..=17u32 {
                criterion::black_box(PaginationView::compute(page, 194, 12, 5));
            }
        });
    });
}

criterion_group!(benches, bench_transform, bench_pagination);
criterion_main!(benches);
