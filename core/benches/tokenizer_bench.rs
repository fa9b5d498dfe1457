use criterion::{criterion_group, criterion_main, Criterion};
use recipes_core::tokenizer::tokenize;
use recipes_core::{IndexBuilder, Recipe};

const DIRECTIONS: &str = "Preheat the oven to 400°F. Toss the cauliflower florets with olive oil, \
    smoked paprika, cumin and a generous pinch of salt. Roast until golden, about 25 minutes, \
    turning once. Meanwhile whisk tahini, lemon juice, garlic and 3 tablespoons of water until \
    smooth. Drizzle over the cauliflower, scatter with toasted pine nuts, crème fraîche and \
    chopped parsley, and serve warm.";

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_directions", |b| b.iter(|| tokenize(DIRECTIONS)));
}

fn bench_search(c: &mut Criterion) {
    let recipes: Vec<Recipe> = (0..2000)
        .map(|i| {
            let mut r = Recipe::new(format!("Roasted cauliflower variation {i}"));
            r.directions = Some(vec![DIRECTIONS.to_string()]);
            r.categories = Some(vec![if i % 3 == 0 { "Vegan" } else { "Side" }.to_string()]);
            r
        })
        .collect();
    let corpus = IndexBuilder::default().build(recipes).expect("build");
    c.bench_function("search_two_terms", |b| b.iter(|| corpus.search("vegan tahini", 20)));
}

criterion_group!(benches, bench_tokenize, bench_search);
criterion_main!(benches);
