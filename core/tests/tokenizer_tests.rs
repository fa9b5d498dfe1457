use recipes_core::tokenizer::tokenize;

#[test]
fn it_strips_accents() {
    assert_eq!(tokenize("café"), tokenize("cafe"));
    assert_eq!(tokenize("Crème Brûlée"), vec!["creme", "brulee"]);
    assert_eq!(tokenize("JALAPEÑO"), vec!["jalapeno"]);
}

#[test]
fn it_filters_stopwords() {
    assert_eq!(tokenize("the chicken and rice"), vec!["chicken", "rice"]);
    let words = tokenize("The quick brown fox and the lazy dog");
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
}

#[test]
fn it_is_idempotent_on_its_own_output() {
    for text in ["chicken tikka masala", "slow roasted pork shoulder", "lemon bars"] {
        let once = tokenize(text);
        let twice = tokenize(&once.join(" "));
        assert_eq!(once, twice);
    }
}

#[test]
fn blank_input_yields_nothing() {
    assert!(tokenize("").is_empty());
    assert!(tokenize("   \t\n").is_empty());
    assert!(tokenize("123 !!! 4.5").is_empty());
}

#[test]
fn apostrophes_split_words() {
    assert_eq!(tokenize("Grandma's pie"), vec!["grandma", "s", "pie"]);
}
