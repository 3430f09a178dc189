use engine::normalize::normalize;

#[test]
fn it_normalizes_and_stems() {
    let terms = normalize("Running Runners RUN! The café's menu.");
    // Stemming to "run" should appear
    assert!(terms.contains(&"run".to_string()));
    // Accent folding: café -> cafe
    assert!(terms.iter().any(|t| t.starts_with("cafe")));
    assert!(terms.contains(&"menu".to_string()));
}

#[test]
fn it_filters_stopwords() {
    let terms = normalize("The quick brown fox and the lazy dog");
    assert!(!terms.contains(&"the".to_string()));
    assert!(!terms.contains(&"and".to_string()));
    assert!(terms.contains(&"quick".to_string()));
}

#[test]
fn it_strips_noise() {
    let terms = normalize("Call 555-123-4567 or email foo@bar.com about our 50% discount");
    assert_eq!(terms, vec!["call", "email", "discount"]);
}

#[test]
fn it_drops_mentions_and_emoji() {
    let terms = normalize("amazing brunch 🍕🍕 with @best_friend_ever");
    assert_eq!(terms, vec!["amaz", "brunch"]);
}

#[test]
fn normalization_is_a_fixed_point() {
    let first = normalize("Delicious pizza crust, wood-fired oven!");
    let second = normalize(&first.join(" "));
    assert_eq!(first, second);
}
