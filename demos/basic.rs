use fuzzy_join::FuzzyMatcher;

fn main() {
    let from = ["cat", "dog"];
    let to = ["category", "doggy", "caterpillar"];

    // trigram analyzer by default
    let matcher = FuzzyMatcher::new();
    let result = matcher.find_matches(&from, &to).expect("matching failed");

    // print result
    println!("Match Results: \n{}", result);
    println!("row count: {}", result.len());
}
