use fuzzy_join::{Cell, FuzzyMatcher, Table};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // internal records with clean names
    let mut companies = Table::new();
    companies
        .insert_text_column("name", ["Erie Shipping Co", "Maple Logistics", "Bluebird Airways"])
        .expect("column");
    companies
        .insert_text_column("country", ["US", "CA", "US"])
        .expect("column");

    // external registry with messy variants of the same names
    let mut registry = Table::new();
    registry
        .insert_text_column(
            "registered_name",
            ["maple logistics inc", "erie shipping company", "bluebird airways ltd"],
        )
        .expect("column");
    registry
        .insert_column("founded", vec![Cell::Int(1998), Cell::Int(1972), Cell::Int(2004)])
        .expect("column");

    let matcher = FuzzyMatcher::new();
    let joined = matcher
        .join(&companies, &registry, "name", "registered_name")
        .expect("join failed");

    let names: Vec<&str> = joined.column_names().collect();
    println!("{}", names.join("\t"));
    for i in 0..joined.row_count() {
        let row = joined.row(i).expect("row");
        let cells: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
        println!("{}", cells.join("\t"));
    }
}
