//! A todo list persisted to a JSON file.
//!
//! Run with `cargo run --example todo -- <path>`; run it twice to see ids
//! pick up where the previous run left off.

use std::error::Error;

use record_store::{JsonFileBackend, Pattern, Record, RecordStore};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "todo-storage.json".to_string());

    let backend = JsonFileBackend::open(&path)?;
    let store = RecordStore::new(backend, "todo")?.with_on_change(|| println!("(todo list changed)"));

    let repaired = store.repair()?;
    if !repaired.is_clean() {
        println!("repaired drift: {:?}", repaired);
    }

    let milk = store.create_record(&Record::new().with("text", "buy milk").with("done", false))?;
    store.create_record(&Record::new().with("text", "walk dog").with("done", false))?;

    let mut done = milk.clone();
    done.insert("done", true);
    store.update_record(&done)?;

    if let Some(position) = store.find("text", Pattern::regex("^walk")?, 0)? {
        println!("first walk at position {}", position);
    }

    let grid = store.grid_projection(Some(&["text", "done"][..]))?;
    println!("{}", serde_json::to_string_pretty(&grid)?);

    Ok(())
}
