use eisenboard_core::{open_store, BoardStats, Config};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = open_store(&config);
    let tasks = store.list()?;
    let stats = BoardStats::from_tasks(&tasks);
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
