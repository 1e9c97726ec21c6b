pub mod config;
pub mod evaluate;
pub mod questions;
pub mod stats;
pub mod task;

use eisenboard_core::scoring::AnswerMap;

/// Parse a comma-separated answer list (`y,n,yes,no,1,0,true,false`).
/// Position `i` answers question `i + 1`; empty slots are left unanswered,
/// so `y,,n` answers questions 1 and 3.
pub fn parse_answers(raw: &str) -> Result<AnswerMap, String> {
    let mut answers = AnswerMap::new();
    for (index, item) in raw.split(',').enumerate() {
        let yes = match item.trim().to_ascii_lowercase().as_str() {
            "" => continue,
            "y" | "yes" | "1" | "true" => true,
            "n" | "no" | "0" | "false" => false,
            other => return Err(format!("invalid answer '{other}' (expected y or n)")),
        };
        answers.set(index as u32 + 1, yes);
    }
    Ok(answers)
}
