use clap::{Subcommand, ValueEnum};
use eisenboard_core::{Config, QuestionCategory, QuestionSet};

#[derive(Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Importance,
    Urgency,
}

impl From<CategoryArg> for QuestionCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Importance => QuestionCategory::Importance,
            CategoryArg::Urgency => QuestionCategory::Urgency,
        }
    }
}

#[derive(Subcommand)]
pub enum QuestionsAction {
    /// List both question categories with their ids
    List,
    /// Append a question
    Add {
        #[arg(value_enum)]
        category: CategoryArg,
        /// Question text (a placeholder is used when empty)
        #[arg(default_value = "")]
        text: String,
    },
    /// Remove a question (each category keeps at least three)
    Remove {
        #[arg(value_enum)]
        category: CategoryArg,
        /// 1-based question id
        id: u32,
    },
    /// Change the text of a question
    Rename {
        #[arg(value_enum)]
        category: CategoryArg,
        /// 1-based question id
        id: u32,
        text: String,
    },
    /// Replace both categories at once
    Replace {
        /// Importance question (repeat for each)
        #[arg(long = "importance", required = true)]
        importance: Vec<String>,
        /// Urgency question (repeat for each)
        #[arg(long = "urgency", required = true)]
        urgency: Vec<String>,
    },
    /// Restore the default questions
    Reset,
}

pub fn run(action: QuestionsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;

    match action {
        QuestionsAction::List => {
            for category in [QuestionCategory::Importance, QuestionCategory::Urgency] {
                println!("{category}:");
                for (index, question) in config.questions.questions(category).iter().enumerate() {
                    println!("  {}. {question}", index + 1);
                }
            }
            return Ok(());
        }
        QuestionsAction::Add { category, text } => {
            let id = config.questions.add(category.into(), &text);
            println!("Question added: {id}");
        }
        QuestionsAction::Remove { category, id } => {
            let removed = config.questions.remove(category.into(), id)?;
            println!("Question removed: {removed}");
        }
        QuestionsAction::Rename { category, id, text } => {
            config.questions.rename(category.into(), id, &text)?;
            println!("Question {id} updated");
        }
        QuestionsAction::Replace { importance, urgency } => {
            config.questions = QuestionSet::new(importance, urgency)?;
            println!("Questions replaced");
        }
        QuestionsAction::Reset => {
            config.questions = QuestionSet::default();
            println!("Questions reset to defaults");
        }
    }

    config.save()?;
    Ok(())
}
