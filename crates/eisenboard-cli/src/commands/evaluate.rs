//! Stand-alone scoring command.

use chrono::{NaiveDate, Utc};
use clap::Args;
use eisenboard_core::scoring::{AnswerMap, Evaluation, Verdict};
use eisenboard_core::{start_by_date, Config, QuestionCategory, QuestionSet, Questionnaire, Scorer};
use serde_json::json;

use super::parse_answers;

#[derive(Args)]
pub struct EvaluateArgs {
    /// Importance answers in question order, e.g. "y,y,n"
    #[arg(long, default_value = "")]
    pub importance: String,
    /// Urgency answers in question order, e.g. "n,n,y"
    #[arg(long, default_value = "")]
    pub urgency: String,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<NaiveDate>,
    /// Estimated effort in hours
    #[arg(long)]
    pub hours: Option<f64>,
    /// Start-by date (YYYY-MM-DD); overrides the one derived from --due and --hours
    #[arg(long)]
    pub start_by: Option<NaiveDate>,
}

/// Questionnaire filled from positional answer lists. Ids are checked
/// against the configured questions.
pub fn fill_form(
    questions: &QuestionSet,
    importance: &str,
    urgency: &str,
) -> Result<Questionnaire, Box<dyn std::error::Error>> {
    let mut form = Questionnaire::new();
    let lists: [(QuestionCategory, AnswerMap); 2] = [
        (QuestionCategory::Importance, parse_answers(importance)?),
        (QuestionCategory::Urgency, parse_answers(urgency)?),
    ];
    for (category, answers) in lists {
        for (id, yes) in answers.iter() {
            form.answer(questions, category, id, yes)?;
        }
    }
    Ok(form)
}

/// Score a filled form, failing when it cannot be submitted yet.
pub fn require_evaluation(
    form: &Questionnaire,
    title: &str,
    config: &Config,
    start_by: Option<NaiveDate>,
) -> Result<Evaluation, Box<dyn std::error::Error>> {
    let scorer = Scorer::with_policy(config.scoring);
    let now = Utc::now();
    if !form.can_submit(title, &scorer, &config.questions, start_by, now) {
        let required = config.scoring.required_answers(
            config.questions.len(QuestionCategory::Importance),
            config.questions.len(QuestionCategory::Urgency),
        );
        return Err(format!("answer at least {required} questions in each category").into());
    }
    form.evaluate(&scorer, &config.questions, start_by, now)
        .into_evaluation()
        .ok_or_else(|| "evaluation is undecided".into())
}

pub fn run(args: EvaluateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let form = fill_form(&config.questions, &args.importance, &args.urgency)?;
    let start_by = args.start_by.or_else(|| start_by_date(args.due, args.hours));

    let scorer = Scorer::with_policy(config.scoring);
    let verdict = form.evaluate(&scorer, &config.questions, start_by, Utc::now());
    let output = match verdict {
        Verdict::Decided(evaluation) => json!({
            "verdict": "decided",
            "startBy": start_by,
            "evaluation": evaluation,
            "badge": evaluation.quadrant.badge_text(),
            "action": evaluation.quadrant.action(),
            "urgencyLabel": evaluation.urgency_label().text(),
        }),
        Verdict::Undecided => json!({
            "verdict": "undecided",
            "answered": {
                "importance": form.importance().len(),
                "urgency": form.urgency().len(),
            },
            "required": config.scoring.required_answers(
                config.questions.len(QuestionCategory::Importance),
                config.questions.len(QuestionCategory::Urgency),
            ),
        }),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
