use std::io::{self, BufRead, Write};

use chrono::Utc;
use drill_core::model::answers_match;
use services::{Prompt, QuizSession, QuizStep, SessionSummary};

/// Drives `session` over a line-oriented terminal until the policy finishes
/// or input ends.
///
/// # Errors
///
/// Fails on I/O errors or if the session rejects an answer.
pub fn drill<R: BufRead, W: Write>(
    session: &mut QuizSession,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    writeln!(out, "Drilling {} (end input to stop).", session.list())?;

    loop {
        let prompt = match session.next_prompt(Utc::now()) {
            QuizStep::Ask(prompt) => prompt,
            QuizStep::Finished => {
                writeln!(out, "\nAll words learned.")?;
                return Ok(());
            }
            QuizStep::NothingToAsk => {
                writeln!(out, "List {} has nothing to ask.", session.list())?;
                return Ok(());
            }
        };

        show_prompt(&prompt, out)?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(());
        }

        let submitted = resolve_choice(line.trim(), prompt.choices.as_deref());
        let grade = session.answer(&prompt.question, submitted)?;
        if grade.correct {
            writeln!(out, "correct")?;
        } else {
            match grade.full_answer.as_deref() {
                Some(full) if full != grade.expected => {
                    writeln!(out, "wrong: {} ({full})", grade.expected)?;
                }
                _ => writeln!(out, "wrong: {}", grade.expected)?,
            }
        }
    }
}

fn show_prompt<W: Write>(prompt: &Prompt, out: &mut W) -> io::Result<()> {
    writeln!(out, "\n{}", prompt.question)?;
    if let Some(choices) = &prompt.choices {
        for (n, choice) in choices.iter().enumerate() {
            writeln!(out, "  {:>2}) {choice}", n + 1)?;
        }
    }
    write!(out, "> ")?;
    out.flush()
}

/// A number picks from the listed choices unless it is itself one of them;
/// anything else is the answer itself.
fn resolve_choice<'a>(input: &'a str, choices: Option<&'a [String]>) -> &'a str {
    let Some(choices) = choices else {
        return input;
    };
    if choices.iter().any(|choice| answers_match(choice, input)) {
        return input;
    }
    input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| choices.get(i))
        .map_or(input, String::as_str)
}

/// Writes the human-readable end-of-session report.
///
/// # Errors
///
/// Propagates write failures.
pub fn print_summary<W: Write>(summary: &SessionSummary, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "\n{}: {} answered, {} correct, {} wrong ({})",
        summary.list,
        summary.answered,
        summary.correct,
        summary.incorrect(),
        summary.policy,
    )?;

    let troublesome = summary.troublesome();
    if !troublesome.is_empty() {
        writeln!(out, "Needs more practice:")?;
        for item in troublesome {
            writeln!(out, "  {} (missed {}, right {})", item.question, item.wrong, item.right)?;
        }
    }
    Ok(())
}
