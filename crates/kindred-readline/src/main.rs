mod helper;
mod screens;

use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use kindred_application::{AnalysisOutcome, AppContext, PersistOutcome, QuizUseCase};
use kindred_core::analysis::ANALYSIS_PROGRESS_MESSAGES;
use kindred_core::session::{
    GuessError, GuessSelection, HISTORICAL_FIGURES, TransitionError, WizardStep, guess_verdict,
};
use kindred_infrastructure::logging::init_file_logging;
use kindred_infrastructure::{ConfigStorage, KindredPaths};

use helper::QuizHelper;

type QuizEditor = Editor<QuizHelper, DefaultHistory>;

const PROMPT: &str = "> ";
const PROGRESS_INTERVAL: Duration = Duration::from_millis(1800);

/// One line of user input, with the global commands already recognised.
enum Input {
    Line(String),
    Back,
    Restart,
    Quit,
    Interrupted,
}

enum Flow {
    Continue,
    Quit,
}

fn read_input(rl: &mut QuizEditor, initial: &str) -> Result<Input> {
    let readline = if initial.is_empty() {
        rl.readline(PROMPT)
    } else {
        rl.readline_with_initial(PROMPT, (initial, ""))
    };

    match readline {
        Ok(line) => {
            let trimmed = line.trim();
            Ok(match trimmed {
                "/back" => Input::Back,
                "/restart" => Input::Restart,
                "/quit" | "quit" | "exit" => Input::Quit,
                _ => {
                    if !trimmed.is_empty() {
                        let _ = rl.add_history_entry(trimmed);
                    }
                    Input::Line(trimmed.to_string())
                }
            })
        }
        Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
        Err(ReadlineError::Eof) => Ok(Input::Quit),
        Err(err) => Err(err.into()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let paths = KindredPaths::new(None);
    let log_level = ConfigStorage::from_paths(&paths)
        .ok()
        .and_then(|storage| storage.load().ok())
        .map(|config| config.debug.log_level)
        .unwrap_or_else(|| "info".to_string());
    let _log_guard = init_file_logging(&paths, "kindred.log", &log_level)?;

    let ctx = AppContext::load(paths).await?;
    let mut quiz = ctx.quiz().await?;

    let mut rl: QuizEditor = Editor::new()?;
    rl.set_helper(Some(QuizHelper));

    let mut selection = GuessSelection::new();

    loop {
        let flow = match quiz.wizard().step() {
            WizardStep::Landing => {
                selection = GuessSelection::new();
                landing_screen(&mut rl, &mut quiz)?
            }
            WizardStep::Guessing => guessing_screen(&mut rl, &mut quiz, &mut selection)?,
            WizardStep::Questioning => question_screen(&mut rl, &mut quiz).await?,
            WizardStep::Analyzing => {
                analyzing_screen(&mut quiz).await;
                Flow::Continue
            }
            WizardStep::Results => results_screen(&mut rl, &mut quiz)?,
        };

        if let Flow::Quit = flow {
            break;
        }
    }

    for outcome in quiz.wait_for_saves().await {
        if let PersistOutcome::Failed { reason } = outcome {
            screens::notice(&format!("Your result could not be saved: {reason}"));
        }
    }
    println!("{}", "Goodbye!".bright_green());

    Ok(())
}

/// Handles the commands every screen shares. Returns `None` for a plain line.
fn common_command(input: Input, quiz: &mut QuizUseCase) -> Option<Flow> {
    match input {
        Input::Quit => Some(Flow::Quit),
        Input::Interrupted => {
            screens::notice("CTRL-C detected. Type /quit to exit.");
            Some(Flow::Continue)
        }
        Input::Restart => {
            quiz.restart();
            Some(Flow::Continue)
        }
        Input::Back => {
            if let Err(e) = quiz.retreat() {
                screens::notice(&e.to_string());
            }
            Some(Flow::Continue)
        }
        Input::Line(_) => None,
    }
}

fn landing_screen(rl: &mut QuizEditor, quiz: &mut QuizUseCase) -> Result<Flow> {
    screens::landing();
    match read_input(rl, "")? {
        Input::Line(line) if line.is_empty() => {
            quiz.start()?;
            Ok(Flow::Continue)
        }
        Input::Line(_) => Ok(Flow::Continue),
        Input::Back => Ok(Flow::Continue),
        other => Ok(common_command(other, quiz).unwrap_or(Flow::Continue)),
    }
}

fn guessing_screen(
    rl: &mut QuizEditor,
    quiz: &mut QuizUseCase,
    selection: &mut GuessSelection,
) -> Result<Flow> {
    screens::guessing(selection);
    let line = match read_input(rl, "")? {
        Input::Line(line) => line,
        other => return Ok(common_command(other, quiz).unwrap_or(Flow::Continue)),
    };

    if line.is_empty() {
        match quiz.submit_guesses(selection.selected()) {
            Ok(_) => {}
            Err(TransitionError::NoGuesses) => {
                screens::notice("Pick at least one figure first.");
            }
            Err(e) => return Err(e.into()),
        }
        return Ok(Flow::Continue);
    }

    for token in line.split(|c: char| c == ',' || c.is_whitespace()) {
        if token.is_empty() {
            continue;
        }
        let figure = token
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| HISTORICAL_FIGURES.get(i));
        match figure {
            Some(name) => match selection.toggle(name) {
                Ok(_) => {}
                Err(GuessError::SelectionFull) => {
                    screens::notice("You already picked three. Unselect one first.");
                }
                Err(e) => screens::notice(&e.to_string()),
            },
            None => screens::notice(&format!("'{token}' is not on the list.")),
        }
    }
    Ok(Flow::Continue)
}

async fn question_screen(rl: &mut QuizEditor, quiz: &mut QuizUseCase) -> Result<Flow> {
    if quiz.wizard().needs_question() {
        screens::generating_question();
    }
    let question = quiz.current_question().await?;
    let total = quiz.wizard().policy().question_count;
    screens::question(
        &question,
        quiz.wizard().question_index() + 1,
        total,
        quiz.wizard().progress_pct(),
    );

    let previous = quiz.wizard().current_response().to_string();
    let line = match read_input(rl, &previous)? {
        Input::Line(line) => line,
        other => return Ok(common_command(other, quiz).unwrap_or(Flow::Continue)),
    };

    let answer = line
        .parse::<usize>()
        .ok()
        .and_then(|n| question.option(n))
        .map(str::to_string)
        .unwrap_or(line);

    quiz.answer(answer)?;
    match quiz.advance() {
        Ok(_) => {}
        Err(TransitionError::ResponseTooShort { min_chars }) => {
            screens::notice(&format!(
                "Tell us a bit more: at least {} characters.",
                min_chars + 1
            ));
        }
        Err(e) => screens::notice(&e.to_string()),
    }
    Ok(Flow::Continue)
}

async fn analyzing_screen(quiz: &mut QuizUseCase) {
    screens::analysis_started();
    match run_with_progress(quiz).await {
        Ok(outcome) => {
            if let Some(reason) = outcome.fallback_reason {
                tracing::warn!(%reason, "showing fallback analysis");
                screens::notice("The analysis service was unavailable, so here is a sample match.");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "analysis could not run");
            screens::notice(&e.to_string());
            quiz.restart();
        }
    }
}

async fn run_with_progress(quiz: &mut QuizUseCase) -> Result<AnalysisOutcome, TransitionError> {
    let analysis = quiz.run_analysis();
    tokio::pin!(analysis);

    let mut ticker = tokio::time::interval(PROGRESS_INTERVAL);
    let mut messages = ANALYSIS_PROGRESS_MESSAGES.iter().cycle();

    loop {
        tokio::select! {
            outcome = &mut analysis => return outcome,
            _ = ticker.tick() => {
                if let Some(message) = messages.next() {
                    screens::analysis_progress(message);
                }
            }
        }
    }
}

fn results_screen(rl: &mut QuizEditor, quiz: &mut QuizUseCase) -> Result<Flow> {
    let state = quiz.wizard().state();
    let Some(result) = state.result.as_ref() else {
        quiz.restart();
        return Ok(Flow::Continue);
    };
    screens::results(result, guess_verdict(&state.guesses, &result.character));

    loop {
        match read_input(rl, "")? {
            Input::Line(_) | Input::Back => {
                screens::notice("Type /restart to go again or /quit to leave.");
            }
            other => return Ok(common_command(other, quiz).unwrap_or(Flow::Continue)),
        }
    }
}
