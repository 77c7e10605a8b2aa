//! Printing for each wizard screen. No input handling here.

use colored::Colorize;
use kindred_core::analysis::AnalysisResult;
use kindred_core::question::Question;
use kindred_core::session::{GuessSelection, GuessVerdict, HISTORICAL_FIGURES, MAX_GUESSES};

const SHARE_ORIGIN: &str = "kindred";

pub fn landing() {
    println!();
    println!("{}", "=== Kindred ===".bright_magenta().bold());
    println!("Which historical figure thinks the way you do?");
    println!(
        "{}",
        "Answer a few scenarios in your own words and we'll find your match.".bright_black()
    );
    println!();
    println!(
        "{}",
        "Press Enter to begin, or type /quit to leave.".bright_black()
    );
}

pub fn guessing(selection: &GuessSelection) {
    println!();
    println!("{}", "Before we start: who do you think you'll get?".bright_magenta().bold());
    println!(
        "{}",
        format!("Pick up to {MAX_GUESSES} by number (type a number again to unselect).")
            .bright_black()
    );
    for (i, name) in HISTORICAL_FIGURES.iter().enumerate() {
        let line = format!("{:>3}. {}", i + 1, name);
        match selection.badge(name) {
            Some(badge) => println!("{}  {}", line.bright_green(), format!("[{badge}]").green()),
            None => println!("{line}"),
        }
    }
    let status = format!("{}/{} selected", selection.len(), MAX_GUESSES);
    if selection.is_empty() {
        println!("{}", format!("{status}. Select at least one to continue.").bright_black());
    } else {
        println!("{}", format!("{status}. Press Enter to continue.").bright_black());
    }
}

pub fn question(question: &Question, step: usize, total: usize, progress_pct: f64) {
    println!();
    println!(
        "{} {}",
        format!("Question {step} of {total}").bright_magenta().bold(),
        format!("({progress_pct:.0}%)").bright_black()
    );
    println!("{}", question.title.bold());
    println!("{}", question.prompt);
    for (i, option) in question.options.iter().enumerate() {
        println!("  {}. {}", i + 1, option);
    }
    if !question.placeholder.is_empty() {
        println!("{}", question.placeholder.bright_black().italic());
    }
    println!(
        "{}",
        "Type your answer and press Enter. /back goes to the previous question.".bright_black()
    );
}

pub fn generating_question() {
    println!("{}", "Thinking of your next question...".bright_black());
}

pub fn analysis_started() {
    println!();
    println!("{}", "Analyzing your responses".bright_magenta().bold());
}

pub fn analysis_progress(message: &str) {
    println!("{}", format!("  {message}").bright_black());
}

pub fn results(result: &AnalysisResult, verdict: GuessVerdict) {
    println!();
    println!("{}", "Your historical match".bright_magenta().bold());
    println!(
        "{} {}",
        result.character.bright_yellow().bold(),
        format!("{}% match", result.match_percentage).green()
    );
    if !result.short_description.is_empty() {
        println!("{}", result.short_description.italic());
    }
    let details: Vec<String> = result
        .lifespan()
        .into_iter()
        .chain(Some(result.location.clone()).filter(|l| !l.trim().is_empty()))
        .collect();
    if !details.is_empty() {
        println!("{}", details.join(" | ").bright_black());
    }

    match verdict {
        GuessVerdict::Matched { position } => println!(
            "{}",
            format!("You called it! Your guess #{position} was right.").bright_green()
        ),
        GuessVerdict::Missed => println!("{}", "None of your guesses matched this time.".yellow()),
        GuessVerdict::NoGuesses => {}
    }

    if !result.description.is_empty() {
        println!();
        println!("{}", result.description);
    }

    let paragraphs = result.biography_paragraphs();
    if !paragraphs.is_empty() {
        println!();
        println!("{}", "Biography".bold());
        for paragraph in paragraphs {
            println!("{paragraph}");
            println!();
        }
    }

    if !result.achievements.is_empty() {
        println!("{}", "Key achievements".bold());
        for achievement in &result.achievements {
            println!("  - {achievement}");
        }
        println!();
    }

    if !result.traits.is_empty() {
        println!("{}", "Shared traits".bold());
        for t in &result.traits {
            println!("  {} {}", format!("{}:", t.title).bright_cyan(), t.description);
        }
        println!();
    }

    println!("{}", result.share_text(SHARE_ORIGIN).bright_black());
    println!();
    println!(
        "{}",
        "Type /restart to take the quiz again or /quit to leave.".bright_black()
    );
}

pub fn notice(message: &str) {
    println!("{}", message.yellow());
}
