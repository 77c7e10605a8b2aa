use anyhow::{Result, bail};
use kindred_core::config::AppConfig;
use kindred_infrastructure::{ConfigStorage, KindredPaths};
use kindred_interaction::PromptBuilder;

fn builder(paths: &KindredPaths) -> Result<PromptBuilder> {
    let config = ConfigStorage::from_paths(paths)?
        .load()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default config");
            AppConfig::default()
        });
    Ok(PromptBuilder::new(config.quiz.question_count))
}

pub fn question(paths: &KindredPaths, step: usize, responses: &[String]) -> Result<()> {
    let builder = builder(paths)?;
    if step == 0 || step > builder.question_count() {
        bail!(
            "--step must be between 1 and {}",
            builder.question_count()
        );
    }
    println!("{}", builder.build_question_prompt(step - 1, responses)?);
    Ok(())
}

pub fn analysis(paths: &KindredPaths, responses: &[String]) -> Result<()> {
    let builder = builder(paths)?;
    println!("{}", builder.build_analysis_prompt(responses)?);
    Ok(())
}
