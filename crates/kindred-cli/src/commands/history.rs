use anyhow::Result;
use kindred_application::AppContext;
use kindred_core::assessment::AssessmentRecord;
use kindred_infrastructure::KindredPaths;

pub async fn run(paths: KindredPaths, limit: usize) -> Result<()> {
    let ctx = AppContext::load(paths).await?;
    let repository = ctx.repository().await?;
    let records = repository.list_recent(limit).await?;

    if records.is_empty() {
        println!("No stored assessments.");
        return Ok(());
    }
    for record in &records {
        println!("{}", summary_line(record));
    }
    Ok(())
}

fn summary_line(record: &AssessmentRecord) -> String {
    format!(
        "{}  {:<24} {:>3}%  {} answers  {}",
        record.created_at.format("%Y-%m-%d %H:%M"),
        record.result.character,
        record.result.match_percentage,
        record.responses.len(),
        record.id
    )
}
