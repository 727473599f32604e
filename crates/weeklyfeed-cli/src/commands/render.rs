use std::path::PathBuf;

use anyhow::{Context, Result};

use weeklyfeed_core::{render::HtmlPage, run_once, AppConfig, RunReport};

pub async fn run(config: &AppConfig, page: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let page_path = page
        .or_else(|| config.page_path())
        .context("No page given; pass --page or set general.page_path in the config")?;

    let mut document = HtmlPage::from_file(&page_path)
        .with_context(|| format!("Failed to read page {}", page_path.display()))?;

    let report = run_once(config, &mut document).await;

    match report {
        RunReport::Rendered(count) => {
            println!("Rendered {} updates into #{}", count, config.render.container_id)
        }
        RunReport::Fallback => {
            println!("No updates to show; wrote the fallback message into #{}", config.render.container_id)
        }
        RunReport::MissingContainer => {
            println!(
                "Page {} has no #{} element; left unchanged.",
                page_path.display(),
                config.render.container_id
            );
            return Ok(());
        }
    }

    let target = output.unwrap_or(page_path);
    document
        .write_to(&target)
        .with_context(|| format!("Failed to write page {}", target.display()))?;
    println!("Wrote {}", target.display());

    Ok(())
}
