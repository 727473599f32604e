use anyhow::Result;

use weeklyfeed_core::{render::HtmlPage, run_once, AppConfig};

pub async fn run(config: &AppConfig) -> Result<()> {
    let id = &config.render.container_id;
    let mut page = HtmlPage::with_container(id);

    let report = run_once(config, &mut page).await;
    tracing::debug!("Preview finished: {:?}", report);

    println!("{}", page.inner_html(id).unwrap_or_default());

    Ok(())
}
