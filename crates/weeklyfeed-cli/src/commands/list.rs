use anyhow::Result;

use weeklyfeed_core::{feed::Loader, AppConfig};

pub async fn run(config: &AppConfig) -> Result<()> {
    let loader = Loader::new(config)?;

    println!("Loading updates from {}...\n", loader.source().url());

    let records = match loader.load().await {
        Ok(records) => records,
        Err(e) => {
            println!("Failed to load updates ({}): {}", e.kind(), e);
            return Ok(());
        }
    };

    if records.is_empty() {
        println!("No updates in category '{}' yet.", config.source.category);
        return Ok(());
    }

    println!("Updates ({}):\n", records.len());

    for record in &records {
        let date = record.display_date();
        let date = if date.is_empty() { "(no date)".to_string() } else { date };

        println!("  {} - {}", date, record.title);
        println!("    URL: {}", record.url);
        println!(
            "    {}",
            config
                .source
                .excerpt
                .excerpt(&record.excerpt_source, config.source.max_words)
        );
        println!();
    }

    Ok(())
}
