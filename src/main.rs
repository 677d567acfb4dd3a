use recette_import::{read_archive, ImportConfig, WebPageAdapter};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("--archive") => {
            let path = args
                .get(2)
                .ok_or("Usage: recette-import --archive <file>")?;
            let payload = std::fs::read(path)?;
            let results = read_archive(&payload)?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Some(url) => {
            let config = ImportConfig::load().unwrap_or_default();
            let adapter = WebPageAdapter::new(config)?;
            let result = adapter.import_from_url(url).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        None => {
            return Err("Please provide a URL or --archive <file>".into());
        }
    }

    Ok(())
}
