//! Create a new post

use anyhow::Result;
use chrono::NaiveDate;
use serde_yaml::Value;
use std::fs;
use std::path::PathBuf;

use crate::content::{stringify, Metadata};
use crate::Folio;

/// Create a new post in the posts directory.
///
/// `date` must follow the configured `date_format`; it defaults to today.
pub fn create_post(folio: &Folio, title: &str, date: Option<&str>) -> Result<PathBuf> {
    let format = &folio.config.date_format;
    let date = match date {
        Some(d) => NaiveDate::parse_from_str(d, format)
            .map_err(|e| anyhow::anyhow!("Invalid date {:?} for format {:?}: {}", d, format, e))?,
        None => chrono::Local::now().date_naive(),
    };

    fs::create_dir_all(&folio.posts_dir)?;

    let slug = slug::slugify(title);
    let filename = folio
        .config
        .new_post_name
        .replace(":title", &slug)
        .replace(":year", &date.format("%Y").to_string())
        .replace(":month", &date.format("%m").to_string())
        .replace(":day", &date.format("%d").to_string());
    let file_path = folio.posts_dir.join(&filename);

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let mut data = Metadata::new();
    data.insert("title".to_string(), Value::String(title.to_string()));
    data.insert(
        "date".to_string(),
        Value::String(date.format(format).to_string()),
    );
    fs::write(&file_path, stringify(&data, "")?)?;

    tracing::info!("Created post {:?}", file_path);
    Ok(file_path)
}

/// Run the new command
pub fn run(folio: &Folio, title: &str, date: Option<&str>) -> Result<()> {
    let path = folio.new_post(title, date)?;
    println!("Created: {:?}", path);
    Ok(())
}
