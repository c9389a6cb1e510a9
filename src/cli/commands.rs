use std::path::Path;

use crate::app::{AppContext, Result};
use crate::domain::{Headline, HeadlinesResponse};

pub async fn print_headlines(ctx: &AppContext, json: bool) -> Result<()> {
    let response = ctx.headline_fetcher.fetch(&ctx.request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", format_headlines(&response));
    }

    Ok(())
}

pub fn print_config_path(path: &Path) {
    println!("{}", path.display());
}

pub fn format_headlines(response: &HeadlinesResponse) -> String {
    if response.is_empty() {
        return "No headlines right now.\n".to_string();
    }

    response
        .headlines
        .iter()
        .enumerate()
        .map(|(i, headline)| format_headline(i + 1, headline))
        .collect()
}

fn format_headline(number: usize, headline: &Headline) -> String {
    let mut out = format!("{:>2}. {}\n    {}\n", number, headline.title, headline.byline());
    if let Some(url) = headline.article_url() {
        out.push_str(&format!("    {}\n", url));
    }
    out
}
