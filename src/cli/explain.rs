//! `explain` command: rank and narrate the recommendation.

use std::path::PathBuf;

use anyhow::bail;

use crate::config::Settings;
use crate::narrator::{explain_or_fallback, NarratorClient};
use crate::report::ranked_table;
use crate::scoring;

use super::helpers::gather_quotes;

pub async fn run(
    files: &[PathBuf],
    settings: &Settings,
    question: &str,
    local: bool,
) -> anyhow::Result<()> {
    let quotes = gather_quotes(files, settings)?;
    if quotes.is_empty() {
        bail!("no quotes could be extracted from the given files");
    }

    let ranked = scoring::rank(
        &quotes,
        settings.profile.expected_claims,
        settings.profile.avg_claim_amount,
        &settings.weights,
    )?;

    let narrator = if local || !settings.narrator.enabled {
        None
    } else {
        Some(NarratorClient::new(settings.narrator.clone())?)
    };

    let answer =
        explain_or_fallback(narrator.as_ref(), &ranked, question, &settings.profile).await;

    println!("{}", ranked_table(&ranked));
    println!();
    println!("{}", answer);

    Ok(())
}
