//! `rank` command: score the batch and print the comparison table.

use std::path::PathBuf;

use anyhow::bail;

use crate::config::Settings;
use crate::report::ranked_table;
use crate::scoring;

use super::helpers::gather_quotes;

pub fn run(files: &[PathBuf], settings: &Settings, json: bool) -> anyhow::Result<()> {
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

    if json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else {
        println!("{}", ranked_table(&ranked));
    }

    Ok(())
}
