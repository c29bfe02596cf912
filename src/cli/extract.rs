//! `extract` command: show the records recovered from each file.

use std::path::PathBuf;

use console::style;

use crate::config::Settings;

use super::helpers::gather_quotes;

pub fn run(files: &[PathBuf], settings: &Settings, json: bool) -> anyhow::Result<()> {
    let quotes = gather_quotes(files, settings)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&quotes)?);
        return Ok(());
    }

    if quotes.is_empty() {
        println!("No structured quote data could be extracted.");
        return Ok(());
    }

    for quote in &quotes {
        println!("{}", style(&quote.plan_name).bold());
        println!("  premium:            {}", quote.premium);
        println!("  deductible:         {}", quote.deductible);
        println!("  coinsurance:        {}", quote.coinsurance);
        println!("  out-of-pocket max:  {}", quote.out_of_pocket_max);
        if let Some(limit) = quote.coverage_limit {
            println!("  coverage limit:     {}", limit);
        }
        if let Some(max) = quote.annual_benefit_max {
            println!("  annual benefit max: {}", max);
        }
        if let Some(size) = quote.network_size {
            println!("  network size:       {}", size);
        }
    }
    println!(
        "{}",
        style(format!("{} quote(s) extracted", quotes.len())).green()
    );

    Ok(())
}
