//! # Options Subcommand
//!
//! Prints the static `availableWithBy` and `confirmationInstructions`
//! tables that LC terms reference by code.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use lcx_core::{AVAILABLE_WITH_BY, CONFIRMATION_INSTRUCTIONS};

/// Arguments for `lcx options`.
#[derive(Args, Debug)]
pub struct OptionsArgs {
    /// Emit JSON instead of a text table.
    #[arg(long)]
    pub json: bool,
}

pub fn run_options(args: &OptionsArgs, out: &mut dyn Write) -> Result<u8> {
    if args.json {
        let table = |rows: &[(&str, &str)]| {
            rows.iter()
                .map(|(code, label)| serde_json::json!({ "code": code, "label": label }))
                .collect::<Vec<_>>()
        };
        let doc = serde_json::json!({
            "available_with_by": table(&AVAILABLE_WITH_BY),
            "confirmation_instructions": table(&CONFIRMATION_INSTRUCTIONS),
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
        return Ok(0);
    }

    writeln!(out, "available_with_by")?;
    for (code, label) in AVAILABLE_WITH_BY {
        writeln!(out, "  {code}  {label}")?;
    }
    writeln!(out, "confirmation_instructions")?;
    for (code, label) in CONFIRMATION_INSTRUCTIONS {
        writeln!(out, "  {code}  {label}")?;
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_lists_every_code() {
        let mut out = Vec::new();
        run_options(&OptionsArgs { json: false }, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("5  ANY BANK BY NEGOTIATION"));
        assert!(text.contains("2  WITHOUT"));
    }

    #[test]
    fn json_has_both_tables() {
        let mut out = Vec::new();
        run_options(&OptionsArgs { json: true }, &mut out).unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(doc["available_with_by"].as_array().unwrap().len(), 6);
        assert_eq!(doc["confirmation_instructions"][1]["label"], "MAY ADD");
    }
}
