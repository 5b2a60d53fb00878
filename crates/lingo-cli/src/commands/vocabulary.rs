//! Full vocabulary fetch.

use anyhow::{Context, Result};
use lingo_core::Lingo;

use super::print_json;

pub fn run(lingo: &mut Lingo, abbr: Option<&str>, source: Option<&str>, json: bool) -> Result<()> {
    eprintln!("Retrieving vocabulary...");
    let lexemes = lingo
        .vocabulary(abbr, source)
        .context("Failed to retrieve vocabulary")?;
    eprintln!("Retrieved {} words", lexemes.len());

    if json {
        return print_json(&lexemes);
    }

    for lexeme in &lexemes {
        let translations = if lexeme.translations.is_empty() {
            "-".to_string()
        } else {
            lexeme.translations.join("; ")
        };
        let marker = if lexeme.is_new { " (new)" } else { "" };
        println!("{}\t{}{}", lexeme.text, translations, marker);
    }
    Ok(())
}
