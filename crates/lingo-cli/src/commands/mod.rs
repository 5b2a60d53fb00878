//! CLI command implementations.

pub mod daily;
pub mod friends;
pub mod profile;
pub mod topics;
pub mod vocabulary;

use anyhow::Result;
use serde::Serialize;

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn print_lines(lines: &[String], json: bool) -> Result<()> {
    if json {
        return print_json(lines);
    }
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

pub(crate) fn display<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
