//! Followed users.

use anyhow::{Context, Result};
use lingo_core::Lingo;

use super::print_json;

pub fn run(lingo: &Lingo, json: bool) -> Result<()> {
    let friends = lingo.friends().context("Failed to read follow list")?;

    if json {
        return print_json(&friends);
    }

    if friends.is_empty() {
        println!("Not following anyone.");
        return Ok(());
    }
    for friend in &friends {
        let name = friend.display_name.as_deref().unwrap_or(&friend.username);
        println!("{:<24} {:>8} XP", name, friend.points);
    }
    Ok(())
}
