//! Today's XP.

use anyhow::{Context, Result};
use lingo_core::Lingo;

use super::print_json;

pub fn run(lingo: &Lingo, json: bool) -> Result<()> {
    let daily = lingo
        .daily_xp_progress()
        .context("Failed to read daily XP progress")?;

    if json {
        return print_json(&daily);
    }

    println!("XP today: {} / {}", daily.xp_today, daily.xp_goal);
    println!("Lessons:  {}", daily.lessons_today.len());
    Ok(())
}
