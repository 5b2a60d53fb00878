//! Profile, streak, language list and per-language progress.

use anyhow::{Context, Result};
use lingo_core::Lingo;

use super::{display, print_json, print_lines};

pub fn user(lingo: &Lingo, json: bool) -> Result<()> {
    let info = lingo.user_info();
    if json {
        return print_json(&info);
    }
    println!("Username:  {}", display(info.username));
    println!("Name:      {}", display(info.fullname));
    println!("Id:        {}", display(info.id));
    println!("Learning:  {}", display(info.learning_language_string));
    println!("UI:        {}", display(info.ui_language));
    println!("Created:   {}", display(info.created));
    Ok(())
}

pub fn streak(lingo: &Lingo, json: bool) -> Result<()> {
    let info = lingo.streak_info();
    if json {
        return print_json(&info);
    }
    println!("Streak:          {}", display(info.site_streak));
    println!("Daily goal:      {}", display(info.daily_goal));
    println!("Extended today:  {}", display(info.streak_extended_today));
    Ok(())
}

pub fn languages(lingo: &Lingo, abbreviations: bool, json: bool) -> Result<()> {
    print_lines(&lingo.languages(abbreviations), json)
}

pub fn progress(lingo: &mut Lingo, abbr: &str, json: bool) -> Result<()> {
    let progress = lingo
        .language_progress(abbr)
        .with_context(|| format!("Failed to read progress for {}", abbr))?;
    if json {
        return print_json(&progress);
    }
    println!("{} ({})", progress.language_string, progress.language);
    println!("Level:          {}", display(progress.level));
    println!("Points:         {}", display(progress.points));
    println!("To next level:  {}", display(progress.level_left));
    println!("Streak:         {}", display(progress.streak));
    println!("Skills learned: {}", display(progress.num_skills_learned));
    println!("Fluency:        {}", display(progress.fluency_score));
    Ok(())
}
