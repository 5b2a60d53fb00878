//! Topic, word and skill-order listings for one language.

use anyhow::{Context, Result};
use lingo_core::{Lingo, TopicFilter};
use serde::Serialize;

use super::{print_json, print_lines};

pub fn topics(lingo: &mut Lingo, abbr: &str, filter: TopicFilter, json: bool) -> Result<()> {
    let titles = lingo
        .topics(abbr, filter)
        .with_context(|| format!("Failed to read {} topics for {}", filter, abbr))?;
    print_lines(&titles, json)
}

pub fn words(lingo: &mut Lingo, abbr: &str, json: bool) -> Result<()> {
    let words = lingo
        .known_words(abbr)
        .with_context(|| format!("Failed to read words for {}", abbr))?;
    print_lines(&words, json)
}

#[derive(Serialize)]
struct SkillOrder {
    name: String,
    dependency_order: u32,
}

pub fn skills(lingo: &mut Lingo, abbr: &str, json: bool) -> Result<()> {
    let orders = lingo
        .skill_orders(abbr)
        .with_context(|| format!("Failed to order skills for {}", abbr))?;

    if json {
        let rows: Vec<SkillOrder> = orders
            .into_iter()
            .map(|(name, dependency_order)| SkillOrder {
                name,
                dependency_order,
            })
            .collect();
        return print_json(&rows);
    }

    for (name, order) in orders {
        println!("{:>3}  {}", order, name);
    }
    Ok(())
}
