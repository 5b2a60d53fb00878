use std::collections::HashMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::skill::Skill;

/// Dependency order of every skill in one skill list, keyed by skill name.
///
/// A skill's order is the length of the longest prerequisite chain ending at
/// it: skills without prerequisites are 1, everything else is one more than
/// its deepest prerequisite. This is a critical-path depth, not a topological
/// index, so unrelated skills may share an order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyOrders {
    orders: HashMap<String, u32>,
}

impl DependencyOrders {
    pub fn get(&self, skill_name: &str) -> Option<u32> {
        self.orders.get(skill_name).copied()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// `(name, order)` pairs following the order of `skills`.
    pub fn ordered<'a>(&self, skills: &'a [Skill]) -> Vec<(&'a str, u32)> {
        skills
            .iter()
            .filter_map(|skill| self.get(&skill.name).map(|order| (skill.name.as_str(), order)))
            .collect()
    }
}

/// Compute the dependency order of every skill in `skills`.
///
/// Skills are not modified. Fails with `DependencyCycle` if the prerequisite
/// graph loops, or `UnknownDependency` if a prerequisite names no skill.
pub fn compute_orders(skills: &[Skill]) -> Result<DependencyOrders> {
    let lookup: HashMap<&str, &Skill> = skills.iter().map(|s| (s.name.as_str(), s)).collect();
    let mut memo: HashMap<String, u32> = HashMap::with_capacity(skills.len());
    let mut ancestors: Vec<String> = Vec::new();

    for skill in skills {
        skill_order(skill, &lookup, &mut memo, &mut ancestors)?;
    }

    debug!("Computed dependency orders for {} skills", memo.len());
    Ok(DependencyOrders { orders: memo })
}

/// `ancestors` is the chain of skills currently being visited.
fn skill_order(
    skill: &Skill,
    lookup: &HashMap<&str, &Skill>,
    memo: &mut HashMap<String, u32>,
    ancestors: &mut Vec<String>,
) -> Result<u32> {
    if ancestors.iter().any(|name| *name == skill.name) {
        let mut chain = ancestors.clone();
        chain.push(skill.name.clone());
        return Err(Error::DependencyCycle { chain });
    }

    if let Some(&order) = memo.get(&skill.name) {
        return Ok(order);
    }

    if skill.dependencies_name.is_empty() {
        memo.insert(skill.name.clone(), 1);
        return Ok(1);
    }

    ancestors.push(skill.name.clone());
    let mut deepest = 0;
    for dependency in &skill.dependencies_name {
        let Some(&prerequisite) = lookup.get(dependency.as_str()) else {
            ancestors.pop();
            return Err(Error::UnknownDependency {
                skill: skill.name.clone(),
                dependency: dependency.clone(),
            });
        };
        let order = match skill_order(prerequisite, lookup, memo, ancestors) {
            Ok(order) => order,
            Err(e) => {
                ancestors.pop();
                return Err(e);
            }
        };
        deepest = deepest.max(order);
    }
    ancestors.pop();

    let order = deepest + 1;
    memo.insert(skill.name.clone(), order);
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(name: &str, deps: &[&str]) -> Skill {
        Skill {
            name: name.to_string(),
            title: name.to_string(),
            dependencies_name: deps.iter().map(|d| d.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_roots_are_one() {
        let skills = vec![skill("Basics", &[]), skill("Phrases", &[])];
        let orders = compute_orders(&skills).unwrap();
        assert_eq!(orders.get("Basics"), Some(1));
        assert_eq!(orders.get("Phrases"), Some(1));
    }

    #[test]
    fn test_longest_chain_wins() {
        // Food <- Basics, Food <- Phrases <- Greetings <- Basics
        let skills = vec![
            skill("Food", &["Basics", "Phrases"]),
            skill("Phrases", &["Greetings"]),
            skill("Greetings", &["Basics"]),
            skill("Basics", &[]),
        ];
        let orders = compute_orders(&skills).unwrap();
        assert_eq!(orders.get("Basics"), Some(1));
        assert_eq!(orders.get("Greetings"), Some(2));
        assert_eq!(orders.get("Phrases"), Some(3));
        assert_eq!(orders.get("Food"), Some(4));
    }

    #[test]
    fn test_order_is_one_more_than_deepest_dependency() {
        let skills = vec![
            skill("A", &[]),
            skill("B", &["A"]),
            skill("C", &["A", "B"]),
            skill("D", &["C", "A"]),
        ];
        let orders = compute_orders(&skills).unwrap();
        for s in &skills {
            let expected = s
                .dependencies_name
                .iter()
                .map(|d| orders.get(d).unwrap())
                .max()
                .map_or(1, |m| m + 1);
            assert_eq!(orders.get(&s.name), Some(expected));
        }
    }

    #[test]
    fn test_two_cycle_detected() {
        let skills = vec![skill("A", &["B"]), skill("B", &["A"])];
        match compute_orders(&skills) {
            Err(Error::DependencyCycle { chain }) => {
                assert_eq!(chain, vec!["A", "B", "A"]);
            }
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_self_dependency_is_cycle() {
        let skills = vec![skill("A", &["A"])];
        assert!(matches!(
            compute_orders(&skills),
            Err(Error::DependencyCycle { .. })
        ));
    }

    #[test]
    fn test_cycle_behind_valid_prefix() {
        let skills = vec![
            skill("Root", &[]),
            skill("X", &["Root", "Y"]),
            skill("Y", &["Z"]),
            skill("Z", &["X"]),
        ];
        match compute_orders(&skills) {
            Err(Error::DependencyCycle { chain }) => {
                assert_eq!(chain, vec!["X", "Y", "Z", "X"]);
            }
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_dependency() {
        let skills = vec![skill("A", &["Missing"])];
        assert!(matches!(
            compute_orders(&skills),
            Err(Error::UnknownDependency { ref dependency, .. }) if dependency == "Missing"
        ));
    }

    #[test]
    fn test_ordered_follows_skill_list() {
        let skills = vec![skill("B", &["A"]), skill("A", &[])];
        let orders = compute_orders(&skills).unwrap();
        assert_eq!(orders.ordered(&skills), vec![("B", 2), ("A", 1)]);
        assert_eq!(orders.len(), 2);
    }

    #[test]
    fn test_empty_list() {
        assert!(compute_orders(&[]).unwrap().is_empty());
    }
}
