// Destination -> activity hierarchy
// An n-ary tree rooted at the itinerary, with a counting sort over activity priorities

use crate::booking::Destination;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("Destination not found: {0}")]
    DestinationNotFound(String),

    #[error("Activity {activity} not found under {destination}")]
    ActivityNotFound {
        destination: String,
        activity: String,
    },

    #[error("Activity {activity} under {destination} has no priority")]
    MissingPriority {
        destination: String,
        activity: String,
    },

    #[error("Activity {activity} has priority {priority}, above the maximum {max}")]
    PriorityOutOfRange {
        activity: String,
        priority: u32,
        max: u32,
    },

    #[error("Sort key {key} is above the bound {max}")]
    SortKeyOutOfRange { key: usize, max: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    pub priority: Option<u32>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            priority: None,
            children: Vec::new(),
        }
    }

    pub fn with_priority(name: impl Into<String>, priority: u32) -> Self {
        Self {
            priority: Some(priority),
            ..Self::new(name)
        }
    }

    pub fn add_child(&mut self, node: TreeNode) {
        self.children.push(node);
    }

    // Removes the first child with this name
    pub fn remove_child(&mut self, name: &str) -> Option<TreeNode> {
        let position = self.children.iter().position(|c| c.name == name)?;
        Some(self.children.remove(position))
    }

    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut TreeNode> {
        self.children.iter_mut().find(|c| c.name == name)
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.priority {
            Some(priority) => write!(f, "{} (Priority: {})", self.name, priority),
            None => f.write_str(&self.name),
        }
    }
}

// Stable counting sort on small integer keys.
// Allocates one counter per key up to the largest present, so every key must be <= max_key.
pub fn counting_sort_by_key<T, F>(items: Vec<T>, max_key: usize, key: F) -> Result<Vec<T>, TreeError>
where
    F: Fn(&T) -> usize,
{
    let Some(highest) = items.iter().map(&key).max() else {
        return Ok(items);
    };
    let out_of_range = TreeError::SortKeyOutOfRange {
        key: highest,
        max: max_key,
    };
    if highest > max_key {
        return Err(out_of_range);
    }
    let slots = highest.checked_add(1).ok_or(out_of_range)?;

    let mut counts = vec![0usize; slots];
    for item in &items {
        counts[key(item)] += 1;
    }
    for i in 1..counts.len() {
        counts[i] += counts[i - 1];
    }

    let mut output: Vec<Option<T>> = std::iter::repeat_with(|| None).take(items.len()).collect();
    // Walking backwards keeps equal keys in their original order
    for item in items.into_iter().rev() {
        let k = key(&item);
        counts[k] -= 1;
        output[counts[k]] = Some(item);
    }

    Ok(output.into_iter().flatten().collect())
}

pub const ROOT_NAME: &str = "Travel Itinerary";

// Highest activity priority a tree accepts unless told otherwise
pub const DEFAULT_MAX_PRIORITY: u32 = 10;

pub struct ItineraryTree {
    root: TreeNode,
    max_priority: u32,
}

impl Default for ItineraryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ItineraryTree {
    // Root with the four parks and no activities
    pub fn new() -> Self {
        let mut root = TreeNode::new(ROOT_NAME);
        for destination in Destination::PARKS {
            root.add_child(TreeNode::new(destination.name()));
        }
        Self {
            root,
            max_priority: DEFAULT_MAX_PRIORITY,
        }
    }

    // Root with the four parks, each seeded with prioritized activities
    pub fn with_priorities() -> Self {
        let seeds: [(Destination, &[(&str, u32)]); 4] = [
            (
                Destination::VolcanoesNationalPark,
                &[("Leisuring", 1), ("Hiking", 2), ("Swimming", 3)],
            ),
            (
                Destination::NyungweForestNationalPark,
                &[("Leisuring", 2), ("Hiking", 1)],
            ),
            (Destination::LakeKivu, &[("Leisuring", 3), ("Swimming", 1)]),
            (
                Destination::AkageraNationalPark,
                &[("Wildlife Safari", 1), ("Cultural Tour", 2)],
            ),
        ];

        let mut root = TreeNode::new(ROOT_NAME);
        for (destination, activities) in seeds {
            let mut node = TreeNode::new(destination.name());
            for (name, priority) in activities {
                node.add_child(TreeNode::with_priority(*name, *priority));
            }
            root.add_child(node);
        }
        Self {
            root,
            max_priority: DEFAULT_MAX_PRIORITY,
        }
    }

    // Seeded activities above the bound are reported by sort_by_priority
    pub fn with_max_priority(mut self, max_priority: u32) -> Self {
        self.max_priority = max_priority;
        self
    }

    pub fn max_priority(&self) -> u32 {
        self.max_priority
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    pub fn destination(&self, name: &str) -> Option<&TreeNode> {
        self.root.child(name)
    }

    pub fn activity(&self, destination: &str, activity: &str) -> Option<&TreeNode> {
        self.destination(destination)?.child(activity)
    }

    pub fn add_activity(&mut self, destination: &str, activity: TreeNode) -> Result<(), TreeError> {
        if let Some(priority) = activity.priority.filter(|p| *p > self.max_priority) {
            return Err(TreeError::PriorityOutOfRange {
                activity: activity.name,
                priority,
                max: self.max_priority,
            });
        }

        let node = self
            .root
            .child_mut(destination)
            .ok_or_else(|| TreeError::DestinationNotFound(destination.to_string()))?;

        info!(destination, activity = %activity, "Adding activity");
        node.add_child(activity);
        Ok(())
    }

    pub fn remove_activity(&mut self, destination: &str, activity: &str) -> Result<TreeNode, TreeError> {
        let node = self
            .root
            .child_mut(destination)
            .ok_or_else(|| TreeError::DestinationNotFound(destination.to_string()))?;

        let removed = node
            .remove_child(activity)
            .ok_or_else(|| TreeError::ActivityNotFound {
                destination: destination.to_string(),
                activity: activity.to_string(),
            })?;
        info!(destination, activity, "Removed activity");
        Ok(removed)
    }

    // Counting-sorts every destination's activities by priority.
    // Nothing is reordered unless every activity carries a priority within the bound.
    pub fn sort_by_priority(&mut self) -> Result<(), TreeError> {
        for destination in &self.root.children {
            for activity in &destination.children {
                match activity.priority {
                    None => {
                        return Err(TreeError::MissingPriority {
                            destination: destination.name.clone(),
                            activity: activity.name.clone(),
                        })
                    }
                    Some(priority) if priority > self.max_priority => {
                        return Err(TreeError::PriorityOutOfRange {
                            activity: activity.name.clone(),
                            priority,
                            max: self.max_priority,
                        })
                    }
                    Some(_) => {}
                }
            }
        }

        let max_key = self.max_priority as usize;
        for destination in &mut self.root.children {
            let activities = std::mem::take(&mut destination.children);
            destination.children = counting_sort_by_key(activities, max_key, |a| {
                a.priority.unwrap_or_default() as usize
            })?;
            debug!(destination = %destination.name, "Sorted activities by priority");
        }
        Ok(())
    }

    // Pre-order listing, four spaces of indentation per level
    pub fn render(&self) -> Vec<String> {
        fn traverse(node: &TreeNode, level: usize, lines: &mut Vec<String>) {
            lines.push(format!("{}{}", " ".repeat(level * 4), node));
            for child in &node.children {
                traverse(child, level + 1, lines);
            }
        }

        let mut lines = Vec::new();
        traverse(&self.root, 0, &mut lines);
        lines
    }

    // Activity names offered for a destination, in current order
    pub fn activity_names(&self, destination: &str) -> Option<Vec<&str>> {
        self.destination(destination)
            .map(|node| node.children.iter().map(|a| a.name.as_str()).collect())
    }

    // (destination, activity) rows for a destination
    pub fn activity_rows(&self, destination: &str) -> Option<Vec<(String, String)>> {
        self.destination(destination).map(|node| {
            node.children
                .iter()
                .map(|a| (node.name.clone(), a.name.clone()))
                .collect()
        })
    }
}
