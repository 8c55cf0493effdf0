use crate::entity::{Activity, ActivityId};
use serde::{Deserialize, Serialize};

/// An activity with its children nested beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityTreeNode {
    pub id: ActivityId,
    pub name: String,
    pub parent_id: Option<ActivityId>,
    pub level: u32,
    #[serde(default)]
    pub children: Vec<ActivityTreeNode>,
}

impl ActivityTreeNode {
    /// A childless node carrying the activity's own fields.
    pub fn from_activity(activity: &Activity) -> Self {
        Self {
            id: activity.id,
            name: activity.name.clone(),
            parent_id: activity.parent_id,
            level: activity.level,
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Find a node by id in this subtree.
    pub fn find(&self, id: ActivityId) -> Option<&ActivityTreeNode> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.id == id {
                return Some(node);
            }
            stack.extend(node.children.iter());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_and_find() {
        let food = Activity::root(1, "Food");
        let meat = Activity::child_of(&food, 2, "Meat");
        let mut root = ActivityTreeNode::from_activity(&food);
        root.children.push(ActivityTreeNode::from_activity(&meat));

        assert_eq!(root.size(), 2);
        assert_eq!(root.find(2).map(|n| n.level), Some(2));
        assert!(root.find(3).is_none());
    }
}
