//! Category tree model
//!
//! Presents the flat category list as a depth-limited tree: an arena of
//! nodes with parent/children indices and iterative traversal helpers,
//! so depth computation and cycle prevention are testable in isolation
//! from rendering. Rebuilt from the canonical server list after every
//! mutation; nothing here is patched incrementally.

use std::collections::HashMap;

use shared::models::Category;

/// Maximum depth of a category (root = 0), i.e. 3 visible levels
pub const MAX_CATEGORY_DEPTH: usize = 2;

/// Direction of a sibling reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// The two display-order updates of a neighbor swap, issued as two
/// sequential backend calls by the categories page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderPlan {
    pub updates: [(i64, i32); 2],
}

/// One arena node
#[derive(Debug)]
pub struct CategoryNode {
    pub category: Category,
    pub depth: usize,
    children: Vec<usize>,
}

/// Arena-backed category forest
#[derive(Debug, Default)]
pub struct CategoryTree {
    nodes: Vec<CategoryNode>,
    by_id: HashMap<i64, usize>,
    roots: Vec<usize>,
}

impl CategoryTree {
    /// Build the tree from the flat list returned by the backend.
    ///
    /// Sibling groups are sorted by `(display_order, name)`. A category
    /// whose parent id is unknown is treated as a root so bad server
    /// data degrades to a visible flat entry instead of vanishing.
    pub fn build(categories: Vec<Category>) -> Self {
        let mut nodes: Vec<CategoryNode> = categories
            .into_iter()
            .map(|category| CategoryNode {
                category,
                depth: 0,
                children: Vec::new(),
            })
            .collect();

        let by_id: HashMap<i64, usize> = nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.category.id, index))
            .collect();

        let mut roots: Vec<usize> = Vec::new();
        let mut children: HashMap<usize, Vec<usize>> = HashMap::new();
        for index in 0..nodes.len() {
            match nodes[index].category.parent_id.and_then(|p| by_id.get(&p)) {
                Some(&parent_index) if parent_index != index => {
                    children.entry(parent_index).or_default().push(index);
                }
                _ => {
                    if nodes[index].category.parent_id.is_some() {
                        tracing::warn!(
                            category_id = nodes[index].category.id,
                            "Category has unknown parent, treating as root"
                        );
                    }
                    roots.push(index);
                }
            }
        }

        let sort_group = |group: &mut Vec<usize>, nodes: &[CategoryNode]| {
            group.sort_by(|&a, &b| {
                let ka = (nodes[a].category.display_order, &nodes[a].category.name);
                let kb = (nodes[b].category.display_order, &nodes[b].category.name);
                ka.cmp(&kb)
            });
        };
        sort_group(&mut roots, &nodes);
        for group in children.values_mut() {
            sort_group(group, &nodes);
        }

        // iterative depth assignment from the roots; anything a walk
        // from the roots never reaches (cyclic server data) surfaces as
        // a root rather than disappearing
        let mut visited = vec![false; nodes.len()];
        let mut stack: Vec<(usize, usize)> = roots.iter().map(|&r| (r, 0)).collect();
        while let Some((index, depth)) = stack.pop() {
            if std::mem::replace(&mut visited[index], true) {
                continue;
            }
            nodes[index].depth = depth;
            if let Some(group) = children.get(&index) {
                for &child in group {
                    stack.push((child, depth + 1));
                }
            }
        }
        for index in 0..nodes.len() {
            if !visited[index] {
                tracing::warn!(
                    category_id = nodes[index].category.id,
                    "Category unreachable from any root, treating as root"
                );
                nodes[index].depth = 0;
                roots.push(index);
            }
        }

        for (index, group) in children {
            nodes[index].children = group;
        }

        Self {
            nodes,
            by_id,
            roots,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&CategoryNode> {
        self.by_id.get(&id).map(|&index| &self.nodes[index])
    }

    pub fn depth(&self, id: i64) -> Option<usize> {
        self.get(id).map(|node| node.depth)
    }

    /// Categories in display order: depth-first, siblings by
    /// `(display_order, name)` - the flattened list the tree view renders
    pub fn flatten(&self) -> Vec<&CategoryNode> {
        let mut ordered = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            ordered.push(node);
            for &child in node.children.iter().rev() {
                stack.push(child);
            }
        }
        ordered
    }

    /// Children of `parent` (`None` = roots) in display order
    pub fn children_of(&self, parent: Option<i64>) -> Vec<&CategoryNode> {
        let indices = match parent {
            None => &self.roots,
            Some(id) => match self.by_id.get(&id) {
                Some(&index) => &self.nodes[index].children,
                None => return Vec::new(),
            },
        };
        indices.iter().map(|&index| &self.nodes[index]).collect()
    }

    /// Full descendant-id closure of `id`, including `id` itself.
    /// Iterative; any parent choice inside this set would create a cycle.
    pub fn descendant_ids(&self, id: i64) -> Vec<i64> {
        let Some(&start) = self.by_id.get(&id) else {
            return Vec::new();
        };
        let mut closure = Vec::new();
        let mut stack = vec![start];
        while let Some(index) = stack.pop() {
            closure.push(self.nodes[index].category.id);
            stack.extend(self.nodes[index].children.iter().copied());
        }
        closure
    }

    /// Height of the subtree rooted at `id` (a leaf has height 0)
    fn subtree_height(&self, id: i64) -> usize {
        let Some(&start) = self.by_id.get(&id) else {
            return 0;
        };
        let base = self.nodes[start].depth;
        let mut height = 0;
        let mut stack = vec![start];
        while let Some(index) = stack.pop() {
            height = height.max(self.nodes[index].depth - base);
            stack.extend(self.nodes[index].children.iter().copied());
        }
        height
    }

    /// Valid parent choices for a create or reparent dialog.
    ///
    /// Excludes, for an existing category: its own descendant closure
    /// (cycle prevention) and any parent under which the moved subtree
    /// would pierce the depth ceiling. For a new category (`of = None`)
    /// only the ceiling applies. Inactive categories are never offered.
    pub fn selectable_parents(&self, of: Option<i64>) -> Vec<&Category> {
        let (closure, height) = match of {
            Some(id) => (self.descendant_ids(id), self.subtree_height(id)),
            None => (Vec::new(), 0),
        };
        self.flatten()
            .into_iter()
            .filter(|node| node.category.is_active)
            .filter(|node| !closure.contains(&node.category.id))
            .filter(|node| node.depth + 1 + height <= MAX_CATEGORY_DEPTH)
            .map(|node| &node.category)
            .collect()
    }

    /// Whether placing `of` (or a new category) under `new_parent` would
    /// exceed the depth ceiling
    pub fn would_exceed_depth(&self, of: Option<i64>, new_parent: Option<i64>) -> bool {
        let parent_depth = match new_parent {
            None => return false,
            Some(parent) => match self.depth(parent) {
                Some(depth) => depth,
                None => return false,
            },
        };
        let height = of.map(|id| self.subtree_height(id)).unwrap_or(0);
        parent_depth + 1 + height > MAX_CATEGORY_DEPTH
    }

    /// Whether `new_parent` sits inside the subtree of `of`
    pub fn would_create_cycle(&self, of: i64, new_parent: Option<i64>) -> bool {
        match new_parent {
            None => false,
            Some(parent) => self.descendant_ids(of).contains(&parent),
        }
    }

    /// Display order for a category created under `parent`:
    /// 1 + the highest sibling order, 0 when there are no siblings
    pub fn next_display_order(&self, parent: Option<i64>) -> i32 {
        self.children_of(parent)
            .iter()
            .map(|node| node.category.display_order)
            .max()
            .map(|highest| highest + 1)
            .unwrap_or(0)
    }

    /// Swap plan for moving `id` one position among its siblings.
    /// `None` when the category is already at the edge (or unknown).
    pub fn reorder_plan(&self, id: i64, direction: MoveDirection) -> Option<ReorderPlan> {
        let node = self.get(id)?;
        let siblings = self.children_of(node.category.parent_id);
        let position = siblings.iter().position(|n| n.category.id == id)?;
        let neighbor = match direction {
            MoveDirection::Up => position.checked_sub(1)?,
            MoveDirection::Down => {
                let next = position + 1;
                if next >= siblings.len() {
                    return None;
                }
                next
            }
        };
        let a = &siblings[position].category;
        let b = &siblings[neighbor].category;
        Some(ReorderPlan {
            updates: [(a.id, b.display_order), (b.id, a.display_order)],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: i64, name: &str, parent_id: Option<i64>, display_order: i32) -> Category {
        Category {
            id,
            name: name.to_string(),
            description: None,
            parent_id,
            display_order,
            is_active: true,
        }
    }

    /// tools(1) > hand tools(2) > wrenches(4); tools > power tools(3); fasteners(5)
    fn sample_tree() -> CategoryTree {
        CategoryTree::build(vec![
            category(1, "Tools", None, 0),
            category(2, "Hand Tools", Some(1), 0),
            category(3, "Power Tools", Some(1), 1),
            category(4, "Wrenches", Some(2), 0),
            category(5, "Fasteners", None, 1),
        ])
    }

    #[test]
    fn test_depth_computation() {
        let tree = sample_tree();
        assert_eq!(tree.depth(1), Some(0));
        assert_eq!(tree.depth(2), Some(1));
        assert_eq!(tree.depth(3), Some(1));
        assert_eq!(tree.depth(4), Some(2));
        assert_eq!(tree.depth(5), Some(0));
        assert_eq!(tree.depth(99), None);
    }

    #[test]
    fn test_flatten_order() {
        let tree = sample_tree();
        let names: Vec<&str> = tree
            .flatten()
            .iter()
            .map(|node| node.category.name.as_str())
            .collect();
        assert_eq!(
            names,
            ["Tools", "Hand Tools", "Wrenches", "Power Tools", "Fasteners"]
        );
    }

    #[test]
    fn test_sibling_sort_ties_broken_by_name() {
        let tree = CategoryTree::build(vec![
            category(1, "Zinc", None, 0),
            category(2, "Alloy", None, 0),
            category(3, "Brass", None, 1),
        ]);
        let names: Vec<&str> = tree
            .children_of(None)
            .iter()
            .map(|node| node.category.name.as_str())
            .collect();
        assert_eq!(names, ["Alloy", "Zinc", "Brass"]);
    }

    #[test]
    fn test_descendant_closure_includes_self() {
        let tree = sample_tree();
        let mut closure = tree.descendant_ids(1);
        closure.sort();
        assert_eq!(closure, [1, 2, 3, 4]);
        assert_eq!(tree.descendant_ids(4), [4]);
    }

    #[test]
    fn test_cycle_prevention_excludes_own_subtree() {
        let tree = sample_tree();
        assert!(tree.would_create_cycle(1, Some(4)));
        assert!(tree.would_create_cycle(1, Some(1)));
        assert!(!tree.would_create_cycle(1, Some(5)));
        assert!(!tree.would_create_cycle(1, None));

        let parents: Vec<i64> = tree
            .selectable_parents(Some(2))
            .iter()
            .map(|c| c.id)
            .collect();
        // nothing inside the subtree of 2 may host it
        assert!(!parents.contains(&2));
        assert!(!parents.contains(&4));
        assert!(parents.contains(&1));
        assert!(parents.contains(&5));
    }

    #[test]
    fn test_depth_ceiling_for_create() {
        let tree = sample_tree();
        // id 4 sits at the ceiling - not offered as a parent for new nodes
        let parents: Vec<i64> = tree.selectable_parents(None).iter().map(|c| c.id).collect();
        assert!(parents.contains(&1));
        assert!(parents.contains(&2));
        assert!(!parents.contains(&4));
        assert!(!tree.would_exceed_depth(None, Some(2)));
        assert!(tree.would_exceed_depth(None, Some(4)));
    }

    #[test]
    fn test_depth_ceiling_accounts_for_subtree_height() {
        let tree = sample_tree();
        // subtree of 2 has height 1; placing it under 3 (depth 1) gives 1+1+1 > 2
        assert!(tree.would_exceed_depth(Some(2), Some(3)));
        // a leaf can move under any depth-1 node
        assert!(!tree.would_exceed_depth(Some(4), Some(3)));
        // the whole subtree of 1 (height 2) can only go to the root level
        let parents: Vec<i64> = tree
            .selectable_parents(Some(1))
            .iter()
            .map(|c| c.id)
            .collect();
        assert!(parents.is_empty(), "got {:?}", parents);
    }

    #[test]
    fn test_inactive_categories_are_not_offered() {
        let mut inactive = category(6, "Retired", None, 2);
        inactive.is_active = false;
        let mut categories = vec![
            category(1, "Tools", None, 0),
            category(5, "Fasteners", None, 1),
        ];
        categories.push(inactive);
        let tree = CategoryTree::build(categories);
        let parents: Vec<i64> = tree.selectable_parents(None).iter().map(|c| c.id).collect();
        assert_eq!(parents, [1, 5]);
    }

    #[test]
    fn test_next_display_order() {
        let tree = sample_tree();
        assert_eq!(tree.next_display_order(Some(1)), 2);
        assert_eq!(tree.next_display_order(Some(4)), 0);
        assert_eq!(tree.next_display_order(None), 2);
    }

    #[test]
    fn test_reorder_plan_swaps_neighbor_orders() {
        // A(display_order=0), B(display_order=1) under the same parent
        let tree = CategoryTree::build(vec![
            category(10, "A", None, 0),
            category(11, "B", None, 1),
        ]);
        let plan = tree.reorder_plan(11, MoveDirection::Up).unwrap();
        assert_eq!(plan.updates, [(11, 0), (10, 1)]);

        // applying the plan and re-sorting lists B before A
        let moved = CategoryTree::build(vec![
            category(10, "A", None, 1),
            category(11, "B", None, 0),
        ]);
        let names: Vec<&str> = moved
            .children_of(None)
            .iter()
            .map(|node| node.category.name.as_str())
            .collect();
        assert_eq!(names, ["B", "A"]);
    }

    #[test]
    fn test_reorder_plan_edges() {
        let tree = sample_tree();
        assert!(tree.reorder_plan(2, MoveDirection::Up).is_none());
        assert!(tree.reorder_plan(3, MoveDirection::Down).is_none());
        assert!(tree.reorder_plan(99, MoveDirection::Up).is_none());
        assert!(tree.reorder_plan(2, MoveDirection::Down).is_some());
    }

    #[test]
    fn test_unknown_parent_degrades_to_root() {
        let tree = CategoryTree::build(vec![
            category(1, "Tools", None, 0),
            category(7, "Orphan", Some(42), 0),
        ]);
        assert_eq!(tree.depth(7), Some(0));
        assert_eq!(tree.children_of(None).len(), 2);
    }
}
