//! Bounding volume hierarchy over the triangles of a mesh

use parry3d_f64::bounding_volume::{Aabb, BoundingVolume};
use parry3d_f64::shape::Triangle;

/// Triangles per leaf
const MAX_LEAF_SIZE: usize = 4;

#[derive(Debug)]
enum Node {
    Leaf {
        bbox: Aabb,
        triangles: Vec<(usize, Aabb)>,
    },
    Internal {
        bbox: Aabb,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn bbox(&self) -> &Aabb {
        match self {
            Node::Leaf { bbox, .. } | Node::Internal { bbox, .. } => bbox,
        }
    }
}

/// Bounding volume hierarchy with every triangle box inflated by epsilon
#[derive(Debug)]
pub struct Bvh {
    root: Option<Node>,
    triangle_count: usize,
}

impl Bvh {
    /// Build the hierarchy by median split along the longest axis
    ///
    /// Leaf boxes are the triangle bounds loosened by `epsilon`; a negative
    /// or NaN `epsilon` is treated as zero.
    pub fn build(triangles: &[Triangle], epsilon: f64) -> Self {
        let padding = epsilon.max(0.0);
        let boxes: Vec<(usize, Aabb)> = triangles
            .iter()
            .enumerate()
            .map(|(t, triangle)| (t, triangle.local_aabb().loosened(padding)))
            .collect();
        let triangle_count = boxes.len();
        let root = if boxes.is_empty() {
            None
        } else {
            Some(build_node(boxes))
        };
        Self {
            root,
            triangle_count,
        }
    }

    /// Number of triangles in the hierarchy
    pub fn triangle_count(&self) -> usize {
        self.triangle_count
    }

    /// Bounds of the whole hierarchy, `None` when empty
    pub fn bounds(&self) -> Option<&Aabb> {
        self.root.as_ref().map(Node::bbox)
    }

    /// All pairs `(a, b)` of triangles, `a` from `self` and `b` from `other`,
    /// whose inflated boxes overlap
    pub fn overlapping_pairs(&self, other: &Bvh) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        let (Some(a), Some(b)) = (&self.root, &other.root) else {
            return pairs;
        };

        let mut stack: Vec<(&Node, &Node)> = vec![(a, b)];
        while let Some((a, b)) = stack.pop() {
            if !a.bbox().intersects(b.bbox()) {
                continue;
            }
            match (a, b) {
                (Node::Leaf { triangles: ta, .. }, Node::Leaf { triangles: tb, .. }) => {
                    for (i, box_a) in ta {
                        for (j, box_b) in tb {
                            if box_a.intersects(box_b) {
                                pairs.push((*i, *j));
                            }
                        }
                    }
                }
                (Node::Leaf { .. }, Node::Internal { left, right, .. }) => {
                    stack.push((a, left.as_ref()));
                    stack.push((a, right.as_ref()));
                }
                (Node::Internal { left, right, .. }, Node::Leaf { .. }) => {
                    stack.push((left.as_ref(), b));
                    stack.push((right.as_ref(), b));
                }
                (
                    Node::Internal {
                        left: la,
                        right: ra,
                        ..
                    },
                    Node::Internal {
                        left: lb,
                        right: rb,
                        ..
                    },
                ) => {
                    let (la, ra) = (la.as_ref(), ra.as_ref());
                    let (lb, rb) = (lb.as_ref(), rb.as_ref());
                    stack.push((la, lb));
                    stack.push((la, rb));
                    stack.push((ra, lb));
                    stack.push((ra, rb));
                }
            }
        }
        pairs
    }
}

fn build_node(mut boxes: Vec<(usize, Aabb)>) -> Node {
    let mut bbox = boxes[0].1;
    for (_, b) in &boxes[1..] {
        bbox.merge(b);
    }

    if boxes.len() <= MAX_LEAF_SIZE {
        return Node::Leaf {
            bbox,
            triangles: boxes,
        };
    }

    let axis = bbox.extents().imax();
    boxes.sort_by(|(_, a), (_, b)| a.center()[axis].total_cmp(&b.center()[axis]));
    let right = boxes.split_off(boxes.len() / 2);

    Node::Internal {
        bbox,
        left: Box::new(build_node(boxes)),
        right: Box::new(build_node(right)),
    }
}
