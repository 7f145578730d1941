use crate::collision::{canonicalize, max_radius, CollisionDetector};
use crate::core::container::Container;
use crate::core::particle::{Axis, DIM};
use crate::error::Result;

#[derive(Debug, Clone, Copy)]
struct KdNode {
    /// Index of the point stored at this node.
    point: usize,
    /// Splitting axis.
    axis: Axis,
    left: Option<usize>,
    right: Option<usize>,
}

/// Balanced 2-d tree over a set of points, built by median splits on
/// alternating axes.
///
/// Points equal to a node's split coordinate may sit in either subtree, so
/// queries descend into both sides on ties.
#[derive(Debug, Clone, Default)]
pub struct KdTree {
    nodes: Vec<KdNode>,
    root: Option<usize>,
}

impl KdTree {
    /// Build a tree over `points`. Node payloads are indices into `points`.
    pub fn build(points: &[[f64; DIM]]) -> Self {
        let mut indices: Vec<usize> = (0..points.len()).collect();
        let mut nodes = Vec::with_capacity(points.len());
        let root = build_subtree(points, &mut indices, Axis::X, &mut nodes);
        Self { nodes, root }
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the tree indexes no points.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Height of the tree (0 when empty).
    pub fn depth(&self) -> usize {
        fn depth_of(nodes: &[KdNode], node: Option<usize>) -> usize {
            match node {
                None => 0,
                Some(n) => 1 + depth_of(nodes, nodes[n].left).max(depth_of(nodes, nodes[n].right)),
            }
        }
        depth_of(&self.nodes, self.root)
    }

    /// Collect into `out` every point within the axis-aligned square of half
    /// side `reach` around `center`. `out` is cleared first.
    pub fn within(
        &self,
        points: &[[f64; DIM]],
        center: [f64; DIM],
        reach: f64,
        out: &mut Vec<usize>,
    ) {
        out.clear();
        let mut stack: Vec<usize> = self.root.into_iter().collect();
        while let Some(n) = stack.pop() {
            let node = &self.nodes[n];
            let p = points[node.point];
            if (p[0] - center[0]).abs() <= reach && (p[1] - center[1]).abs() <= reach {
                out.push(node.point);
            }
            let d = node.axis.index();
            if let Some(left) = node.left {
                if center[d] - reach <= p[d] {
                    stack.push(left);
                }
            }
            if let Some(right) = node.right {
                if center[d] + reach >= p[d] {
                    stack.push(right);
                }
            }
        }
    }
}

fn build_subtree(
    points: &[[f64; DIM]],
    indices: &mut [usize],
    axis: Axis,
    nodes: &mut Vec<KdNode>,
) -> Option<usize> {
    if indices.is_empty() {
        return None;
    }
    let d = axis.index();
    let mid = indices.len() / 2;
    indices.select_nth_unstable_by(mid, |&a, &b| {
        points[a][d]
            .total_cmp(&points[b][d])
            .then_with(|| a.cmp(&b))
    });
    let point = indices[mid];
    let (lower, rest) = indices.split_at_mut(mid);
    let upper = &mut rest[1..];

    let left = build_subtree(points, lower, axis.next(), nodes);
    let right = build_subtree(points, upper, axis.next(), nodes);
    nodes.push(KdNode {
        point,
        axis,
        left,
        right,
    });
    Some(nodes.len() - 1)
}

/// Collision detector backed by a [`KdTree`] rebuilt every tick.
///
/// Every particle queries the tree for centers within `2 * max_radius`, which
/// bounds the center distance of any overlapping pair.
#[derive(Debug, Clone, Default)]
pub struct KdTreeDetector {
    points: Vec<[f64; DIM]>,
    neighbours: Vec<usize>,
}

impl KdTreeDetector {
    /// Detector with an empty tree; the tree is rebuilt on every pass.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CollisionDetector for KdTreeDetector {
    fn name(&self) -> &'static str {
        "kd_tree"
    }

    fn candidate_pairs(&mut self, container: &Container) -> Result<Vec<(usize, usize)>> {
        let particles = container.particles();
        let mut pairs = Vec::new();
        if particles.len() < 2 {
            return Ok(pairs);
        }

        self.points.clear();
        self.points.extend(particles.iter().map(|p| p.center));
        let tree = KdTree::build(&self.points);
        let reach = 2.0 * max_radius(particles);

        for (i, &center) in self.points.iter().enumerate() {
            tree.within(&self.points, center, reach, &mut self.neighbours);
            pairs.extend(
                self.neighbours
                    .iter()
                    .filter(|&&j| j > i)
                    .map(|&j| (i, j)),
            );
        }

        canonicalize(&mut pairs);
        Ok(pairs)
    }
}
