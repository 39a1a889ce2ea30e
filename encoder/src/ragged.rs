use ndarray::{ArrayD, IxDyn};
use serde::{Deserialize, Serialize};

use crate::{EncoderError, Result};

/// An unevenly nested sequence. Sibling branches may differ in length at
/// every level, but every leaf must sit at the same depth.
///
/// Serializes as plain nested JSON arrays, so `[["a","bb"],["c"]]`
/// deserializes directly into a two-level `Ragged<String>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ragged<T> {
    Leaf(T),
    Branch(Vec<Ragged<T>>),
}

impl<T> Ragged<T> {
    pub fn leaf(value: T) -> Self {
        Ragged::Leaf(value)
    }

    pub fn branch(children: Vec<Ragged<T>>) -> Self {
        Ragged::Branch(children)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Ragged::Leaf(_))
    }

    /// Apply `f` to every leaf, preserving the nesting structure.
    pub fn map<U>(&self, f: &impl Fn(&T) -> U) -> Ragged<U> {
        match self {
            Ragged::Leaf(value) => Ragged::Leaf(f(value)),
            Ragged::Branch(children) => {
                Ragged::Branch(children.iter().map(|child| child.map(f)).collect())
            }
        }
    }

    /// Leaf references in row-major order.
    pub fn flatten(&self) -> Vec<&T> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a T>) {
        match self {
            Ragged::Leaf(value) => leaves.push(value),
            Ragged::Branch(children) => {
                for child in children {
                    child.collect_leaves(leaves);
                }
            }
        }
    }

    /// The minimal rectangular shape bounding every branch.
    ///
    /// A leaf contributes an empty shape, an empty branch contributes `[0]`,
    /// and a branch contributes its child count followed by the elementwise
    /// maximum of its children's shapes (right-padded with zeros to the
    /// deepest sibling). Depends only on structure, never on leaf values.
    pub fn bounding_shape(&self) -> Vec<usize> {
        match self {
            Ragged::Leaf(_) => Vec::new(),
            Ragged::Branch(children) => {
                if children.is_empty() {
                    return vec![0];
                }

                let child_shapes: Vec<Vec<usize>> =
                    children.iter().map(|child| child.bounding_shape()).collect();
                let max_depth = child_shapes.iter().map(|s| s.len()).max().unwrap_or(0);

                let mut tail = vec![0usize; max_depth];
                for shape in &child_shapes {
                    for (level, &dim) in shape.iter().enumerate() {
                        tail[level] = tail[level].max(dim);
                    }
                }

                let mut shape = Vec::with_capacity(max_depth + 1);
                shape.push(children.len());
                shape.extend(tail);
                shape
            }
        }
    }
}

impl<T: Clone> Ragged<T> {
    /// Materialize a dense tensor of the bounding shape, with every
    /// position absent from the ragged input holding `fill`.
    pub fn padded(&self, fill: &T) -> Result<ArrayD<T>> {
        let shape = self.bounding_shape();
        let mut tensor = ArrayD::from_elem(IxDyn(&shape), fill.clone());
        self.write_into(&mut tensor, None, &mut Vec::new())?;
        Ok(tensor)
    }

    /// Like [`Ragged::padded`], but also returns a parallel weight tensor
    /// holding 1.0 exactly where a real leaf was written and 0.0 at every
    /// padded position. The mask is recorded while padding, so a leaf that
    /// happens to equal `fill` still counts as real content.
    pub fn padded_with_mask(&self, fill: &T) -> Result<(ArrayD<T>, ArrayD<f64>)> {
        let shape = self.bounding_shape();
        let mut tensor = ArrayD::from_elem(IxDyn(&shape), fill.clone());
        let mut mask = ArrayD::zeros(IxDyn(&shape));
        self.write_into(&mut tensor, Some(&mut mask), &mut Vec::new())?;
        Ok((tensor, mask))
    }

    /// Materialize a dense tensor of an explicit `target` shape.
    ///
    /// The target must have the same depth as the input's bounding shape and
    /// be at least as large in every dimension; anything smaller cannot hold
    /// the input without truncation and fails with `TargetShape`.
    pub fn padded_to(&self, fill: &T, target: &[usize]) -> Result<ArrayD<T>> {
        let bounding = self.bounding_shape();
        if bounding.len() != target.len()
            || bounding.iter().zip(target).any(|(have, max)| have > max)
        {
            return Err(EncoderError::TargetShape {
                target: target.to_vec(),
                required: bounding,
            });
        }

        let mut tensor = ArrayD::from_elem(IxDyn(target), fill.clone());
        self.write_into(&mut tensor, None, &mut Vec::new())?;
        Ok(tensor)
    }

    fn write_into(
        &self,
        tensor: &mut ArrayD<T>,
        mut mask: Option<&mut ArrayD<f64>>,
        prefix: &mut Vec<usize>,
    ) -> Result<()> {
        match self {
            Ragged::Leaf(value) => {
                if prefix.len() != tensor.ndim() {
                    // A leaf sitting shallower than its siblings is a
                    // structural input error, not something to coerce.
                    return Err(EncoderError::IrregularDepth {
                        depth: prefix.len(),
                        expected: tensor.ndim() - prefix.len(),
                    });
                }
                tensor[prefix.as_slice()] = value.clone();
                if let Some(mask) = mask {
                    mask[prefix.as_slice()] = 1.0;
                }
            }
            Ragged::Branch(children) => {
                for (i, child) in children.iter().enumerate() {
                    prefix.push(i);
                    child.write_into(tensor, mask.as_deref_mut(), prefix)?;
                    prefix.pop();
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l(s: &str) -> Ragged<String> {
        Ragged::leaf(s.to_string())
    }

    fn b(children: Vec<Ragged<String>>) -> Ragged<String> {
        Ragged::branch(children)
    }

    #[test]
    fn test_bounding_shape_scenarios() {
        // [["a","bb"], ["c"]] -> [2, 2]
        let ragged = b(vec![b(vec![l("a"), l("bb")]), b(vec![l("c")])]);
        assert_eq!(ragged.bounding_shape(), vec![2, 2]);

        assert_eq!(l("scalar").bounding_shape(), Vec::<usize>::new());
        assert_eq!(b(vec![]).bounding_shape(), vec![0]);
        assert_eq!(b(vec![l("a"), l("b"), l("c")]).bounding_shape(), vec![3]);
    }

    #[test]
    fn test_bounding_shape_three_levels() {
        let ragged = b(vec![
            b(vec![b(vec![l("a"), l("b"), l("c")]), b(vec![l("d")])]),
            b(vec![b(vec![l("e")])]),
        ]);
        assert_eq!(ragged.bounding_shape(), vec![2, 2, 3]);
    }

    #[test]
    fn test_bounding_shape_with_empty_sibling() {
        let ragged = b(vec![b(vec![]), b(vec![l("a"), l("b")])]);
        assert_eq!(ragged.bounding_shape(), vec![2, 2]);
    }

    #[test]
    fn test_bounding_shape_bounds_every_branch() {
        let ragged = b(vec![
            b(vec![l("a"), l("b"), l("c")]),
            b(vec![l("d")]),
            b(vec![l("e"), l("f")]),
        ]);
        let shape = ragged.bounding_shape();
        assert_eq!(shape[0], 3);
        if let Ragged::Branch(children) = &ragged {
            for child in children {
                if let Ragged::Branch(grandchildren) = child {
                    assert!(grandchildren.len() <= shape[1]);
                }
            }
        }
    }

    #[test]
    fn test_padded_scenario() {
        let ragged = b(vec![b(vec![l("a"), l("bb")]), b(vec![l("c")])]);
        let tensor = ragged.padded(&String::new()).unwrap();

        assert_eq!(tensor.shape(), &[2, 2]);
        assert_eq!(tensor[[0, 0]], "a");
        assert_eq!(tensor[[0, 1]], "bb");
        assert_eq!(tensor[[1, 0]], "c");
        assert_eq!(tensor[[1, 1]], "");
    }

    #[test]
    fn test_padded_round_trips_real_content() {
        let ragged = b(vec![
            b(vec![l("x"), l("y"), l("z")]),
            b(vec![l("w")]),
            b(vec![]),
        ]);
        let tensor = ragged.padded(&"<pad>".to_string()).unwrap();
        assert_eq!(tensor.shape(), &[3, 3]);

        // Every original position holds the original value.
        assert_eq!(tensor[[0, 0]], "x");
        assert_eq!(tensor[[0, 1]], "y");
        assert_eq!(tensor[[0, 2]], "z");
        assert_eq!(tensor[[1, 0]], "w");
        // Everything else holds the fill value.
        assert_eq!(tensor[[1, 1]], "<pad>");
        assert_eq!(tensor[[2, 0]], "<pad>");
    }

    #[test]
    fn test_padded_with_mask_scenario() {
        let ragged = b(vec![b(vec![l("a"), l("bb")]), b(vec![l("c")])]);
        let (_, mask) = ragged.padded_with_mask(&String::new()).unwrap();

        assert_eq!(mask[[0, 0]], 1.0);
        assert_eq!(mask[[0, 1]], 1.0);
        assert_eq!(mask[[1, 0]], 1.0);
        assert_eq!(mask[[1, 1]], 0.0);
    }

    #[test]
    fn test_mask_keeps_real_empty_strings() {
        // Content sniffing would call a genuinely empty input "padding".
        // The mask is recorded during the padding walk instead, so a real
        // empty string keeps weight 1.
        let ragged = b(vec![b(vec![l(""), l("a")]), b(vec![l("b")])]);
        let (tensor, mask) = ragged.padded_with_mask(&String::new()).unwrap();

        assert_eq!(tensor[[0, 0]], "");
        assert_eq!(mask[[0, 0]], 1.0, "real empty-string content is not padding");
        assert_eq!(mask[[1, 1]], 0.0, "actual padding stays masked out");
    }

    #[test]
    fn test_padded_to_larger_target() {
        let ragged = b(vec![b(vec![l("a")])]);
        let tensor = ragged.padded_to(&String::new(), &[3, 2]).unwrap();
        assert_eq!(tensor.shape(), &[3, 2]);
        assert_eq!(tensor[[0, 0]], "a");
        assert_eq!(tensor[[2, 1]], "");
    }

    #[test]
    fn test_padded_to_rejects_small_target() {
        let ragged = b(vec![b(vec![l("a"), l("b")]), b(vec![l("c")])]);
        let err = ragged.padded_to(&String::new(), &[2, 1]).unwrap_err();
        assert!(matches!(err, EncoderError::TargetShape { .. }));

        let err = ragged.padded_to(&String::new(), &[2]).unwrap_err();
        assert!(matches!(err, EncoderError::TargetShape { .. }));
    }

    #[test]
    fn test_irregular_depth_fails_fast() {
        // "a" sits one level shallower than its sibling branch.
        let ragged = b(vec![l("a"), b(vec![l("b")])]);
        let err = ragged.padded(&String::new()).unwrap_err();
        assert!(matches!(
            err,
            EncoderError::IrregularDepth {
                depth: 1,
                expected: 1
            }
        ));
    }

    #[test]
    fn test_empty_outermost_sequence() {
        let ragged: Ragged<String> = Ragged::branch(vec![]);
        let tensor = ragged.padded(&String::new()).unwrap();
        assert_eq!(tensor.shape(), &[0]);
        assert_eq!(tensor.len(), 0);
    }

    #[test]
    fn test_map_and_flatten() {
        let ragged = b(vec![b(vec![l("a"), l("bb")]), b(vec![l("ccc")])]);
        let lengths = ragged.map(&|s: &String| s.len() as f64);
        assert_eq!(
            lengths,
            Ragged::branch(vec![
                Ragged::branch(vec![Ragged::leaf(1.0), Ragged::leaf(2.0)]),
                Ragged::branch(vec![Ragged::leaf(3.0)]),
            ])
        );

        let flat: Vec<&String> = ragged.flatten();
        assert_eq!(flat, vec!["a", "bb", "ccc"]);
    }

    #[test]
    fn test_deserializes_from_nested_json() {
        let ragged: Ragged<String> = serde_json::from_str(r#"[["a","bb"],["c"]]"#).unwrap();
        assert_eq!(ragged.bounding_shape(), vec![2, 2]);
        assert_eq!(ragged.flatten(), vec!["a", "bb", "c"]);

        let round_trip = serde_json::to_string(&ragged).unwrap();
        assert_eq!(round_trip, r#"[["a","bb"],["c"]]"#);
    }
}
