//! Collision detection for axis-aligned boxes
//!
//! Overlap is strict on both axes: boxes that only share an edge do not
//! collide.

use super::state::Rect;

/// Check whether two boxes overlap
///
/// Symmetric in its arguments.
#[inline]
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_boxes_collide() {
        let a = Rect::new(50.0, 150.0, 40.0, 40.0);
        let b = Rect::new(80.0, 160.0, 20.0, 40.0);
        assert!(aabb_overlap(&a, &b));
        assert!(aabb_overlap(&b, &a));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Rect::new(50.0, 150.0, 40.0, 40.0);
        // Shares the vertical edge x = 90
        let right = Rect::new(90.0, 160.0, 20.0, 40.0);
        assert!(!aabb_overlap(&a, &right));
        // Shares the horizontal edge y = 190
        let below = Rect::new(60.0, 190.0, 20.0, 40.0);
        assert!(!aabb_overlap(&a, &below));
        // Corner contact only
        let corner = Rect::new(90.0, 190.0, 10.0, 10.0);
        assert!(!aabb_overlap(&a, &corner));
    }

    #[test]
    fn test_separated_on_one_axis_misses() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 20.0, 10.0, 10.0);
        assert!(!aabb_overlap(&a, &b));
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.5f32..100.0, 0.5f32..100.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(aabb_overlap(&a, &b), aabb_overlap(&b, &a));
        }

        #[test]
        fn prop_box_placed_flush_right_never_collides(a in rect_strategy(), w in 0.5f32..100.0, dy in -50.0f32..50.0) {
            let b = Rect::new(a.right(), a.top() + dy, w, a.size.y);
            prop_assert!(!aabb_overlap(&a, &b));
        }
    }
}
