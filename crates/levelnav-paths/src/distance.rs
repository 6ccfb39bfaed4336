use levelnav_core::Pos;

/// Manhattan (L1) distance over `(x, y, level)`; every level crossed counts 1.
#[inline]
pub fn manhattan(a: Pos, b: Pos) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs() + (a.level - b.level).abs()
}

/// Search heuristic: [`manhattan`] as a cost.
///
/// Not admissible across escalators, whose edges cost 0.5 per level.
#[inline]
pub(crate) fn estimate(from: Pos, to: Pos) -> f32 {
    manhattan(from, to) as f32
}
