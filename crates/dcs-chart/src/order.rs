//! Fixed chart ordering.
//!
//! The odontogram walks the arch as one loop: UR8..UR1, UL1..UL8, LL8..LL1,
//! LR1..LR8. Keyboard navigation moves along this order.

use std::sync::LazyLock;

use dcs_model::{Quadrant, ToothKey};

static CHART_ORDER: LazyLock<Vec<ToothKey>> = LazyLock::new(|| {
    Quadrant::ALL
        .into_iter()
        .flat_map(|quadrant| {
            let ascending = matches!(quadrant, Quadrant::UpperLeft | Quadrant::LowerRight);
            let positions: Vec<u8> = if ascending {
                (ToothKey::MIN_POSITION..=ToothKey::MAX_POSITION).collect()
            } else {
                (ToothKey::MIN_POSITION..=ToothKey::MAX_POSITION).rev().collect()
            };
            positions
                .into_iter()
                .filter_map(move |position| ToothKey::new(quadrant, position))
        })
        .collect()
});

/// All 32 teeth in chart order.
pub fn chart_order() -> &'static [ToothKey] {
    &CHART_ORDER
}

/// Index of a tooth in [`chart_order`].
pub fn chart_index(tooth: ToothKey) -> usize {
    // Every valid ToothKey is present.
    CHART_ORDER
        .iter()
        .position(|candidate| *candidate == tooth)
        .unwrap_or_default()
}
