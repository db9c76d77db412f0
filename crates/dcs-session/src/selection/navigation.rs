//! Directional tooth navigation.

use dcs_chart::{chart_index, chart_order};
use dcs_model::ToothKey;
use serde::{Deserialize, Serialize};

use super::state::Selection;

/// Navigation direction along the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Next tooth in chart order.
    Next,
    /// Previous tooth in chart order.
    Previous,
    /// Same position in the vertically opposite quadrant.
    OppositeArch,
}

/// Where navigation from `current` lands.
///
/// Navigation never wraps and always drops a surface when the tooth changes.
/// From `Idle`, `Next` lands on the first tooth and `Previous` on the last;
/// `OppositeArch` has nothing to mirror and stays idle.
pub fn navigate(current: Selection, direction: Direction) -> Selection {
    let Some(tooth) = current.selected_tooth() else {
        let order = chart_order();
        return match direction {
            Direction::Next => order.first().copied().map_or(Selection::Idle, Selection::Tooth),
            Direction::Previous => order.last().copied().map_or(Selection::Idle, Selection::Tooth),
            Direction::OppositeArch => Selection::Idle,
        };
    };

    let target = match direction {
        Direction::Next => step(tooth, 1),
        Direction::Previous => step(tooth, -1),
        Direction::OppositeArch => {
            ToothKey::new(tooth.quadrant().opposite_arch(), tooth.position()).unwrap_or(tooth)
        }
    };

    if target == tooth {
        current
    } else {
        Selection::Tooth(target)
    }
}

fn step(tooth: ToothKey, delta: isize) -> ToothKey {
    let order = chart_order();
    let index = chart_index(tooth).saturating_add_signed(delta);
    order.get(index).copied().unwrap_or(tooth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcs_model::{Quadrant, SurfaceKey};

    fn key(quadrant: Quadrant, position: u8) -> ToothKey {
        ToothKey::new(quadrant, position).unwrap()
    }

    #[test]
    fn test_next_and_previous() {
        let ur1 = Selection::Tooth(key(Quadrant::UpperRight, 1));
        assert_eq!(
            navigate(ur1, Direction::Next),
            Selection::Tooth(key(Quadrant::UpperLeft, 1))
        );
        assert_eq!(
            navigate(ur1, Direction::Previous),
            Selection::Tooth(key(Quadrant::UpperRight, 2))
        );
    }

    #[test]
    fn test_clamps_at_ends() {
        let first = Selection::Tooth(key(Quadrant::UpperRight, 8));
        assert_eq!(navigate(first, Direction::Previous), first);

        let last = Selection::Surface(key(Quadrant::LowerRight, 8), SurfaceKey::O);
        assert_eq!(navigate(last, Direction::Next), last);
    }

    #[test]
    fn test_surface_cleared_on_move() {
        let selected = Selection::Surface(key(Quadrant::UpperLeft, 3), SurfaceKey::M);
        assert_eq!(
            navigate(selected, Direction::Next),
            Selection::Tooth(key(Quadrant::UpperLeft, 4))
        );
    }

    #[test]
    fn test_opposite_arch() {
        let ul6 = Selection::Tooth(key(Quadrant::UpperLeft, 6));
        assert_eq!(
            navigate(ul6, Direction::OppositeArch),
            Selection::Tooth(key(Quadrant::LowerLeft, 6))
        );
    }

    #[test]
    fn test_from_idle() {
        assert_eq!(
            navigate(Selection::Idle, Direction::Next),
            Selection::Tooth(key(Quadrant::UpperRight, 8))
        );
        assert_eq!(
            navigate(Selection::Idle, Direction::Previous),
            Selection::Tooth(key(Quadrant::LowerRight, 8))
        );
        assert_eq!(navigate(Selection::Idle, Direction::OppositeArch), Selection::Idle);
    }
}
