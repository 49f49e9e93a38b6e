use crate::{Position, Rectangle, Size};

/// A rectangular selection, kept as the anchor corner where the drag
/// started and the lead corner under the cursor. The corners are
/// normalized on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub lead: Position,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::new((0, 0))
    }
}

impl Selection {
    pub fn new(pos: impl Into<Position>) -> Self {
        let pos = pos.into();
        Self { anchor: pos, lead: pos }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor.x == self.lead.x || self.anchor.y == self.lead.y
    }

    pub fn min(&self) -> Position {
        self.anchor.min(self.lead)
    }

    pub fn max(&self) -> Position {
        self.anchor.max(self.lead)
    }

    pub fn size(&self) -> Size {
        Size::new((self.anchor.x - self.lead.x).abs(), (self.anchor.y - self.lead.y).abs())
    }

    pub fn as_rectangle(&self) -> Rectangle {
        Rectangle::new(self.min(), self.size())
    }

    pub fn is_inside(&self, pos: impl Into<Position>) -> bool {
        self.as_rectangle().contains_pt(pos.into())
    }
}

impl From<Rectangle> for Selection {
    fn from(value: Rectangle) -> Self {
        Selection {
            anchor: value.top_left(),
            lead: value.bottom_right(),
        }
    }
}

impl From<(i32, i32, i32, i32)> for Selection {
    fn from(value: (i32, i32, i32, i32)) -> Self {
        Selection {
            anchor: (value.0, value.1).into(),
            lead: (value.2, value.3).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        let sel: Selection = (5, 7, 2, 3).into();
        assert_eq!(sel.min(), Position::new(2, 3));
        assert_eq!(sel.max(), Position::new(5, 7));
        assert_eq!(sel.size(), Size::new(3, 4));
    }

    #[test]
    fn test_inside() {
        let sel: Selection = (2, 2, 6, 6).into();
        assert!(sel.is_inside((2, 2)));
        assert!(sel.is_inside((5, 5)));
        assert!(!sel.is_inside((6, 6)));
        assert!(!sel.is_inside((1, 3)));
    }

    #[test]
    fn test_empty() {
        assert!(Selection::new((4, 4)).is_empty());
        let sel: Selection = (1, 1, 1, 9).into();
        assert!(sel.is_empty());
    }
}
