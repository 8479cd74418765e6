use super::Layout;
use crate::item::Item;

/// Where a displaced item may go, relative to the item that moved into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Left,
    Right,
    Down,
}

impl Direction {
    /// Tried in this order; the first free candidate wins.
    pub const PRIORITY: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Right,
        Direction::Down,
    ];

    /// Candidate `(start_column, start_row)` for `collision` pushed away from `changed`.
    /// Only one axis moves; the other keeps the collider's own start.
    fn candidate(self, changed: &Item, collision: &Item) -> (i64, i64) {
        let changed_column = i64::from(changed.start_column());
        let changed_row = i64::from(changed.start_row());
        let column = i64::from(collision.start_column());
        let row = i64::from(collision.start_row());
        let filled_columns = i64::from(collision.filled_columns());
        let filled_rows = i64::from(collision.filled_rows());

        match self {
            Direction::Up => (column, changed_row - filled_rows),
            Direction::Left => (changed_column - filled_columns, row),
            Direction::Right => (changed_column + filled_columns, row),
            Direction::Down => (column, changed_row + filled_rows),
        }
    }
}

impl Layout {
    /// Pushes each of `collisions` out of the way of `item_changed`.
    ///
    /// Strict left fold: every collider is checked against the layout as left by the previous
    /// ones. A collider with no free direction stays where it is, so the result may still
    /// overlap; [`Layout::move_item`] rejects such outcomes.
    pub fn resolve_collisions(&self, item_changed: &Item, collisions: &[Item]) -> Layout {
        collisions.iter().fold(self.clone(), |layout, collision| {
            let Some(current) = layout.item(collision.id()) else {
                return layout;
            };
            match layout.displace(item_changed, current) {
                Some((direction, displaced)) => {
                    tracing::debug!(
                        item = %displaced.id(),
                        ?direction,
                        start_column = displaced.start_column(),
                        start_row = displaced.start_row(),
                        "collision resolved"
                    );
                    layout.replace_item(displaced)
                }
                None => {
                    tracing::debug!(item = %current.id(), "collision left unresolved");
                    layout
                }
            }
        })
    }

    fn displace(&self, item_changed: &Item, collision: &Item) -> Option<(Direction, Item)> {
        Direction::PRIORITY.into_iter().find_map(|direction| {
            let (column, row) = direction.candidate(item_changed, collision);
            let candidate = self.placed_at(collision, column, row)?;
            let free = self.collisions_with(&candidate).next().is_none();
            free.then_some((direction, candidate))
        })
    }
}
