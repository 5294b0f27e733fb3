/// Cursor over a vertical list, scrolled so the cursor stays inside a
/// window of `rows` lines. Every move goes through [`ListState::jump_to`],
/// which clamps to the current length.
#[derive(Debug, Clone)]
pub struct ListState {
    pub selected: Option<usize>,
    pub offset: usize,
    pub rows: usize,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            selected: None,
            offset: 0,
            rows: 10,
        }
    }
}

impl ListState {
    /// Select `index` (clamped to `total`) and scroll it into view
    pub fn jump_to(&mut self, index: usize, total: usize) {
        if total == 0 {
            self.clear();
            return;
        }
        let i = index.min(total - 1);
        self.selected = Some(i);
        if i < self.offset {
            self.offset = i;
        } else if self.rows > 0 && i >= self.offset + self.rows {
            self.offset = i + 1 - self.rows;
        }
    }

    /// Move by `delta` items; with nothing selected the cursor lands on the
    /// first item.
    pub fn move_by(&mut self, delta: isize, total: usize) {
        let target = self
            .selected
            .map_or(0, |i| i.saturating_add_signed(delta));
        self.jump_to(target, total);
    }

    /// One window minus the line kept for context
    pub fn page(&self) -> isize {
        self.rows.saturating_sub(1).max(1) as isize
    }

    /// Re-apply the cursor after the list changed length
    pub fn fit(&mut self, total: usize) {
        match self.selected {
            Some(i) => self.jump_to(i, total),
            None => self.offset = 0,
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(rows: usize) -> ListState {
        ListState {
            rows,
            ..Default::default()
        }
    }

    #[test]
    fn moving_past_the_window_scrolls() {
        let mut list = window(3);
        for _ in 0..5 {
            list.move_by(1, 10);
        }
        // First move only lands on the top item
        assert_eq!(list.selected, Some(4));
        assert_eq!(list.offset, 2);
        list.jump_to(0, 10);
        assert_eq!(list.offset, 0);
    }

    #[test]
    fn paging_stops_at_the_ends() {
        let mut list = window(4);
        let page = list.page();
        list.move_by(page, 5);
        assert_eq!(list.selected, Some(0));
        list.move_by(page, 5);
        list.move_by(page, 5);
        assert_eq!(list.selected, Some(4));
        list.move_by(-page, 5);
        list.move_by(-page, 5);
        assert_eq!(list.selected, Some(0));
    }

    #[test]
    fn fit_follows_a_shrinking_list() {
        let mut list = ListState::default();
        list.jump_to(usize::MAX, 8);
        assert_eq!(list.selected, Some(7));
        list.fit(3);
        assert_eq!(list.selected, Some(2));
        list.fit(0);
        assert_eq!(list.selected, None);
        list.move_by(1, 0);
        assert_eq!(list.selected, None);
    }
}
