use strum_macros::Display;

use crate::internal::models::Story;

/// Column the list is ordered by.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Display)]
pub enum SortKey {
    #[default]
    None,
    Title,
    Author,
    Comment,
    Point,
}

/// Active sort column plus direction flip. Not persisted; reapplied to the
/// latest data snapshot on every render.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct SortState {
    pub key: SortKey,
    pub is_reverse: bool,
}

impl SortState {
    /// Toggling the active key flips the direction; picking another key
    /// starts over in that key's natural direction.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.is_reverse = !self.is_reverse;
        } else {
            self.key = key;
            self.is_reverse = false;
        }
    }

    /// Order a data snapshot for display. The natural direction per key is
    /// ascending for the string columns and descending for the numeric
    /// ones; `is_reverse` flips whichever was produced.
    pub fn apply(&self, stories: &[Story]) -> Vec<Story> {
        let mut sorted = sort_by_key(stories, self.key);
        if self.is_reverse {
            sorted.reverse();
        }
        sorted
    }
}

fn sort_by_key(stories: &[Story], key: SortKey) -> Vec<Story> {
    let mut list = stories.to_vec();
    match key {
        SortKey::None => {}
        SortKey::Title => list.sort_by(|a, b| a.title.cmp(&b.title)),
        SortKey::Author => list.sort_by(|a, b| a.author.cmp(&b.author)),
        SortKey::Comment => {
            list.sort_by_key(|story| story.num_comments);
            list.reverse();
        }
        SortKey::Point => {
            list.sort_by_key(|story| story.points);
            list.reverse();
        }
    }
    list
}
