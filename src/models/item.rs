use super::board::BoardItem;

/// A board item as fetched, before any filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawItem {
    pub name: String,
    pub group_title: String,
    pub status_text: Option<String>,
}

impl RawItem {
    pub fn from_board_item(item: BoardItem, status_column_id: &str) -> Self {
        let status_text = item.column_text(status_column_id).map(str::to_string);
        Self {
            name: item.name,
            group_title: item.group.map(|g| g.title).unwrap_or_default(),
            status_text,
        }
    }
}

/// An item that survived filtering, tagged with its geography and categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedItem {
    pub name: String,
    pub geo: String,
    pub status_text: String,
    pub is_learning: bool,
    pub is_waiting: bool,
}

/// What one extraction returns: the board's display name plus its items.
#[derive(Debug, Clone, Default)]
pub struct BoardSnapshot {
    pub board_name: String,
    pub items: Vec<RawItem>,
}
