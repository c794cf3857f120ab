use serde::Deserialize;

/// GraphQL envelope returned by every board API call.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQLError>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BoardsData {
    pub boards: Vec<Board>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Board {
    pub name: String,
    pub items_page: ItemsPage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NextItemsPageData {
    pub next_items_page: ItemsPage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemsPage {
    pub cursor: Option<String>,
    pub items: Vec<BoardItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BoardItem {
    pub name: String,
    pub group: Option<GroupRef>,
    #[serde(default)]
    pub column_values: Vec<ColumnValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupRef {
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnValue {
    pub id: String,
    pub text: Option<String>,
}

impl BoardItem {
    pub fn column_text(&self, column_id: &str) -> Option<&str> {
        self.column_values
            .iter()
            .find(|c| c.id == column_id)
            .and_then(|c| c.text.as_deref())
    }
}
