use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

use crate::error::{Error, Result};
use crate::models::{BoardSnapshot, BoardsData, ItemsPage, NextItemsPageData, RawItem};
use crate::monday::client::MondayClient;

const FIRST_PAGE_QUERY: &str = r#"
query ($board_id: ID!, $limit: Int!) {
  boards(ids: [$board_id]) {
    name
    items_page(limit: $limit) {
      cursor
      items {
        name
        group { title }
        column_values { id text }
      }
    }
  }
}
"#;

const NEXT_PAGE_QUERY: &str = r#"
query ($cursor: String!, $limit: Int!) {
  next_items_page(limit: $limit, cursor: $cursor) {
    cursor
    items {
      name
      group { title }
      column_values { id text }
    }
  }
}
"#;

/// Follows the board's item cursor until it is exhausted or `max_items` is reached.
pub struct Paginator<'a> {
    client: &'a MondayClient,
}

impl<'a> Paginator<'a> {
    pub fn new(client: &'a MondayClient) -> Self {
        Self { client }
    }

    pub async fn fetch_all(
        &self,
        board_id: &str,
        status_column_id: &str,
        page_size: u32,
        max_items: usize,
    ) -> Result<BoardSnapshot> {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );

        let result = self
            .fetch_pages(&pb, board_id, status_column_id, page_size, max_items)
            .await;
        pb.finish_and_clear();
        result
    }

    async fn fetch_pages(
        &self,
        pb: &ProgressBar,
        board_id: &str,
        status_column_id: &str,
        page_size: u32,
        max_items: usize,
    ) -> Result<BoardSnapshot> {
        let data: BoardsData = self
            .client
            .query(
                FIRST_PAGE_QUERY,
                json!({ "board_id": board_id, "limit": page_size }),
            )
            .await?;

        let board = data
            .boards
            .into_iter()
            .next()
            .ok_or_else(|| Error::BoardApi(format!("board {} not found", board_id)))?;
        tracing::info!("Reading board: {}", board.name);

        let mut items = Vec::new();
        let mut page = 1;
        let mut cursor = absorb(&mut items, board.items_page, status_column_id);
        tracing::debug!("Page {}: {} items so far", page, items.len());
        pb.set_message(format!("{} pages, {} items", page, items.len()));

        while let Some(next) = cursor.take() {
            if items.len() >= max_items {
                tracing::warn!(
                    "Stopping at {} items, board has more (max_items={})",
                    items.len(),
                    max_items
                );
                break;
            }

            let data: NextItemsPageData = self
                .client
                .query(
                    NEXT_PAGE_QUERY,
                    json!({ "cursor": next, "limit": page_size }),
                )
                .await?;

            page += 1;
            if data.next_items_page.items.is_empty() {
                tracing::debug!("Page {} is empty, treating the cursor as exhausted", page);
                break;
            }
            cursor = absorb(&mut items, data.next_items_page, status_column_id);
            tracing::debug!("Page {}: {} items so far", page, items.len());
            pb.set_message(format!("{} pages, {} items", page, items.len()));
        }

        if items.len() > max_items {
            tracing::warn!("Truncating {} fetched items to {}", items.len(), max_items);
            items.truncate(max_items);
        }

        tracing::info!("Fetched {} items in {} pages", items.len(), page);

        Ok(BoardSnapshot {
            board_name: board.name,
            items,
        })
    }
}

fn absorb(items: &mut Vec<RawItem>, page: ItemsPage, status_column_id: &str) -> Option<String> {
    items.extend(
        page.items
            .into_iter()
            .map(|item| RawItem::from_board_item(item, status_column_id)),
    );
    page.cursor.filter(|c| !c.is_empty())
}
