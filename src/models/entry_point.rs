use serde::{Deserialize, Serialize};

pub const TESTED_STATUS: &str = "tested";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPoint {
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub status: String,
    pub created_at: String,
}

impl EntryPoint {
    pub fn is_tested(&self) -> bool {
        self.status == TESTED_STATUS
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryPointPage {
    #[serde(default)]
    pub items: Vec<EntryPoint>,
}

impl EntryPointPage {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn next_cursor(&self) -> Option<PaginationCursor> {
        self.items.last().map(PaginationCursor::after)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationCursor {
    pub last_id: String,
    pub last_created_at: String,
}

impl PaginationCursor {
    pub fn after(entry_point: &EntryPoint) -> Self {
        Self {
            last_id: entry_point.id.clone(),
            last_created_at: entry_point.created_at.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_page() {
        let json = r#"{"items":[
            {"id":"a1","url":"https://x/home","status":"new","createdAt":"2024-01-01T00:00:00Z","method":"GET"},
            {"id":"a2","url":"https://x/about","status":"tested","createdAt":"2024-01-02T00:00:00Z"}
        ],"total":2}"#;
        let page: EntryPointPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(!page.items[0].is_tested());
        assert!(page.items[1].is_tested());

        let cursor = page.next_cursor().unwrap();
        assert_eq!(cursor.last_id, "a2");
        assert_eq!(cursor.last_created_at, "2024-01-02T00:00:00Z");
    }

    #[test]
    fn test_empty_page_has_no_cursor() {
        let page: EntryPointPage = serde_json::from_str(r#"{"items":[]}"#).unwrap();
        assert!(page.is_empty());
        assert!(page.next_cursor().is_none());
    }

    #[test]
    fn test_missing_items_is_empty() {
        let page: EntryPointPage = serde_json::from_str("{}").unwrap();
        assert!(page.is_empty());
    }
}
