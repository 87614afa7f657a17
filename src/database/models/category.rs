use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub s_no: i64,
    pub category_name: Option<String>,
    /// Maintained by storage; never written by the API.
    pub project_count: Option<i64>,
}

/// Body of `POST /api/categories` and `PUT /api/categories/:id`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CategoryBody {
    #[serde(default)]
    pub name: Option<String>,
}
