use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::statement::Param;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub s_no: i64,
    pub name: Option<String>,
    pub long_description: Option<String>,
    pub short_description: Option<String>,
    pub images: Option<String>,
    pub technologies: Option<String>,
    pub github_link: Option<String>,
    pub circuit_diagram_link: Option<String>,
    pub video_link: Option<String>,
    pub category_name: Option<String>,
    pub order_number: Option<i64>,
    pub visibility: Option<i64>,
}

/// Body of `POST /api/projects` and `PUT /api/projects/:id`. Absent fields bind as NULL.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProjectBody {
    pub name: Option<String>,
    pub long_description: Option<String>,
    pub short_description: Option<String>,
    pub images: Option<String>,
    pub technologies: Option<String>,
    pub github_link: Option<String>,
    pub circuit_diagram_link: Option<String>,
    pub video_link: Option<String>,
    pub category_name: Option<String>,
    pub order_number: Option<i64>,
    pub visibility: Option<Flag>,
}

/// 1/0 column value. Clients send either a JSON number or a boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Int(i64),
}

impl From<Flag> for Param {
    fn from(flag: Flag) -> Self {
        match flag {
            Flag::Bool(b) => Param::Integer(i64::from(b)),
            Flag::Int(i) => Param::Integer(i),
        }
    }
}
