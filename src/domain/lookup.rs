use serde::{Deserialize, Serialize};

/// Innovation field categorization attached to an application.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Field {
    pub id: i32,
    pub label: String,
}

/// Municipality categorization attached to an application.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Municipality {
    pub id: i32,
    pub label: String,
}
