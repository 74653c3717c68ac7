use serde::{Deserialize, Serialize};

/// Icon of a result item, pointing at a local image file.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub path: String,
}

/// One row in the launcher's result list.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub title: String,
    pub subtitle: String,
    pub arg: String,
    pub autocomplete: String,
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
}

/// Script Filter payload: `{"items": [...]}`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Feedback {
    pub items: Vec<Item>,
}
