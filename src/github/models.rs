// src/github/models.rs
// =============================================================================
// Data types for the GitHub gist listing API.
//
// See https://docs.github.com/en/rest/gists/gists#list-gists-for-a-user
//
// We only name the fields the search needs (id, description, owner, files).
// Everything else GitHub sends (html_url, created_at, ...) is kept in an
// `extra` map so search results can echo each gist back unchanged.
// =============================================================================

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One public gist as returned by `GET /users/{username}/gists`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gist {
    pub id: String,
    /// GitHub sends `null` for gists created without a description
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<GistOwner>,
    /// File name -> file metadata, in the order GitHub listed them
    #[serde(default)]
    pub files: IndexMap<String, GistFile>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Gist {
    /// The description to match against; missing descriptions match as "".
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GistOwner {
    pub id: u64,
    pub login: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Metadata for a single file in a gist.
///
/// The listing endpoint usually omits `content`, in which case the body has
/// to be downloaded from `raw_url`. A file with neither is treated as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GistFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "id": "65e6162d99c2e2ea8049b0584dd00912",
            "html_url": "https://gist.github.com/justdionysus/65e6162d99c2e2ea8049b0584dd00912",
            "description": null,
            "owner": { "id": 2153161, "login": "justdionysus", "type": "User" },
            "files": {
                "fetch.py": {
                    "filename": "fetch.py",
                    "language": "Python",
                    "raw_url": "https://gist.githubusercontent.com/raw/fetch.py",
                    "size": 120
                }
            }
        })
    }

    #[test]
    fn test_parses_listing_entry() {
        let gist: Gist = serde_json::from_value(sample()).unwrap();
        assert_eq!(gist.id, "65e6162d99c2e2ea8049b0584dd00912");
        assert_eq!(gist.description_text(), "");
        assert_eq!(gist.owner.as_ref().unwrap().login, "justdionysus");

        let file = &gist.files["fetch.py"];
        assert!(file.content.is_none());
        assert_eq!(
            file.raw_url.as_deref(),
            Some("https://gist.githubusercontent.com/raw/fetch.py")
        );
    }

    #[test]
    fn test_unknown_fields_survive_serialization() {
        let gist: Gist = serde_json::from_value(sample()).unwrap();
        let back = serde_json::to_value(&gist).unwrap();

        assert_eq!(back["html_url"], sample()["html_url"]);
        assert_eq!(back["owner"]["id"], 2153161);
        assert_eq!(back["owner"]["type"], "User");
        assert_eq!(back["files"]["fetch.py"]["language"], "Python");
        assert!(back["description"].is_null());
    }

    #[test]
    fn test_files_keep_listing_order() {
        let raw = r#"{
            "id": "abc",
            "files": {
                "z.txt": { "content": "needle" },
                "m.txt": { "content": "middle" },
                "a.txt": { "raw_url": "raw://gone" }
            }
        }"#;
        let gist: Gist = serde_json::from_str(raw).unwrap();
        let names: Vec<&str> = gist.files.keys().map(String::as_str).collect();
        assert_eq!(names, ["z.txt", "m.txt", "a.txt"]);

        // Echoed back in the same order
        let echoed = serde_json::to_string(&gist).unwrap();
        let z = echoed.find("\"z.txt\"").unwrap();
        let m = echoed.find("\"m.txt\"").unwrap();
        let a = echoed.find("\"a.txt\"").unwrap();
        assert!(z < m && m < a, "order lost: {echoed}");
    }

    #[test]
    fn test_missing_files_defaults_to_empty() {
        let gist: Gist = serde_json::from_value(json!({ "id": "abc" })).unwrap();
        assert!(gist.files.is_empty());
        assert!(gist.owner.is_none());
    }
}
