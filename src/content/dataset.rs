use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;

static DATA_DIR: Dir = include_dir!("src/data");

/// The fixed pools the sampler draws from: three flat lists of strings,
/// embedded at build time.
#[derive(Deserialize, Clone, Debug)]
pub struct ContentSet {
    pub words: Vec<String>,
    pub quotes: Vec<String>,
    pub paragraphs: Vec<String>,
}

impl ContentSet {
    /// Load the dataset embedded in the binary.
    pub fn embedded() -> Self {
        let file = DATA_DIR
            .get_file("content.json")
            .expect("Content file not found");

        let file_as_str = file
            .contents_utf8()
            .expect("Unable to interpret file as a string");

        from_str(file_as_str).expect("Unable to deserialize content json")
    }
}
