/// Built-in dataset registry. Selection is a pure lookup; an unknown or
/// missing key falls back to [`DEFAULT_DATASET`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dataset {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub url: &'static str,
}

pub const DEFAULT_DATASET: &str = "videogames";

pub const DATASETS: [Dataset; 3] = [
    Dataset {
        key: "videogames",
        title: "Video Game Sales",
        description: "Top 100 Most Sold Video Games Grouped by Platform",
        url: "https://cdn.rawgit.com/freeCodeCamp/testable-projects-fcc/a80ce8f9/src/data/tree_map/video-game-sales-data.json",
    },
    Dataset {
        key: "movies",
        title: "Movie Sales",
        description: "Top 100 Highest Grossing Movies Grouped By Genre",
        url: "https://cdn.rawgit.com/freeCodeCamp/testable-projects-fcc/a80ce8f9/src/data/tree_map/movie-data.json",
    },
    Dataset {
        key: "kickstarter",
        title: "Kickstarter Pledges",
        description: "Top 100 Most Pledged Kickstarter Campaigns Grouped By Category",
        url: "https://cdn.rawgit.com/freeCodeCamp/testable-projects-fcc/a80ce8f9/src/data/tree_map/kickstarter-funding-data.json",
    },
];

impl Dataset {
    pub fn select(key: Option<&str>) -> &'static Dataset {
        let wanted = key.unwrap_or(DEFAULT_DATASET);
        DATASETS
            .iter()
            .find(|dataset| dataset.key == wanted)
            .unwrap_or_else(|| Self::default_dataset())
    }

    fn default_dataset() -> &'static Dataset {
        DATASETS
            .iter()
            .find(|dataset| dataset.key == DEFAULT_DATASET)
            .expect("default dataset missing from registry")
    }
}
