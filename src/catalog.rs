use include_dir::{include_dir, Dir};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::games::GameMode;
use crate::round::Challenge;

static CONTENT_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/content");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog file not found: {0}")]
    NotFound(String),

    #[error("catalog file {0} is not valid UTF-8")]
    Encoding(String),

    #[error("unable to parse catalog {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog {0} declares mode {1} but was loaded for {2}")]
    ModeMismatch(String, GameMode, GameMode),

    #[error("catalog {0} has no challenges")]
    Empty(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogFile<C> {
    mode: GameMode,
    challenges: Vec<C>,
}

/// A headline shown in Spot the Fake News.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: u32,
    pub headline: String,
    pub source: String,
    pub date: String,
    pub author: String,
    pub is_real: bool,
    pub explanation: String,
    pub difficulty: Difficulty,
}

/// Which side of a headline pair the player believes is real.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairChoice {
    OptionA,
    OptionB,
}

impl Challenge for NewsItem {
    type Answer = PairChoice;

    // Option A is always this item, so picking A is right exactly when it is real.
    fn is_correct(&self, answer: PairChoice) -> bool {
        (answer == PairChoice::OptionA) == self.is_real
    }

    fn points(&self) -> u32 {
        GameMode::SpotFakeNews.points_per_correct()
    }

    fn explanation(&self) -> &str {
        &self.explanation
    }
}

/// Decoy shown as option B next to `items[idx]`: the first fake headline that
/// is not the item itself.
pub fn decoy_for(items: &[NewsItem], idx: usize) -> Option<&NewsItem> {
    let current = items.get(idx)?;
    items.iter().find(|n| !n.is_real && n.id != current.id)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonImage {
    pub url: String,
    pub is_real: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ImageKind {
    Single { image_url: String, is_real: bool },
    Comparison { images: Vec<ComparisonImage> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageChallenge {
    pub id: u32,
    pub title: String,
    pub explanation: String,
    #[serde(default)]
    pub red_flags: Vec<String>,
    pub difficulty: Difficulty,
    #[serde(flatten)]
    pub kind: ImageKind,
}

pub const SINGLE_IMAGE_POINTS: u32 = 15;
pub const COMPARISON_IMAGE_POINTS: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageAnswer {
    /// Verdict on a single image: `true` means authentic.
    Authentic(bool),
    /// Index of the image picked as real in a comparison.
    Pick(usize),
}

impl ImageChallenge {
    pub fn is_comparison(&self) -> bool {
        matches!(self.kind, ImageKind::Comparison { .. })
    }
}

impl Challenge for ImageChallenge {
    type Answer = ImageAnswer;

    fn is_correct(&self, answer: ImageAnswer) -> bool {
        match (&self.kind, answer) {
            (ImageKind::Single { is_real, .. }, ImageAnswer::Authentic(choice)) => {
                *is_real == choice
            }
            (ImageKind::Comparison { images }, ImageAnswer::Pick(idx)) => {
                images.get(idx).is_some_and(|img| img.is_real)
            }
            _ => false,
        }
    }

    fn points(&self) -> u32 {
        match self.kind {
            ImageKind::Single { .. } => SINGLE_IMAGE_POINTS,
            ImageKind::Comparison { .. } => COMPARISON_IMAGE_POINTS,
        }
    }

    fn explanation(&self) -> &str {
        &self.explanation
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlineChallenge {
    pub id: u32,
    pub headline: String,
    pub is_clickbait: bool,
    pub explanation: String,
    /// 1 (sober) to 10 (pure bait)
    pub clickbait_score: u8,
    #[serde(default)]
    pub techniques: Vec<String>,
    #[serde(default)]
    pub legitimate_version: Option<String>,
}

impl Challenge for HeadlineChallenge {
    /// `true` when the player calls it clickbait
    type Answer = bool;

    fn is_correct(&self, answer: bool) -> bool {
        answer == self.is_clickbait
    }

    fn points(&self) -> u32 {
        GameMode::ClickbaitBuster.points_per_correct()
    }

    fn explanation(&self) -> &str {
        &self.explanation
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceChallenge {
    pub id: u32,
    pub title: String,
    pub website: String,
    pub url: String,
    pub about_info: String,
    pub author_credentials: String,
    pub publication_date: String,
    #[serde(default)]
    pub sources: Vec<String>,
    pub is_credible: bool,
    /// 1 to 10
    pub credibility_score: u8,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub good_signs: Vec<String>,
    pub explanation: String,
}

impl Challenge for SourceChallenge {
    /// `true` when the player judges the source credible
    type Answer = bool;

    fn is_correct(&self, answer: bool) -> bool {
        answer == self.is_credible
    }

    fn points(&self) -> u32 {
        GameMode::SourceSleuth.points_per_correct()
    }

    fn explanation(&self) -> &str {
        &self.explanation
    }
}

pub fn spot_fake_news() -> Result<Vec<NewsItem>, CatalogError> {
    load(GameMode::SpotFakeNews)
}

pub fn image_detective() -> Result<Vec<ImageChallenge>, CatalogError> {
    load(GameMode::ImageDetective)
}

pub fn clickbait_buster() -> Result<Vec<HeadlineChallenge>, CatalogError> {
    load(GameMode::ClickbaitBuster)
}

pub fn source_sleuth() -> Result<Vec<SourceChallenge>, CatalogError> {
    load(GameMode::SourceSleuth)
}

fn load<C: DeserializeOwned>(mode: GameMode) -> Result<Vec<C>, CatalogError> {
    let file_name = format!("{}.json", mode.slug().replace('-', "_"));
    let file: CatalogFile<C> = read_content(&file_name)?;

    if file.mode != mode {
        return Err(CatalogError::ModeMismatch(file_name, file.mode, mode));
    }
    if file.challenges.is_empty() {
        return Err(CatalogError::Empty(file_name));
    }

    Ok(file.challenges)
}

/// Deserialize one of the embedded content files.
pub(crate) fn read_content<T: DeserializeOwned>(file_name: &str) -> Result<T, CatalogError> {
    let file = CONTENT_DIR
        .get_file(file_name)
        .ok_or_else(|| CatalogError::NotFound(file_name.to_string()))?;

    let contents = file
        .contents_utf8()
        .ok_or_else(|| CatalogError::Encoding(file_name.to_string()))?;

    serde_json::from_str(contents).map_err(|source| CatalogError::Parse {
        file: file_name.to_string(),
        source,
    })
}
