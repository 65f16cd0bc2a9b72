use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct Feature {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureSummary {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl From<&Feature> for FeatureSummary {
    fn from(feature: &Feature) -> Self {
        Self {
            id: feature.id,
            name: feature.name.clone(),
            slug: feature.slug.clone(),
        }
    }
}

/// Feature plus the number of tasks under it, as returned by list routes.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureWithCount {
    #[serde(flatten)]
    pub feature: Feature,
    pub task_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateFeature {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateFeature {
    pub name: Option<String>,
    pub description: Option<String>,
}
