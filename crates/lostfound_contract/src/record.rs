use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type RecordId = String;

/// Who reported the item. Built from the session user; missing values are
/// empty strings rather than absent fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinderIdentity {
    pub id: String,
    pub phone_number: String,
}

impl FinderIdentity {
    pub fn new(id: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            phone_number: phone_number.into(),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// A lost item report as the backend stores it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LostItemRecord {
    pub id: RecordId,
    pub title: String,
    pub location: String,
    #[serde(rename = "localImage")]
    pub local_image: String,
    #[serde(rename = "onlineImage")]
    pub online_image: String,
    #[serde(rename = "finderID")]
    pub finder_id: String,
    #[serde(rename = "finderNumber")]
    pub finder_number: String,
    #[serde(rename = "datePosted")]
    pub date_posted: String,
    #[serde(rename = "isClaimed")]
    pub is_claimed: bool,
    #[serde(rename = "claimDate")]
    pub claim_date: Option<String>,
    #[serde(rename = "claimerID")]
    pub claimer_id: Option<String>,
    #[serde(rename = "isDeleted")]
    pub is_deleted: bool,
}

impl LostItemRecord {
    /// A freshly posted report: unclaimed, not deleted, and without an online
    /// image until the storage layer uploads one.
    pub fn new_report(
        title: impl Into<String>,
        location: impl Into<String>,
        local_image: impl Into<String>,
        finder: &FinderIdentity,
        posted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            title: title.into(),
            location: location.into(),
            local_image: local_image.into(),
            online_image: String::new(),
            finder_id: finder.id.clone(),
            finder_number: finder.phone_number.clone(),
            date_posted: posted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            is_claimed: false,
            claim_date: None,
            claimer_id: None,
            is_deleted: false,
        }
    }
}
