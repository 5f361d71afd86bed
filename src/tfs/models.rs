use crate::support::{LowercaseKeys, deserialize_null_default};
use serde::{Deserialize, Serialize};

/// Changeset query sent to the reporting service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TfsRequest {
    #[serde(rename = "TFSUrl")]
    pub tfs_url: String,
    #[serde(rename = "TeamProjectUrl")]
    pub project_url: String,
    #[serde(rename = "TFSUserName")]
    pub user_name: String,
    #[serde(rename = "TFSPassword")]
    pub password: String,
    #[serde(rename = "StartDate")]
    pub start_date: String,
    #[serde(rename = "EndDate")]
    pub end_date: String,
}

/// One changeset as returned by the reporting service.
///
/// Field names are matched ignoring case, and absent or `null` fields decode
/// as empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LowercaseKeys<ChangesetRecord>")]
pub struct ChangesetInfo {
    #[serde(rename = "ChangesetId")]
    pub id: i64,
    #[serde(rename = "Comments")]
    pub comments: String,
    #[serde(rename = "CommittedBy")]
    pub committed_by: String,
    // Kept as sent; the service's date format is not parsed.
    #[serde(rename = "CommittedDate")]
    pub committed_date: String,
    #[serde(rename = "WorkItems")]
    pub work_items: Vec<WorkItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LowercaseKeys<WorkItemRecord>")]
pub struct WorkItem {
    #[serde(rename = "WorkItemId")]
    pub id: i64,
    #[serde(rename = "WorkItemTitle")]
    pub title: String,
    #[serde(rename = "WorkItemCreatedBy")]
    pub created_by: String,
    #[serde(rename = "WorkItemCreatedDate")]
    pub created_date: String,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct ChangesetRecord {
    #[serde(deserialize_with = "deserialize_null_default")]
    changesetid: i64,
    #[serde(deserialize_with = "deserialize_null_default")]
    comments: String,
    #[serde(deserialize_with = "deserialize_null_default")]
    committedby: String,
    #[serde(deserialize_with = "deserialize_null_default")]
    committeddate: String,
    #[serde(deserialize_with = "deserialize_null_default")]
    workitems: Vec<WorkItem>,
}

impl From<LowercaseKeys<ChangesetRecord>> for ChangesetInfo {
    fn from(LowercaseKeys(record): LowercaseKeys<ChangesetRecord>) -> Self {
        Self {
            id: record.changesetid,
            comments: record.comments,
            committed_by: record.committedby,
            committed_date: record.committeddate,
            work_items: record.workitems,
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct WorkItemRecord {
    #[serde(deserialize_with = "deserialize_null_default")]
    workitemid: i64,
    #[serde(deserialize_with = "deserialize_null_default")]
    workitemtitle: String,
    #[serde(deserialize_with = "deserialize_null_default")]
    workitemcreatedby: String,
    #[serde(deserialize_with = "deserialize_null_default")]
    workitemcreateddate: String,
}

impl From<LowercaseKeys<WorkItemRecord>> for WorkItem {
    fn from(LowercaseKeys(record): LowercaseKeys<WorkItemRecord>) -> Self {
        Self {
            id: record.workitemid,
            title: record.workitemtitle,
            created_by: record.workitemcreatedby,
            created_date: record.workitemcreateddate,
        }
    }
}
