use crate::tfs::models::ChangesetInfo;
use std::collections::BTreeMap;

/// Flattens the work items referenced by `changesets` into an id → title
/// map, ordered by id.
///
/// A work item linked to several changesets appears once; the title seen
/// last wins.
pub fn collect_work_items(changesets: &[ChangesetInfo]) -> BTreeMap<i64, String> {
    let mut report = BTreeMap::new();
    for changeset in changesets {
        for work_item in &changeset.work_items {
            report.insert(work_item.id, work_item.title.clone());
        }
    }
    report
}
