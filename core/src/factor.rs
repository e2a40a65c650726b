//! Lifting of settings shared by every list into a common list.

use crate::setting::{Entry, Setting};
use indexmap::IndexSet;
use tracing::trace;

/// Factors settings common to several lists out of them.
///
/// A key is lifted when it occurs in more than one list and every
/// occurrence in every list equals the first one seen. Lifted settings are
/// removed from all lists and returned in key first-appearance order.
/// Fewer than two lists are returned untouched. Gaps are never moved.
pub fn factor(mut lists: Vec<Vec<Entry>>) -> (Vec<Vec<Entry>>, Vec<Setting>) {
    if lists.len() <= 1 {
        return (lists, Vec::new());
    }

    let keys: IndexSet<String> = lists
        .iter()
        .flatten()
        .filter_map(Entry::as_setting)
        .map(|s| s.key().to_owned())
        .collect();

    let mut common = Vec::new();
    for key in &keys {
        let mut reference: Option<Setting> = None;
        let mut nsame = 0;
        let mut ndiff = 0;
        for list in &lists {
            let mut found = false;
            let mut differs = false;
            for setting in list
                .iter()
                .filter_map(Entry::as_setting)
                .filter(|s| s.key() == key)
            {
                let first = reference.get_or_insert_with(|| setting.clone());
                found = true;
                differs |= *setting != *first;
            }
            if differs {
                ndiff += 1;
            } else if found {
                nsame += 1;
            }
        }

        if nsame > 1 && ndiff == 0 {
            if let Some(shared) = reference {
                for list in &mut lists {
                    list.retain(|entry| entry.as_setting() != Some(&shared));
                }
                trace!(key = %key, lists = nsame, "factored common setting");
                common.push(shared);
            }
        }
    }

    (lists, common)
}
