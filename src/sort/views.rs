use crate::record::Record;
use crate::sort::keys::{Direction, SortKey, SortSpec};

/// Label of the view produced when no sort keys are given
pub const DEFAULT_LABEL: &str = "Default sort :";

/// A labeled ordering of a record set
#[derive(Debug, Clone, PartialEq)]
pub struct SortedView<'a> {
    pub label: String,
    pub records: Vec<&'a Record>,
}

/// Sorts `records` under a single key
///
/// Ascending order is stable. Descending order is the ascending order
/// reversed, tied records included.
pub fn sort_by(records: &[Record], key: SortKey) -> Vec<&Record> {
    let mut sorted: Vec<&Record> = records.iter().collect();
    sorted.sort_by(|a, b| key.field.compare(a, b));
    if key.direction == Direction::Descending {
        sorted.reverse();
    }
    sorted
}

/// Produces one view per key of `spec`, in key order
///
/// An empty specification yields the single default view. A key repeated in
/// `spec` keeps its first position and is not duplicated.
pub fn sort_records<'a>(records: &'a [Record], spec: &SortSpec) -> Vec<SortedView<'a>> {
    if spec.is_empty() {
        return vec![SortedView {
            label: DEFAULT_LABEL.to_string(),
            records: sort_by(records, SortKey::default()),
        }];
    }

    let mut views: Vec<SortedView<'a>> = Vec::with_capacity(spec.keys().len());
    for key in spec.keys() {
        let label = key.label();
        if views.iter().any(|view| view.label == label) {
            continue;
        }
        views.push(SortedView {
            label,
            records: sort_by(records, *key),
        });
    }
    views
}
