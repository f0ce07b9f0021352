/// Items to insert and delete to turn one collection into another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diff<T> {
    pub to_add: Vec<T>,
    pub to_remove: Vec<T>,
}

impl<T> Diff<T> {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Set difference between `existing` and `desired`.
///
/// Duplicates in `desired` are collapsed. Order follows the input slices.
pub fn reconcile<T: PartialEq + Clone>(existing: &[T], desired: &[T]) -> Diff<T> {
    let mut to_add: Vec<T> = Vec::new();
    for item in desired {
        if !existing.contains(item) && !to_add.contains(item) {
            to_add.push(item.clone());
        }
    }

    let to_remove = existing
        .iter()
        .filter(|item| !desired.contains(item))
        .cloned()
        .collect();

    Diff { to_add, to_remove }
}
