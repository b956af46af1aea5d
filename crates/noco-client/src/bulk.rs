//! Bulk-operation sequencing.
//!
//! Bulk create/delete are client-side loops over independent single-record
//! requests. The sequencing rules are easy to get subtly wrong when implied
//! by loop order, so they live in an explicit state machine: items run
//! strictly in input order, the first item missing its required field aborts
//! the run, items that already ran are not rolled back.

use std::collections::VecDeque;

/// One entry in a bulk operation.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkItem<T> {
    /// The item carries everything the single-record operation needs.
    Ready(T),
    /// The required field (record data, or the row id) was absent.
    Missing,
}

/// Outcome of advancing a [`BulkSequence`] by one item.
#[derive(Debug, PartialEq)]
pub enum BulkStep<T> {
    /// Run the single-record operation for this item.
    Execute(T),
    /// The item at `index` is missing its required field; no further items
    /// may run.
    Abort { index: usize },
    /// Every item has been handed out.
    Finished,
}

/// Drives a bulk operation item by item.
#[derive(Debug)]
pub struct BulkSequence<T> {
    items: VecDeque<BulkItem<T>>,
    cursor: usize,
    aborted: bool,
}

impl<T> BulkSequence<T> {
    pub fn new(items: Vec<BulkItem<T>>) -> Self {
        Self {
            items: items.into(),
            cursor: 0,
            aborted: false,
        }
    }

    /// Advance to the next item. Once aborted the sequence stays terminal
    /// and keeps reporting the same abort index.
    pub fn next_step(&mut self) -> BulkStep<T> {
        if self.aborted {
            return BulkStep::Abort { index: self.cursor };
        }
        match self.items.pop_front() {
            Some(BulkItem::Ready(item)) => {
                self.cursor += 1;
                BulkStep::Execute(item)
            }
            Some(BulkItem::Missing) => {
                self.aborted = true;
                BulkStep::Abort { index: self.cursor }
            }
            None => BulkStep::Finished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hands_out_items_in_input_order() {
        let mut seq = BulkSequence::new(vec![BulkItem::Ready("a"), BulkItem::Ready("b")]);
        assert_eq!(seq.next_step(), BulkStep::Execute("a"));
        assert_eq!(seq.next_step(), BulkStep::Execute("b"));
        assert_eq!(seq.next_step(), BulkStep::Finished);
    }

    #[test]
    fn aborts_at_first_missing_item() {
        let mut seq = BulkSequence::new(vec![
            BulkItem::Ready("a"),
            BulkItem::Missing,
            BulkItem::Ready("c"),
        ]);
        assert_eq!(seq.next_step(), BulkStep::Execute("a"));
        assert_eq!(seq.next_step(), BulkStep::Abort { index: 1 });
        // Terminal: later items are never handed out.
        assert_eq!(seq.next_step(), BulkStep::Abort { index: 1 });
    }

    #[test]
    fn missing_first_item_aborts_before_anything_runs() {
        let mut seq = BulkSequence::new(vec![BulkItem::<&str>::Missing, BulkItem::Ready("b")]);
        assert_eq!(seq.next_step(), BulkStep::Abort { index: 0 });
    }

    #[test]
    fn empty_input_finishes_immediately() {
        let mut seq = BulkSequence::<&str>::new(Vec::new());
        assert_eq!(seq.next_step(), BulkStep::Finished);
    }
}
