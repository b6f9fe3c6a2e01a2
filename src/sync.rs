//! Keeping Slint models in step with editor state.

use slint::{Model, VecModel};
use std::rc::Rc;

/// Pushes a fresh snapshot of items into a bound Slint model.
pub(crate) trait ModelSyncer<T> {
    fn sync(&self, items: &[T]);
}

/// [`ModelSyncer`] for a `VecModel<P>` built from items with a constructor.
pub(crate) struct ConcreteModelSyncer<P, F> {
    pub(crate) model: Rc<VecModel<P>>,
    pub(crate) constructor: F,
}

impl<T, P, F> ModelSyncer<T> for ConcreteModelSyncer<P, F>
where
    P: Clone + 'static,
    F: Fn(&T) -> P,
{
    fn sync(&self, items: &[T]) {
        sync_rows(&self.model, items.iter().map(&self.constructor));
    }
}

/// Overwrite `model` in place so it holds exactly `rows`.
///
/// Existing rows are updated rather than removed and re-added, which keeps
/// Slint's repeaters from recreating every element on each change.
pub fn sync_rows<P, I>(model: &VecModel<P>, rows: I)
where
    P: Clone + 'static,
    I: IntoIterator<Item = P>,
{
    let mut len = 0;
    for (i, row) in rows.into_iter().enumerate() {
        if i < model.row_count() {
            model.set_row_data(i, row);
        } else {
            model.push(row);
        }
        len = i + 1;
    }
    while model.row_count() > len {
        model.remove(model.row_count() - 1);
    }
}
