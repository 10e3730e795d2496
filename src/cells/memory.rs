//! In-process cell store that honors the [`CellBinder`] contract.

use std::{
    cell::RefCell,
    collections::HashMap,
    rc::{Rc, Weak},
};

use super::{Binding, CellBinder, CellCallback, CellValue, Subscription};

type SharedCallback = Rc<RefCell<CellCallback>>;

#[derive(Default)]
struct SheetState {
    values: HashMap<Binding, CellValue>,
    subscribers: HashMap<u64, (Binding, SharedCallback)>,
    next_id: u64,
}

/// Cheaply clonable handle to a shared in-memory sheet.
#[derive(Clone, Default)]
pub struct MemorySheet {
    state: Rc<RefCell<SheetState>>,
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value and pushes it to every subscriber of that cell.
    pub fn set(&self, binding: &Binding, value: CellValue) {
        let targets: Vec<SharedCallback> = {
            let mut state = self.state.borrow_mut();
            state.values.insert(binding.clone(), value.clone());
            state
                .subscribers
                .values()
                .filter(|(bound, _)| bound == binding)
                .map(|(_, callback)| Rc::clone(callback))
                .collect()
        };
        for callback in targets {
            (callback.borrow_mut())(value.clone());
        }
    }

    pub fn set_amount(&self, binding: &Binding, amount: i64) {
        self.set(binding, CellValue::Amount(amount));
    }

    pub fn set_flag(&self, binding: &Binding, flag: bool) {
        self.set(binding, CellValue::Flag(flag));
    }

    pub fn get(&self, binding: &Binding) -> CellValue {
        self.state
            .borrow()
            .values
            .get(binding)
            .cloned()
            .unwrap_or(CellValue::Empty)
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().subscribers.len()
    }

    /// Number of live subscriptions for a single cell.
    pub fn subscribers_of(&self, binding: &Binding) -> usize {
        self.state
            .borrow()
            .subscribers
            .values()
            .filter(|(bound, _)| bound == binding)
            .count()
    }
}

impl CellBinder for MemorySheet {
    fn bind(&self, binding: &Binding, callback: CellCallback) -> Subscription {
        let callback: SharedCallback = Rc::new(RefCell::new(callback));
        let (id, initial) = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            state
                .subscribers
                .insert(id, (binding.clone(), Rc::clone(&callback)));
            let initial = state
                .values
                .get(binding)
                .cloned()
                .unwrap_or(CellValue::Empty);
            (id, initial)
        };
        (callback.borrow_mut())(initial);

        let weak: Weak<RefCell<SheetState>> = Rc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().subscribers.remove(&id);
            }
        })
    }
}
