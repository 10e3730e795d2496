//! Live view of overspent categories for one month.
//!
//! [`OverspendWatcher`] keeps one `balance` and one `carryover` subscription per
//! eligible category, records every delivery in a [`SignalTable`], and reruns
//! [`classify`] to produce the current result. Subscriptions are diffed on every
//! change of month, mode, or category list so that categories which stay in
//! scope keep their bindings and categories which leave scope are unbound
//! before the change returns.

use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    fmt, mem,
    rc::{Rc, Weak},
};

use tracing::{debug, info, warn};

use crate::cells::{Binding, CellBinder, CellCallback, CellValue, SignalName, Subscription};
use crate::core::classifier::{classify, eligible_categories, SignalTable};
use crate::core::services::{AlertService, OverspendAlert};
use crate::domain::{BudgetMode, Category, CategoryId, MonthKey};
use crate::sources::{CategorySource, PreferenceSource};

type Listener = Box<dyn FnMut(&[Category])>;

struct WatchState {
    month: MonthKey,
    mode: BudgetMode,
    categories: Vec<Category>,
    in_scope: HashSet<CategoryId>,
    signals: SignalTable,
    overspent: Vec<Category>,
    listeners: Vec<Listener>,
    rebuilding: bool,
    notifying: bool,
    pending: Option<Vec<Category>>,
}

impl WatchState {
    /// Reclassifies and returns the new result if it differs from the last one.
    fn recompute(&mut self) -> Option<Vec<Category>> {
        let next = classify(&self.categories, self.mode, &self.signals);
        if next == self.overspent {
            return None;
        }
        debug!(
            month = %self.month,
            count = next.len(),
            "overspent categories changed"
        );
        self.overspent = next.clone();
        Some(next)
    }
}

/// Reactive classifier over a [`CellBinder`].
pub struct OverspendWatcher<B: CellBinder> {
    registry: HashMap<(CategoryId, SignalName), Subscription>,
    state: Rc<RefCell<WatchState>>,
    binder: B,
}

impl<B: CellBinder> OverspendWatcher<B> {
    /// Starts an envelope-mode watcher with no categories.
    pub fn new(binder: B, month: MonthKey) -> Self {
        let state = WatchState {
            month,
            mode: BudgetMode::default(),
            categories: Vec::new(),
            in_scope: HashSet::new(),
            signals: SignalTable::new(),
            overspent: Vec::new(),
            listeners: Vec::new(),
            rebuilding: false,
            notifying: false,
            pending: None,
        };
        Self {
            registry: HashMap::new(),
            state: Rc::new(RefCell::new(state)),
            binder,
        }
    }

    /// Starts a watcher seeded from the category repository and preference store.
    pub fn with_sources(
        binder: B,
        month: MonthKey,
        categories: &dyn CategorySource,
        prefs: &dyn PreferenceSource,
    ) -> Self {
        let mut watcher = Self::new(binder, month);
        watcher.sync(categories, prefs);
        watcher
    }

    /// Re-reads both collaborators and applies any change in one pass.
    pub fn sync(&mut self, categories: &dyn CategorySource, prefs: &dyn PreferenceSource) {
        let month = self.month();
        self.apply(month, prefs.budget_mode(), categories.list());
    }

    pub fn set_month(&mut self, month: MonthKey) {
        let (mode, categories) = {
            let state = self.state.borrow();
            (state.mode, state.categories.clone())
        };
        self.apply(month, mode, categories);
    }

    pub fn set_budget_mode(&mut self, mode: BudgetMode) {
        let (month, categories) = {
            let state = self.state.borrow();
            (state.month, state.categories.clone())
        };
        self.apply(month, mode, categories);
    }

    pub fn set_categories(&mut self, categories: Vec<Category>) {
        let (month, mode) = {
            let state = self.state.borrow();
            (state.month, state.mode)
        };
        self.apply(month, mode, categories);
    }

    /// Current overspent categories in source order.
    pub fn overspent(&self) -> Vec<Category> {
        self.state.borrow().overspent.clone()
    }

    pub fn month(&self) -> MonthKey {
        self.state.borrow().month
    }

    pub fn budget_mode(&self) -> BudgetMode {
        self.state.borrow().mode
    }

    /// Latest delivered balance for an in-scope category.
    pub fn balance(&self, id: &CategoryId) -> Option<i64> {
        self.state.borrow().signals.balance(id)
    }

    /// Number of live cell subscriptions held by this watcher.
    pub fn active_bindings(&self) -> usize {
        self.registry.len()
    }

    /// Banner summary for the current result.
    pub fn alert(&self) -> Option<OverspendAlert> {
        let state = self.state.borrow();
        AlertService::summarize(&state.overspent, state.mode, &state.signals)
    }

    /// Registers a listener invoked with the new result after every change.
    pub fn on_change(&mut self, listener: impl FnMut(&[Category]) + 'static) {
        self.state.borrow_mut().listeners.push(Box::new(listener));
    }

    /// Releases every subscription and stops the watcher.
    pub fn close(mut self) {
        debug!(count = self.registry.len(), "closing watcher");
        self.registry.clear();
    }

    fn apply(&mut self, month: MonthKey, mode: BudgetMode, categories: Vec<Category>) {
        let eligible = eligible_categories(&categories, mode);
        let next_scope: HashSet<CategoryId> =
            eligible.iter().map(|category| category.id.clone()).collect();

        let month_changed = {
            let mut state = self.state.borrow_mut();
            let month_changed = state.month != month;
            if month_changed {
                info!(from = %state.month, to = %month, "watching new month");
                state.signals.clear();
            } else {
                let departed: Vec<CategoryId> =
                    state.in_scope.difference(&next_scope).cloned().collect();
                for id in &departed {
                    state.signals.forget(id);
                }
            }
            if state.mode != mode {
                info!(from = %state.mode, to = %mode, "budget mode changed");
            }
            state.month = month;
            state.mode = mode;
            state.categories = categories;
            state.in_scope = next_scope.clone();
            state.rebuilding = true;
            month_changed
        };

        self.registry.retain(|(id, signal), _| {
            let keep = !month_changed && next_scope.contains(id);
            if !keep {
                debug!(category = %id, %signal, "unbinding");
            }
            keep
        });

        for category in &eligible {
            for signal in SignalName::ALL {
                let key = (category.id.clone(), signal);
                if self.registry.contains_key(&key) {
                    continue;
                }
                let binding = Binding::new(signal, category.id.clone(), month);
                debug!(%binding, "binding");
                let callback = self.delivery(binding.clone());
                let subscription = self.binder.bind(&binding, callback);
                self.registry.insert(key, subscription);
            }
        }

        let changed = {
            let mut state = self.state.borrow_mut();
            state.rebuilding = false;
            state.recompute()
        };
        if let Some(result) = changed {
            notify(&self.state, result);
        }
    }

    fn delivery(&self, binding: Binding) -> CellCallback {
        let weak: Weak<RefCell<WatchState>> = Rc::downgrade(&self.state);
        Box::new(move |value| {
            if let Some(state) = weak.upgrade() {
                deliver(&state, &binding, value);
            }
        })
    }
}

impl<B: CellBinder> Drop for OverspendWatcher<B> {
    fn drop(&mut self) {
        if !self.registry.is_empty() {
            debug!(count = self.registry.len(), "releasing subscriptions");
        }
        self.registry.clear();
    }
}

impl<B: CellBinder> fmt::Debug for OverspendWatcher<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("OverspendWatcher")
            .field("month", &state.month)
            .field("mode", &state.mode)
            .field("categories", &state.categories.len())
            .field("overspent", &state.overspent.len())
            .field("bindings", &self.registry.len())
            .finish()
    }
}

fn deliver(state: &Rc<RefCell<WatchState>>, binding: &Binding, value: CellValue) {
    let changed = {
        let mut current = state.borrow_mut();
        if current.month != binding.month || !current.in_scope.contains(&binding.category_id) {
            debug!(%binding, "ignoring delivery for unbound cell");
            return;
        }
        let well_typed = match binding.signal {
            SignalName::Balance => value.as_amount().is_some(),
            SignalName::Carryover => value.as_flag().is_some(),
        };
        if !well_typed && value != CellValue::Empty {
            warn!(%binding, ?value, "unexpected cell value, treating as unknown");
        }
        if !current
            .signals
            .record(&binding.category_id, binding.signal, value)
        {
            return;
        }
        if current.rebuilding {
            return;
        }
        current.recompute()
    };
    if let Some(result) = changed {
        notify(state, result);
    }
}

/// Delivers `result` to every listener. Results produced while listeners run
/// are queued and delivered afterwards, newest only.
fn notify(state: &Rc<RefCell<WatchState>>, result: Vec<Category>) {
    {
        let mut current = state.borrow_mut();
        if current.notifying {
            current.pending = Some(result);
            return;
        }
        current.notifying = true;
    }

    let mut next = Some(result);
    while let Some(result) = next {
        let mut listeners = mem::take(&mut state.borrow_mut().listeners);
        for listener in listeners.iter_mut() {
            listener(&result);
        }
        let mut current = state.borrow_mut();
        let added = mem::replace(&mut current.listeners, listeners);
        current.listeners.extend(added);
        next = current.pending.take();
    }
    state.borrow_mut().notifying = false;
}
