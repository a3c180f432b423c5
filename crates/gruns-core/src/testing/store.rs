use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

use crate::{
    api::{ApiError, ApiResult, LIST_PAGE_SIZE, Page},
    error::Operation,
};

/// One call received by a fake, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub op: Operation,
    /// Resource name, or the parent for list calls.
    pub name: String,
}

impl Call {
    pub fn is_mutating(&self) -> bool {
        !matches!(self.op, Operation::Get | Operation::List)
    }
}

struct State<T> {
    items: BTreeMap<String, T>,
    calls: Vec<Call>,
    failures: Vec<(Operation, ApiError)>,
}

/// Name-keyed resource store shared by both fakes.
pub(crate) struct Store<T> {
    state: Mutex<State<T>>,
    page_size: usize,
}

impl<T: Clone> Store<T> {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(State {
                items: BTreeMap::new(),
                calls: Vec::new(),
                failures: Vec::new(),
            }),
            page_size: LIST_PAGE_SIZE as usize,
        }
    }

    pub(crate) fn set_page_size(&mut self, size: usize) {
        self.page_size = size.max(1);
    }

    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn insert(&self, name: String, item: T) {
        self.lock().items.insert(name, item);
    }

    pub(crate) fn fail_next(&self, op: Operation, err: ApiError) {
        self.lock().failures.push((op, err));
    }

    /// Record the call and return the injected failure for `op`, if one is queued.
    pub(crate) fn enter(&self, op: Operation, name: &str) -> ApiResult<()> {
        let mut state = self.lock();
        state.calls.push(Call {
            op,
            name: name.to_string(),
        });
        match state.failures.iter().position(|(o, _)| *o == op) {
            Some(idx) => Err(state.failures.remove(idx).1),
            None => Ok(()),
        }
    }

    pub(crate) fn get(&self, name: &str) -> ApiResult<T> {
        self.lock()
            .items
            .get(name)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(name.to_string()))
    }

    pub(crate) fn create(&self, name: &str, item: T) -> ApiResult<T> {
        let mut state = self.lock();
        if state.items.contains_key(name) {
            return Err(ApiError::Other(format!("{name} already exists")));
        }
        state.items.insert(name.to_string(), item.clone());
        Ok(item)
    }

    pub(crate) fn replace(&self, name: &str, item: T) -> ApiResult<T> {
        let mut state = self.lock();
        match state.items.get_mut(name) {
            Some(slot) => {
                *slot = item.clone();
                Ok(item)
            }
            None => Err(ApiError::NotFound(name.to_string())),
        }
    }

    pub(crate) fn modify(&self, name: &str, f: impl FnOnce(&mut T)) -> ApiResult<T> {
        let mut state = self.lock();
        let item = state
            .items
            .get_mut(name)
            .ok_or_else(|| ApiError::NotFound(name.to_string()))?;
        f(item);
        Ok(item.clone())
    }

    pub(crate) fn remove(&self, name: &str) -> ApiResult<()> {
        self.lock()
            .items
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| ApiError::NotFound(name.to_string()))
    }

    /// Page through items under `parent`; tokens are offsets.
    pub(crate) fn list(&self, parent: &str, page_token: Option<&str>) -> ApiResult<Page<T>> {
        let offset = match page_token {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| ApiError::Other(format!("bad page token {token}")))?,
            None => 0,
        };
        let prefix = format!("{parent}/jobs/");
        let state = self.lock();
        let matching: Vec<&T> = state
            .items
            .iter()
            .filter(|(name, _)| name.starts_with(&prefix))
            .map(|(_, item)| item)
            .collect();

        let end = (offset + self.page_size).min(matching.len());
        let items = matching
            .get(offset..end)
            .unwrap_or_default()
            .iter()
            .map(|item| (*item).clone())
            .collect();
        let next_page_token = (end < matching.len()).then(|| end.to_string());
        Ok(Page {
            items,
            next_page_token,
        })
    }

    pub(crate) fn names(&self) -> Vec<String> {
        self.lock().items.keys().cloned().collect()
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.lock().calls.clear();
    }
}
