//! Declarative field diffing shared by both reconcilers.
//!
//! A reconciler owns a static table of [`FieldRule`]s. [`diff_and_apply`] walks the table in
//! order, and for every rule whose comparator reports a difference it mutates the remote object
//! towards the desired value and records the rule's path in the [`UpdateMask`].
use std::fmt;

mod execution;
pub use execution::EXECUTION_JOB_FIELDS;

mod trigger;
pub use trigger::TRIGGER_FIELDS;

/// One managed field: where it lives, how to detect drift and how to fix it.
///
/// `R` is the remote resource, `D` the desired state it is compared with.
pub struct FieldRule<R, D> {
    /// Dotted path reported in the update mask.
    pub path: &'static str,
    /// Returns `true` when the remote value differs from the desired one.
    pub differs: fn(&R, &D) -> bool,
    /// Overwrite the remote value with the desired one.
    pub apply: fn(&mut R, &D),
}

impl<R, D> fmt::Debug for FieldRule<R, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule").field("path", &self.path).finish()
    }
}

/// Ordered list of field paths that differ between remote and desired state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateMask(Vec<&'static str>);

impl UpdateMask {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Record a changed path. Paths already present are not added twice.
    pub fn push(&mut self, path: &'static str) {
        if !self.contains(path) {
            self.0.push(path);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn paths(&self) -> &[&'static str] {
        &self.0
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.iter().any(|p| *p == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for UpdateMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

/// Bring `remote` in line with `desired` according to `rules`.
///
/// Returns the paths that were changed; an empty mask means `remote` was left untouched.
pub fn diff_and_apply<R, D>(remote: &mut R, desired: &D, rules: &[FieldRule<R, D>]) -> UpdateMask {
    let mut mask = UpdateMask::new();
    for rule in rules {
        if (rule.differs)(remote, desired) {
            (rule.apply)(remote, desired);
            mask.push(rule.path);
        }
    }
    mask
}
