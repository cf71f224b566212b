use std::{fmt, path::Path, sync::Arc};

/// Supplies a precomputed size for a directory, bypassing both the cache
/// and the filesystem walk.
pub trait SizeOverrideHook: Sync + Send {
    fn evaluate(&self, path: &Path) -> Option<u64>;
}

impl<F> SizeOverrideHook for F
where
    F: Fn(&Path) -> Option<u64> + Sync + Send,
{
    fn evaluate(&self, path: &Path) -> Option<u64> {
        self(path)
    }
}

impl fmt::Debug for dyn SizeOverrideHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SizeOverrideHook")
    }
}

/// Runs hooks in registration order; the first `Some` wins.
#[derive(Default, Clone)]
pub struct HookChain {
    hooks: Vec<Arc<dyn SizeOverrideHook>>,
}

impl HookChain {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, hook: impl SizeOverrideHook + 'static) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    pub fn push(&mut self, hook: Arc<dyn SizeOverrideHook>) {
        self.hooks.push(hook);
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl SizeOverrideHook for HookChain {
    fn evaluate(&self, path: &Path) -> Option<u64> {
        self.hooks.iter().find_map(|hook| hook.evaluate(path))
    }
}

impl fmt::Debug for HookChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookChain")
            .field("len", &self.hooks.len())
            .finish()
    }
}
