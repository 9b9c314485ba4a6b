use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, Scope, ScopedJoinHandle};

/// Starts a worker inside a thread scope.
///
/// An `Err` means the worker was never started and `task` was dropped without
/// running; the caller is expected to do the work itself.
pub trait Spawn: Sync {
    fn spawn<'scope, 'env, F, R>(
        &self,
        scope: &'scope Scope<'scope, 'env>,
        task: F,
    ) -> io::Result<ScopedJoinHandle<'scope, R>>
    where
        F: FnOnce() -> R + Send + 'scope,
        R: Send + 'scope;
}

#[derive(Debug, Default)]
pub struct ThreadSpawner {
    stack_size: Option<usize>,
    next_id: AtomicUsize,
}

impl ThreadSpawner {
    pub fn new(stack_size: Option<usize>) -> Self {
        Self {
            stack_size,
            next_id: AtomicUsize::new(0),
        }
    }

    pub fn stack_size(&self) -> Option<usize> {
        self.stack_size
    }
}

impl Spawn for ThreadSpawner {
    fn spawn<'scope, 'env, F, R>(
        &self,
        scope: &'scope Scope<'scope, 'env>,
        task: F,
    ) -> io::Result<ScopedJoinHandle<'scope, R>>
    where
        F: FnOnce() -> R + Send + 'scope,
        R: Send + 'scope,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut builder = thread::Builder::new().name(format!("par-quicksort-{id}"));
        if let Some(size) = self.stack_size {
            builder = builder.stack_size(size);
        }
        builder.spawn_scoped(scope, task)
    }
}
