//! Original-call capability

use std::fmt;

use rhud_engine::MethodFn;

/// The pre-hook implementation of a detoured method
///
/// Handed to the replacement by value on every invocation. [`Original::call`]
/// consumes it, so a replacement can run the original at most once; dropping
/// it without calling suppresses the original.
pub struct Original<S: 'static, A: 'static, R: 'static> {
    body: MethodFn<S, A, R>,
}

impl<S: 'static, A: 'static, R: 'static> Original<S, A, R> {
    pub(crate) fn new(body: MethodFn<S, A, R>) -> Self {
        Self { body }
    }

    /// Run the original implementation
    pub fn call(self, receiver: &mut S, args: A) -> R {
        (self.body)(receiver, args)
    }
}

impl<S: 'static, A: 'static, R: 'static> fmt::Debug for Original<S, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Original").finish_non_exhaustive()
    }
}
