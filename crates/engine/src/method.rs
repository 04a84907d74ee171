//! Detourable method slots
//!
//! Every host instance method lives in a slot holding its current body. The
//! host always dispatches through the slot, so swapping the body redirects
//! external and host-internal callers alike.
//!
//! ```text
//! HostType "GameManager"
//! ├── "Pause"   -> MethodSlot { flags, signature, body: MethodFn<GameManager, (), ()> }
//! └── "Unpause" -> MethodSlot { ... }
//! ```

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::HostError;
use crate::flags::MemberFlags;

/// Body of an instance method: receiver plus one argument value.
///
/// Methods with several parameters take a tuple, methods without take `()`.
pub type MethodFn<S, A, R> = Arc<dyn Fn(&mut S, A) -> R + Send + Sync>;

/// Type-erased [`MethodFn`]
pub type ErasedMethod = Box<dyn Any + Send + Sync>;

/// Structural identity of a method signature
#[derive(Clone, Copy)]
pub struct Signature {
    id: TypeId,
    name: &'static str,
}

impl Signature {
    /// Signature of a method on receiver `S` taking `A` and returning `R`
    pub fn of<S: 'static, A: 'static, R: 'static>() -> Self {
        Self {
            id: TypeId::of::<fn(&mut S, A) -> R>(),
            name: type_name::<fn(&mut S, A) -> R>(),
        }
    }

    /// Readable form for diagnostics
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Signature {}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A named method and its current body
pub struct MethodSlot {
    name: String,
    flags: MemberFlags,
    signature: Signature,
    body: RwLock<ErasedMethod>,

    /// Set once the body has been replaced; a slot takes one detour only
    detoured: AtomicBool,
}

impl MethodSlot {
    pub fn new<S, A, R>(name: &str, flags: MemberFlags, body: MethodFn<S, A, R>) -> Self
    where
        S: 'static,
        A: 'static,
        R: 'static,
    {
        Self {
            name: name.to_string(),
            flags,
            signature: Signature::of::<S, A, R>(),
            body: RwLock::new(Box::new(body)),
            detoured: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flags(&self) -> MemberFlags {
        self.flags
    }

    pub fn signature(&self) -> Signature {
        self.signature
    }

    /// Whether [`MethodSlot::swap_with`] already replaced the body
    pub fn is_detoured(&self) -> bool {
        self.detoured.load(Ordering::SeqCst)
    }

    /// Get the current body
    ///
    /// The lock is released before returning, so the body may re-enter any
    /// slot (including this one) while it runs.
    pub fn load<S, A, R>(&self) -> Result<MethodFn<S, A, R>, HostError>
    where
        S: 'static,
        A: 'static,
        R: 'static,
    {
        self.check::<S, A, R>()?;
        let body = self.body.read();
        body.downcast_ref::<MethodFn<S, A, R>>()
            .cloned()
            .ok_or_else(|| self.mismatch::<S, A, R>())
    }

    /// Replace the body in one step
    ///
    /// `make` receives the current body and returns its replacement. The
    /// previous body is returned so the caller can keep calling it. Fails
    /// with [`HostError::AlreadyDetoured`] on a slot that was swapped before,
    /// whoever swapped it.
    pub fn swap_with<S, A, R, F>(&self, make: F) -> Result<MethodFn<S, A, R>, HostError>
    where
        S: 'static,
        A: 'static,
        R: 'static,
        F: FnOnce(MethodFn<S, A, R>) -> MethodFn<S, A, R>,
    {
        self.check::<S, A, R>()?;
        let mut body = self.body.write();
        if self.is_detoured() {
            return Err(HostError::AlreadyDetoured(self.name.clone()));
        }

        let previous = body
            .downcast_ref::<MethodFn<S, A, R>>()
            .cloned()
            .ok_or_else(|| self.mismatch::<S, A, R>())?;

        *body = Box::new(make(previous.clone()));
        self.detoured.store(true, Ordering::SeqCst);

        tracing::trace!("Swapped body of '{}'", self.name);
        Ok(previous)
    }

    fn check<S: 'static, A: 'static, R: 'static>(&self) -> Result<(), HostError> {
        if self.signature == Signature::of::<S, A, R>() {
            Ok(())
        } else {
            Err(self.mismatch::<S, A, R>())
        }
    }

    fn mismatch<S: 'static, A: 'static, R: 'static>(&self) -> HostError {
        HostError::SignatureMismatch {
            method: self.name.clone(),
            expected: self.signature.name(),
            found: Signature::of::<S, A, R>().name(),
        }
    }
}

impl fmt::Debug for MethodSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodSlot")
            .field("name", &self.name)
            .field("flags", &self.flags)
            .field("signature", &self.signature)
            .field("detoured", &self.is_detoured())
            .finish()
    }
}
