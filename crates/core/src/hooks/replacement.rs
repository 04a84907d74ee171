//! Replacement methods, addressable by name

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use rhud_engine::{ErasedMethod, HostError, MethodFn, MethodSlot, Signature};

use super::original::Original;

/// Body of a replacement: the original capability, then the original's
/// receiver and arguments
pub type ReplacementFn<S, A, R> = Arc<dyn Fn(Original<S, A, R>, &mut S, A) -> R + Send + Sync>;

/// Installs the detour into a slot and hands back the previous body
type Installer = Box<dyn Fn(&MethodSlot) -> Result<ErasedMethod, HostError> + Send + Sync>;

/// A named replacement with its signature captured at definition time
pub struct Replacement {
    name: String,
    signature: Signature,
    install: Installer,
}

impl Replacement {
    pub fn new<S, A, R, F>(name: &str, body: F) -> Self
    where
        S: 'static,
        A: 'static,
        R: 'static,
        F: Fn(Original<S, A, R>, &mut S, A) -> R + Send + Sync + 'static,
    {
        let body: ReplacementFn<S, A, R> = Arc::new(body);

        let install: Installer = Box::new(move |slot: &MethodSlot| {
            let body = Arc::clone(&body);
            let previous = slot.swap_with::<S, A, R, _>(move |original| {
                let detour: MethodFn<S, A, R> = Arc::new(move |receiver: &mut S, args: A| {
                    body(Original::new(Arc::clone(&original)), receiver, args)
                });
                detour
            })?;
            Ok(Box::new(previous) as ErasedMethod)
        });

        Self {
            name: name.to_string(),
            signature: Signature::of::<S, A, R>(),
            install,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Signature of the method this replacement can stand in for
    pub fn signature(&self) -> Signature {
        self.signature
    }

    /// Redirect `slot` to this replacement, returning the previous body
    pub(crate) fn install(&self, slot: &MethodSlot) -> Result<ErasedMethod, HostError> {
        (self.install)(slot)
    }
}

impl fmt::Debug for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Replacement")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish()
    }
}

/// The replacements a registry may resolve by name
#[derive(Debug, Default)]
pub struct ReplacementTable {
    entries: HashMap<String, Replacement>,
}

impl ReplacementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a replacement under `name`
    pub fn with<S, A, R, F>(mut self, name: &str, body: F) -> Self
    where
        S: 'static,
        A: 'static,
        R: 'static,
        F: Fn(Original<S, A, R>, &mut S, A) -> R + Send + Sync + 'static,
    {
        self.insert(Replacement::new(name, body));
        self
    }

    pub fn insert(&mut self, replacement: Replacement) {
        if let Some(previous) = self
            .entries
            .insert(replacement.name().to_string(), replacement)
        {
            tracing::warn!("Replacement '{}' defined twice, keeping last", previous.name());
        }
    }

    pub fn get(&self, name: &str) -> Option<&Replacement> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
