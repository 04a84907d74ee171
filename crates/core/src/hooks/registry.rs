//! Hook registry
//!
//! Resolves targets by declaring type and method name, resolves replacements
//! by name, and installs detours over the host's method slots.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rhud_engine::{
    ErasedMethod, HostError, HostRuntime, HostType, MemberFlags, MethodFn, MethodSlot, Signature,
};
use slotmap::{new_key_type, SlotMap};

use super::error::{HookError, ResolutionError};
use super::original::Original;
use super::replacement::ReplacementTable;

new_key_type! {
    /// Handle for an installed hook
    ///
    /// Hooks stay installed until the process exits.
    pub struct HookKey;
}

/// What was hooked, and with which replacement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookDescriptor {
    pub target_type: String,
    pub target_method: String,
    pub replacement: String,
}

impl HookDescriptor {
    /// Build a descriptor; the replacement defaults to the method's own name
    pub fn new(target_type: &str, target_method: &str, replacement: Option<&str>) -> Self {
        Self {
            target_type: target_type.to_string(),
            target_method: target_method.to_string(),
            replacement: replacement.unwrap_or(target_method).to_string(),
        }
    }
}

/// Storage for an installed hook
struct HookEntry {
    descriptor: HookDescriptor,

    /// Pre-hook body, type-erased [`MethodFn`]
    original: ErasedMethod,

    signature: Signature,
}

/// A target that passed every check and is ready to install
struct ResolvedHook {
    descriptor: HookDescriptor,
    host_type: Arc<HostType>,
}

fn find_slot<'t>(host_type: &'t HostType, method: &str) -> Result<&'t MethodSlot, HookError> {
    host_type
        .find_method(method, MemberFlags::ANY_INSTANCE)
        .ok_or_else(|| {
            ResolutionError::MethodNotFound {
                type_name: host_type.name().to_string(),
                method: method.to_string(),
            }
            .into()
        })
}

/// Owns every installed hook for the process lifetime
pub struct HookRegistry {
    replacements: ReplacementTable,
    hooks: SlotMap<HookKey, HookEntry>,

    /// (type, method) -> key, to reject double registration
    by_target: HashMap<(String, String), HookKey>,
}

impl HookRegistry {
    pub fn new(replacements: ReplacementTable) -> Self {
        Self {
            replacements,
            hooks: SlotMap::with_key(),
            by_target: HashMap::new(),
        }
    }

    /// Detour `target_type::target_method` to the replacement named
    /// `replacement` (or the method's own name)
    ///
    /// Only instance methods are considered, public or not. Every later
    /// invocation of the target runs the replacement, which receives the
    /// pre-hook body as an [`Original`].
    pub fn register(
        &mut self,
        host: &HostRuntime,
        target_type: &str,
        target_method: &str,
        replacement: Option<&str>,
    ) -> Result<HookKey, HookError> {
        let resolved = self.resolve(host, target_type, target_method, replacement)?;
        self.install(resolved)
    }

    /// Register a batch of `(type, method, replacement)` targets
    ///
    /// Every target is resolved and signature-checked before the first
    /// detour goes in, so a resolution failure leaves the host untouched.
    pub fn register_all(
        &mut self,
        host: &HostRuntime,
        targets: &[(&str, &str, Option<&str>)],
    ) -> Result<Vec<HookKey>, HookError> {
        let mut seen = HashSet::new();
        let mut resolved = Vec::with_capacity(targets.len());

        for &(target_type, target_method, replacement) in targets {
            if !seen.insert((target_type, target_method)) {
                return Err(HookError::AlreadyHooked {
                    type_name: target_type.to_string(),
                    method: target_method.to_string(),
                });
            }
            resolved.push(self.resolve(host, target_type, target_method, replacement)?);
        }

        resolved
            .into_iter()
            .map(|hook| self.install(hook))
            .collect()
    }

    /// Resolve names and check signatures without touching the host
    fn resolve(
        &self,
        host: &HostRuntime,
        target_type: &str,
        target_method: &str,
        replacement: Option<&str>,
    ) -> Result<ResolvedHook, HookError> {
        let descriptor = HookDescriptor::new(target_type, target_method, replacement);

        let already_hooked = || HookError::AlreadyHooked {
            type_name: target_type.to_string(),
            method: target_method.to_string(),
        };

        if self.is_hooked(target_type, target_method) {
            return Err(already_hooked());
        }

        let host_type = host
            .host_type(target_type)
            .ok_or_else(|| ResolutionError::TypeNotFound(target_type.to_string()))?;

        let slot = find_slot(&host_type, target_method)?;

        // Detoured by someone else, e.g. an earlier registry
        if slot.is_detoured() {
            return Err(already_hooked());
        }

        let replacement = self
            .replacements
            .get(&descriptor.replacement)
            .ok_or_else(|| ResolutionError::ReplacementNotFound(descriptor.replacement.clone()))?;

        if replacement.signature() != slot.signature() {
            return Err(HookError::SignatureMismatch {
                target: format!("{}::{}", target_type, target_method),
                replacement: descriptor.replacement,
                expected: slot.signature().name(),
                found: replacement.signature().name(),
            });
        }

        Ok(ResolvedHook {
            descriptor,
            host_type,
        })
    }

    fn install(&mut self, hook: ResolvedHook) -> Result<HookKey, HookError> {
        let ResolvedHook {
            descriptor,
            host_type,
        } = hook;

        let slot = find_slot(&host_type, &descriptor.target_method)?;
        let replacement = self
            .replacements
            .get(&descriptor.replacement)
            .ok_or_else(|| ResolutionError::ReplacementNotFound(descriptor.replacement.clone()))?;

        tracing::debug!(
            "Installing hook {}::{} -> {} ({:?})",
            descriptor.target_type,
            descriptor.target_method,
            descriptor.replacement,
            slot.signature()
        );

        let original = replacement.install(slot).map_err(|e| match e {
            HostError::AlreadyDetoured(_) => HookError::AlreadyHooked {
                type_name: descriptor.target_type.clone(),
                method: descriptor.target_method.clone(),
            },
            other => HookError::DetourInstall(other),
        })?;
        let signature = slot.signature();

        tracing::info!(
            "Hooked {}::{}",
            descriptor.target_type,
            descriptor.target_method
        );

        let target = (
            descriptor.target_type.clone(),
            descriptor.target_method.clone(),
        );
        let key = self.hooks.insert(HookEntry {
            descriptor,
            original,
            signature,
        });
        self.by_target.insert(target, key);
        Ok(key)
    }

    pub fn descriptor(&self, key: HookKey) -> Option<&HookDescriptor> {
        self.hooks.get(key).map(|e| &e.descriptor)
    }

    /// Capability to call the pre-hook body directly, bypassing the detour
    ///
    /// Fails if `S`, `A` and `R` don't describe the hooked method.
    pub fn original<S, A, R>(&self, key: HookKey) -> Result<Original<S, A, R>, HookError>
    where
        S: 'static,
        A: 'static,
        R: 'static,
    {
        let entry = self.hooks.get(key).ok_or(HookError::NotFound)?;

        entry
            .original
            .downcast_ref::<MethodFn<S, A, R>>()
            .cloned()
            .map(Original::new)
            .ok_or_else(|| HookError::SignatureMismatch {
                target: format!(
                    "{}::{}",
                    entry.descriptor.target_type, entry.descriptor.target_method
                ),
                replacement: entry.descriptor.replacement.clone(),
                expected: entry.signature.name(),
                found: Signature::of::<S, A, R>().name(),
            })
    }

    /// Check whether `type_name::method` already has a detour
    pub fn is_hooked(&self, type_name: &str, method: &str) -> bool {
        self.by_target
            .contains_key(&(type_name.to_string(), method.to_string()))
    }

    /// Iterate installed hooks
    pub fn iter(&self) -> impl Iterator<Item = (HookKey, &HookDescriptor)> {
        self.hooks.iter().map(|(k, e)| (k, &e.descriptor))
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}
