//! Host type method tables

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::HostError;
use crate::flags::MemberFlags;
use crate::method::{MethodFn, MethodSlot};

/// A host-defined type and its methods, addressable by name
#[derive(Debug)]
pub struct HostType {
    name: String,
    methods: HashMap<String, MethodSlot>,
}

impl HostType {
    /// Start describing a host type
    pub fn builder(name: &str) -> HostTypeBuilder {
        HostTypeBuilder {
            ty: HostType {
                name: name.to_string(),
                methods: HashMap::new(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a method by name, honouring binding flags
    pub fn find_method(&self, name: &str, flags: MemberFlags) -> Option<&MethodSlot> {
        self.methods
            .get(name)
            .filter(|slot| slot.flags().matches(flags))
    }

    /// Iterate all method slots
    pub fn methods(&self) -> impl Iterator<Item = &MethodSlot> {
        self.methods.values()
    }

    /// Dispatch an instance method through its slot
    ///
    /// This is how the host calls its own methods, so an installed detour
    /// sees every invocation.
    pub fn invoke<S, A, R>(&self, method: &str, receiver: &mut S, args: A) -> Result<R, HostError>
    where
        S: 'static,
        A: 'static,
        R: 'static,
    {
        let slot = self
            .find_method(method, MemberFlags::ANY_INSTANCE)
            .ok_or_else(|| HostError::MethodNotFound {
                type_name: self.name.clone(),
                method: method.to_string(),
            })?;

        let body = slot.load::<S, A, R>()?;
        tracing::trace!("Dispatching {}::{}", self.name, method);
        Ok(body(receiver, args))
    }
}

/// Builder for [`HostType`]
pub struct HostTypeBuilder {
    ty: HostType,
}

impl HostTypeBuilder {
    /// Add a public instance method
    pub fn method<S, A, R, F>(self, name: &str, body: F) -> Self
    where
        S: 'static,
        A: 'static,
        R: 'static,
        F: Fn(&mut S, A) -> R + Send + Sync + 'static,
    {
        self.method_with_flags(name, MemberFlags::PUBLIC | MemberFlags::INSTANCE, body)
    }

    /// Add a method with explicit visibility and kind
    pub fn method_with_flags<S, A, R, F>(mut self, name: &str, flags: MemberFlags, body: F) -> Self
    where
        S: 'static,
        A: 'static,
        R: 'static,
        F: Fn(&mut S, A) -> R + Send + Sync + 'static,
    {
        let body: MethodFn<S, A, R> = Arc::new(body);
        if self
            .ty
            .methods
            .insert(name.to_string(), MethodSlot::new(name, flags, body))
            .is_some()
        {
            tracing::warn!("Method {}::{} declared twice, keeping last", self.ty.name, name);
        }
        self
    }

    pub fn build(self) -> HostType {
        self.ty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Door {
        open: bool,
    }

    fn door_type() -> HostType {
        HostType::builder("Door")
            .method("Open", |d: &mut Door, _: ()| d.open = true)
            .method_with_flags(
                "Slam",
                MemberFlags::NON_PUBLIC | MemberFlags::INSTANCE,
                |d: &mut Door, _: ()| d.open = false,
            )
            .method_with_flags(
                "Count",
                MemberFlags::PUBLIC | MemberFlags::STATIC,
                |_: &mut Door, _: ()| 0u32,
            )
            .build()
    }

    #[test]
    fn test_invoke_public_method() {
        let ty = door_type();
        let mut door = Door { open: false };
        ty.invoke::<Door, (), ()>("Open", &mut door, ()).unwrap();
        assert!(door.open);
    }

    #[test]
    fn test_invoke_non_public_method() {
        let ty = door_type();
        let mut door = Door { open: true };
        ty.invoke::<Door, (), ()>("Slam", &mut door, ()).unwrap();
        assert!(!door.open);
    }

    #[test]
    fn test_static_method_not_found_by_instance_lookup() {
        let ty = door_type();
        assert!(ty.find_method("Count", MemberFlags::ANY_INSTANCE).is_none());
        assert!(ty
            .find_method("Count", MemberFlags::PUBLIC | MemberFlags::STATIC)
            .is_some());
    }

    #[test]
    fn test_invoke_unknown_method() {
        let ty = door_type();
        let mut door = Door { open: false };
        let err = ty.invoke::<Door, (), ()>("Lock", &mut door, ()).unwrap_err();
        assert!(matches!(err, HostError::MethodNotFound { .. }));
    }
}
