//! Receiver handles for host types
//!
//! The host owns the real objects. These handles identify an instance when the
//! host dispatches one of its methods; we never look inside them.

/// Identity of a live host object
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle(pub u64);

macro_rules! host_receiver {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            pub handle: ObjectHandle,
        }

        impl $name {
            pub const fn new(handle: ObjectHandle) -> Self {
                Self { handle }
            }
        }
    };
}

host_receiver!(
    /// Owns the global pause state
    GameManager
);

host_receiver!(
    /// Pause menu shown while the game is paused
    PauseMenuController
);

host_receiver!(
    /// Root of the in-game HUD
    GameUIRoot
);

host_receiver!(
    /// Player character controller
    PlayerController
);
