//! Member binding flags used by name-based lookups

use bitflags::bitflags;

bitflags! {
    /// Which members a lookup may match.
    ///
    /// A member matches when its visibility bit and its kind bit are both
    /// present in the requested flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MemberFlags: u32 {
        const PUBLIC = 1 << 0;
        const NON_PUBLIC = 1 << 1;
        const INSTANCE = 1 << 2;
        const STATIC = 1 << 3;
    }
}

impl MemberFlags {
    /// Public and non-public instance members
    pub const ANY_INSTANCE: MemberFlags = MemberFlags::PUBLIC
        .union(MemberFlags::NON_PUBLIC)
        .union(MemberFlags::INSTANCE);

    /// Check a member's own flags against the requested binding flags
    pub fn matches(self, requested: MemberFlags) -> bool {
        let visibility = MemberFlags::PUBLIC | MemberFlags::NON_PUBLIC;
        let kind = MemberFlags::INSTANCE | MemberFlags::STATIC;

        self.intersects(requested & visibility) && self.intersects(requested & kind)
    }
}
