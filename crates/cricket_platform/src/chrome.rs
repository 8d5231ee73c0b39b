//! System chrome presentation flags.
//!
//! A host window can hide its title bar, status bar, and navigation bar, and
//! can ask the platform to keep them hidden after transient reveals. The flags
//! mirror the immersive-mode set exposed by mobile platforms; desktop backends
//! collapse them onto borderless fullscreen and window decorations.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Bit set of chrome-suppression flags.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SystemChrome(u32);

impl SystemChrome {
    /// No title bar / window decorations.
    pub const NO_TITLE: Self = Self(1 << 0);
    /// Hide the status bar (desktop: borderless fullscreen).
    pub const FULLSCREEN: Self = Self(1 << 1);
    /// Hide the navigation bar.
    pub const HIDE_NAVIGATION: Self = Self(1 << 2);
    /// Keep content layout stable while bars come and go.
    pub const LAYOUT_STABLE: Self = Self(1 << 3);
    /// Lay content out as if the navigation bar were hidden.
    pub const LAYOUT_HIDE_NAVIGATION: Self = Self(1 << 4);
    /// Lay content out as if the status bar were hidden.
    pub const LAYOUT_FULLSCREEN: Self = Self(1 << 5);
    /// Re-hide bars automatically after a swipe reveals them.
    pub const IMMERSIVE_STICKY: Self = Self(1 << 6);

    /// Edge-to-edge presentation with every piece of chrome suppressed.
    pub const IMMERSIVE: Self = Self(
        Self::NO_TITLE.0
            | Self::FULLSCREEN.0
            | Self::HIDE_NAVIGATION.0
            | Self::LAYOUT_STABLE.0
            | Self::LAYOUT_HIDE_NAVIGATION.0
            | Self::LAYOUT_FULLSCREEN.0
            | Self::IMMERSIVE_STICKY.0,
    );

    const NAMES: [(Self, &'static str); 7] = [
        (Self::NO_TITLE, "NO_TITLE"),
        (Self::FULLSCREEN, "FULLSCREEN"),
        (Self::HIDE_NAVIGATION, "HIDE_NAVIGATION"),
        (Self::LAYOUT_STABLE, "LAYOUT_STABLE"),
        (Self::LAYOUT_HIDE_NAVIGATION, "LAYOUT_HIDE_NAVIGATION"),
        (Self::LAYOUT_FULLSCREEN, "LAYOUT_FULLSCREEN"),
        (Self::IMMERSIVE_STICKY, "IMMERSIVE_STICKY"),
    ];

    /// Flag set with nothing suppressed.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Raw bit representation.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Rebuild from raw bits, dropping unknown bits.
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & Self::IMMERSIVE.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every flag in `other` is also set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether the window should occupy the whole screen.
    pub const fn wants_fullscreen(self) -> bool {
        self.contains(Self::FULLSCREEN)
    }

    /// Whether the window should drop its decorations.
    pub const fn wants_decorations_hidden(self) -> bool {
        self.contains(Self::NO_TITLE)
    }
}

impl BitOr for SystemChrome {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for SystemChrome {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl fmt::Debug for SystemChrome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("SystemChrome(empty)");
        }
        let names: Vec<&str> = Self::NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "SystemChrome({})", names.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immersive_contains_every_flag() {
        for (flag, name) in SystemChrome::NAMES {
            assert!(SystemChrome::IMMERSIVE.contains(flag), "missing {name}");
        }
        assert!(SystemChrome::IMMERSIVE.wants_fullscreen());
        assert!(SystemChrome::IMMERSIVE.wants_decorations_hidden());
    }

    #[test]
    fn union_is_idempotent() {
        let once = SystemChrome::empty() | SystemChrome::IMMERSIVE;
        let twice = once | SystemChrome::IMMERSIVE;
        assert_eq!(once, twice);
    }

    #[test]
    fn from_bits_truncate_drops_unknown_bits() {
        let chrome = SystemChrome::from_bits_truncate(u32::MAX);
        assert_eq!(chrome, SystemChrome::IMMERSIVE);
    }

    #[test]
    fn empty_wants_nothing() {
        let chrome = SystemChrome::empty();
        assert!(chrome.is_empty());
        assert!(!chrome.wants_fullscreen());
        assert!(!chrome.wants_decorations_hidden());
        assert!(chrome.contains(SystemChrome::empty()));
    }

    #[test]
    fn debug_lists_flag_names() {
        let chrome = SystemChrome::NO_TITLE | SystemChrome::FULLSCREEN;
        assert_eq!(format!("{chrome:?}"), "SystemChrome(NO_TITLE | FULLSCREEN)");
        assert_eq!(
            format!("{:?}", SystemChrome::empty()),
            "SystemChrome(empty)"
        );
    }
}
