use bitflags::bitflags;

bitflags! {
    /// Behaviour switches accepted by [`walk`](crate::walk).
    ///
    /// Bit values match glibc's `FTW_PHYS` and `FTW_CHDIR` so flag words
    /// carried over from `nftw()` callers keep their meaning. Bits outside
    /// the named set (e.g. `FTW_MOUNT`, `FTW_DEPTH`) are retained but have
    /// no effect.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WalkFlags: u32 {
        /// Do not dereference symbolic links when fetching entry metadata.
        const PHYSICAL = 1 << 0;

        /// Enter each directory with `chdir` while its children are listed.
        ///
        /// The working directory is process-wide: concurrent walks in one
        /// process must not set this.
        const CHDIR = 1 << 2;
    }
}

impl Default for WalkFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl WalkFlags {
    /// Alias of [`WalkFlags::PHYSICAL`].
    pub const FOLLOW_NONE: Self = Self::PHYSICAL;

    /// Build a flag set from a legacy integer flag word, keeping unknown bits.
    pub fn from_legacy(bits: i32) -> Self {
        Self::from_bits_retain(bits as u32)
    }

    /// Whether metadata is fetched without following links.
    pub fn is_physical(&self) -> bool {
        self.contains(Self::PHYSICAL)
    }

    /// Whether the working directory follows the walk.
    pub fn changes_dir(&self) -> bool {
        self.contains(Self::CHDIR)
    }
}
