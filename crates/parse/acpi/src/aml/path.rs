//! AML name segments and paths.
//!
//! ACPI names are composed of 4-byte segments. Paths are formed by chaining
//! segments together, with a maximum inline capacity of 16 segments sufficient
//! for all practical ACPI namespace depths.

/// A 4-byte AML name segment (e.g., `_SB_`, `PEPD`, `_DSM`).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct NameSeg(pub [u8; 4]);

impl NameSeg {
    /// The Device Specific Method.
    pub const DSM: Self = Self(*b"_DSM");

    /// Create a `NameSeg` from its ASL spelling, padding short names with `_`.
    ///
    /// Returns `None` for empty names, names longer than 4 characters, or
    /// characters outside `A-Z`, `0-9` and `_`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let bytes = name.as_bytes();
        if bytes.is_empty() || bytes.len() > 4 {
            return None;
        }
        let mut seg = [b'_'; 4];
        for (dst, &b) in seg.iter_mut().zip(bytes) {
            if !(b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_') {
                return None;
            }
            *dst = b;
        }
        Some(Self(seg))
    }

    /// Returns the name as a UTF-8 string (ACPI names are always ASCII).
    #[must_use]
    pub fn as_str(&self) -> &str {
        // ACPI names are ASCII; fallback to empty on invalid UTF-8 (shouldn't happen).
        core::str::from_utf8(&self.0).unwrap_or("")
    }
}

impl core::fmt::Debug for NameSeg {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "NameSeg(\"{}\")", self.as_str())
    }
}

impl core::fmt::Display for NameSeg {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maximum number of segments in an inline AML path.
const MAX_PATH_DEPTH: usize = 16;

/// A fixed-capacity absolute AML namespace path.
///
/// Stores up to [`MAX_PATH_DEPTH`] (16) segments inline, which is sufficient
/// for all practical ACPI namespace depths.
#[derive(Clone, Copy)]
pub struct AmlPath {
    segments: [NameSeg; MAX_PATH_DEPTH],
    len: u8,
}

impl AmlPath {
    /// The root path (`\`).
    pub const ROOT: Self = Self {
        segments: [NameSeg(*b"____"); MAX_PATH_DEPTH],
        len: 0,
    };

    /// Creates an empty path.
    #[must_use]
    pub const fn new() -> Self {
        Self::ROOT
    }

    /// Parses an absolute path such as `\_SB.PEPD`.
    ///
    /// The leading `\` is optional. Returns `None` if any segment is invalid
    /// or the path is deeper than [`MAX_PATH_DEPTH`].
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let body = s.strip_prefix('\\').unwrap_or(s);
        let mut path = Self::new();
        if body.is_empty() {
            return Some(path);
        }
        for part in body.split('.') {
            if !path.push(NameSeg::from_name(part)?) {
                return None;
            }
        }
        Some(path)
    }

    /// Appends a name segment to the path.
    ///
    /// Returns `false` if the path is already at maximum capacity.
    pub fn push(&mut self, seg: NameSeg) -> bool {
        if (self.len as usize) >= MAX_PATH_DEPTH {
            return false;
        }
        self.segments[self.len as usize] = seg;
        self.len += 1;
        true
    }

    /// Returns the segments of this path.
    #[must_use]
    pub fn segments(&self) -> &[NameSeg] {
        &self.segments[..self.len as usize]
    }

    /// Returns the final segment, the object's own name. `None` for the root.
    #[must_use]
    pub fn last(&self) -> Option<NameSeg> {
        self.segments().last().copied()
    }

    /// Returns the number of segments (depth) in this path.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.len as usize
    }
}

impl Default for AmlPath {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for AmlPath {
    fn eq(&self, other: &Self) -> bool {
        self.segments() == other.segments()
    }
}

impl Eq for AmlPath {}

impl core::fmt::Debug for AmlPath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "AmlPath({self})")
    }
}

impl core::fmt::Display for AmlPath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "\\")?;
        for (i, seg) in self.segments().iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{seg}")?;
        }
        Ok(())
    }
}
