//! Architecture generations and FP32 cores per streaming multiprocessor.
//!
//! Values come from the per-architecture tables of the CUDA C Programming
//! Guide ("Arithmetic Instructions", 32-bit floating-point add/multiply/
//! multiply-add throughput per SM per clock).

use std::fmt;

/// Cores per SM assumed for compute capabilities missing from [`ARCH_TABLE`].
pub const DEFAULT_CORES_PER_SM: u32 = 128;

/// GPU architecture family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    Fermi,
    Kepler,
    Maxwell,
    Pascal,
    Volta,
    Turing,
    Ampere,
    Ada,
    Hopper,
    Unknown,
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Architecture::Fermi => "Fermi",
            Architecture::Kepler => "Kepler",
            Architecture::Maxwell => "Maxwell",
            Architecture::Pascal => "Pascal",
            Architecture::Volta => "Volta",
            Architecture::Turing => "Turing",
            Architecture::Ampere => "Ampere",
            Architecture::Ada => "Ada Lovelace",
            Architecture::Hopper => "Hopper",
            Architecture::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Which minor versions an [`ArchEntry`] covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Minor {
    Any,
    Exact(u32),
}

/// One row of the architecture table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchEntry {
    pub major: u32,
    pub minor: Minor,
    pub arch: Architecture,
    pub cores_per_sm: u32,
}

impl ArchEntry {
    const fn new(major: u32, minor: Minor, arch: Architecture, cores_per_sm: u32) -> Self {
        Self {
            major,
            minor,
            arch,
            cores_per_sm,
        }
    }

    fn matches(&self, major: u32, minor: u32) -> bool {
        self.major == major
            && match self.minor {
                Minor::Any => true,
                Minor::Exact(m) => m == minor,
            }
    }
}

/// Compute capability → (family, cores per SM). First match wins, so exact
/// minors must precede an `Any` entry of the same major.
///
/// Only minor versions that shipped in hardware are listed for Pascal and
/// later; an unlisted minor of a known major (e.g. 7.1, 8.1) is treated as
/// unknown and gets [`DEFAULT_CORES_PER_SM`].
pub const ARCH_TABLE: &[ArchEntry] = &[
    // Fermi
    ArchEntry::new(2, Minor::Exact(1), Architecture::Fermi, 48),
    ArchEntry::new(2, Minor::Any, Architecture::Fermi, 32),
    // Kepler
    ArchEntry::new(3, Minor::Any, Architecture::Kepler, 192),
    // Maxwell
    ArchEntry::new(5, Minor::Any, Architecture::Maxwell, 128),
    // Pascal
    ArchEntry::new(6, Minor::Exact(0), Architecture::Pascal, 64),
    ArchEntry::new(6, Minor::Exact(1), Architecture::Pascal, 128),
    ArchEntry::new(6, Minor::Exact(2), Architecture::Pascal, 128),
    // Volta, Turing
    ArchEntry::new(7, Minor::Exact(0), Architecture::Volta, 64),
    ArchEntry::new(7, Minor::Exact(2), Architecture::Volta, 64),
    ArchEntry::new(7, Minor::Exact(5), Architecture::Turing, 64),
    // Ampere, Ada
    ArchEntry::new(8, Minor::Exact(0), Architecture::Ampere, 64),
    ArchEntry::new(8, Minor::Exact(6), Architecture::Ampere, 128),
    ArchEntry::new(8, Minor::Exact(7), Architecture::Ampere, 128),
    ArchEntry::new(8, Minor::Exact(9), Architecture::Ada, 128),
    // Hopper
    ArchEntry::new(9, Minor::Exact(0), Architecture::Hopper, 128),
];

/// Table row for a compute capability, if there is one.
pub fn lookup(major: u32, minor: u32) -> Option<&'static ArchEntry> {
    ARCH_TABLE.iter().find(|e| e.matches(major, minor))
}

impl Architecture {
    pub fn from_compute_capability(major: u32, minor: u32) -> Self {
        lookup(major, minor).map_or(Architecture::Unknown, |e| e.arch)
    }
}

/// Estimated FP32 cores per SM. Unknown capabilities get
/// [`DEFAULT_CORES_PER_SM`].
pub fn cores_per_sm(major: u32, minor: u32) -> u32 {
    lookup(major, minor).map_or(DEFAULT_CORES_PER_SM, |e| e.cores_per_sm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_values() {
        let expected = [
            ((2, 0), 32),
            ((2, 1), 48),
            ((3, 0), 192),
            ((3, 5), 192),
            ((3, 7), 192),
            ((5, 0), 128),
            ((5, 2), 128),
            ((6, 0), 64),
            ((6, 1), 128),
            ((6, 2), 128),
            ((7, 0), 64),
            ((7, 2), 64),
            ((7, 5), 64),
            ((8, 0), 64),
            ((8, 6), 128),
            ((8, 7), 128),
            ((8, 9), 128),
            ((9, 0), 128),
        ];

        for ((major, minor), cores) in expected {
            assert_eq!(cores_per_sm(major, minor), cores, "sm_{major}{minor}");
        }
    }

    #[test]
    fn test_unknown_falls_back_to_default() {
        for (major, minor) in [(1, 3), (4, 0), (6, 3), (7, 1), (8, 1), (9, 1), (10, 0), (12, 0)] {
            assert_eq!(cores_per_sm(major, minor), DEFAULT_CORES_PER_SM);
            assert_eq!(
                Architecture::from_compute_capability(major, minor),
                Architecture::Unknown
            );
        }
    }

    #[test]
    fn test_families() {
        assert_eq!(Architecture::from_compute_capability(7, 5), Architecture::Turing);
        assert_eq!(Architecture::from_compute_capability(8, 9), Architecture::Ada);
        assert_eq!(Architecture::Ada.to_string(), "Ada Lovelace");
    }

    #[test]
    fn test_exact_minors_precede_any() {
        for (i, entry) in ARCH_TABLE.iter().enumerate() {
            if entry.minor == Minor::Any {
                assert!(ARCH_TABLE[i + 1..].iter().all(|e| e.major != entry.major));
            }
        }
    }
}
