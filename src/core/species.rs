//! Dinosaur species.
//!
//! The species set is fixed. One species, `TRex`, is special: it earns a
//! bonus point outside the river and is the target of the "no T-Rex" die face.

use serde::{Deserialize, Serialize};

/// A dinosaur species.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Species {
    TRex,
    Triceratops,
    Stegosaurus,
    Brachiosaurus,
    Parasaurolophus,
    Spinosaurus,
}

impl Species {
    /// All species in canonical order.
    pub const ALL: [Species; 6] = [
        Species::TRex,
        Species::Triceratops,
        Species::Stegosaurus,
        Species::Brachiosaurus,
        Species::Parasaurolophus,
        Species::Spinosaurus,
    ];

    /// Number of species.
    pub const COUNT: usize = Self::ALL.len();

    /// Canonical index of this species in `Species::ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Species for a canonical index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Species> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub const fn is_trex(self) -> bool {
        matches!(self, Species::TRex)
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Species::TRex => "T-Rex",
            Species::Triceratops => "Triceratops",
            Species::Stegosaurus => "Stegosaurus",
            Species::Brachiosaurus => "Brachiosaurus",
            Species::Parasaurolophus => "Parasaurolophus",
            Species::Spinosaurus => "Spinosaurus",
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Count of tokens per species, indexed by `Species::index`.
pub type SpeciesCounts = [u32; Species::COUNT];
