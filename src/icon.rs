//! Symbolic icon lookup.
//!
//! Nodes and templates carry an icon key rather than an image. The UI layer
//! maps the resolved [`Glyph`] to whatever artwork it ships.

/// Glyphs the editor knows how to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Glyph {
    ShieldCheck,
    Network,
    Key,
    Cpu,
    HardDrive,
}

impl Glyph {
    /// Glyph used for icon keys that have no mapping.
    pub const FALLBACK: Glyph = Glyph::ShieldCheck;

    /// The key this glyph is registered under.
    pub fn key(self) -> &'static str {
        match self {
            Glyph::ShieldCheck => "ShieldCheck",
            Glyph::Network => "Network",
            Glyph::Key => "Key",
            Glyph::Cpu => "Cpu",
            Glyph::HardDrive => "HardDrive",
        }
    }
}

/// Resolve an icon key to a glyph. Unknown keys fall back to [`Glyph::FALLBACK`].
pub fn resolve_icon(key: &str) -> Glyph {
    match key {
        "ShieldCheck" => Glyph::ShieldCheck,
        "Network" => Glyph::Network,
        "Key" => Glyph::Key,
        "Cpu" => Glyph::Cpu,
        "HardDrive" => Glyph::HardDrive,
        _ => Glyph::FALLBACK,
    }
}
