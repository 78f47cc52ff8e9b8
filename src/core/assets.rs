//=========================================================================
// Asset Factory
//=========================================================================
//
// Named registry of shared textures and fonts.
//
// The factory hands out small `Copy` handles. Decoding and GPU upload are
// the renderer's business; a handle stays valid for as long as the
// factory lives, which is the lifetime of the scene stack that owns it.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;

use log::debug;

//=== Handles =============================================================

/// Category of a registered asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Texture,
    Font,
}

/// Handle to a registered texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Handle to a registered font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHandle(pub u32);

/// Implemented by every handle type the factory can produce.
pub trait Asset: Copy {
    const KIND: AssetKind;

    fn from_raw(id: u32) -> Self;
}

impl Asset for TextureHandle {
    const KIND: AssetKind = AssetKind::Texture;

    fn from_raw(id: u32) -> Self {
        Self(id)
    }
}

impl Asset for FontHandle {
    const KIND: AssetKind = AssetKind::Font;

    fn from_raw(id: u32) -> Self {
        Self(id)
    }
}

//=== AssetError ==========================================================

/// Failure to resolve a required asset. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// No asset registered under this name.
    NotFound { name: String, kind: AssetKind },

    /// The name exists but refers to another kind of asset.
    WrongKind {
        name: String,
        expected: AssetKind,
        found: AssetKind,
    },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { name, kind } => write!(f, "{:?} asset '{}' not found", kind, name),
            Self::WrongKind { name, expected, found } => write!(
                f,
                "asset '{}' is a {:?}, expected a {:?}",
                name, found, expected
            ),
        }
    }
}

impl std::error::Error for AssetError {}

//=== AssetFactory ========================================================

pub struct AssetFactory {
    entries: HashMap<String, (AssetKind, u32)>,
    next_id: u32,
}

impl AssetFactory {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            next_id: 1,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a texture, returning its handle. Re-registering a name
    /// returns the existing handle.
    pub fn register_texture(&mut self, name: &str) -> TextureHandle {
        TextureHandle(self.register(name, AssetKind::Texture))
    }

    /// Registers a font, returning its handle.
    pub fn register_font(&mut self, name: &str) -> FontHandle {
        FontHandle(self.register(name, AssetKind::Font))
    }

    fn register(&mut self, name: &str, kind: AssetKind) -> u32 {
        if let Some(&(_, id)) = self.entries.get(name) {
            return id;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(name.to_owned(), (kind, id));
        debug!("Registered {:?} asset '{}' as #{}", kind, name, id);
        id
    }

    //--- Lookup -----------------------------------------------------------

    /// Resolves a named asset to its handle.
    pub fn grab_asset<T: Asset>(&self, name: &str) -> Result<T, AssetError> {
        match self.entries.get(name) {
            Some(&(kind, id)) if kind == T::KIND => Ok(T::from_raw(id)),
            Some(&(kind, _)) => Err(AssetError::WrongKind {
                name: name.to_owned(),
                expected: T::KIND,
                found: kind,
            }),
            None => Err(AssetError::NotFound {
                name: name.to_owned(),
                kind: T::KIND,
            }),
        }
    }

    /// Number of registered assets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AssetFactory {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
