//! Packaged bitmap resources.
//!
//! The crest and the football ship inside the binary as zlib-compressed
//! blobs (see `tools/gen_assets.py` for the layout) and are inflated into
//! RAM when the face loads. `AssetCache` keeps the inflated copies and counts
//! acquires and releases so load/unload symmetry can be checked.

use alloc::vec::Vec;

use embedded_graphics::prelude::Size;
use miniz_oxide::inflate::decompress_to_vec_zlib;

static LOGO_BLOB: &[u8] = include_bytes!("../assets/logo.bin");
static FOOTBALL_BLOB: &[u8] = include_bytes!("../assets/football.bin");

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AssetId {
    Logo,
    Football,
}

impl AssetId {
    const COUNT: usize = 2;

    fn index(self) -> usize {
        match self {
            AssetId::Logo => 0,
            AssetId::Football => 1,
        }
    }

    fn blob(self) -> &'static [u8] {
        match self {
            AssetId::Logo => LOGO_BLOB,
            AssetId::Football => FOOTBALL_BLOB,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AssetError {
    /// The zlib stream did not inflate.
    Deflate,
    /// Header missing or dimensions out of range.
    BadHeader,
    /// Payload length does not match the header dimensions.
    Truncated,
}

impl core::fmt::Display for AssetError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AssetError::Deflate => write!(f, "asset blob failed to inflate"),
            AssetError::BadHeader => write!(f, "asset header invalid"),
            AssetError::Truncated => write!(f, "asset payload truncated"),
        }
    }
}

/// An inflated image: RGB565 pixels plus a 1bpp transparency mask.
pub struct Asset {
    width: u32,
    height: u32,
    pixels: Vec<u16>,
    mask: Vec<u8>,
}

impl Asset {
    fn decode(blob: &[u8]) -> Result<Self, AssetError> {
        let raw = decompress_to_vec_zlib(blob).map_err(|_| AssetError::Deflate)?;
        if raw.len() < 4 {
            return Err(AssetError::BadHeader);
        }
        let width = u16::from_le_bytes([raw[0], raw[1]]) as u32;
        let height = u16::from_le_bytes([raw[2], raw[3]]) as u32;
        if width == 0 || height == 0 || width > 512 || height > 512 {
            return Err(AssetError::BadHeader);
        }
        let count = (width * height) as usize;
        let mask_len = count.div_ceil(8);
        if raw.len() != 4 + count * 2 + mask_len {
            return Err(AssetError::Truncated);
        }
        let mut pixels = Vec::with_capacity(count);
        for pair in raw[4..4 + count * 2].chunks_exact(2) {
            pixels.push(u16::from_le_bytes([pair[0], pair[1]]));
        }
        let mask = raw[4 + count * 2..].to_vec();
        Ok(Self {
            width,
            height,
            pixels,
            mask,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Raw RGB565 value at (x, y). Out-of-bounds reads as 0.
    pub fn pixel(&self, x: u32, y: u32) -> u16 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.pixels[(y * self.width + x) as usize]
    }

    /// Transparency mask at (x, y); MSB-first, row major.
    pub fn is_opaque(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let bit = (y * self.width + x) as usize;
        self.mask[bit / 8] & (0x80 >> (bit % 8)) != 0
    }
}

/// Inflated-asset store with acquire/release accounting.
#[derive(Default)]
pub struct AssetCache {
    slots: [Option<Asset>; AssetId::COUNT],
    acquires: u32,
    releases: u32,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inflate and keep an asset. Acquiring an already-loaded id is a no-op
    /// that does not bump the counter.
    pub fn acquire(&mut self, id: AssetId) -> Result<&Asset, AssetError> {
        let slot = id.index();
        if self.slots[slot].is_none() {
            self.slots[slot] = Some(Asset::decode(id.blob())?);
            self.acquires += 1;
        }
        Ok(self.slots[slot].as_ref().unwrap())
    }

    pub fn get(&self, id: AssetId) -> Option<&Asset> {
        self.slots[id.index()].as_ref()
    }

    /// Drop an inflated asset. Returns false if it was not loaded, so a
    /// double release is visible to the caller and the counters stay exact.
    pub fn release(&mut self, id: AssetId) -> bool {
        match self.slots[id.index()].take() {
            Some(_) => {
                self.releases += 1;
                true
            }
            None => false,
        }
    }

    /// Release everything still held, in reverse acquisition order.
    pub fn release_all(&mut self) {
        self.release(AssetId::Football);
        self.release(AssetId::Logo);
    }

    pub fn acquires(&self) -> u32 {
        self.acquires
    }

    pub fn releases(&self) -> u32 {
        self.releases
    }

    /// Number of assets currently held.
    pub fn outstanding(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}
