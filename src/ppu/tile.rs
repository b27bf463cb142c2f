use crate::macros::bit_fields;

// Representation:
// Byte-0: Y-position, Byte-1: X-position, Byte-2: Tile-index
// Byte-3: See OamAttrs.
#[derive(Default, Debug, Clone, Copy)]
pub(crate) struct OamEntry {
    /// Object vertical position on screen + 16.
    pub(crate) ypos: u8,
    /// Object horizontal position on screen + 8.
    pub(crate) xpos: u8,
    /// Tile ID
    pub(crate) tile_id: u8,
    /// Object flags and attributes
    pub(crate) attrs: OamAttrs,
}

bit_fields! {
    /// OAM attribute byte. The low nibble is CGB-only and unused here.
    #[derive(Debug)]
    pub(crate) struct OamAttrs<u8> {
        _0: 4,
        dmg_palette: 1,
        xflip: 1,
        yflip: 1,
        bg_priority: 1,
    }
}

impl OamEntry {
    pub(crate) fn from_array(a: [u8; 4]) -> Self {
        Self {
            ypos: a[0],
            xpos: a[1],
            tile_id: a[2],
            attrs: OamAttrs::new(a[3]),
        }
    }
}
