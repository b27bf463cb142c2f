//! Serial link registers (SB/SC). Actual byte-shifting transfer timing
//! and emulating a second linked device are out of scope; this keeps
//! only the register read/write surface real ROMs poke.

use crate::regs::SerialCtrl;

#[derive(Default, Clone, bincode::Encode, bincode::Decode)]
pub(crate) struct Serial {
    #[bincode(with_serde)]
    pub(crate) sc: SerialCtrl,
    pub(crate) sb: u8,
}

impl Serial {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}
