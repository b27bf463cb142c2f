//! IO-port register structures for convenient reading and writing.

use crate::macros::bit_fields;

bit_fields! {
    /// Joypad/P1 register, only upper nibble is writable by user-code.
    /// In this register, rather unconventionally 0-bit means PRESSED,
    /// so complement bits before writng to the actual register.
    ///
    /// Lower 4-bits are set as: `ActionButtons` for `select_buttons`
    /// and `Dpad` for `select_dpad`.
    #[derive(serde::Serialize, serde::Deserialize)]
    pub(crate) struct JoyPad<u8> {
        _0: 4,
        select_dpad: 1,
        select_buttons: 1,
    }
}

bit_fields! {
    #[derive(serde::Serialize, serde::Deserialize)]
    pub(crate) struct DPad<u8> {
        right: 1,
        left: 1,
        up: 1,
        down: 1,
    }
}

bit_fields! {
    #[derive(serde::Serialize, serde::Deserialize)]
    pub(crate) struct ActionButtons<u8> {
        a: 1,
        b: 1,
        select: 1,
        start: 1,
    }
}

bit_fields! {
    #[derive(serde::Serialize, serde::Deserialize)]
    pub(crate) struct SerialCtrl<u8> {
        clock_select: 1,
        clock_speed: 1,
        _0: 5,
        tx_enable: 1,
    }
}

bit_fields! {
    #[derive(serde::Serialize, serde::Deserialize)]
    pub(crate) struct LcdCtrl<u8> {
        /// Has meaning `BG_and_window_enable`.
        bg_win_priotity: 1,
        obj_enable: 1,
        obj_size: 1,
        bg_tile_map: 1,
        /// Addressing mode for BG/Win tile index in tile data.
        bg_win_tile_data: 1,
        win_enable: 1,
        win_tile_map: 1,
        ppu_enable: 1,
    }
}

bit_fields! {
    #[derive(Debug, serde::Serialize, serde::Deserialize)]
    pub(crate) struct LcdStat<u8> {
        ppu_mode: 2,
        ly_eq_lyc: 1,
        // Conditions for STAT interrupt.
        mode0_int: 1,
        mode1_int: 1,
        mode2_int: 1,
        lyc_int: 1,
    }
}

bit_fields! {
    /// `TIMA` register control information.
    #[derive(serde::Serialize, serde::Deserialize)]
    pub(crate) struct TimerCtrl<u8> {
        clock_select: 2,
        enable: 1,
    }
}

bit_fields! {
    /// Interrupt data and Interrupt enable register fields.
    #[derive(Debug, serde::Serialize, serde::Deserialize)]
    pub(crate) struct IntrBits<u8> {
        vblank: 1,
        stat: 1,
        timer: 1,
        serial: 1,
        joypad: 1,
        // Unused; IF reads always report these as set.
        _0: 3,
    }
}

// --- Audio (APU) registers -------------------------------------------------
//
// Reconstructed from documented Game Boy NRxx bit layouts, in the same
// `bit_fields!` idiom as the rest of this file.

bit_fields! {
    /// NR10 - Channel 1 sweep (square channels only use this on channel 1).
    #[derive(serde::Serialize, serde::Deserialize)]
    pub(crate) struct AudioNx0<u8> {
        shift_step: 3,
        direction: 1,
        pace: 3,
    }
}

bit_fields! {
    /// NR11/NR21/NR31 - length timer and duty cycle.
    #[derive(serde::Serialize, serde::Deserialize)]
    pub(crate) struct AudioNx1<u8> {
        length_period: 6,
        wave_duty: 2,
    }
}

bit_fields! {
    /// NR12/NR22/NR42 - volume envelope.
    #[derive(serde::Serialize, serde::Deserialize)]
    pub(crate) struct AudioNx2<u8> {
        pace: 3,
        direction: 1,
        initial_volume: 4,
    }
}

bit_fields! {
    /// NR13/NR23/NR33 - period low byte (write-only).
    #[derive(serde::Serialize, serde::Deserialize)]
    pub(crate) struct AudioNx3<u8> {
        period_low: 8,
    }
}

bit_fields! {
    /// NR14/NR24/NR34/NR44 - period high bits, length enable, trigger.
    #[derive(serde::Serialize, serde::Deserialize)]
    pub(crate) struct AudioNx4<u8> {
        period_high: 3,
        _0: 3,
        length_timer_enable: 1,
        trigger: 1,
    }
}

bit_fields! {
    /// NR31 - wave channel length timer (full byte, unlike NRx1's 6 bits).
    #[derive(serde::Serialize, serde::Deserialize)]
    pub(crate) struct AudioN31<u8> {
        length_period: 8,
    }
}

bit_fields! {
    /// NR30 - wave channel DAC on/off.
    #[derive(serde::Serialize, serde::Deserialize)]
    pub(crate) struct AudioN30<u8> {
        _0: 7,
        dac_on: 1,
    }
}

bit_fields! {
    /// NR32 - wave channel output level.
    #[derive(serde::Serialize, serde::Deserialize)]
    pub(crate) struct AudioN32<u8> {
        _0: 5,
        output_level: 2,
        _1: 1,
    }
}

bit_fields! {
    /// NR43 - noise channel polynomial counter.
    #[derive(serde::Serialize, serde::Deserialize)]
    pub(crate) struct AudioN43<u8> {
        clock_divider: 3,
        lfsr_width: 1,
        clock_shift: 4,
    }
}

bit_fields! {
    /// NR50 - master volume and VIN routing.
    #[derive(serde::Serialize, serde::Deserialize)]
    pub(crate) struct AudioNr50<u8> {
        vol_right: 3,
        vin_right: 1,
        vol_left: 3,
        vin_left: 1,
    }
}

bit_fields! {
    /// NR51 - stereo panning per channel.
    #[derive(serde::Serialize, serde::Deserialize)]
    pub(crate) struct AudioNr51<u8> {
        ch1_right: 1,
        ch2_right: 1,
        ch3_right: 1,
        ch4_right: 1,
        ch1_left: 1,
        ch2_left: 1,
        ch3_left: 1,
        ch4_left: 1,
    }
}

bit_fields! {
    /// NR52 - master power and per-channel status (status bits read-only).
    #[derive(Debug, serde::Serialize, serde::Deserialize)]
    pub(crate) struct AudioNr52<u8> {
        ch1_on: 1,
        ch2_on: 1,
        ch3_on: 1,
        ch4_on: 1,
        _0: 3,
        audio_on: 1,
    }
}
