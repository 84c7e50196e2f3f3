//! Raw controller snapshot and its byte layout
//!
//! Layout (little-endian, no padding):
//! - 0..16: raw potentiometer ADC values (8 × u16)
//! - 16..24: potentiometer absolute positions (4 × u16, 10 significant bits)
//! - 24..28: potentiometer state flags (4 × u8)
//! - 28..32: D-button pressed / long-press masks (2 × u16)
//! - 32..34: function button pressed / long-press masks (2 × u8)
//! - 34..38: MCL button pressed / long-press masks (2 × u16)
//! - 38..44: accelerometer (3 × i16)
//! - 44..48: controller systick timestamp (u32)

/// I2C address of the remote controller
pub const CONTROLLER_ADDR: u8 = 0x42;

/// Size of one snapshot on the wire
pub const SAMPLE_LEN: usize = 48;

/// Number of potentiometers reporting an absolute position
pub const POT_CHANNELS: usize = 4;

/// Positions are 10-bit and circular
pub const POT_RANGE: u16 = 1024;

/// Mask applied to incoming positions
pub const POT_POSITION_MASK: u16 = POT_RANGE - 1;

const POT_ADC_CHANNELS: usize = 8;

/// Potentiometer state flag: turning forward
pub const POT_STATE_FORWARD: u8 = 1 << 0;
/// Potentiometer state flag: turning backward
pub const POT_STATE_BACKWARD: u8 = 1 << 1;
/// Potentiometer state flag: turning fast
pub const POT_STATE_FAST: u8 = 1 << 2;

/// Errors that can occur while decoding a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleError {
    /// Fewer than [`SAMPLE_LEN`] bytes were supplied
    Truncated,
}

/// Pressed and long-pressed sets of one button group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonMasks {
    /// Buttons currently down
    pub pressed: u16,
    /// Buttons held past the controller's long-press duration
    pub long_pressed: u16,
}

impl ButtonMasks {
    /// Create a mask pair
    pub const fn new(pressed: u16, long_pressed: u16) -> Self {
        Self {
            pressed,
            long_pressed,
        }
    }

    /// Check whether a bit is set in the pressed mask
    pub fn is_pressed(&self, bit: u8) -> bool {
        self.pressed & (1 << bit) != 0
    }

    /// Check whether a bit is set in the long-press mask
    pub fn is_long_pressed(&self, bit: u8) -> bool {
        self.long_pressed & (1 << bit) != 0
    }
}

/// One snapshot read from the remote controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// Raw ADC readings behind the potentiometers
    pub pot_adc: [u16; POT_ADC_CHANNELS],
    /// Absolute potentiometer positions, 0..=1023
    pub pot_positions: [u16; POT_CHANNELS],
    /// Per-potentiometer motion flags (`POT_STATE_*`)
    pub pot_states: [u8; POT_CHANNELS],
    /// D1..D16 buttons
    pub digital: ButtonMasks,
    /// F1, F2 and the potentiometer push buttons
    pub function: ButtonMasks,
    /// Directional pad, face and shoulder buttons
    pub mcl: ButtonMasks,
    /// Accelerometer axes (x, y, z)
    pub accelerometer: [i16; 3],
    /// Controller uptime in ticks when the snapshot was taken
    pub systicks: u32,
}

impl RawSample {
    /// Decode a snapshot from its wire bytes
    ///
    /// Extra trailing bytes are ignored. Positions are masked to 10 bits.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SampleError> {
        if bytes.len() < SAMPLE_LEN {
            return Err(SampleError::Truncated);
        }

        let mut sample = RawSample::default();

        for (i, adc) in sample.pot_adc.iter_mut().enumerate() {
            *adc = read_u16(bytes, i * 2);
        }
        for (i, pos) in sample.pot_positions.iter_mut().enumerate() {
            *pos = read_u16(bytes, 16 + i * 2) & POT_POSITION_MASK;
        }
        sample.pot_states.copy_from_slice(&bytes[24..28]);

        sample.digital = ButtonMasks::new(read_u16(bytes, 28), read_u16(bytes, 30));
        sample.function = ButtonMasks::new(bytes[32] as u16, bytes[33] as u16);
        sample.mcl = ButtonMasks::new(read_u16(bytes, 34), read_u16(bytes, 36));

        for (i, axis) in sample.accelerometer.iter_mut().enumerate() {
            *axis = read_u16(bytes, 38 + i * 2) as i16;
        }
        sample.systicks = u32::from_le_bytes([bytes[44], bytes[45], bytes[46], bytes[47]]);

        Ok(sample)
    }

    /// Encode this snapshot into its wire bytes
    ///
    /// Function masks are truncated to the 8 bits the wire carries.
    pub fn to_bytes(&self) -> [u8; SAMPLE_LEN] {
        let mut buf = [0u8; SAMPLE_LEN];

        for (i, adc) in self.pot_adc.iter().enumerate() {
            write_u16(&mut buf, i * 2, *adc);
        }
        for (i, pos) in self.pot_positions.iter().enumerate() {
            write_u16(&mut buf, 16 + i * 2, *pos);
        }
        buf[24..28].copy_from_slice(&self.pot_states);

        write_u16(&mut buf, 28, self.digital.pressed);
        write_u16(&mut buf, 30, self.digital.long_pressed);
        buf[32] = self.function.pressed as u8;
        buf[33] = self.function.long_pressed as u8;
        write_u16(&mut buf, 34, self.mcl.pressed);
        write_u16(&mut buf, 36, self.mcl.long_pressed);

        for (i, axis) in self.accelerometer.iter().enumerate() {
            write_u16(&mut buf, 38 + i * 2, *axis as u16);
        }
        buf[44..48].copy_from_slice(&self.systicks.to_le_bytes());

        buf
    }

    /// Position of one potentiometer, if the channel exists
    pub fn pot_position(&self, channel: usize) -> Option<u16> {
        self.pot_positions.get(channel).copied()
    }
}

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn write_u16(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}
