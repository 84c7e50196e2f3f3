//! Symbolic key codes delivered to the text host

/// Keys produced by the input decoder
///
/// "No key" is expressed as `Option::None` by every API that can come up
/// empty; it is never a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyCode {
    /// Confirm (long press on the first potentiometer knob)
    Enter,
    /// Directional pad, single step
    Left,
    Right,
    Down,
    Up,
    /// Directional pad, auto-repeat while held
    LeftFast,
    RightFast,
    DownFast,
    UpFast,
    /// Face buttons
    FireA,
    FireB,
    /// Pager (up/down keys read as page moves)
    PageUp,
    PageDown,
    /// One potentiometer detent
    PotUp,
    PotDown,
}

// Host character values
const KEY_ENTER: u8 = 0x0A;
const KEY_LEFT: u8 = 0x81;
const KEY_RIGHT: u8 = 0x82;
const KEY_DOWN: u8 = 0x83;
const KEY_UP: u8 = 0x84;
const KEY_FIRE_A: u8 = 0x85;
const KEY_FIRE_B: u8 = 0x86;
const KEY_LEFT_FAST: u8 = 0x91;
const KEY_RIGHT_FAST: u8 = 0x92;
const KEY_DOWN_FAST: u8 = 0x93;
const KEY_UP_FAST: u8 = 0x94;
const KEY_PG_UP: u8 = 0xB3;
const KEY_PG_DOWN: u8 = 0xB4;
const KEY_POT_DOWN: u8 = 0xB5;
const KEY_POT_UP: u8 = 0xB6;

impl KeyCode {
    /// Parse a key from its host character byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            KEY_ENTER => Some(KeyCode::Enter),
            KEY_LEFT => Some(KeyCode::Left),
            KEY_RIGHT => Some(KeyCode::Right),
            KEY_DOWN => Some(KeyCode::Down),
            KEY_UP => Some(KeyCode::Up),
            KEY_FIRE_A => Some(KeyCode::FireA),
            KEY_FIRE_B => Some(KeyCode::FireB),
            KEY_LEFT_FAST => Some(KeyCode::LeftFast),
            KEY_RIGHT_FAST => Some(KeyCode::RightFast),
            KEY_DOWN_FAST => Some(KeyCode::DownFast),
            KEY_UP_FAST => Some(KeyCode::UpFast),
            KEY_PG_UP => Some(KeyCode::PageUp),
            KEY_PG_DOWN => Some(KeyCode::PageDown),
            KEY_POT_DOWN => Some(KeyCode::PotDown),
            KEY_POT_UP => Some(KeyCode::PotUp),
            _ => None,
        }
    }

    /// Convert to the host character byte
    pub fn to_byte(self) -> u8 {
        match self {
            KeyCode::Enter => KEY_ENTER,
            KeyCode::Left => KEY_LEFT,
            KeyCode::Right => KEY_RIGHT,
            KeyCode::Down => KEY_DOWN,
            KeyCode::Up => KEY_UP,
            KeyCode::FireA => KEY_FIRE_A,
            KeyCode::FireB => KEY_FIRE_B,
            KeyCode::LeftFast => KEY_LEFT_FAST,
            KeyCode::RightFast => KEY_RIGHT_FAST,
            KeyCode::DownFast => KEY_DOWN_FAST,
            KeyCode::UpFast => KEY_UP_FAST,
            KeyCode::PageUp => KEY_PG_UP,
            KeyCode::PageDown => KEY_PG_DOWN,
            KeyCode::PotDown => KEY_POT_DOWN,
            KeyCode::PotUp => KEY_POT_UP,
        }
    }

    /// Returns true for the auto-repeat variants of the directional keys
    pub fn is_repeat(&self) -> bool {
        matches!(
            self,
            KeyCode::LeftFast | KeyCode::RightFast | KeyCode::DownFast | KeyCode::UpFast
        )
    }

    /// Returns true if this key came from a potentiometer
    pub fn is_rotation(&self) -> bool {
        matches!(self, KeyCode::PotUp | KeyCode::PotDown)
    }

    /// Returns the potentiometer direction as a signed delta (-1, 0, or +1)
    pub fn rotation_delta(&self) -> i8 {
        match self {
            KeyCode::PotUp => 1,
            KeyCode::PotDown => -1,
            _ => 0,
        }
    }
}
