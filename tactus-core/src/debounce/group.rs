//! Button group layouts

use tactus_protocol::{function, mcl, ButtonMasks, KeyCode, RawSample};

/// Maximum bindings per group
pub const MAX_BINDINGS: usize = 8;

/// One button bit mapped to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyBinding {
    /// Bit position in the group's masks
    pub bit: u8,
    /// Key emitted on press / long-press edges
    pub key: KeyCode,
    /// Key emitted periodically while long-pressed
    pub fast: Option<KeyCode>,
}

impl KeyBinding {
    /// Binding without auto-repeat
    pub const fn new(bit: u8, key: KeyCode) -> Self {
        Self {
            bit,
            key,
            fast: None,
        }
    }

    /// Binding that auto-repeats with `fast` while long-pressed
    pub const fn with_repeat(bit: u8, key: KeyCode, fast: KeyCode) -> Self {
        Self {
            bit,
            key,
            fast: Some(fast),
        }
    }
}

/// Which mask pair of the sample a group reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MaskSource {
    /// Directional pad, face and shoulder buttons
    Mcl,
    /// F1, F2 and potentiometer push buttons
    Function,
}

impl MaskSource {
    /// Pick this source's masks out of a sample
    pub fn select(&self, sample: &RawSample) -> ButtonMasks {
        match self {
            MaskSource::Mcl => sample.mcl,
            MaskSource::Function => sample.function,
        }
    }
}

/// Transitions a group turns into keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Triggers {
    /// Emit on 0→1 of the pressed mask
    pub press: bool,
    /// Emit on 0→1 of the long-press mask
    pub long_press: bool,
}

impl Triggers {
    pub const PRESS: Self = Self {
        press: true,
        long_press: false,
    };

    pub const LONG_PRESS: Self = Self {
        press: false,
        long_press: true,
    };

    pub const BOTH: Self = Self {
        press: true,
        long_press: true,
    };
}

/// A logical button group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonGroup {
    /// Name for logging
    pub name: &'static str,
    pub source: MaskSource,
    pub triggers: Triggers,
    pub bindings: &'static [KeyBinding],
}

/// Directional pad and fire buttons
///
/// Press and long-press both emit the base key; the four directions
/// auto-repeat while held.
pub const DIRECTION_GROUP: ButtonGroup = ButtonGroup {
    name: "direction",
    source: MaskSource::Mcl,
    triggers: Triggers::BOTH,
    bindings: &[
        KeyBinding::with_repeat(mcl::LEFT, KeyCode::Left, KeyCode::LeftFast),
        KeyBinding::with_repeat(mcl::DOWN, KeyCode::Down, KeyCode::DownFast),
        KeyBinding::with_repeat(mcl::RIGHT, KeyCode::Right, KeyCode::RightFast),
        KeyBinding::with_repeat(mcl::UP, KeyCode::Up, KeyCode::UpFast),
        KeyBinding::new(mcl::A, KeyCode::FireA),
        KeyBinding::new(mcl::B, KeyCode::FireB),
    ],
};

/// Up/down read a second time as page keys
pub const PAGER_GROUP: ButtonGroup = ButtonGroup {
    name: "pager",
    source: MaskSource::Mcl,
    triggers: Triggers::PRESS,
    bindings: &[
        KeyBinding::new(mcl::UP, KeyCode::PageUp),
        KeyBinding::new(mcl::DOWN, KeyCode::PageDown),
    ],
};

/// Long press on the first potentiometer knob confirms
pub const FUNCTION_GROUP: ButtonGroup = ButtonGroup {
    name: "function",
    source: MaskSource::Function,
    triggers: Triggers::LONG_PRESS,
    bindings: &[KeyBinding::new(function::POT1, KeyCode::Enter)],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_fit_history() {
        for group in [&DIRECTION_GROUP, &PAGER_GROUP, &FUNCTION_GROUP] {
            assert!(group.bindings.len() <= MAX_BINDINGS, "{}", group.name);
            for binding in group.bindings {
                assert!(binding.bit < 16, "{}", group.name);
            }
        }
    }

    #[test]
    fn test_only_directions_repeat() {
        let repeating: usize = DIRECTION_GROUP
            .bindings
            .iter()
            .filter(|b| b.fast.is_some())
            .count();
        assert_eq!(repeating, 4);
        assert!(PAGER_GROUP.bindings.iter().all(|b| b.fast.is_none()));
        assert!(FUNCTION_GROUP.bindings.iter().all(|b| b.fast.is_none()));
    }

    #[test]
    fn test_mask_source_select() {
        let sample = RawSample {
            mcl: ButtonMasks::new(1, 2),
            function: ButtonMasks::new(3, 4),
            digital: ButtonMasks::new(5, 6),
            ..Default::default()
        };
        assert_eq!(MaskSource::Mcl.select(&sample), ButtonMasks::new(1, 2));
        assert_eq!(MaskSource::Function.select(&sample), ButtonMasks::new(3, 4));
    }
}
