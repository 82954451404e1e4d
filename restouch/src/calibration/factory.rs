//! Built-in calibration for the supported panel assemblies.
use super::CalibrationParameterSet;

/// Mounting orientation of the panel, as counter-clockwise rotation from portrait
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    /// Taller than wide, flex connector on the left
    Portrait,
    /// Wider than tall, flex connector at the bottom
    #[default]
    Landscape,
    /// Taller than wide, flex connector on the right
    PortraitFlip,
    /// Wider than tall, flex connector at the top
    LandscapeFlip,
}

/// Hardware configuration the panel is attached to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HardwareVariant {
    /// Panel wired straight to the MCU
    #[default]
    Standard,
    /// Panel behind the SRAM/flash expansion board, which shares the negative electrodes
    SramFlash,
}

impl HardwareVariant {
    /// Lowest raw reading that counts as contact on this hardware.
    pub const fn touch_min(self) -> u16 {
        match self {
            HardwareVariant::Standard => crate::DEFAULT_TOUCH_MIN,
            HardwareVariant::SramFlash => 40,
        }
    }
}

const fn set(m: [i64; 7]) -> CalibrationParameterSet {
    CalibrationParameterSet {
        a: m[0],
        b: m[1],
        c: m[2],
        d: m[3],
        e: m[4],
        f: m[5],
        divisor: m[6],
    }
}

const STANDARD_PORTRAIT: CalibrationParameterSet = set([-320, -164160, 24146560, 184464, -768, -150763296, 179224]);
const STANDARD_LANDSCAPE: CalibrationParameterSet =
    set([280448, -3200, -220093760, -3096, -275592, 866602824, 2287498]);
const STANDARD_PORTRAIT_FLIP: CalibrationParameterSet = set([-864, -79200, 70274016, -85088, 1056, 80992576, 199452]);
const STANDARD_LANDSCAPE_FLIP: CalibrationParameterSet =
    set([-73472, -2944, 72334912, 1248, 77448, -26340816, 168282]);

const SRAM_FLASH_PORTRAIT: CalibrationParameterSet = set([-1152, 94848, -5323392, 107136, 256, -5322624, 300720]);
const SRAM_FLASH_LANDSCAPE: CalibrationParameterSet = set([107776, 1024, -7694016, -1104, -92904, 76542840, 296274]);
const SRAM_FLASH_PORTRAIT_FLIP: CalibrationParameterSet =
    set([2496, -94368, 74406768, -104000, -1600, 100059200, 290550]);
const SRAM_FLASH_LANDSCAPE_FLIP: CalibrationParameterSet = set([-104576, -384, 99041888, 24, 93216, -6681312, 288475]);

impl CalibrationParameterSet {
    /// Factory calibration for a hardware variant mounted in `orientation`.
    pub const fn factory(variant: HardwareVariant, orientation: Orientation) -> Self {
        match (variant, orientation) {
            (HardwareVariant::Standard, Orientation::Portrait) => STANDARD_PORTRAIT,
            (HardwareVariant::Standard, Orientation::Landscape) => STANDARD_LANDSCAPE,
            (HardwareVariant::Standard, Orientation::PortraitFlip) => STANDARD_PORTRAIT_FLIP,
            (HardwareVariant::Standard, Orientation::LandscapeFlip) => STANDARD_LANDSCAPE_FLIP,
            (HardwareVariant::SramFlash, Orientation::Portrait) => SRAM_FLASH_PORTRAIT,
            (HardwareVariant::SramFlash, Orientation::Landscape) => SRAM_FLASH_LANDSCAPE,
            (HardwareVariant::SramFlash, Orientation::PortraitFlip) => SRAM_FLASH_PORTRAIT_FLIP,
            (HardwareVariant::SramFlash, Orientation::LandscapeFlip) => SRAM_FLASH_LANDSCAPE_FLIP,
        }
    }
}

impl Default for CalibrationParameterSet {
    fn default() -> Self {
        Self::factory(HardwareVariant::default(), Orientation::default())
    }
}

#[cfg(test)]
mod tests {
    use restouch_types::RawSample;

    use super::*;

    #[test]
    fn test_factory_sets_are_usable() {
        let variants = [HardwareVariant::Standard, HardwareVariant::SramFlash];
        let orientations = [
            Orientation::Portrait,
            Orientation::Landscape,
            Orientation::PortraitFlip,
            Orientation::LandscapeFlip,
        ];
        for variant in variants {
            for orientation in orientations {
                assert!(CalibrationParameterSet::factory(variant, orientation).is_valid());
            }
        }
    }

    #[test]
    fn test_default_landscape_maps_panel_center_on_screen() {
        let params = CalibrationParameterSet::default();
        let point = params.transform(RawSample::new(2048, 2048)).unwrap();
        assert!((0..320).contains(&point.x), "x out of panel: {}", point.x);
        assert!((0..240).contains(&point.y), "y out of panel: {}", point.y);
    }

    #[test]
    fn test_sram_flash_lowers_threshold() {
        assert_eq!(HardwareVariant::Standard.touch_min(), 150);
        assert_eq!(HardwareVariant::SramFlash.touch_min(), 40);
    }
}
