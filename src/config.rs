//! Controller configuration values
//!
//! Wire values for the configuration commands. Each set is closed, so an
//! out-of-range byte cannot be built at all.

/// Storage area that fonts and images are read from.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MemoryMode {
    /// Internal NAND flash.
    Nand = 0x00,
    /// The TF (microSD) card slot.
    MicroSd = 0x01,
}

/// Screen orientation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Rotation {
    Normal = 0x00,
    /// Rotated by 180 degrees.
    Inverted = 0x01,
}

/// Dot-matrix sizes of the built-in English (ASCII) font.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum EnglishFont {
    Ascii32 = 0x01,
    Ascii48 = 0x02,
    Ascii64 = 0x03,
}

/// Dot-matrix sizes of the built-in Chinese (GBK) font.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ChineseFont {
    Gbk32 = 0x01,
    Gbk48 = 0x02,
    Gbk64 = 0x03,
}
