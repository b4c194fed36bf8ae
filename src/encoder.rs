use crate::error::{Error, Result};
use crate::grid::ModuleGrid;
use qrcode::{EcLevel as QrEcLevel, QrCode, Version};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Error correction level, recoverable share of codewords grows from L to H.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EcLevel {
    #[default]
    L,
    M,
    Q,
    H,
}

impl FromStr for EcLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<EcLevel> {
        match s {
            "L" | "l" => Ok(EcLevel::L),
            "M" | "m" => Ok(EcLevel::M),
            "Q" | "q" => Ok(EcLevel::Q),
            "H" | "h" => Ok(EcLevel::H),
            x => Err(Error::InvalidArgument(format!(
                "invalid error level '{}'. Use L, M, Q, or H",
                x
            ))),
        }
    }
}

impl fmt::Display for EcLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            EcLevel::L => "L",
            EcLevel::M => "M",
            EcLevel::Q => "Q",
            EcLevel::H => "H",
        };
        f.write_str(c)
    }
}

impl From<EcLevel> for QrEcLevel {
    fn from(level: EcLevel) -> QrEcLevel {
        match level {
            EcLevel::L => QrEcLevel::L,
            EcLevel::M => QrEcLevel::M,
            EcLevel::Q => QrEcLevel::Q,
            EcLevel::H => QrEcLevel::H,
        }
    }
}

/// Anything that can turn bytes into a square module grid.
///
/// `version: None` lets the encoder pick the smallest symbol the data fits in.
pub trait SymbolEncoder {
    fn encode(&self, data: &[u8], level: EcLevel, version: Option<u8>) -> Result<ModuleGrid>;
}

/// Encoder backed by the `qrcode` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct QrCodeEncoder;

impl QrCodeEncoder {
    pub const MAX_VERSION: u8 = 40;
}

impl SymbolEncoder for QrCodeEncoder {
    fn encode(&self, data: &[u8], level: EcLevel, version: Option<u8>) -> Result<ModuleGrid> {
        let code = match version {
            None => QrCode::with_error_correction_level(data, level.into())?,
            Some(v) if (1..=Self::MAX_VERSION).contains(&v) => {
                QrCode::with_version(data, Version::Normal(i16::from(v)), level.into())?
            }
            Some(v) => {
                return Err(Error::InvalidArgument(format!(
                    "symbol version {} out of range 1..={}",
                    v,
                    Self::MAX_VERSION
                )))
            }
        };
        debug!(
            "encoded {} bytes at level {} into {}x{} modules",
            data.len(),
            level,
            code.width(),
            code.width()
        );
        Ok(ModuleGrid::from(&code))
    }
}
