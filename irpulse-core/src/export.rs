//! Export document exchanged by decode-to-file and encode-from-file
//!
//! ```json
//! { "format": 1, "data": [1, 0, 1, 0, 0, 1, 0, 1] }
//! ```
//!
//! `format` is 1 (AEHA), 2 (NEC) or 3 (SONY). Fields are kept as wide
//! integers so that out-of-range values parse and are rejected here with a
//! precise error instead of a generic parse failure.

use crate::error::IrError;
use crate::types::{Frame, Protocol};
use serde::{Deserialize, Serialize};

/// A decoded frame as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportFile {
    /// Protocol format number
    pub format: i64,
    /// Bits as 0/1 values
    pub data: Vec<i64>,
}

impl ExportFile {
    /// Export a data frame; unknown and repeat frames have nothing to export
    pub fn from_frame(frame: &Frame) -> Result<Self, IrError> {
        if frame.is_unknown() {
            return Err(IrError::UnsupportedProtocol(frame.protocol));
        }
        if frame.is_repeat() || frame.bits.is_empty() {
            return Err(IrError::EmptyFrame);
        }

        Ok(Self {
            format: frame.protocol.format() as i64,
            data: frame.bits.iter().map(|&b| i64::from(b)).collect(),
        })
    }

    /// Validate and convert back into a frame
    pub fn to_frame(&self) -> Result<Frame, IrError> {
        let protocol = Protocol::from_format(self.format)?;
        let bits = self
            .data
            .iter()
            .map(|&b| match b {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(IrError::InvalidBit(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Frame::data(protocol, bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_frame() {
        let frame = Frame::from_bits(Protocol::Nec, &[1, 1, 0]).unwrap();
        let export = ExportFile::from_frame(&frame).unwrap();

        assert_eq!(export.format, 2);
        assert_eq!(export.data, vec![1, 1, 0]);
        assert_eq!(export.to_frame().unwrap(), frame);
    }

    #[test]
    fn test_unknown_is_never_written() {
        assert_eq!(
            ExportFile::from_frame(&Frame::unknown()),
            Err(IrError::UnsupportedProtocol(Protocol::Unknown))
        );
        assert_eq!(
            ExportFile::from_frame(&Frame::repeat()),
            Err(IrError::EmptyFrame)
        );
    }

    #[test]
    fn test_invalid_format_rejected() {
        for format in [0, 4, -1, 300] {
            let export = ExportFile {
                format,
                data: vec![1],
            };
            assert_eq!(export.to_frame(), Err(IrError::InvalidFormat(format)));
        }
    }

    #[test]
    fn test_invalid_bit_rejected() {
        let export = ExportFile {
            format: 3,
            data: vec![1, 0, 7],
        };
        assert_eq!(export.to_frame(), Err(IrError::InvalidBit(7)));
    }

    #[test]
    fn test_json_shape() {
        let export: ExportFile =
            serde_json::from_str(r#"{ "format": 1, "data": [1, 0, 1] }"#).unwrap();
        assert_eq!(export.to_frame().unwrap().protocol, Protocol::Aeha);

        let missing: Result<ExportFile, _> = serde_json::from_str(r#"{ "format": 1 }"#);
        assert!(missing.is_err());
    }
}
