//! Format selection.
//!
//! Provides [`encode`] and [`decode`] functions that convert between payloads
//! and byte buffers in any supported [`Format`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::codec::{Codec, CodecExt};
use crate::envelope::EnvelopeCodec;
use crate::error::{DeserializeError, SerializeError};
use crate::json::JsonCodec;
use crate::markup::MarkupCodec;
use crate::payload::Payload;
use crate::registry::TypeRegistry;

/// Supported wire formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// SOAP-style XML envelope with a header preamble.
    Envelope,
    /// Plain XML named after the declared static types.
    Markup,
    /// Pretty-printed JSON.
    Json,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Envelope, Format::Markup, Format::Json];

    pub fn name(self) -> &'static str {
        match self {
            Format::Envelope => "envelope",
            Format::Markup => "markup",
            Format::Json => "json",
        }
    }

    /// Build this format's codec around a shared registry.
    pub fn codec(self, registry: Arc<TypeRegistry>) -> Box<dyn Codec> {
        match self {
            Format::Envelope => Box::new(EnvelopeCodec::new(registry)),
            Format::Markup => Box::new(MarkupCodec::new(registry)),
            Format::Json => Box::new(JsonCodec::new(registry)),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown format name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown format '{0}' (expected envelope, markup or json)")]
pub struct ParseFormatError(pub String);

impl FromStr for Format {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "envelope" | "soap" => Ok(Format::Envelope),
            "markup" | "xml" => Ok(Format::Markup),
            "json" => Ok(Format::Json),
            _ => Err(ParseFormatError(s.to_owned())),
        }
    }
}

/// Encode a payload to bytes in the given format.
pub fn encode<P: Payload>(
    value: &P,
    format: Format,
    registry: &Arc<TypeRegistry>,
) -> Result<Vec<u8>, SerializeError> {
    format.codec(Arc::clone(registry)).encode(value)
}

/// Decode bytes in the given format to a payload.
pub fn decode<P: Payload>(
    bytes: &[u8],
    format: Format,
    registry: &Arc<TypeRegistry>,
) -> Result<P, DeserializeError> {
    format.codec(Arc::clone(registry)).decode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polywire_core::samples;

    #[test]
    fn parse_names() {
        for format in Format::ALL {
            assert_eq!(format.name().parse::<Format>(), Ok(format));
        }
        assert_eq!("XML".parse::<Format>(), Ok(Format::Markup));
        assert!("yaml".parse::<Format>().is_err());
    }

    #[test]
    fn codec_reports_its_format() {
        let registry = Arc::new(TypeRegistry::standard());
        for format in Format::ALL {
            assert_eq!(format.codec(Arc::clone(&registry)).format(), format);
        }
    }

    #[test]
    fn free_functions_round_trip() {
        let registry = Arc::new(TypeRegistry::standard());
        let people = samples::people();
        for format in Format::ALL {
            let bytes = encode(&people, format, &registry).unwrap();
            let back: Vec<polywire_core::Person> = decode(&bytes, format, &registry).unwrap();
            assert_eq!(back, people);
        }
    }
}
