//! Content encodings used by bundle resources

use std::io::Read;
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use flate2::read::GzDecoder;

use crate::{Error, Result};

/// How a resource's content is encoded inside the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Content is stored verbatim (empty tag)
    Plain,
    /// Standard base64 (`base64`)
    Base64,
    /// Gzip-compressed, then base64 encoded (`base64+gz`)
    Base64Gzip,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Base64 => "base64",
            Self::Base64Gzip => "base64+gz",
        }
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" => Ok(Self::Plain),
            "base64" => Ok(Self::Base64),
            "base64+gz" => Ok(Self::Base64Gzip),
            other => Err(Error::UnsupportedEncoding {
                encoding: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decodes resource content given its encoding tag.
pub trait Codec {
    fn decode(&self, content: &str, encoding: &str) -> Result<Vec<u8>>;
}

/// The codec for the encodings bundles are written with.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardCodec;

impl Codec for StandardCodec {
    fn decode(&self, content: &str, encoding: &str) -> Result<Vec<u8>> {
        match encoding.parse::<Encoding>()? {
            Encoding::Plain => Ok(content.as_bytes().to_vec()),
            Encoding::Base64 => Ok(STANDARD.decode(content)?),
            Encoding::Base64Gzip => {
                let compressed = STANDARD.decode(content)?;
                let mut data = Vec::new();
                GzDecoder::new(compressed.as_slice())
                    .read_to_end(&mut data)
                    .map_err(Error::Decompress)?;
                Ok(data)
            }
        }
    }
}
