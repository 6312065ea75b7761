/*
 * Responsibility
 * - 公開 ID ↔ 内部 ID の変換 (encode/decode)
 * - store が振る連番 (i64) を外に漏らさず、不透明な文字列として返す
 * - Extractor や DTO からはこの service を使う (方式変更の影響を局所化)
 */
use sqids::{Error as SqidsError, Sqids};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IdCodecError>;

#[derive(Debug, Error)]
pub enum IdCodecError {
    #[error("SQIDS_MIN_LENGTH must be between 0 and 255, got {value}")]
    InvalidMinLength { value: usize },
    #[error("sqids error: {0}")]
    Sqids(#[from] SqidsError),
    #[error("id must be non-negative, got {value}")]
    NegativeId { value: i64 },
    #[error("invalid public id format")]
    DecodeInvalidFormat,
    #[error("decoded id is out of range")]
    DecodeOutOfRange,
}

impl IdCodecError {
    /// True when the caller handed us a public id that maps to no post.
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, Self::DecodeInvalidFormat | Self::DecodeOutOfRange)
    }
}

#[derive(Clone, Debug)]
pub struct IdCodec {
    sqids: Sqids,
}

impl IdCodec {
    pub fn new(min_length: usize, alphabet: &str) -> Result<Self> {
        let min_length: u8 = min_length
            .try_into()
            .map_err(|_| IdCodecError::InvalidMinLength { value: min_length })?;

        let sqids = Sqids::builder()
            .min_length(min_length)
            .alphabet(alphabet.chars().collect())
            .build()?;

        Ok(Self { sqids })
    }

    pub fn encode(&self, id: i64) -> Result<String> {
        if id < 0 {
            return Err(IdCodecError::NegativeId { value: id });
        }
        Ok(self.sqids.encode(&[id as u64])?)
    }

    /// Decodes a public id back to the store key.
    ///
    /// Several strings can decode to the same number with sqids, so the input
    /// must also be the canonical encoding of what it decodes to. That keeps
    /// exactly one public id per post.
    pub fn decode(&self, public_id: &str) -> Result<i64> {
        let nums = self.sqids.decode(public_id);
        if nums.len() != 1 {
            return Err(IdCodecError::DecodeInvalidFormat);
        }
        let id = i64::try_from(nums[0]).map_err(|_| IdCodecError::DecodeOutOfRange)?;

        let canonical = self.sqids.encode(&nums)?;
        if canonical != public_id {
            return Err(IdCodecError::DecodeInvalidFormat);
        }
        Ok(id)
    }
}
