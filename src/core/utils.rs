use std::str::FromStr;

use solana_sdk::pubkey::Pubkey;

/// Parse a base58 account key, `None` when the text is not a valid 32-byte key.
#[inline]
pub fn parse_pubkey(value: &str) -> Option<Pubkey> {
    Pubkey::from_str(value).ok()
}

/// Serde adapter writing a `Pubkey` as its base58 text instead of a byte array.
pub mod pubkey_string {
    use std::str::FromStr;

    use serde::{de, Deserialize, Deserializer, Serializer};
    use solana_sdk::pubkey::Pubkey;

    pub fn serialize<S: Serializer>(key: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(key)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Pubkey, D::Error> {
        let text = String::deserialize(deserializer)?;
        Pubkey::from_str(&text).map_err(de::Error::custom)
    }
}

/// Serde adapter for instruction data carried as a base58 string on the wire.
pub mod base58_bytes {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&bs58::encode(data).into_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        bs58::decode(text).into_vec().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pubkey_rejects_garbage() {
        let key = Pubkey::new_unique();
        assert_eq!(parse_pubkey(&key.to_string()), Some(key));
        assert_eq!(parse_pubkey("not-a-key"), None);
        assert_eq!(parse_pubkey(""), None);
    }
}
