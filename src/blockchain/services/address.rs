use crate::blockchain::models::{AddressError, EthAddress};

const ADDRESS_PREFIX: &str = "0x";
const ADDRESS_LEN: usize = 42;

/// Syntactic address check: `0x` prefix and 42 characters in total.
///
/// Hex digits and checksum casing are not inspected.
pub fn validate(text: &str) -> Result<EthAddress, AddressError> {
    if text.starts_with(ADDRESS_PREFIX) && text.chars().count() == ADDRESS_LEN {
        Ok(EthAddress::new_unchecked(text.to_string()))
    } else {
        Err(AddressError::InvalidAddress)
    }
}
