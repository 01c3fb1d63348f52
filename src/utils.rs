// src/utils.rs

use ethers_core::types::U256;

const WEI_PER_ETHER: u64 = 1_000_000_000_000_000_000;
// One unit of the sixth fractional digit, in wei.
const WEI_PER_MICRO_ETHER: u64 = 1_000_000_000_000;

/// Returns at most `max` characters of `s`, never splitting a character.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Shortens a hash or address for chat display: the first `keep` characters
/// followed by `...`.
pub fn truncate_display(s: &str, keep: usize) -> String {
    format!("{}...", truncate_chars(s, keep))
}

/// Renders a wei amount as ether with six fractional digits, rounding half up.
pub fn format_ether(wei: U256) -> String {
    let wei_per_ether = U256::from(WEI_PER_ETHER);
    let mut whole = wei / wei_per_ether;
    let remainder = wei % wei_per_ether;

    let half_micro = U256::from(WEI_PER_MICRO_ETHER / 2);
    let mut micros = ((remainder + half_micro) / U256::from(WEI_PER_MICRO_ETHER)).as_u64();
    if micros == 1_000_000 {
        whole += U256::one();
        micros = 0;
    }

    format!("{}.{:06}", whole, micros)
}

/// Parses a decimal wei string such as `"1000000000000000000"`.
pub fn parse_wei(raw: &str) -> Result<U256, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("invalid wei amount '{}'", truncate_chars(trimmed, 24)));
    }
    U256::from_dec_str(trimmed).map_err(|e| format!("invalid wei amount: {}", e))
}
