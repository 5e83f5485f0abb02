//! Display helpers for TON addresses and amounts

/// Nanotons per TON (1 TON = 10^9 nanoTON)
pub const NANO_PER_TON: u64 = 1_000_000_000;

/// Shorten an address for display: first 6 characters, ellipsis, last 4.
/// Addresses shorter than 10 characters are returned unchanged.
pub fn truncate_address(address: &str) -> String {
    if address.len() >= 10 {
        format!("{}...{}", &address[..6], &address[address.len() - 4..])
    } else {
        address.to_string()
    }
}

/// Render a nanoton amount as a TON display string, trimming trailing zeros
pub fn format_ton(nano: u64) -> String {
    let whole = nano / NANO_PER_TON;
    let frac = nano % NANO_PER_TON;
    if frac == 0 {
        format!("{} TON", whole)
    } else {
        let frac_str = format!("{:09}", frac);
        format!("{}.{} TON", whole, frac_str.trim_end_matches('0'))
    }
}

/// Render the raw chain id reported by a wallet ("-239" mainnet, "-3" testnet)
pub fn network_name(chain: &str) -> &'static str {
    match chain {
        "-239" => "Mainnet",
        "-3" => "Testnet",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_long_address() {
        let addr = "EQDrjaLahLkMB-hMCmkzOyBuHJ139ZUYmPHu6RRBKnbdLIYI";
        let truncated = truncate_address(addr);
        assert_eq!(
            truncated,
            format!("{}...{}", &addr[..6], &addr[addr.len() - 4..])
        );
        assert_eq!(truncated, "EQDrja...LIYI");
    }

    #[test]
    fn test_truncate_boundary_length() {
        // Exactly 10 characters still gets the short form
        assert_eq!(truncate_address("0123456789"), "012345...6789");
    }

    #[test]
    fn test_truncate_short_address_passthrough() {
        assert_eq!(truncate_address("EQDrja"), "EQDrja");
        assert_eq!(truncate_address(""), "");
    }

    #[test]
    fn test_format_ton_whole() {
        assert_eq!(format_ton(2_000_000_000), "2 TON");
        assert_eq!(format_ton(0), "0 TON");
    }

    #[test]
    fn test_format_ton_fractional() {
        assert_eq!(format_ton(1_500_000_000), "1.5 TON");
        assert_eq!(format_ton(1), "0.000000001 TON");
        assert_eq!(format_ton(2_000_000_001), "2.000000001 TON");
    }

    #[test]
    fn test_network_name() {
        assert_eq!(network_name("-239"), "Mainnet");
        assert_eq!(network_name("-3"), "Testnet");
        assert_eq!(network_name("1"), "Unknown");
    }
}
