use tc_api_types::WalletAddress;

/// `1000000` -> `1,000,000 TKN`.
pub fn format_balance(amount: u64, symbol: &str) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{grouped} {symbol}")
}

/// `0x1234567890abcdef...` -> `0x1234...cdef`.
pub fn short_address(address: &WalletAddress) -> String {
    let addr = address.as_str();
    let chars: Vec<char> = addr.chars().collect();
    if chars.len() <= 10 {
        return addr.to_owned();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
