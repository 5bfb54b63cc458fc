//! Shared networking constants and helpers used by the feed and the client.

/// TCP port the local rate feed listens on.
pub const FEED_PORT: u16 = 8090;
/// Interval between two rate frames pushed by the feed, in milliseconds.
pub const TICK_MS: u64 = 500;

/// Helper to format an IPv4 address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}
