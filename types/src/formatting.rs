//! Centralized number formatting utilities.
//!
//! All credit and kill figures shown in the mission table go through this
//! module so the rows, sum lines and summary line stay consistent.

/// Format a credit amount in millions with the given precision.
///
/// # Examples
/// ```
/// use massacre_types::formatting::format_millions;
/// assert_eq!(format_millions(150_000, 1), "0.1");
/// assert_eq!(format_millions(12_345_678, 1), "12.3");
/// assert_eq!(format_millions(12_345_678, 2), "12.35");
/// assert_eq!(format_millions(0, 1), "0.0");
/// ```
pub fn format_millions(credits: i64, precision: usize) -> String {
    format!("{:.prec$}", credits as f64 / 1_000_000.0, prec = precision)
}

/// Format a total reward next to its wing-shareable part: `total (wing)`.
///
/// # Examples
/// ```
/// use massacre_types::formatting::format_reward_pair;
/// assert_eq!(format_reward_pair(150_000_000, 50_000_000), "150.0 (50.0)");
/// assert_eq!(format_reward_pair(0, 0), "0.0 (0.0)");
/// ```
pub fn format_reward_pair(reward: i64, shareable_reward: i64) -> String {
    format!(
        "{} ({})",
        format_millions(reward, 1),
        format_millions(shareable_reward, 1)
    )
}

/// Format a `remaining/total` progress pair.
///
/// # Examples
/// ```
/// use massacre_types::formatting::format_progress;
/// assert_eq!(format_progress(3, 8), "3/8");
/// ```
pub fn format_progress(remaining: i64, total: i64) -> String {
    format!("{}/{}", remaining, total)
}

/// Format a decimal f64 number with the specified precision.
///
/// # Examples
/// ```
/// use massacre_types::formatting::format_decimal;
/// assert_eq!(format_decimal(1.5, 2), "1.50");
/// assert_eq!(format_decimal(0.123, 1), "0.1");
/// ```
pub fn format_decimal(n: f64, precision: usize) -> String {
    format!("{:.prec$}", n, prec = precision)
}
