use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

/// Treats an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Minute counts sometimes arrive as floats; round them to whole minutes.
pub(crate) fn whole_minutes<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let minutes = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    if minutes.is_finite() {
        Ok(minutes.round() as i64)
    } else {
        Ok(0)
    }
}

/// Counters may arrive as floats; negative or non-finite values count as zero.
pub(crate) fn whole_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let count = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    if count.is_finite() && count > 0.0 {
        Ok(count.round().min(f64::from(u32::MAX)) as u32)
    } else {
        Ok(0)
    }
}

/// Drops `null` entries from a keyed map instead of rejecting the payload.
pub(crate) fn present_entries<'de, D, T>(
    deserializer: D,
) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let entries = Option::<BTreeMap<String, Option<T>>>::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect())
}

/// Non-finite positions collapse to the start of the section.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
