use prospector_common::ResourceSnapshot;

use super::types::RawCatalogRecord;

/// Project a raw record onto its first close approach.
///
/// Returns `None` unless the record has a name, an id, both kilometer
/// diameter bounds with `min <= max`, and a first close approach whose miss
/// distance and relative velocity parse as non-negative numbers. Later
/// approaches are never consulted. Diameters are not sign-checked.
pub fn extract_resources(record: &RawCatalogRecord) -> Option<ResourceSnapshot> {
    let approach = record.close_approach_data.first()?;

    let diameter = record.estimated_diameter.as_ref()?.kilometers.as_ref()?;
    let diameter_min = diameter.estimated_diameter_min.filter(|d| d.is_finite())?;
    let diameter_max = diameter.estimated_diameter_max.filter(|d| d.is_finite())?;
    if diameter_min > diameter_max {
        tracing::debug!(
            "Diameter bounds out of order ({} > {}), treating record as unavailable",
            diameter_min,
            diameter_max
        );
        return None;
    }

    let miss_distance = approach
        .miss_distance
        .as_ref()?
        .kilometers
        .as_ref()?
        .value()
        .filter(|d| *d >= 0.0)?;
    let relative_velocity = approach
        .relative_velocity
        .as_ref()?
        .kilometers_per_second
        .as_ref()?
        .value()
        .filter(|v| *v >= 0.0)?;

    Some(ResourceSnapshot {
        name: record.name.clone()?,
        id: record.id.clone()?,
        diameter_min,
        diameter_max,
        miss_distance,
        relative_velocity,
    })
}
