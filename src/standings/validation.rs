use std::collections::HashSet;

use crate::data::SeasonInfo;

/// Validate a season's scoring rules before ingesting its races.
/// Returns all validation errors at once (not just the first).
pub fn validate_season_info(info: &SeasonInfo) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if info.classification_threshold > 100 {
        errors.push(format!(
            "classificationThreshold: {} is not a percentage (0-100)",
            info.classification_threshold
        ));
    }

    let mut seen_rounds = HashSet::new();
    for (i, race) in info.races.iter().enumerate() {
        if !seen_rounds.insert(race.round) {
            errors.push(format!(
                "races[{}].round: round {} is listed more than once",
                i, race.round
            ));
        }
        if let Some(ref file) = race.result_file {
            if file.trim().is_empty() {
                errors.push(format!("races[{}].resultFile: must not be blank", i));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Rules that are legal but probably not intended. The season is still
/// generated with them.
pub fn season_info_warnings(info: &SeasonInfo) -> Vec<String> {
    let mut warnings = Vec::new();

    if info.points_system.is_empty() {
        warnings.push("pointsSystem: empty, every position scores 0".to_string());
    }

    // More drop rounds than results keeps every result
    if !info.races.is_empty() && info.drop_rounds >= info.races.len() {
        warnings.push(format!(
            "dropRounds: {} is not smaller than the {} scheduled races, nothing will be dropped",
            info.drop_rounds,
            info.races.len()
        ));
    }

    warnings
}
