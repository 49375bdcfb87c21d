use anyhow::{Context, Result};
use std::path::Path;

use crate::championship::Season;
use crate::data::{load_season_info, load_season_list, load_session, SeasonInfo, SeasonPaths};
use crate::output::{write_json_record, RaceResults};
use crate::standings::{calculate_standings, season_info_warnings, validate_season_info};

/// Counts reported after a generate run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    pub seasons: usize,
    pub skipped_seasons: usize,
    pub races: usize,
    pub skipped_races: usize,
    pub failed_races: usize,
}

/// Ingest every listed season and write its race records and standings.
///
/// A missing season list means there is nothing to do. Seasons without an
/// info file or with invalid rules are skipped; the others still run.
pub fn generate_all(seasons_path: &Path) -> Result<GenerateSummary> {
    let mut summary = GenerateSummary::default();

    let Some(season_names) = load_season_list(seasons_path)? else {
        tracing::info!(
            path = %seasons_path.display(),
            "No season list found, nothing to generate"
        );
        return Ok(summary);
    };

    for season_name in &season_names {
        let paths = SeasonPaths::new(seasons_path, season_name);
        let generated = generate_season(&paths, &mut summary)
            .with_context(|| format!("Failed to generate season {}", season_name))?;
        if generated {
            summary.seasons += 1;
        } else {
            summary.skipped_seasons += 1;
        }
    }

    tracing::info!(
        seasons = summary.seasons,
        races = summary.races,
        skipped = summary.skipped_races,
        failed = summary.failed_races,
        "Generation complete"
    );
    Ok(summary)
}

/// Build one season and write its files. Returns false if the season was skipped.
fn generate_season(paths: &SeasonPaths, summary: &mut GenerateSummary) -> Result<bool> {
    let Some(info) = load_season_info(paths)? else {
        tracing::warn!(dir = %paths.dir().display(), "No season info, skipping season");
        return Ok(false);
    };

    if let Err(errors) = validate_season_info(&info) {
        for error in &errors {
            tracing::error!(season = %info.name, "Invalid season info: {}", error);
        }
        return Ok(false);
    }
    for warning in season_info_warnings(&info) {
        tracing::warn!(season = %info.name, "{}", warning);
    }

    tracing::info!(season = %info.name, "Processing season");
    let season = build_season(paths, info, summary)?;
    write_season(paths, &season)?;
    Ok(true)
}

/// Ingest the season's races in listed order.
pub fn build_season(
    paths: &SeasonPaths,
    info: SeasonInfo,
    summary: &mut GenerateSummary,
) -> Result<Season> {
    let races = info.races.clone();
    let mut season = Season::new(info);

    for race in &races {
        let Some(result_file) = race.result_file.as_deref() else {
            tracing::debug!(race = %race.name, "No result file yet, skipping");
            summary.skipped_races += 1;
            continue;
        };

        let path = paths.result_file(result_file);
        if !path.is_file() {
            tracing::warn!(race = %race.name, path = %path.display(), "Result file missing, skipping");
            summary.skipped_races += 1;
            continue;
        }

        let session = load_session(&path)?;
        match season.add_race_result(&race.name, &session) {
            Ok(_) => summary.races += 1,
            Err(e) => {
                tracing::error!(race = %race.name, "{}", e);
                summary.failed_races += 1;
            }
        }
    }

    Ok(season)
}

/// Write the round records and both standings tables into the season dir.
pub fn write_season(paths: &SeasonPaths, season: &Season) -> Result<()> {
    for (idx, race) in season.race_results().iter().enumerate() {
        let round = idx + 1;
        write_json_record(&paths.round_results_file(round), &RaceResults::from_race(round, race))?;
    }

    let standings = calculate_standings(season);
    write_json_record(&paths.driver_standings_file(), &standings.drivers)?;
    write_json_record(&paths.team_standings_file(), &standings.teams)?;

    tracing::info!(
        season = %season.info.name,
        rounds = season.race_count(),
        "Wrote results and standings"
    );
    Ok(())
}
