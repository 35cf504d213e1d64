// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Builds the derived rounds document from a dataset and its join indices.

use crate::models::dataset::Dataset;
use crate::models::derived::{DerivedHole, DerivedRound, DerivedRoundsFile, FitExtras, GirSummary};
use crate::models::export::Scorecard;
use crate::services::joiner::JoinIndex;
use crate::services::metrics::is_gir;

/// One derived round per scorecard, in scorecard order.
pub fn build_rounds(dataset: &Dataset, index: &JoinIndex) -> DerivedRoundsFile {
    let rounds: Vec<DerivedRound> = dataset
        .scorecards
        .iter()
        .map(|sc| build_round(sc, dataset, index))
        .collect();

    let with_fit = rounds
        .iter()
        .filter(|r| r.fit.as_ref().is_some_and(|f| f.has_fit))
        .count();
    tracing::info!(rounds = rounds.len(), with_fit, "Built derived rounds");

    DerivedRoundsFile { rounds }
}

fn build_round(scorecard: &Scorecard, dataset: &Dataset, index: &JoinIndex) -> DerivedRound {
    let holes: Vec<DerivedHole> = scorecard
        .holes
        .iter()
        .map(|h| {
            let key = (scorecard.id, h.number);
            let joined = index.score_putts(key);
            let par = index.par(key);
            DerivedHole {
                number: h.number,
                putts: joined.putts,
                strokes: joined.strokes,
                penalties: h.penalties,
                par,
                gir: par
                    .zip(joined.complete())
                    .map(|(par, (strokes, putts))| is_gir(strokes, putts, par)),
            }
        })
        .collect();

    DerivedRound {
        id: scorecard.id,
        date: scorecard.date_label(),
        start_time: scorecard.start_time.clone(),
        formatted_start_time: scorecard.formatted_start_time.clone(),
        end_time: scorecard.end_time.clone(),
        formatted_end_time: scorecard.formatted_end_time.clone(),
        holes_completed: scorecard.holes_completed,
        exclude_from_stats: scorecard.exclude_from_stats,
        course_global_id: scorecard.course_global_id,
        strokes: scorecard.strokes,
        steps_taken: scorecard.steps_taken,
        distance_walked: scorecard.distance_walked,
        fit: Some(fit_extras(scorecard, dataset, index)),
        gir: Some(gir_summary(&holes)),
        holes,
    }
}

fn fit_extras(scorecard: &Scorecard, dataset: &Dataset, index: &JoinIndex) -> FitExtras {
    let pars = index.pars_for_round(scorecard.id);
    let par_by_hole = (!pars.is_empty()).then_some(pars);

    match dataset.activity(scorecard.id) {
        Some(activity) => FitExtras {
            has_fit: true,
            avg_heart_rate: activity.fitness.avg_heart_rate,
            max_heart_rate: activity.fitness.max_heart_rate,
            total_distance: activity.fitness.total_distance,
            par_by_hole,
        },
        None => FitExtras {
            has_fit: false,
            par_by_hole,
            ..Default::default()
        },
    }
}

fn gir_summary(holes: &[DerivedHole]) -> GirSummary {
    let gir_holes: Vec<&DerivedHole> = holes.iter().filter(|h| h.gir == Some(true)).collect();
    let count = gir_holes.len() as u32;
    let putts_total: u32 = gir_holes.iter().filter_map(|h| h.putts).sum();

    GirSummary {
        holes: count,
        putts_total,
        putts_average: (count > 0).then(|| f64::from(putts_total) / f64::from(count)),
    }
}
