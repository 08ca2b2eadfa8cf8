mod common;

use chrono::NaiveDate;
use common::rated_round;
use golf_log::handicap::{compute_snapshot, projected_index};
use golf_log::model::round::Round;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()
}

fn history(diffs: &[f64]) -> Vec<Round> {
    diffs
        .iter()
        .enumerate()
        .map(|(i, d)| rated_round(&format!("2025-04-{:02}", i + 1), *d))
        .collect()
}

#[tokio::test]
async fn test1_eight_round_example() -> Result<(), Box<dyn std::error::Error>> {
    let rounds = history(&[18.0, 20.1, 15.3, 22.4, 19.9, 14.0, 21.2, 16.8]);
    let snap = compute_snapshot(&rounds, as_of());

    // 147.7 / 8 = 18.4625 for both, since all eight are the lowest and the highest
    assert_eq!(snap.index, Some(18.5));
    assert_eq!(snap.anti_index, Some(18.5));
    assert_eq!(snap.target_diff, Some(18.0));
    assert_eq!(snap.series.last().and_then(|p| p.index_after), snap.index);
    // floor(69.9 + 18 * 131 / 113) - 72 = floor(90.77) - 72
    assert_eq!(snap.budget, Some(18));
    assert_eq!(snap.year_avg, Some(18.5));
    Ok(())
}

#[tokio::test]
async fn test1_target_is_always_one_of_the_best_eight() -> Result<(), Box<dyn std::error::Error>> {
    let diffs: Vec<f64> = (0..30).map(|i| f64::from((i * 7) % 23) + 5.0).collect();
    let mut rounds = Vec::new();
    for n in 8..=diffs.len() {
        rounds.clear();
        rounds.extend(diffs[..n].iter().enumerate().map(|(i, d)| {
            let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64);
            rated_round(&day.format("%Y-%m-%d").to_string(), *d)
        }));
        let snap = compute_snapshot(&rounds, as_of());
        let start = n.saturating_sub(20);
        let mut window = diffs[start..n].to_vec();
        window.sort_by(f64::total_cmp);
        let target = snap.target_diff.unwrap();
        assert!(window[..8].contains(&target), "n={n} target={target}");
        assert_eq!(snap.series.last().and_then(|p| p.index_after), snap.index);
    }
    Ok(())
}

#[tokio::test]
async fn test1_few_rounds_degrade() -> Result<(), Box<dyn std::error::Error>> {
    let rounds = history(&[20.0, 15.0, 17.0]);
    let snap = compute_snapshot(&rounds, as_of());
    assert_eq!(snap.index, Some(17.3));
    assert_eq!(snap.anti_index, None);
    assert_eq!(snap.target_diff, None);
    assert_eq!(snap.budget, None);
    assert!(snap.is_provisional());

    let json = serde_json::to_value(&snap)?;
    assert!(json["anti_index"].is_null());
    assert!(json["budget"].is_null());
    Ok(())
}

#[tokio::test]
async fn test1_projection_over_the_series() -> Result<(), Box<dyn std::error::Error>> {
    let rounds = history(&[18.0, 20.1, 15.3, 22.4, 19.9, 14.0, 21.2, 16.8]);
    let snap = compute_snapshot(&rounds, as_of());
    // a 10.0 pushes the 22.4 out of the lowest eight: 135.3 / 8
    assert_eq!(projected_index(&snap.series, 10.0), Some(16.9));
    Ok(())
}
