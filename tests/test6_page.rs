use scraper::{Html, Selector};

use golf_log::handicap::compute_snapshot;
use golf_log::model::match_record::MatchRecord;
use golf_log::model::round::Round;
use golf_log::view::index::render_handicap_page;

mod common;

#[tokio::test]
async fn test6_handicap_page() -> Result<(), Box<dyn std::error::Error>> {
    let rounds: Vec<_> = [18.0, 20.1, 15.3, 22.4, 19.9, 14.0, 21.2, 16.8, 17.5]
        .iter()
        .enumerate()
        .map(|(i, d)| common::rated_round(&format!("2025-05-{:02}", i + 1), *d))
        .collect();
    let matches: Vec<MatchRecord> = serde_json::from_value(serde_json::json!([
        {"date": "2025-05-01", "margin": 10, "winner": "A", "historical": true},
        {"date": "2025-05-08", "margin": 3, "winner": "B"}
    ]))?;
    let as_of = chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let snapshot = compute_snapshot(&rounds, as_of);
    let html = render_handicap_page(&snapshot, &rounds, &matches).into_string();
    let document = Html::parse_document(&html);

    let index = Selector::parse("#index").expect("valid selector");
    let text: String = document.select(&index).flat_map(|e| e.text()).collect();
    assert_eq!(text, format!("{:.1}", snapshot.index.unwrap()));

    let rows = Selector::parse("#recent tbody tr").expect("valid selector");
    assert_eq!(document.select(&rows).count(), 9);
    let first_diff = Selector::parse("#recent tbody tr td.diff").expect("valid selector");
    let newest: String = document
        .select(&first_diff)
        .next()
        .map(|e| e.text().collect())
        .unwrap_or_default();
    assert_eq!(newest, "17.5");

    let standing = Selector::parse("#matches tbody tr td:nth-child(4)").expect("valid selector");
    let standings: Vec<String> = document
        .select(&standing)
        .map(|e| e.text().collect())
        .collect();
    // newest first: -10 reset, then B wins by 3
    assert_eq!(standings, vec!["-7", "-10"]);

    let historical = Selector::parse("#matches tr.historical").expect("valid selector");
    assert_eq!(document.select(&historical).count(), 1);

    let card = Selector::parse("#last-card").expect("valid selector");
    assert_eq!(document.select(&card).count(), 0);
    Ok(())
}

fn texts(document: &Html, selector: &str) -> Vec<String> {
    let selector = Selector::parse(selector).expect("valid selector");
    document
        .select(&selector)
        .map(|e| e.text().collect::<String>().trim().to_string())
        .collect()
}

#[tokio::test]
async fn test6_last_card_marks_scores_against_par() -> Result<(), Box<dyn std::error::Error>> {
    let mut rounds = vec![common::rated_round("2025-05-01", 18.0)];
    let card: Round = serde_json::from_value(serde_json::json!({
        "date": "2025-05-20",
        "course_name": "Foothills",
        "par": 36,
        "score": 37,
        "adj_score": 35,
        "include_ghin": false,
        "nine_hole": true,
        "hole_results": [
            {"holeNumber": 10, "par": 4, "handicap": 2, "gross": 3, "adj": 3},
            {"holeNumber": 11, "par": 5, "handicap": 1, "gross": 5, "adj": 5},
            {"holeNumber": 12, "par": 3, "handicap": 9, "gross": 5, "adj": 5},
            {"holeNumber": 13, "par": 4, "handicap": 5, "gross": 8, "adj": 6},
            {"holeNumber": 14, "par": 5, "handicap": 4, "gross": 3, "adj": 3},
            {"holeNumber": 15, "par": 4, "handicap": 6, "gross": 5, "adj": 5}
        ]
    }))?;
    rounds.push(card);
    let as_of = chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let snapshot = compute_snapshot(&rounds, as_of);
    let html = render_handicap_page(&snapshot, &rounds, &[]).into_string();
    let document = Html::parse_document(&html);

    assert_eq!(texts(&document, "#last-card caption"), vec!["2025-05-20 Foothills"]);
    let scores = Selector::parse("#last-card tr:last-child td").expect("valid selector");
    let classes: Vec<(String, String)> = document
        .select(&scores)
        .map(|e| {
            (
                e.value().attr("class").unwrap_or_default().to_string(),
                e.value().attr("title").unwrap_or_default().to_string(),
            )
        })
        .collect();
    assert_eq!(
        classes,
        vec![
            ("score-birdie".to_string(), "Birdie".to_string()),
            ("score-par".to_string(), "Par".to_string()),
            ("score-double".to_string(), "Double".to_string()),
            ("score-over".to_string(), "+4".to_string()),
            ("score-eagle".to_string(), "Eagle".to_string()),
            ("score-bogey".to_string(), "Bogey".to_string()),
        ]
    );
    assert_eq!(
        texts(&document, "#last-card tr:first-child td"),
        vec!["10", "11", "12", "13", "14", "15"]
    );
    // no history, no matches section
    assert!(texts(&document, "#tally").is_empty());
    Ok(())
}

#[tokio::test]
async fn test6_match_history_tally_and_trend() -> Result<(), Box<dyn std::error::Error>> {
    let matches: Vec<MatchRecord> = serde_json::from_value(serde_json::json!([
        {"date": "pre-2025 #1", "margin": 6, "winner": "D", "historical": true},
        {"date": "2025-05-03", "margin": 2, "winner": "V", "v_points": 8, "d_points": 6},
        {"date": "2025-05-10", "margin": 0, "winner": "T"},
        {"date": "2025-05-17", "margin": 5, "winner": "D"},
        {"date": "2025-05-24", "margin": 1, "winner": "V"},
        {"date": "2025-05-31", "margin": 4, "winner": "D"}
    ]))?;
    let snapshot = compute_snapshot(&[], chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    let html = render_handicap_page(&snapshot, &[], &matches).into_string();
    let document = Html::parse_document(&html);

    // standings 6, 4, 4, 9, 8, 12
    assert_eq!(texts(&document, "#tally .wins-a"), vec!["A 2"]);
    assert_eq!(texts(&document, "#tally .wins-b"), vec!["B 3"]);
    assert_eq!(texts(&document, "#tally .ties"), vec!["Tied 1"]);
    assert_eq!(
        texts(&document, "#matches tbody tr td:nth-child(4)"),
        vec!["12", "8", "9", "4", "4", "6"]
    );
    // (4+4+9+8+12)/5 = 7.4 and (6+4+4+9+8)/5 = 6.2, newest first
    assert_eq!(
        texts(&document, "#matches tbody td.avg"),
        vec!["7.4", "6.2", "n/a", "n/a", "n/a", "n/a"]
    );
    Ok(())
}
