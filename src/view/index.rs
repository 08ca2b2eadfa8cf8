use maud::{DOCTYPE, Markup, html};

use crate::handicap::snapshot::HandicapSnapshot;
use crate::model::match_record::{
    MatchRecord, STANDING_AVG_WINDOW, Winner, moving_average, running_standings, tally,
};
use crate::model::round::Round;
use crate::model::score::ScoreDisplay;
use crate::model::utils::{date_sort_key, format_vs_par};

pub const PAGE_TITLE: &str = "Handicap";

/// How many of the most recent series points the page lists.
const RECENT_ROUNDS: usize = 20;

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.1}"))
}

fn score_class(score: ScoreDisplay) -> &'static str {
    match score {
        ScoreDisplay::Eagle => "score-eagle",
        ScoreDisplay::Birdie => "score-birdie",
        ScoreDisplay::Par => "score-par",
        ScoreDisplay::Bogey => "score-bogey",
        ScoreDisplay::DoubleBogey => "score-double",
        ScoreDisplay::Over(_) => "score-over",
    }
}

fn render_headline(snapshot: &HandicapSnapshot) -> Markup {
    html! {
        div id="headline" {
            div class="stat" {
                span class="label" { "Index" }
                span class="value" id="index" { (fmt_opt(snapshot.index)) }
                @if snapshot.is_provisional() {
                    span class="note" { "provisional, " (snapshot.n_last_20) " of 8 rounds" }
                }
            }
            div class="stat" {
                span class="label" { "Anti-index" }
                span class="value" id="anti-index" { (fmt_opt(snapshot.anti_index)) }
            }
            div class="stat" {
                span class="label" { "Target differential" }
                span class="value" id="target" { (fmt_opt(snapshot.target_diff)) }
            }
            div class="stat" {
                span class="label" { "Budget" }
                span class="value" id="budget" {
                    @match snapshot.budget {
                        Some(b) => { (format_vs_par(b)) }
                        None => { "n/a" }
                    }
                }
                @if let Some(course) = &snapshot.target_course {
                    span class="note" { "at " (course) }
                }
            }
            div class="stat" {
                span class="label" { "Last 20 avg" }
                span class="value" { (fmt_opt(snapshot.last_20_avg)) }
            }
            div class="stat" {
                span class="label" { "This year" }
                span class="value" { (fmt_opt(snapshot.year_avg)) }
            }
        }
    }
}

fn render_recent(snapshot: &HandicapSnapshot) -> Markup {
    html! {
        table id="recent" {
            thead { tr { th { "Date" } th { "Course" } th { "Diff" } th { "Index" } } }
            tbody {
                @for point in snapshot.series.iter().rev().take(RECENT_ROUNDS) {
                    tr {
                        td { (point.date) }
                        td { (point.course) }
                        td class="diff" { (format!("{:.1}", point.differential)) }
                        td { (fmt_opt(point.index_after)) }
                    }
                }
            }
        }
    }
}

fn render_years(snapshot: &HandicapSnapshot) -> Markup {
    html! {
        table id="years" {
            thead { tr { th { "Year" } th { "Avg diff" } } }
            tbody {
                @for year in &snapshot.yearly_avgs {
                    tr { td { (year.year) } td { (format!("{:.1}", year.avg)) } }
                }
            }
        }
    }
}

/// Hole-by-hole card of the most recent round that recorded one.
fn render_last_card(rounds: &[Round]) -> Markup {
    let Some(round) = rounds
        .iter()
        .filter(|r| !r.hole_results.is_empty())
        .max_by_key(|r| (date_sort_key(&r.date), r.id))
    else {
        return html! {};
    };
    html! {
        table id="last-card" {
            caption { (round.date) " " (round.course_name) }
            tr { th { "Hole" } @for h in &round.hole_results { td { (h.hole_number) } } }
            tr { th { "Par" } @for h in &round.hole_results { td { (h.par) } } }
            tr {
                th { "Score" }
                @for h in &round.hole_results {
                    @let display = ScoreDisplay::for_score(h.gross, h.par);
                    td class=(score_class(display)) title=(display) { (h.gross) }
                }
            }
        }
    }
}

fn render_matches(matches: &[MatchRecord]) -> Markup {
    let standings = running_standings(matches);
    let averages = moving_average(&standings, STANDING_AVG_WINDOW);
    let wins = tally(&standings);
    html! {
        div id="tally" {
            span class="wins-a" { "A " (wins.wins_a) }
            " / "
            span class="wins-b" { "B " (wins.wins_b) }
            " / "
            span class="ties" { "Tied " (wins.ties) }
        }
        table id="matches" {
            thead {
                tr {
                    th { "Date" } th { "Winner" } th { "Margin" } th { "Standing" }
                    th { (STANDING_AVG_WINDOW) "-match avg" }
                }
            }
            tbody {
                @for ((record, standing), avg) in matches.iter().zip(&standings).zip(&averages).rev() {
                    tr class=[record.historical.then_some("historical")] {
                        td { (record.date) }
                        td {
                            @match record.winner {
                                Winner::A => { "A" }
                                Winner::B => { "B" }
                                Winner::Tie => { "Tie" }
                            }
                        }
                        td { (record.margin) }
                        td { (standing) }
                        td class="avg" { (fmt_opt(*avg)) }
                    }
                }
            }
        }
    }
}

#[must_use]
pub fn render_handicap_page(
    snapshot: &HandicapSnapshot,
    rounds: &[Round],
    matches: &[MatchRecord],
) -> Markup {
    html! {
        (DOCTYPE)
        head {
            meta charset="UTF-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            title { (PAGE_TITLE) }
        }
        body {
            h1 { (PAGE_TITLE) }
            (render_headline(snapshot))
            (render_last_card(rounds))
            h2 { "Recent rounds" }
            (render_recent(snapshot))
            h2 { "By year" }
            (render_years(snapshot))
            @if !matches.is_empty() {
                h2 { "Matches" }
                (render_matches(matches))
            }
        }
    }
}
