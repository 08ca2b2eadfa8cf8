/// A hole is capped at this many strokes over par, both for points and adjusted scores.
pub const CAP_OVER_PAR: i32 = 2;

#[must_use]
pub fn net_score(gross: i32, stroke: bool) -> i32 {
    gross - i32::from(stroke)
}

/// Points for one hole as `(a, b)`.
///
/// The lower capped net wins the difference of the capped nets, but only when the
/// winner's own net is no worse than bogey. Equal capped nets halve the hole.
#[must_use]
pub fn hole_points(par: i32, net_a: i32, net_b: i32) -> (i32, i32) {
    let cap = par + CAP_OVER_PAR;
    let capped_a = net_a.min(cap);
    let capped_b = net_b.min(cap);
    let limit = par + 1;

    if capped_a < capped_b && net_a <= limit {
        (capped_b - capped_a, 0)
    } else if capped_b < capped_a && net_b <= limit {
        (0, capped_a - capped_b)
    } else {
        (0, 0)
    }
}

/// Per-hole adjusted score: `min(gross, par + 2 + base + extra)` where `base` is the
/// whole-round share of the course handicap and `extra` is one more stroke on the holes
/// ranked within the remainder. Without a course handicap or rank the cap is `par + 2`.
#[must_use]
pub fn adjusted_hole_score(
    gross: i32,
    par: i32,
    difficulty_rank: u8,
    course_handicap: Option<i32>,
) -> i32 {
    match course_handicap {
        Some(ch) if difficulty_rank > 0 => {
            let base = ch.div_euclid(18);
            let extra = i32::from(i32::from(difficulty_rank) <= ch.rem_euclid(18));
            gross.min(par + CAP_OVER_PAR + base + extra)
        }
        _ => gross.min(par + CAP_OVER_PAR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_capped_nets_halve_the_hole() {
        // A 5 no stroke, B 6 with a stroke: both net 5 on a par 4
        let net_a = net_score(5, false);
        let net_b = net_score(6, true);
        assert_eq!(hole_points(4, net_a, net_b), (0, 0));
    }

    #[test]
    fn winner_takes_capped_difference() {
        assert_eq!(hole_points(4, 3, 5), (2, 0));
        // B's 9 is capped at 6
        assert_eq!(hole_points(4, 4, 9), (2, 0));
        assert_eq!(hole_points(5, 8, 4), (0, 3));
    }

    #[test]
    fn double_bogey_net_never_wins_points() {
        // A's net 6 is capped at 6 like B's 8, so nothing changes hands
        assert_eq!(hole_points(4, 6, 8), (0, 0));
        assert_eq!(hole_points(3, 7, 5), (0, 0));
    }

    #[test]
    fn points_are_bounded_by_the_cap() {
        // Foothills pars; B aces every hole with a stroke, A blows up
        let pars = [4, 5, 3, 4, 4, 3, 5, 4, 4];
        let mut total_b = 0;
        let mut bound = 0;
        for par in pars {
            let net_a = net_score(par + 7, false);
            let net_b = net_score(1, true);
            let (a, b) = hole_points(par, net_a, net_b);
            assert_eq!(a, 0);
            assert_eq!(b, par + CAP_OVER_PAR);
            total_b += b;
            bound += par + CAP_OVER_PAR;
        }
        assert_eq!(total_b, bound);
        let max_par = pars.iter().copied().max().unwrap();
        assert!(total_b <= 9 * (max_par + CAP_OVER_PAR));

        // every pairing of nets from an ace with a stroke up to far over the cap
        for par in 3..=5 {
            for net_a in 0..=par + 6 {
                for net_b in 0..=par + 6 {
                    let (a, b) = hole_points(par, net_a, net_b);
                    assert!(a == 0 || b == 0);
                    let cap = par + CAP_OVER_PAR;
                    assert!(a + b <= cap - net_a.min(net_b).min(cap));
                    assert!(a >= 0 && b >= 0);
                }
            }
        }
    }

    #[test]
    fn adjusted_score_caps() {
        assert_eq!(adjusted_hole_score(9, 4, 3, None), 6);
        assert_eq!(adjusted_hole_score(5, 4, 3, None), 5);
        // ch 20: base 1, extra on ranks 1..=2
        assert_eq!(adjusted_hole_score(10, 4, 2, Some(20)), 8);
        assert_eq!(adjusted_hole_score(10, 4, 3, Some(20)), 7);
        // ch 9: base 0, extra on ranks 1..=9
        assert_eq!(adjusted_hole_score(10, 4, 9, Some(9)), 7);
        // unranked hole falls back to the plain cap
        assert_eq!(adjusted_hole_score(10, 4, 0, Some(20)), 6);
    }

    #[test]
    fn plus_handicap_uses_euclidean_split() {
        // ch -2: base -1, extra on ranks 1..=16
        assert_eq!(adjusted_hole_score(10, 4, 16, Some(-2)), 6);
        assert_eq!(adjusted_hole_score(10, 4, 17, Some(-2)), 5);
    }
}
