use crate::snapshot::{ArraySnapshot, Mark};
use crate::{Frame, FrameRecorder};

pub const COIN_CHANGE: &[&str] = &[
    "sort coins descending",
    "for coin in coins",
    "  while remaining >= coin",
    "    take coin; remaining -= coin",
    "  if remaining == 0: stop",
    "report result",
];

/// Greedy change-making. Picked coins accumulate in the snapshot's output
/// row. Denominations and amount must be positive.
pub fn coin_change(denominations: &[i64], amount: i64) -> Vec<Frame<ArraySnapshot>> {
    let mut coins = denominations.to_vec();
    let mut state = ArraySnapshot::new(coins.clone());
    let mut recorder = FrameRecorder::new();
    recorder.record(&state, format!("Make change for {amount}"));

    coins.sort_unstable_by(|a, b| b.cmp(a));
    state = ArraySnapshot::new(coins);
    state.at_line(0);
    recorder.record(&state, "Sort coins from largest to smallest");

    let mut remaining = amount;
    for index in 0..state.len() {
        let coin = state.values[index];
        state.clear_marks();
        state.mark(index, Mark::Active).at_line(1);
        recorder.record(&state, format!("Consider coin {coin}"));

        while remaining >= coin {
            remaining -= coin;
            state.output.push(coin);
            state.at_line(3);
            recorder.record(&state, format!("Take {coin}; {remaining} left"));
        }

        if remaining == 0 {
            state.mark(index, Mark::Found).at_line(4);
            recorder.record(&state, "Nothing left to pay");
            break;
        }
        state.mark(index, Mark::Discarded);
    }

    state.clear_marks();
    state.at_line(5);
    let summary = if remaining == 0 {
        format!("Paid {amount} with {} coins", state.output.len())
    } else {
        format!("Cannot pay the last {remaining} with these coins")
    };
    recorder.record(&state, summary);
    recorder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_largest_coins_first() {
        let frames = coin_change(&[1, 5, 10, 25], 63);
        let last = frames.last().unwrap();

        assert_eq!(last.snapshot.output, vec![25, 25, 10, 1, 1, 1]);
        assert_eq!(last.description, "Paid 63 with 6 coins");
        assert_eq!(frames[1].snapshot.values, vec![25, 10, 5, 1]);
        assert_eq!(frames[0].snapshot.values, vec![1, 5, 10, 25]);
    }

    #[test]
    fn reports_remainder_when_exact_change_is_impossible() {
        let frames = coin_change(&[4, 6], 7);
        let last = frames.last().unwrap();

        assert_eq!(last.snapshot.output, vec![6]);
        assert_eq!(last.description, "Cannot pay the last 1 with these coins");
    }

    #[test]
    fn earlier_frames_do_not_see_later_picks() {
        let frames = coin_change(&[2], 6);
        let picks: Vec<usize> = frames.iter().map(|f| f.snapshot.output.len()).collect();
        assert_eq!(picks, vec![0, 0, 0, 1, 2, 3, 3, 3]);
    }
}
