//! Post ordering
//!
//! The legacy order answers "a sorts first" unless `a.date < b.date`, in
//! which case it answers "equal". That is not a total order, so it cannot be
//! handed to `slice::sort_by`. [`engine_sort_by`] runs the same TimSort a
//! JavaScript engine runs, one `less` test at a time, so the historical
//! order is reproduced for any number of posts.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::{DateKey, PostRecord};

/// How collected posts are ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostOrder {
    /// The historical site comparator, reproduced exactly
    #[default]
    Legacy,
    /// Descending by date, undated posts last, ties by file path
    NewestFirst,
}

impl PostOrder {
    /// Sort `posts` in place
    pub fn sort(self, posts: &mut [PostRecord]) {
        match self {
            PostOrder::Legacy => engine_sort_by(posts, legacy_compare),
            PostOrder::NewestFirst => posts.sort_by(newest_first),
        }
    }
}

/// `Equal` when `a` is dated strictly before `b`, `Less` otherwise.
///
/// A missing date, or one that is neither a string nor a number, never
/// compares as "before", in either argument position.
pub fn legacy_compare(a: &PostRecord, b: &PostRecord) -> Ordering {
    match (a.date_key(), b.date_key()) {
        (Some(a), Some(b)) if a.is_before(b) => Ordering::Equal,
        _ => Ordering::Less,
    }
}

/// Total order: newest date first, then by file path.
///
/// String dates come before numeric ones and undated posts come last.
pub fn newest_first(a: &PostRecord, b: &PostRecord) -> Ordering {
    fn rank(key: Option<DateKey<'_>>) -> u8 {
        match key {
            Some(DateKey::Text(_)) => 0,
            Some(DateKey::Number(_)) => 1,
            None => 2,
        }
    }

    let by_date = match (a.date_key(), b.date_key()) {
        (Some(DateKey::Text(a)), Some(DateKey::Text(b))) => b.cmp(a),
        (Some(DateKey::Number(a)), Some(DateKey::Number(b))) => b.total_cmp(&a),
        (a, b) => rank(a).cmp(&rank(b)),
    };
    by_date.then_with(|| a.file_path.cmp(&b.file_path))
}

/// Stable sort that tolerates comparators which are not total orders.
///
/// Only `compare(..) == Less` is ever tested, which is all a JavaScript
/// comparator returning `-1`/`0` can express. The steps, comparison
/// arguments and galloping thresholds are those of V8's TimSort, so the
/// result matches `Array.prototype.sort` for any comparator.
pub fn engine_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() < 2 {
        return;
    }

    // Sort positions rather than elements so `T` needs neither Clone nor Copy
    let order = {
        let view: &[T] = &*items;
        let mut sorter = TimSort::new(view.len(), |a: usize, b: usize| {
            compare(&view[a], &view[b]) == Ordering::Less
        });
        sorter.sort();
        sorter.work
    };
    apply_permutation(items, &order);
}

/// Move `items[order[i]]` to position `i`
fn apply_permutation<T>(items: &mut [T], order: &[usize]) {
    let mut target = vec![0; order.len()];
    for (new, &old) in order.iter().enumerate() {
        target[old] = new;
    }

    for i in 0..items.len() {
        while target[i] != i {
            let j = target[i];
            items.swap(i, j);
            target.swap(i, j);
        }
    }
}

/// Initial galloping threshold, and the win streak that keeps galloping on
const MIN_GALLOP: usize = 7;

#[derive(Debug, Clone, Copy)]
struct Run {
    base: usize,
    len: usize,
}

/// V8's TimSort over a permutation of `0..len`
struct TimSort<L> {
    work: Vec<usize>,
    runs: Vec<Run>,
    min_gallop: usize,
    less: L,
}

/// Lengths below 64 give a single run; longer inputs get a minimum run in
/// `32..=64` so the run count is close to a power of two.
fn min_run_length(mut n: usize) -> usize {
    let mut r = 0;
    while n >= 64 {
        r |= n & 1;
        n >>= 1;
    }
    n + r
}

impl<L> TimSort<L>
where
    L: FnMut(usize, usize) -> bool,
{
    fn new(len: usize, less: L) -> Self {
        Self {
            work: (0..len).collect(),
            runs: Vec::new(),
            min_gallop: MIN_GALLOP,
            less,
        }
    }

    fn sort(&mut self) {
        let len = self.work.len();
        let min_run = min_run_length(len);

        let mut low = 0;
        let mut remaining = len;
        while remaining != 0 {
            let mut run = self.count_and_make_run(low, low + remaining);
            if run < min_run {
                let forced = min_run.min(remaining);
                self.binary_insertion_sort(low, low + run, low + forced);
                run = forced;
            }

            self.runs.push(Run { base: low, len: run });
            self.merge_collapse();

            low += run;
            remaining -= run;
        }

        self.merge_force_collapse();
    }

    /// Length of the run starting at `low`; a descending run is reversed in
    /// place so it is ascending afterwards.
    fn count_and_make_run(&mut self, low: usize, high: usize) -> usize {
        let next = low + 1;
        if next == high {
            return 1;
        }

        let descending = (self.less)(self.work[next], self.work[low]);
        let mut run = 2;
        for i in next + 1..high {
            if (self.less)(self.work[i], self.work[i - 1]) != descending {
                break;
            }
            run += 1;
        }

        if descending {
            self.work[low..low + run].reverse();
        }
        run
    }

    /// Insert `work[start..high]` into the sorted `work[low..start]`, with the
    /// inserted element as the first comparator argument.
    fn binary_insertion_sort(&mut self, low: usize, start: usize, high: usize) {
        let start = if low == start { start + 1 } else { start };

        for start in start..high {
            let pivot = self.work[start];
            let mut left = low;
            let mut right = start;
            while left < right {
                let mid = left + (right - left) / 2;
                if (self.less)(pivot, self.work[mid]) {
                    right = mid;
                } else {
                    left = mid + 1;
                }
            }
            self.work[left..=start].rotate_right(1);
        }
    }

    fn run_invariant_holds(&self, n: usize) -> bool {
        n < 2 || self.runs[n - 2].len > self.runs[n - 1].len + self.runs[n].len
    }

    fn merge_collapse(&mut self) {
        while self.runs.len() > 1 {
            let mut n = self.runs.len() - 2;
            if !self.run_invariant_holds(n + 1) || !self.run_invariant_holds(n) {
                if self.runs[n - 1].len < self.runs[n + 1].len {
                    n -= 1;
                }
                self.merge_at(n);
            } else if self.runs[n].len <= self.runs[n + 1].len {
                self.merge_at(n);
            } else {
                break;
            }
        }
    }

    fn merge_force_collapse(&mut self) {
        while self.runs.len() > 1 {
            let mut n = self.runs.len() - 2;
            if n > 0 && self.runs[n - 1].len < self.runs[n + 1].len {
                n -= 1;
            }
            self.merge_at(n);
        }
    }

    /// Merge runs `i` and `i + 1`
    fn merge_at(&mut self, i: usize) {
        let Run {
            base: mut base_a,
            len: mut len_a,
        } = self.runs[i];
        let Run {
            base: base_b,
            len: len_b,
        } = self.runs[i + 1];

        self.runs[i].len = len_a + len_b;
        self.runs.remove(i + 1);

        // Elements of a before the first element of b are already in place
        let k = gallop_right(
            &mut self.less,
            &self.work,
            self.work[base_b],
            base_a,
            len_a,
            0,
        );
        base_a += k;
        len_a -= k;
        if len_a == 0 {
            return;
        }

        // Elements of b after the last element of a are already in place
        let key = self.work[base_a + len_a - 1];
        let len_b = gallop_left(&mut self.less, &self.work, key, base_b, len_b, len_b - 1);
        if len_b == 0 {
            return;
        }

        if len_a <= len_b {
            self.merge_low(base_a, len_a, base_b, len_b);
        } else {
            self.merge_high(base_a, len_a, base_b, len_b);
        }
    }

    /// Merge left to right, buffering run a
    fn merge_low(&mut self, base_a: usize, mut len_a: usize, base_b: usize, mut len_b: usize) {
        let temp = self.work[base_a..base_a + len_a].to_vec();
        let mut dest = base_a;
        let mut cursor_temp = 0;
        let mut cursor_b = base_b;

        self.work[dest] = self.work[cursor_b];
        dest += 1;
        cursor_b += 1;
        len_b -= 1;

        let exit = 'merge: loop {
            if len_b == 0 {
                break 'merge MergeExit::Done;
            }
            if len_a == 1 {
                break 'merge MergeExit::LastOfBuffer;
            }

            loop {
                let mut wins_a = 0;
                let mut wins_b = 0;

                // One element at a time until a run wins consistently
                loop {
                    if (self.less)(self.work[cursor_b], temp[cursor_temp]) {
                        self.work[dest] = self.work[cursor_b];
                        dest += 1;
                        cursor_b += 1;
                        wins_b += 1;
                        wins_a = 0;
                        len_b -= 1;
                        if len_b == 0 {
                            break 'merge MergeExit::Done;
                        }
                        if wins_b >= self.min_gallop {
                            break;
                        }
                    } else {
                        self.work[dest] = temp[cursor_temp];
                        dest += 1;
                        cursor_temp += 1;
                        wins_a += 1;
                        wins_b = 0;
                        len_a -= 1;
                        if len_a == 1 {
                            break 'merge MergeExit::LastOfBuffer;
                        }
                        if wins_a >= self.min_gallop {
                            break;
                        }
                    }
                }

                self.min_gallop += 1;
                let mut first = true;
                while wins_a >= MIN_GALLOP || wins_b >= MIN_GALLOP || first {
                    first = false;
                    self.min_gallop = self.min_gallop.saturating_sub(1).max(1);

                    wins_a = gallop_right(
                        &mut self.less,
                        &temp,
                        self.work[cursor_b],
                        cursor_temp,
                        len_a,
                        0,
                    );
                    if wins_a > 0 {
                        self.work[dest..dest + wins_a]
                            .copy_from_slice(&temp[cursor_temp..cursor_temp + wins_a]);
                        dest += wins_a;
                        cursor_temp += wins_a;
                        len_a -= wins_a;
                        if len_a == 1 {
                            break 'merge MergeExit::LastOfBuffer;
                        }
                        // Only reachable with an inconsistent comparator
                        if len_a == 0 {
                            break 'merge MergeExit::Done;
                        }
                    }
                    self.work[dest] = self.work[cursor_b];
                    dest += 1;
                    cursor_b += 1;
                    len_b -= 1;
                    if len_b == 0 {
                        break 'merge MergeExit::Done;
                    }

                    wins_b = gallop_left(
                        &mut self.less,
                        &self.work,
                        temp[cursor_temp],
                        cursor_b,
                        len_b,
                        0,
                    );
                    if wins_b > 0 {
                        self.work.copy_within(cursor_b..cursor_b + wins_b, dest);
                        dest += wins_b;
                        cursor_b += wins_b;
                        len_b -= wins_b;
                        if len_b == 0 {
                            break 'merge MergeExit::Done;
                        }
                    }
                    self.work[dest] = temp[cursor_temp];
                    dest += 1;
                    cursor_temp += 1;
                    len_a -= 1;
                    if len_a == 1 {
                        break 'merge MergeExit::LastOfBuffer;
                    }
                }
                self.min_gallop += 1;
            }
        };

        match exit {
            MergeExit::Done => {
                self.work[dest..dest + len_a]
                    .copy_from_slice(&temp[cursor_temp..cursor_temp + len_a]);
            }
            MergeExit::LastOfBuffer => {
                // The last element of a belongs after the rest of b
                self.work.copy_within(cursor_b..cursor_b + len_b, dest);
                self.work[dest + len_b] = temp[cursor_temp];
            }
        }
    }

    /// Merge right to left, buffering run b.
    ///
    /// `dest`, `end_a` and `end_temp` are exclusive ends: the next slot
    /// written or read is the one just below them.
    fn merge_high(&mut self, base_a: usize, mut len_a: usize, base_b: usize, mut len_b: usize) {
        let temp = self.work[base_b..base_b + len_b].to_vec();
        let mut dest = base_b + len_b;
        let mut end_temp = len_b;
        let mut end_a = base_a + len_a;

        dest -= 1;
        end_a -= 1;
        self.work[dest] = self.work[end_a];
        len_a -= 1;

        let exit = 'merge: loop {
            if len_a == 0 {
                break 'merge MergeExit::Done;
            }
            if len_b == 1 {
                break 'merge MergeExit::LastOfBuffer;
            }

            loop {
                let mut wins_a = 0;
                let mut wins_b = 0;

                loop {
                    if (self.less)(temp[end_temp - 1], self.work[end_a - 1]) {
                        dest -= 1;
                        end_a -= 1;
                        self.work[dest] = self.work[end_a];
                        wins_a += 1;
                        wins_b = 0;
                        len_a -= 1;
                        if len_a == 0 {
                            break 'merge MergeExit::Done;
                        }
                        if wins_a >= self.min_gallop {
                            break;
                        }
                    } else {
                        dest -= 1;
                        end_temp -= 1;
                        self.work[dest] = temp[end_temp];
                        wins_b += 1;
                        wins_a = 0;
                        len_b -= 1;
                        if len_b == 1 {
                            break 'merge MergeExit::LastOfBuffer;
                        }
                        if wins_b >= self.min_gallop {
                            break;
                        }
                    }
                }

                self.min_gallop += 1;
                let mut first = true;
                while wins_a >= MIN_GALLOP || wins_b >= MIN_GALLOP || first {
                    first = false;
                    self.min_gallop = self.min_gallop.saturating_sub(1).max(1);

                    let k = gallop_right(
                        &mut self.less,
                        &self.work,
                        temp[end_temp - 1],
                        base_a,
                        len_a,
                        len_a - 1,
                    );
                    wins_a = len_a - k;
                    if wins_a > 0 {
                        dest -= wins_a;
                        end_a -= wins_a;
                        self.work.copy_within(end_a..end_a + wins_a, dest);
                        len_a -= wins_a;
                        if len_a == 0 {
                            break 'merge MergeExit::Done;
                        }
                    }
                    dest -= 1;
                    end_temp -= 1;
                    self.work[dest] = temp[end_temp];
                    len_b -= 1;
                    if len_b == 1 {
                        break 'merge MergeExit::LastOfBuffer;
                    }

                    let k = gallop_left(
                        &mut self.less,
                        &temp,
                        self.work[end_a - 1],
                        0,
                        len_b,
                        len_b - 1,
                    );
                    wins_b = len_b - k;
                    if wins_b > 0 {
                        dest -= wins_b;
                        end_temp -= wins_b;
                        self.work[dest..dest + wins_b]
                            .copy_from_slice(&temp[end_temp..end_temp + wins_b]);
                        len_b -= wins_b;
                        if len_b == 1 {
                            break 'merge MergeExit::LastOfBuffer;
                        }
                        // Only reachable with an inconsistent comparator
                        if len_b == 0 {
                            break 'merge MergeExit::Done;
                        }
                    }
                    dest -= 1;
                    end_a -= 1;
                    self.work[dest] = self.work[end_a];
                    len_a -= 1;
                    if len_a == 0 {
                        break 'merge MergeExit::Done;
                    }
                }
                self.min_gallop += 1;
            }
        };

        match exit {
            MergeExit::Done => {
                self.work[dest - len_b..dest].copy_from_slice(&temp[..len_b]);
            }
            MergeExit::LastOfBuffer => {
                // The first element of b belongs before the rest of a
                dest -= len_a;
                end_a -= len_a;
                self.work.copy_within(end_a..end_a + len_a, dest);
                self.work[dest - 1] = temp[end_temp - 1];
            }
        }
    }
}

/// How a merge loop finished
enum MergeExit {
    /// One run is exhausted; copy what is left of the buffered run
    Done,
    /// A single buffered element is left and belongs at the far end
    LastOfBuffer,
}

/// Leftmost position in `array[base..base + len]` where `key` can go:
/// everything before it is less than `key`. Searches outward from `hint`.
fn gallop_left<L>(
    less: &mut L,
    array: &[usize],
    key: usize,
    base: usize,
    len: usize,
    hint: usize,
) -> usize
where
    L: FnMut(usize, usize) -> bool,
{
    let hint = hint as isize;
    let at = |i: isize| array[base + i as usize];
    let mut last: isize = 0;
    let mut offset: isize = 1;

    if less(at(hint), key) {
        // a[hint] < key: gallop right until a[hint + last] < key <= a[hint + offset]
        let max = len as isize - hint;
        while offset < max {
            if !less(at(hint + offset), key) {
                break;
            }
            last = offset;
            offset = offset * 2 + 1;
        }
        offset = offset.min(max);
        last += hint;
        offset += hint;
    } else {
        // key <= a[hint]: gallop left until a[hint - offset] < key <= a[hint - last]
        let max = hint + 1;
        while offset < max {
            if less(at(hint - offset), key) {
                break;
            }
            last = offset;
            offset = offset * 2 + 1;
        }
        offset = offset.min(max);
        let tmp = last;
        last = hint - offset;
        offset = hint - tmp;
    }

    last += 1;
    while last < offset {
        let mid = last + (offset - last) / 2;
        if less(at(mid), key) {
            last = mid + 1;
        } else {
            offset = mid;
        }
    }
    offset as usize
}

/// Rightmost position in `array[base..base + len]` where `key` can go:
/// nothing before it is greater than `key`. Searches outward from `hint`.
fn gallop_right<L>(
    less: &mut L,
    array: &[usize],
    key: usize,
    base: usize,
    len: usize,
    hint: usize,
) -> usize
where
    L: FnMut(usize, usize) -> bool,
{
    let hint = hint as isize;
    let at = |i: isize| array[base + i as usize];
    let mut last: isize = 0;
    let mut offset: isize = 1;

    if less(key, at(hint)) {
        // key < a[hint]: gallop left until a[hint - offset] <= key < a[hint - last]
        let max = hint + 1;
        while offset < max {
            if !less(key, at(hint - offset)) {
                break;
            }
            last = offset;
            offset = offset * 2 + 1;
        }
        offset = offset.min(max);
        let tmp = last;
        last = hint - offset;
        offset = hint - tmp;
    } else {
        // a[hint] <= key: gallop right until a[hint + last] <= key < a[hint + offset]
        let max = len as isize - hint;
        while offset < max {
            if less(key, at(hint + offset)) {
                break;
            }
            last = offset;
            offset = offset * 2 + 1;
        }
        offset = offset.min(max);
        last += hint;
        offset += hint;
    }

    last += 1;
    while last < offset {
        let mid = last + (offset - last) / 2;
        if less(key, at(mid)) {
            offset = mid;
        } else {
            last = mid + 1;
        }
    }
    offset as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(file: &str, date: Option<&str>) -> PostRecord {
        let source = match date {
            Some(date) => format!("---\ndate: \"{date}\"\n---\n"),
            None => "---\ntitle: undated\n---\n".to_string(),
        };
        PostRecord::from_source(file, &source).unwrap()
    }

    fn files(posts: &[PostRecord]) -> Vec<&str> {
        posts.iter().map(|p| p.file_path.as_str()).collect()
    }

    #[test]
    fn test_legacy_compare_contract() {
        let old = post("old.md", Some("2022-01-01"));
        let new = post("new.md", Some("2023-01-01"));
        let undated = post("undated.md", None);

        assert_eq!(legacy_compare(&old, &new), Ordering::Equal);
        assert_eq!(legacy_compare(&new, &old), Ordering::Less);
        assert_eq!(legacy_compare(&new, &new), Ordering::Less);
        assert_eq!(legacy_compare(&undated, &new), Ordering::Less);
        assert_eq!(legacy_compare(&new, &undated), Ordering::Less);
    }

    #[test]
    fn test_legacy_order_of_three() {
        let mut posts = vec![
            post("a.md", Some("2023-01-01")),
            post("b.md", Some("2023-06-01")),
            post("c.md", Some("2022-01-01")),
        ];
        PostOrder::Legacy.sort(&mut posts);
        assert_eq!(files(&posts), vec!["b.md", "a.md", "c.md"]);
    }

    #[test]
    fn test_legacy_distinct_dates_come_out_newest_first() {
        let inputs = [
            ["2021", "2022", "2023"],
            ["2023", "2022", "2021"],
            ["2021", "2023", "2022"],
            ["2022", "2021", "2023"],
        ];
        for dates in inputs {
            let mut posts: Vec<_> = dates
                .iter()
                .map(|&d| post(&format!("{d}.md"), Some(d)))
                .collect();
            PostOrder::Legacy.sort(&mut posts);
            assert_eq!(files(&posts), vec!["2023.md", "2022.md", "2021.md"], "{dates:?}");
        }
    }

    #[test]
    fn test_legacy_reverses_ties() {
        let mut posts = vec![
            post("a.md", Some("2023-01-01")),
            post("b.md", Some("2023-01-01")),
            post("c.md", Some("2023-01-01")),
        ];
        PostOrder::Legacy.sort(&mut posts);
        assert_eq!(files(&posts), vec!["c.md", "b.md", "a.md"]);
    }

    #[test]
    fn test_legacy_undated_posts() {
        let mut posts = vec![
            post("undated.md", None),
            post("new.md", Some("2023-01-01")),
            post("old.md", Some("2022-01-01")),
        ];
        PostOrder::Legacy.sort(&mut posts);
        assert_eq!(files(&posts), vec!["new.md", "old.md", "undated.md"]);

        // An undated post in the middle of the leading run drags it out of order
        let mut posts = vec![
            post("new.md", Some("2023-01-01")),
            post("undated.md", None),
            post("old.md", Some("2022-01-01")),
        ];
        PostOrder::Legacy.sort(&mut posts);
        assert_eq!(files(&posts), vec!["old.md", "undated.md", "new.md"]);
    }

    #[test]
    fn test_legacy_order_of_long_list() {
        // Runs, forced runs, merges in both directions and galloping all
        // take part at this length. Expected order recorded from V8.
        let dates: [Option<&str>; 130] = [
            Some("2015-01-01"), Some("2015-02-04"), Some("2015-03-07"), Some("2015-04-10"),
            Some("2015-05-13"), None, Some("2015-07-19"), Some("2015-08-22"),
            Some("2015-09-25"), Some("2015-10-28"), Some("2015-11-03"), Some("2015-12-06"),
            Some("2016-01-09"), Some("2016-02-12"), Some("2016-03-15"), Some("2016-04-18"),
            Some("2016-05-21"), Some("2016-06-24"), Some("2016-07-27"), Some("2016-08-02"),
            Some("2016-09-05"), Some("2016-10-08"), None, Some("2016-12-14"),
            Some("2017-01-17"), Some("2017-02-20"), Some("2017-03-23"), Some("2017-04-26"),
            Some("2017-05-01"), Some("2017-06-04"), Some("2017-07-07"), Some("2017-08-10"),
            Some("2017-09-13"), Some("2017-10-16"), Some("2017-11-19"), Some("2017-12-22"),
            Some("2018-01-25"), Some("2018-02-28"), Some("2018-03-03"), None,
            Some("2018-05-09"), Some("2018-06-12"), Some("2018-07-15"), Some("2018-08-18"),
            Some("2018-09-21"), Some("2018-10-24"), Some("2018-11-27"), Some("2018-12-02"),
            Some("2019-01-05"), Some("2019-02-08"), Some("2020-04-10"), Some("2020-03-10"),
            Some("2020-02-10"), Some("2020-01-10"), Some("2020-12-10"), Some("2020-11-10"),
            None, Some("2020-09-10"), Some("2019-08-10"), Some("2019-07-10"),
            Some("2019-06-10"), Some("2019-05-10"), Some("2019-04-10"), Some("2019-03-10"),
            Some("2019-02-10"), Some("2019-01-10"), Some("2018-12-10"), Some("2018-11-10"),
            Some("2018-10-10"), Some("2018-09-10"), Some("2018-08-10"), Some("2018-07-10"),
            Some("2018-06-10"), None, Some("2017-04-10"), Some("2017-03-10"),
            Some("2017-02-10"), Some("2017-01-10"), Some("2017-12-10"), Some("2017-11-10"),
            Some("2017-10-10"), Some("2017-09-10"), Some("2016-08-10"), Some("2016-07-10"),
            Some("2016-06-10"), Some("2016-05-10"), Some("2016-04-10"), Some("2016-03-10"),
            Some("2016-02-10"), Some("2016-01-10"), None, Some("2019-04-16"),
            Some("2023-09-15"), Some("2022-11-03"), Some("2023-03-06"), Some("2023-01-11"),
            Some("2014-01-19"), Some("2023-10-21"), Some("2014-08-14"), Some("2016-11-02"),
            Some("2022-02-01"), Some("2021-09-25"), Some("2022-11-21"), Some("2014-05-05"),
            Some("2020-05-09"), Some("2021-04-25"), Some("2019-03-13"), None,
            Some("2019-05-09"), Some("2022-08-10"), Some("2021-08-12"), Some("2019-03-03"),
            Some("2019-07-13"), Some("2016-06-03"), Some("2021-03-04"), Some("2022-08-18"),
            Some("2023-03-14"), Some("2017-08-20"), Some("2016-03-18"), Some("2014-04-22"),
            Some("2021-06-11"), Some("2019-04-09"), Some("2022-04-17"), Some("2014-11-20"),
            None, Some("2018-03-24"), Some("2016-03-13"), Some("2021-05-01"),
            Some("2018-02-28"), Some("2016-07-17"),
        ];
        let expected: [usize; 130] = [
            124, 107, 97, 92, 116, 94, 95, 102, 93, 115, 109, 122, 100, 101, 110, 120,
            127, 105, 114, 104, 50, 112, 108, 91, 106, 111, 99, 90, 73, 56, 54, 55,
            57, 51, 52, 53, 58, 59, 60, 61, 62, 121, 63, 64, 49, 65, 48, 66,
            47, 46, 67, 45, 68, 44, 69, 43, 70, 42, 71, 41, 72, 40, 125, 128,
            78, 79, 80, 81, 117, 74, 75, 76, 77, 82, 83, 84, 113, 85, 86, 87,
            88, 89, 39, 38, 37, 36, 35, 34, 33, 32, 31, 30, 29, 28, 27, 26,
            25, 24, 23, 22, 21, 20, 19, 18, 129, 17, 16, 15, 118, 14, 126, 13,
            12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 123, 98, 103,
            119, 96,
        ];

        let mut posts: Vec<_> = dates
            .iter()
            .enumerate()
            .map(|(i, &date)| post(&format!("{i:03}.md"), date))
            .collect();
        PostOrder::Legacy.sort(&mut posts);

        let expected: Vec<_> = expected.iter().map(|i| format!("{i:03}.md")).collect();
        assert_eq!(files(&posts), expected);
    }

    #[test]
    fn test_legacy_numeric_dates() {
        let numeric = |file: &str, date: u32| {
            PostRecord::from_source(file, &format!("---\ndate: {date}\n---\n")).unwrap()
        };
        let mut posts = vec![
            numeric("a.md", 20220101),
            numeric("b.md", 20230101),
            numeric("c.md", 20210101),
        ];
        PostOrder::Legacy.sort(&mut posts);
        assert_eq!(files(&posts), vec!["b.md", "a.md", "c.md"]);
    }

    #[test]
    fn test_newest_first() {
        let mut posts = vec![
            post("undated.md", None),
            post("b.md", Some("2023-01-01")),
            post("old.md", Some("2022-01-01")),
            post("a.md", Some("2023-01-01")),
        ];
        PostOrder::NewestFirst.sort(&mut posts);
        assert_eq!(files(&posts), vec!["a.md", "b.md", "old.md", "undated.md"]);
    }

    #[test]
    fn test_newest_first_numeric_dates() {
        let mut posts = vec![
            post("undated.md", None),
            PostRecord::from_source("n1.md", "---\ndate: 20200101\n---\n").unwrap(),
            post("old.md", Some("2022-01-01")),
            PostRecord::from_source("n2.md", "---\ndate: 20240101\n---\n").unwrap(),
            post("new.md", Some("2023-01-01")),
        ];
        PostOrder::NewestFirst.sort(&mut posts);
        assert_eq!(
            files(&posts),
            vec!["new.md", "old.md", "n2.md", "n1.md", "undated.md"]
        );
    }

    #[test]
    fn test_engine_sort_with_total_order_matches_std() {
        let mut values = vec![5, 3, 9, 1, 1, 8, 2, 7, 0, 6];
        let mut expected = values.clone();
        expected.sort();
        engine_sort_by(&mut values, |a, b| a.cmp(b));
        assert_eq!(values, expected);
    }

    #[test]
    fn test_engine_sort_is_stable_on_long_inputs() {
        let mut state: u32 = 12345;
        let mut next = move || {
            state = state.wrapping_mul(1103515245).wrapping_add(12345);
            (state >> 16) % 50
        };

        let random: Vec<(u32, usize)> = (0..1000).map(|i| (next(), i)).collect();
        let mut presorted = random.clone();
        presorted[..600].sort();
        let mut reversed = random.clone();
        reversed.sort_by(|a, b| b.0.cmp(&a.0));

        for input in [random, presorted, reversed] {
            let mut expected = input.clone();
            expected.sort_by_key(|&(key, _)| key);

            let mut values = input;
            engine_sort_by(&mut values, |a, b| a.0.cmp(&b.0));
            assert_eq!(values, expected);
        }
    }

    #[test]
    fn test_min_run_length() {
        assert_eq!(min_run_length(10), 10);
        assert_eq!(min_run_length(63), 63);
        assert_eq!(min_run_length(64), 32);
        assert_eq!(min_run_length(65), 33);
        assert_eq!(min_run_length(130), 33);
        assert_eq!(min_run_length(1000), 63);
    }

    #[test]
    fn test_engine_sort_short_inputs() {
        let mut empty: Vec<i32> = Vec::new();
        engine_sort_by(&mut empty, |a, b| a.cmp(b));
        assert!(empty.is_empty());

        let mut one = vec![1];
        engine_sort_by(&mut one, |a, b| a.cmp(b));
        assert_eq!(one, vec![1]);
    }

    #[test]
    fn test_order_config_names() {
        let order: PostOrder = serde_yaml::from_str("newest_first").unwrap();
        assert_eq!(order, PostOrder::NewestFirst);
        assert_eq!(PostOrder::default(), PostOrder::Legacy);
    }
}
