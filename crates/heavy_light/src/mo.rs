//! Offline path-query batching (Mo's algorithm on trees).
//!
//! Tasks are projected onto a line through cumulative distances along the
//! trace order, sorted by sqrt-bucketed start key, and replayed by moving two
//! path endpoints. Every move flips exactly the nodes whose membership in the
//! active path changes, so when a task is reported the active set is the
//! node set of that task's path.

use tracing::{debug, trace};

use crate::decompose::HeavyLight;
use crate::segment::Segment;

/// Aggregate driven by [`MoScheduler::execute`].
pub trait PathAggregate<T> {
    /// Toggle `node` in or out of the active set.
    fn flip(&mut self, node: usize);
    /// Called once per task, when the active set is exactly its path.
    fn report(&mut self, task: T);
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MoStats {
    pub tasks: usize,
    pub flips: usize,
}

#[derive(Clone, Debug)]
struct Task<T> {
    start: usize,
    end: usize,
    key_start: usize,
    key_end: usize,
    payload: T,
}

pub struct MoScheduler<'a, T> {
    hld: &'a HeavyLight,
    tasks: Vec<Task<T>>,
    bucket_width: usize,
    sorted: bool,
}

impl<'a, T> MoScheduler<'a, T> {
    pub fn new(hld: &'a HeavyLight) -> Self {
        Self {
            hld,
            tasks: Vec::new(),
            bucket_width: default_bucket_width(hld.len()),
            sorted: true,
        }
    }

    /// Overrides the default bucket width of `ceil(sqrt(2n))`.
    pub fn with_bucket_width(mut self, width: usize) -> Self {
        assert!(width > 0, "bucket width must be positive");
        self.bucket_width = width;
        self.sorted = self.tasks.is_empty();
        self
    }

    pub fn bucket_width(&self) -> usize {
        self.bucket_width
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn add_task(&mut self, x: usize, y: usize, payload: T) {
        self.hld.check_node(x);
        self.hld.check_node(y);
        self.tasks.push(Task {
            start: x,
            end: y,
            key_start: 0,
            key_end: 0,
            payload,
        });
        self.sorted = false;
    }

    /// Current task endpoints, in replay order once sorted.
    ///
    /// Sorting may swap a task's endpoints.
    pub fn endpoints(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.tasks.iter().map(|t| (t.start, t.end))
    }

    pub fn sort_tasks(&mut self) {
        let hld = self.hld;
        let euler = euler_offsets(hld);
        for task in &mut self.tasks {
            if hld.index[task.start] > hld.index[task.end] {
                std::mem::swap(&mut task.start, &mut task.end);
            }
            task.key_end = euler[hld.index[task.end]];
            task.key_start = euler[hld.index[task.start]];
            if !hld.contains(task.start, task.end) {
                // The walk leaves the subtree of `start` before reaching `end`.
                task.key_start += 2 * hld.size[task.start] - 1;
            }
        }

        let width = self.bucket_width;
        // Odd buckets sweep the end key downward. Only the cursor travel
        // changes, never the reported active sets.
        self.tasks.sort_by(|a, b| {
            let (ba, bb) = (a.key_start / width, b.key_start / width);
            ba.cmp(&bb).then_with(|| {
                if ba % 2 == 0 {
                    a.key_end.cmp(&b.key_end)
                } else {
                    b.key_end.cmp(&a.key_end)
                }
            })
        });
        self.sorted = true;
    }

    /// Replays every task, sorting first if needed.
    ///
    /// A panic inside `aggregate` propagates and leaves it in an unspecified
    /// intermediate state.
    pub fn execute<A>(mut self, aggregate: &mut A) -> MoStats
    where
        A: PathAggregate<T> + ?Sized,
    {
        if !self.sorted {
            self.sort_tasks();
        }
        let mut stats = MoStats {
            tasks: self.tasks.len(),
            flips: 0,
        };
        let Some(first) = self.tasks.first() else {
            return stats;
        };
        debug!(
            tasks = stats.tasks,
            bucket_width = self.bucket_width,
            "executing path query batch"
        );

        let mut cursor = Cursor {
            hld: self.hld,
            segments: Vec::new(),
            flips: 0,
        };
        let (mut s, mut e) = (first.start, first.start);
        cursor.flip::<T, A>(aggregate, s);

        for (i, task) in self.tasks.into_iter().enumerate() {
            cursor.shift::<T, A>(aggregate, s, e, task.end);
            e = task.end;
            cursor.shift::<T, A>(aggregate, e, s, task.start);
            s = task.start;
            trace!(task = i, start = s, end = e, flips = cursor.flips, "reporting task");
            aggregate.report(task.payload);
        }

        stats.flips = cursor.flips;
        debug!(tasks = stats.tasks, flips = stats.flips, "path query batch done");
        stats
    }

    /// Closure form of [`execute`](Self::execute) over a shared `state`.
    pub fn execute_with<S, F, R>(self, state: &mut S, flip: F, report: R) -> MoStats
    where
        F: FnMut(&mut S, usize),
        R: FnMut(&mut S, T),
    {
        let mut adapter = Callbacks {
            state,
            flip,
            report,
        };
        self.execute(&mut adapter)
    }
}

struct Cursor<'a> {
    hld: &'a HeavyLight,
    segments: Vec<Segment>,
    flips: usize,
}

impl Cursor<'_> {
    #[inline]
    fn flip<T, A: PathAggregate<T> + ?Sized>(&mut self, aggregate: &mut A, node: usize) {
        self.flips += 1;
        aggregate.flip(node);
    }

    /// Moves the active path `fixed..from` to `fixed..to`.
    fn shift<T, A: PathAggregate<T> + ?Sized>(
        &mut self,
        aggregate: &mut A,
        fixed: usize,
        from: usize,
        to: usize,
    ) {
        if from == to {
            return;
        }
        let hld = self.hld;
        // Shared by both paths and by the walk between the two cursors.
        let pivot = hld.intersect(fixed, from, to);
        let mut segments = std::mem::take(&mut self.segments);
        hld.query_into(from, to, false, &mut segments);
        for seg in &segments {
            for pos in seg.positions() {
                self.flip::<T, A>(aggregate, hld.trace[pos]);
            }
        }
        self.flip::<T, A>(aggregate, pivot);
        self.segments = segments;
    }
}

struct Callbacks<'s, S, F, R> {
    state: &'s mut S,
    flip: F,
    report: R,
}

impl<S, T, F, R> PathAggregate<T> for Callbacks<'_, S, F, R>
where
    F: FnMut(&mut S, usize),
    R: FnMut(&mut S, T),
{
    fn flip(&mut self, node: usize) {
        (self.flip)(&mut *self.state, node);
    }

    fn report(&mut self, task: T) {
        (self.report)(&mut *self.state, task);
    }
}

/// `ceil(sqrt(2n))`, at least 1.
pub fn default_bucket_width(n: usize) -> usize {
    let m = 2 * n;
    let r = m.isqrt();
    let w = if r * r < m { r + 1 } else { r };
    w.max(1)
}

/// Cumulative distance along the trace: `euler[i] - euler[i - 1]` is the
/// distance between `trace[i - 1]` and `trace[i]`.
pub(crate) fn euler_offsets(hld: &HeavyLight) -> Vec<usize> {
    let mut euler = Vec::with_capacity(hld.len());
    let mut acc = 0;
    euler.push(acc);
    for pair in hld.trace.windows(2) {
        acc += hld.distance(pair[0], pair[1]);
        euler.push(acc);
    }
    euler
}
